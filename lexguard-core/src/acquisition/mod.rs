//! Lexicon acquisition.
//!
//! Fetches raw word lists, one per configured source, and assembles them into a
//! [`LexiconStore`]. Every source is fetched concurrently and in isolation: a
//! failing or slow source never prevents the others from loading, and a source
//! that fails is simply absent from the resulting store.
//!
//! License: MIT OR APACHE 2.0

pub mod directory;
pub mod http;

use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::task::JoinSet;

use crate::config::LexiconSource;
use crate::store::LexiconStore;

pub use directory::DirectoryFetcher;
pub use http::HttpFetcher;

/// Retrieves the raw contents of one lexicon file.
#[async_trait]
pub trait LexiconFetcher: Send + Sync {
    /// Short fetcher identifier used in logs.
    fn name(&self) -> &str;

    /// Returns the raw text of `file`.
    async fn fetch(&self, file: &str) -> Result<String>;
}

/// A category that was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedCategory {
    pub category: String,
    pub terms: usize,
}

/// A category that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCategory {
    pub category: String,
    pub file: String,
    pub reason: String,
}

/// What happened to each configured source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<LoadedCategory>,
    pub failed: Vec<FailedCategory>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Splits a raw word list into terms.
///
/// Lines are trimmed; empty lines and `#` comment lines are dropped.
pub fn parse_lexicon(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Fetches every source concurrently and loads the successful ones.
///
/// Categories enter the store in configured order, whatever order the fetches
/// complete in.
pub async fn load_lexicons(
    fetcher: Arc<dyn LexiconFetcher>,
    sources: &[LexiconSource],
) -> (LexiconStore, LoadReport) {
    info!("Loading {} lexicon sources via '{}' fetcher...", sources.len(), fetcher.name());

    let mut tasks = JoinSet::new();
    for (index, source) in sources.iter().cloned().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        tasks.spawn(async move {
            let outcome = fetcher.fetch(&source.file).await.map(|raw| parse_lexicon(&raw));
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<Result<Vec<String>>>> = sources.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => warn!("A lexicon fetch task did not complete: {}", e),
        }
    }

    let mut store = LexiconStore::new();
    let mut report = LoadReport::default();

    for (source, outcome) in sources.iter().zip(outcomes) {
        match outcome {
            Some(Ok(terms)) => {
                store.load(&source.category, terms);
                let count = store.term_count(Some(&source.category));
                debug!("Loaded '{}' from {} ({} terms).", source.category, source.file, count);
                report.loaded.push(LoadedCategory { category: source.category.clone(), terms: count });
            }
            Some(Err(e)) => {
                warn!("Failed to load {} for category '{}': {:#}", source.file, source.category, e);
                report.failed.push(FailedCategory {
                    category: source.category.clone(),
                    file: source.file.clone(),
                    reason: format!("{:#}", e),
                });
            }
            None => {
                warn!("Fetch for category '{}' was aborted.", source.category);
                report.failed.push(FailedCategory {
                    category: source.category.clone(),
                    file: source.file.clone(),
                    reason: "fetch task aborted".to_string(),
                });
            }
        }
    }

    info!(
        "Lexicon loading finished: {} categories loaded, {} failed, {} words.",
        report.loaded.len(),
        report.failed.len(),
        store.term_count(None)
    );
    (store, report)
}
