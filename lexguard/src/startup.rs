// lexguard/src/startup.rs
//! Turns the global CLI options into a populated [`Detector`].
//!
//! Configuration is resolved first (built-in sources, user file, enable/disable
//! filters), then a fetcher is chosen, every source is fetched, and the
//! resulting store is installed into the detector in one step.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lexguard_core::{
    load_lexicons,
    resolve_config,
    Detector,
    DirectoryFetcher,
    EngineType,
    HttpFetcher,
    LexiconConfig,
    LexiconFetcher,
    LoadReport,
};

use crate::cli::GlobalArgs;

/// Everything needed to load the lexicons, detached from clap types.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub config: Option<PathBuf>,
    pub lexicon_dir: Option<PathBuf>,
    pub engine: EngineType,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

impl From<&GlobalArgs> for LoadOptions {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            config: args.config.clone(),
            lexicon_dir: args.lexicon_dir.clone(),
            engine: args.engine.into(),
            enable: args.enable.clone(),
            disable: args.disable.clone(),
        }
    }
}

/// Resolves the configuration and applies the enable/disable filters.
pub fn prepare_config(options: &LoadOptions) -> Result<LexiconConfig> {
    let mut config = resolve_config(options.config.as_deref()).context("Failed to resolve lexicon configuration")?;
    config.set_active_sources(&options.enable, &options.disable);
    debug!("Active categories: {:?}", config.categories());
    Ok(config)
}

/// A local directory wins over the configured base URL.
pub fn build_fetcher(config: &LexiconConfig, lexicon_dir: Option<&Path>) -> Result<Arc<dyn LexiconFetcher>> {
    match lexicon_dir {
        Some(dir) => {
            info!("Reading lexicons from directory {}", dir.display());
            Ok(Arc::new(DirectoryFetcher::new(dir)))
        }
        None => {
            info!("Fetching lexicons from {}", config.base_url);
            Ok(Arc::new(HttpFetcher::from_config(config)?))
        }
    }
}

/// Fetches every configured source and installs the result into `detector`.
///
/// Failed categories are reported, not fatal; the detector is initialized even
/// when nothing could be loaded.
pub async fn load_detector(
    detector: &Detector,
    fetcher: Arc<dyn LexiconFetcher>,
    config: &LexiconConfig,
    engine: EngineType,
) -> Result<LoadReport> {
    let (store, report) = load_lexicons(fetcher, &config.sources).await;
    detector.install(store, engine).context("Failed to initialize detector")?;
    Ok(report)
}

/// Resolves configuration, builds a detector and loads it.
pub async fn initialize(options: &LoadOptions) -> Result<(Detector, LoadReport)> {
    let config = prepare_config(options)?;
    let fetcher = build_fetcher(&config, options.lexicon_dir.as_deref())?;
    let detector = Detector::with_default_replacement(&config.replacement);
    let report = load_detector(&detector, fetcher, &config, options.engine).await?;
    Ok((detector, report))
}

/// One-line description of failed categories, if any.
pub fn failure_summary(report: &LoadReport) -> Option<String> {
    if report.is_complete() {
        return None;
    }
    let names: Vec<&str> = report.failed.iter().map(|f| f.category.as_str()).collect();
    Some(format!(
        "{} of {} categories failed to load: {}",
        report.failed.len(),
        report.failed.len() + report.loaded.len(),
        names.join(", ")
    ))
}
