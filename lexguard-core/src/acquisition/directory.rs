// lexguard-core/src/acquisition/directory.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::acquisition::LexiconFetcher;

/// Reads lexicon files from a local directory (an offline mirror of the
/// remote word lists).
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LexiconFetcher for DirectoryFetcher {
    fn name(&self) -> &str { "directory" }

    async fn fetch(&self, file: &str) -> Result<String> {
        let path = self.root.join(file);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))
    }
}
