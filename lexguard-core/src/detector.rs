// lexguard-core/src/detector.rs
//! The shared detector handle.
//!
//! A [`Detector`] is created empty by the process entry point, cloned into
//! every request handler, and populated exactly once when lexicon loading has
//! finished. Until then every operation fails with
//! [`LexiconError::NotInitialized`]; afterwards all calls are lock-free reads
//! of the installed engine.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use log::info;

use crate::config::DEFAULT_REPLACEMENT;
use crate::engine::{CategorySelection, MatchEngine};
use crate::engines::{build_engine, EngineType};
use crate::errors::LexiconError;
use crate::lexicon_match::{DetectionResult, FilterResult};
use crate::store::LexiconStore;

#[derive(Debug, Clone)]
pub struct Detector {
    engine: Arc<OnceCell<Arc<dyn MatchEngine>>>,
    default_replacement: Arc<str>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    /// Creates an uninitialized detector.
    pub fn new() -> Self {
        Self::with_default_replacement(DEFAULT_REPLACEMENT)
    }

    /// Creates an uninitialized detector with a custom default replacement.
    pub fn with_default_replacement(replacement: &str) -> Self {
        Self {
            engine: Arc::new(OnceCell::new()),
            default_replacement: Arc::from(replacement),
        }
    }

    /// Builds an engine over `store` and installs it.
    pub fn install(&self, store: LexiconStore, engine_type: EngineType) -> Result<(), LexiconError> {
        if self.is_initialized() {
            return Err(LexiconError::AlreadyInitialized);
        }
        self.install_engine(build_engine(engine_type, store)?)
    }

    /// Installs a prebuilt engine. Only the first install succeeds.
    pub fn install_engine(&self, engine: Arc<dyn MatchEngine>) -> Result<(), LexiconError> {
        let name = engine.name();
        let categories = engine.categories().len();
        let words = engine.word_count(None);
        self.engine.set(engine).map_err(|_| LexiconError::AlreadyInitialized)?;
        info!("Detector initialized with '{}' engine: {} categories, {} words.", name, categories, words);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    pub fn default_replacement(&self) -> &str {
        &self.default_replacement
    }

    fn engine(&self) -> Result<&Arc<dyn MatchEngine>, LexiconError> {
        self.engine.get().ok_or(LexiconError::NotInitialized)
    }

    pub fn detect(&self, text: &str, selection: &CategorySelection) -> Result<DetectionResult, LexiconError> {
        Ok(self.engine()?.detect(text, selection))
    }

    /// Filters `text`; `None` uses the detector's default replacement.
    pub fn filter(
        &self,
        text: &str,
        replacement: Option<&str>,
        selection: &CategorySelection,
    ) -> Result<FilterResult, LexiconError> {
        let replacement = replacement.unwrap_or(&self.default_replacement);
        self.engine()?.filter(text, replacement, selection)
    }

    pub fn categories(&self) -> Result<Vec<String>, LexiconError> {
        Ok(self.engine()?.categories())
    }

    pub fn word_count(&self, category: Option<&str>) -> Result<usize, LexiconError> {
        Ok(self.engine()?.word_count(category))
    }
}
