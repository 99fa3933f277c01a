//! errors.rs - Custom error types for the lexguard-core library.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `lexguard-core`.
///
/// Unknown categories are deliberately absent: selecting a category that is not
/// loaded contributes zero matches and is never an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LexiconError {
    #[error("Lexicon detector not initialized; lexicons are still loading")]
    NotInitialized,

    #[error("Lexicon detector is already initialized")]
    AlreadyInitialized,

    #[error("Failed to compile term matcher for '{0}': {1}")]
    TermCompilation(String, regex::Error),

    #[error("Failed to build term automaton: {0}")]
    AutomatonBuild(String),
}

impl From<lexguard_scan::ScanError> for LexiconError {
    fn from(err: lexguard_scan::ScanError) -> Self {
        LexiconError::AutomatonBuild(err.to_string())
    }
}
