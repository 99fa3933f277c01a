// lexguard-core/src/lib.rs
//! # lexguard Core Library
//!
//! `lexguard-core` answers two questions about arbitrary text, against a set of
//! category-labelled word lexicons: "does this text contain any listed term, and
//! from which categories?" and "give me the text with every match replaced".
//!
//! ## Modules
//!
//! * `store`: the categorized term sets (`LexiconStore`).
//! * `engine`: the `MatchEngine` trait and `CategorySelection`.
//! * `engines`: the scan and automaton implementations of `MatchEngine`.
//! * `redaction`: literal, case-insensitive, sequential term replacement.
//! * `lexicon_match`: result types and term-safe debug logging.
//! * `detector`: the shared, initialize-once `Detector` handle.
//! * `acquisition`: fetching raw word lists and building a store from them.
//! * `config`: the lexicon source table and its YAML loading/merging.
//! * `errors`: the `LexiconError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use lexguard_core::{CategorySelection, Detector, EngineType, LexiconStore};
//!
//! fn main() -> Result<(), lexguard_core::LexiconError> {
//!     let mut store = LexiconStore::new();
//!     store.load("violence", ["knife", "gun"]);
//!     store.load("advertisement", ["buy now"]);
//!
//!     let detector = Detector::new();
//!     detector.install(store, EngineType::Automaton)?;
//!
//!     let result = detector.filter("BUY NOW: knives and a Knife", None, &CategorySelection::All)?;
//!     assert!(result.is_sensitive());
//!     assert_eq!(result.filtered_text, "***: knives and a ***");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Matching itself cannot fail on well-typed input. `LexiconError` covers using
//! a `Detector` before it is initialized and matcher compilation. Configuration
//! and acquisition return `anyhow` errors with context. Unknown categories are
//! never errors.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod acquisition;
pub mod config;
pub mod detector;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod lexicon_match;
pub mod redaction;
pub mod store;

/// Re-exports the configuration types for lexicon sources.
pub use config::{
    merge_config,
    resolve_config,
    LexiconConfig,
    LexiconSource,
    UserLexiconConfig,
    DEFAULT_REPLACEMENT,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::LexiconError;

/// Re-exports the engine trait, category selection and engine selection.
pub use engine::{CategorySelection, MatchEngine};
pub use engines::{build_engine, EngineType};
pub use engines::automaton_engine::AutomatonEngine;
pub use engines::scan_engine::ScanEngine;

pub use detector::Detector;
pub use store::LexiconStore;

/// Re-exports result types.
pub use lexicon_match::{DetectionResult, FilterResult, Match};

/// Re-exports the acquisition entry points.
pub use acquisition::{
    load_lexicons,
    parse_lexicon,
    DirectoryFetcher,
    HttpFetcher,
    LexiconFetcher,
    LoadReport,
};

pub use redaction::redact_terms;
