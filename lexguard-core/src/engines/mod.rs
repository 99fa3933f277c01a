// lexguard-core/src/engines/mod.rs
//! Concrete `MatchEngine` implementations.
//!
//! * `scan_engine`: the reference algorithm, one substring test per term.
//! * `automaton_engine`: one Aho-Corasick pass over the text for all terms.
//!
//! Both produce identical results; the automaton is the default.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod automaton_engine;
pub mod scan_engine;

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::engine::MatchEngine;
use crate::errors::LexiconError;
use crate::store::LexiconStore;
use automaton_engine::AutomatonEngine;
use scan_engine::ScanEngine;

/// Selects which engine a [`crate::Detector`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Scan,
    #[default]
    Automaton,
}

/// Builds the selected engine over `store`, taking ownership of it.
pub fn build_engine(engine_type: EngineType, store: LexiconStore) -> Result<Arc<dyn MatchEngine>, LexiconError> {
    let engine: Arc<dyn MatchEngine> = match engine_type {
        EngineType::Scan => Arc::new(ScanEngine::new(store)),
        EngineType::Automaton => Arc::new(AutomatonEngine::new(store)?),
    };
    log::debug!("Built '{}' engine over {} terms.", engine.name(), engine.word_count(None));
    Ok(engine)
}
