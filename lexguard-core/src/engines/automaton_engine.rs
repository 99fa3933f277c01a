// lexguard-core/src/engines/automaton_engine.rs
//! A `MatchEngine` backed by one Aho-Corasick automaton over every term.
//!
//! Terms from all categories are folded and interned into a single pattern
//! table, so a literal listed under several categories (or in several cases)
//! becomes one automaton pattern. One overlapping pass over the folded text
//! marks which patterns occur; matches are then emitted by walking the store
//! in load order, which yields the same list as `ScanEngine`.
//! License: MIT OR APACHE 2.0

use lexguard_scan::{PatternId, PatternTable, TermAutomaton};

use crate::engine::{CategorySelection, MatchEngine};
use crate::errors::LexiconError;
use crate::lexicon_match::{log_match_debug, DetectionResult, Match};
use crate::store::LexiconStore;

#[derive(Debug)]
pub struct AutomatonEngine {
    store: LexiconStore,
    automaton: TermAutomaton,
    // Pattern id of each term, parallel to `store.partitions()`.
    pattern_ids: Vec<Vec<PatternId>>,
}

impl AutomatonEngine {
    pub fn new(store: LexiconStore) -> Result<Self, LexiconError> {
        let mut table = PatternTable::new();
        let pattern_ids = store
            .partitions()
            .iter()
            .map(|p| p.terms.iter().map(|t| table.intern(t)).collect())
            .collect();

        let automaton = table.compile()?;
        log::debug!(
            "Compiled automaton with {} distinct patterns for {} terms.",
            automaton.pattern_count(),
            store.term_count(None)
        );

        Ok(Self { store, automaton, pattern_ids })
    }
}

impl MatchEngine for AutomatonEngine {
    fn name(&self) -> &'static str { "automaton" }

    fn store(&self) -> &LexiconStore { &self.store }

    fn detect(&self, text: &str, selection: &CategorySelection) -> DetectionResult {
        if selection.is_nothing() {
            return DetectionResult::new(text, Vec::new());
        }

        let presence = self.automaton.scan(text);
        let mut matches = Vec::new();

        if !presence.is_empty() {
            for (partition, ids) in self.store.partitions().iter().zip(&self.pattern_ids) {
                if !selection.includes(&partition.name) { continue; }
                for (term, id) in partition.terms.iter().zip(ids) {
                    if presence.contains(*id) {
                        let m = Match::new(term.as_str(), partition.name.as_str());
                        log_match_debug(module_path!(), &m);
                        matches.push(m);
                    }
                }
            }
        }

        DetectionResult::new(text, matches)
    }
}
