// lexguard-core/src/engines/scan_engine.rs
//! A `MatchEngine` that tests every selected term against the whole text.
//! Cost is O(categories x terms x text); kept as the reference behaviour.
//! License: MIT OR APACHE 2.0

use lexguard_scan::fold_case;

use crate::engine::{CategorySelection, MatchEngine};
use crate::lexicon_match::{log_match_debug, DetectionResult, Match};
use crate::store::LexiconStore;

#[derive(Debug)]
pub struct ScanEngine {
    store: LexiconStore,
    // Folded terms, parallel to `store.partitions()`.
    folded_terms: Vec<Vec<String>>,
}

impl ScanEngine {
    pub fn new(store: LexiconStore) -> Self {
        let folded_terms = store
            .partitions()
            .iter()
            .map(|p| p.terms.iter().map(|t| fold_case(t)).collect())
            .collect();
        Self { store, folded_terms }
    }
}

impl MatchEngine for ScanEngine {
    fn name(&self) -> &'static str { "scan" }

    fn store(&self) -> &LexiconStore { &self.store }

    fn detect(&self, text: &str, selection: &CategorySelection) -> DetectionResult {
        if selection.is_nothing() {
            return DetectionResult::new(text, Vec::new());
        }

        let folded_text = fold_case(text);
        let mut matches = Vec::new();

        for (partition, folded) in self.store.partitions().iter().zip(&self.folded_terms) {
            if !selection.includes(&partition.name) { continue; }
            for (term, folded_term) in partition.terms.iter().zip(folded) {
                if folded_text.contains(folded_term.as_str()) {
                    let m = Match::new(term.as_str(), partition.name.as_str());
                    log_match_debug(module_path!(), &m);
                    matches.push(m);
                }
            }
        }

        DetectionResult::new(text, matches)
    }
}
