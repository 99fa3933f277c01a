// lexguard-scan/src/fold/mod.rs
//! Case folding and pattern interning.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::automaton::{ScanError, TermAutomaton};
use crate::PatternId;

/// Folds a string for case-insensitive comparison.
///
/// Uses the full Unicode lowercase mapping, so a folded string can be longer
/// than its source (e.g. `İ`). Both patterns and haystacks must go through
/// this same function.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Interns folded patterns, handing out one id per distinct folded form.
///
/// Two terms that only differ by case share a [`PatternId`].
#[derive(Debug, Default, Clone)]
pub struct PatternTable {
    patterns: Vec<String>,
    index: BTreeMap<String, PatternId>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `term` and returns the id of its folded form, interning it if new.
    pub fn intern(&mut self, term: &str) -> PatternId {
        let folded = fold_case(term);
        if let Some(&id) = self.index.get(&folded) {
            return id;
        }
        let id = self.patterns.len();
        self.patterns.push(folded.clone());
        self.index.insert(folded, id);
        id
    }

    /// Folded patterns in id order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Compiles the interned patterns into an automaton whose match values are
    /// the pattern ids handed out by [`PatternTable::intern`].
    pub fn compile(&self) -> Result<TermAutomaton, ScanError> {
        TermAutomaton::new(&self.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case_unicode() {
        assert_eq!(fold_case("BadWord"), "badword");
        assert_eq!(fold_case("ÄRGER"), "ärger");
        assert_eq!(fold_case("中文"), "中文");
    }

    #[test]
    fn test_intern_shares_ids_across_case() {
        let mut table = PatternTable::new();
        let a = table.intern("BadWord");
        let b = table.intern("badword");
        let c = table.intern("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.patterns().len(), 2);
        assert_eq!(table.patterns()[a], "badword");
    }
}
