// lexguard-scan/src/automaton/mod.rs
use daachorse::DoubleArrayAhoCorasick;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::fold::fold_case;
use crate::PatternId;

/// Errors raised while compiling an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Patterns must be non-empty once folded.
    EmptyPattern(PatternId),
    /// The underlying double-array construction failed.
    Build(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::EmptyPattern(id) => write!(f, "pattern #{} is empty", id),
            ScanError::Build(reason) => write!(f, "failed to build automaton: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScanError {}

/// Which patterns were seen in one haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    hits: Vec<bool>,
}

impl Presence {
    pub fn contains(&self, id: PatternId) -> bool {
        self.hits.get(id).copied().unwrap_or(false)
    }

    /// Number of distinct patterns seen.
    pub fn count(&self) -> usize {
        self.hits.iter().filter(|hit| **hit).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// An Aho-Corasick automaton over already-folded, unique patterns.
///
/// Matching is a pure containment test: a pattern is present if it occurs
/// anywhere in the folded haystack, including mid-word and overlapping with
/// other patterns.
pub struct TermAutomaton {
    // `None` when built from zero patterns; nothing can ever be present.
    automaton: Option<DoubleArrayAhoCorasick<u32>>,
    pattern_count: usize,
}

impl fmt::Debug for TermAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermAutomaton")
         .field("automaton", &"<DoubleArrayAhoCorasick>")
         .field("pattern_count", &self.pattern_count)
         .finish()
    }
}

impl TermAutomaton {
    /// Builds an automaton. Pattern `i` reports as [`PatternId`] `i`.
    pub fn new(patterns: &[String]) -> Result<Self, ScanError> {
        if let Some(id) = patterns.iter().position(|p| p.is_empty()) {
            return Err(ScanError::EmptyPattern(id));
        }
        if patterns.is_empty() {
            return Ok(Self { automaton: None, pattern_count: 0 });
        }

        let automaton = DoubleArrayAhoCorasick::new(patterns)
            .map_err(|e| ScanError::Build(e.to_string()))?;

        Ok(Self {
            automaton: Some(automaton),
            pattern_count: patterns.len(),
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Marks every pattern occurring in `folded_haystack`.
    ///
    /// The haystack must already be folded with [`fold_case`].
    pub fn scan_folded(&self, folded_haystack: &str) -> Presence {
        let mut hits = vec![false; self.pattern_count];
        if let Some(automaton) = &self.automaton {
            for matched in automaton.find_overlapping_iter(folded_haystack) {
                hits[matched.value() as usize] = true;
            }
        }
        Presence { hits }
    }

    /// Folds `haystack` and marks every pattern occurring in it.
    pub fn scan(&self, haystack: &str) -> Presence {
        self.scan_folded(&fold_case(haystack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::PatternTable;

    #[test]
    fn test_overlapping_patterns_are_all_reported() {
        let mut table = PatternTable::new();
        let ab = table.intern("ab");
        let abc = table.intern("abc");
        let bc = table.intern("BC");
        let zz = table.intern("zz");
        let automaton = table.compile().unwrap();

        let presence = automaton.scan("xABCx");
        assert!(presence.contains(ab));
        assert!(presence.contains(abc));
        assert!(presence.contains(bc));
        assert!(!presence.contains(zz));
        assert_eq!(presence.count(), 3);
    }

    #[test]
    fn test_mid_word_containment() {
        let mut table = PatternTable::new();
        let cat = table.intern("cat");
        let automaton = table.compile().unwrap();
        assert!(automaton.scan("concatenate").contains(cat));
    }

    #[test]
    fn test_empty_automaton_never_matches() {
        let automaton = TermAutomaton::new(&[]).unwrap();
        let presence = automaton.scan("anything at all");
        assert!(presence.is_empty());
        assert!(!presence.contains(0));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        let patterns = vec![String::from("ok"), String::new()];
        assert_eq!(TermAutomaton::new(&patterns).unwrap_err(), ScanError::EmptyPattern(1));
    }

    #[test]
    fn test_multibyte_patterns() {
        let mut table = PatternTable::new();
        let id = table.intern("敏感词");
        let automaton = table.compile().unwrap();
        assert!(automaton.scan("这里有敏感词出现").contains(id));
        assert!(!automaton.scan("这里没有").contains(id));
    }
}
