// lexguard-core/src/engine.rs
//! Defines the core `MatchEngine` trait and the category selection type.
//!
//! The `MatchEngine` trait provides a pluggable interface for different
//! matching strategies over the same [`LexiconStore`]. Every engine must
//! produce exactly the same matches in exactly the same order for the same
//! store, text and selection; engines only differ in how fast they get there.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeSet;
use std::fmt;

use crate::errors::LexiconError;
use crate::lexicon_match::{DetectionResult, FilterResult};
use crate::redaction::redact_terms;
use crate::store::LexiconStore;

/// Which categories a detect or filter call checks.
///
/// `All` is what an omitted argument means. `Only` with an empty set is an
/// explicit request to check nothing and always yields zero matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl CategorySelection {
    pub fn only<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategorySelection::Only(categories.into_iter().map(Into::into).collect())
    }

    /// Whether `category` is checked. Unknown names are simply never reached.
    pub fn includes(&self, category: &str) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(set) => set.contains(category),
        }
    }

    /// True for an explicit empty selection.
    pub fn is_nothing(&self) -> bool {
        matches!(self, CategorySelection::Only(set) if set.is_empty())
    }
}

impl From<Option<Vec<String>>> for CategorySelection {
    fn from(categories: Option<Vec<String>>) -> Self {
        match categories {
            None => CategorySelection::All,
            Some(list) => CategorySelection::only(list),
        }
    }
}

/// A trait that defines detection and redaction over a lexicon.
///
/// Implementations own their store and never mutate it, so a single engine can
/// be shared across threads and called concurrently without coordination.
pub trait MatchEngine: Send + Sync + fmt::Debug {
    /// Short engine identifier used in logs.
    fn name(&self) -> &'static str;

    /// The lexicon this engine matches against.
    fn store(&self) -> &LexiconStore;

    /// Finds every term of the selected categories occurring in `text`.
    ///
    /// Matching is a case-insensitive substring test, not word-boundary aware.
    /// Each `(term, category)` pair is reported once, ordered by category load
    /// order and then term insertion order.
    fn detect(&self, text: &str, selection: &CategorySelection) -> DetectionResult;

    /// Detects, then replaces every occurrence of every matched term.
    ///
    /// Distinct matched terms are replaced one pass at a time in match order,
    /// each pass operating on the previous pass's output.
    fn filter(
        &self,
        text: &str,
        replacement: &str,
        selection: &CategorySelection,
    ) -> Result<FilterResult, LexiconError> {
        let detection = self.detect(text, selection);
        let filtered_text = if detection.is_sensitive() {
            redact_terms(text, &detection.distinct_terms(), replacement)?
        } else {
            text.to_string()
        };
        Ok(FilterResult { detection, filtered_text })
    }

    /// Loaded category ids in load order.
    fn categories(&self) -> Vec<String> {
        self.store().categories()
    }

    /// Unique term count for one category, or all categories when `None`.
    fn word_count(&self, category: Option<&str>) -> usize {
        self.store().term_count(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_option() {
        assert_eq!(CategorySelection::from(None), CategorySelection::All);
        let empty = CategorySelection::from(Some(Vec::new()));
        assert!(empty.is_nothing());
        assert!(!empty.includes("political"));
        let some = CategorySelection::from(Some(vec!["a".to_string(), "a".to_string()]));
        assert!(some.includes("a"));
        assert!(!some.includes("b"));
        assert!(!CategorySelection::All.is_nothing());
    }
}
