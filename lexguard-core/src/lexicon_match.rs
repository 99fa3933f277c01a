// lexguard-core/src/lexicon_match.rs
//! Result types for detection and filtering, plus term-safe debug logging.

use serde::{Serialize, Deserialize};
use log::debug;

use lazy_static::lazy_static;

lazy_static! {
    /// Whether matched terms may appear verbatim in debug logs.
    static ref TERM_DEBUG_ALLOWED: bool = {
        std::env::var("LEXGUARD_ALLOW_DEBUG_TERMS")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A lexicon term found in the subject text, and the category that listed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "word")]
    pub term: String,
    pub category: String,
}

impl Match {
    pub fn new(term: impl Into<String>, category: impl Into<String>) -> Self {
        Self { term: term.into(), category: category.into() }
    }
}

/// Outcome of a detection pass. The subject text is kept unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub original_text: String,
    pub matches: Vec<Match>,
}

impl DetectionResult {
    pub fn new(original_text: impl Into<String>, matches: Vec<Match>) -> Self {
        Self { original_text: original_text.into(), matches }
    }

    pub fn is_sensitive(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Distinct matched term strings in match order.
    ///
    /// A term flagged by several categories appears once, at its first position.
    pub fn distinct_terms(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.matches
            .iter()
            .map(|m| m.term.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// Outcome of a filter pass: the detection plus the redacted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    #[serde(flatten)]
    pub detection: DetectionResult,
    pub filtered_text: String,
}

impl FilterResult {
    pub fn is_sensitive(&self) -> bool {
        self.detection.is_sensitive()
    }

    pub fn matches(&self) -> &[Match] {
        &self.detection.matches
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_term(term: &str) -> String {
    if *TERM_DEBUG_ALLOWED {
        term.to_string()
    } else {
        redact_sensitive(term)
    }
}

pub fn log_match_debug(module_path: &str, m: &Match) {
    debug!("{} Found Match: Category='{}', Term='{}'",
        module_path,
        m.category,
        get_loggable_term(&m.term)
    );
}

pub fn log_replacement_debug(module_path: &str, term: &str, replacement: &str, occurrences: usize) {
    debug!(
        "{} Redaction pass: Term='{}', Replacement='{}', Occurrences={}",
        module_path,
        get_loggable_term(term),
        replacement,
        occurrences
    );
}
