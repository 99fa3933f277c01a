//! Sequential literal redaction.
//!
//! Matched terms are replaced one term at a time, in match order, and every
//! pass runs over the output of the previous pass. With overlapping terms the
//! order is observable: terms `"ab"` then `"abc"` turn `"xabcx"` into `"xXcx"`,
//! because `"abc"` no longer exists once `"ab"` has been replaced.

pub mod compiler;

use regex::NoExpand;

use crate::errors::LexiconError;
use crate::lexicon_match::log_replacement_debug;
use compiler::get_or_compile_term;

/// Replaces every case-insensitive occurrence of each term with `replacement`.
///
/// `replacement` is inserted literally; `$1` or `$0` are not expanded.
pub fn redact_terms(text: &str, terms: &[&str], replacement: &str) -> Result<String, LexiconError> {
    let mut filtered = text.to_string();

    for term in terms {
        let compiled = get_or_compile_term(term)?;
        if log::log_enabled!(log::Level::Debug) {
            let occurrences = compiled.regex.find_iter(&filtered).count();
            log_replacement_debug(module_path!(), term, replacement, occurrences);
        }
        filtered = compiled.regex.replace_all(&filtered, NoExpand(replacement)).into_owned();
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_order_is_observable() {
        assert_eq!(redact_terms("xabcx", &["ab", "abc"], "X").unwrap(), "xXcx");
        assert_eq!(redact_terms("xabcx", &["abc", "ab"], "X").unwrap(), "xXx");
    }

    #[test]
    fn test_case_insensitive_and_surrounding_case_preserved() {
        let out = redact_terms("Say BADWORD and BadWord, OK?", &["badword"], "***").unwrap();
        assert_eq!(out, "Say *** and ***, OK?");
    }

    #[test]
    fn test_replacement_is_literal() {
        assert_eq!(redact_terms("foo bar", &["foo"], "$0-$1").unwrap(), "$0-$1 bar");
    }

    #[test]
    fn test_empty_replacement_deletes() {
        assert_eq!(redact_terms("a-bad-b", &["bad"], "").unwrap(), "a--b");
    }

    #[test]
    fn test_no_terms_is_identity() {
        assert_eq!(redact_terms("untouched", &[], "***").unwrap(), "untouched");
    }
}
