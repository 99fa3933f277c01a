//! compiler.rs - Compiles and caches literal, case-insensitive term matchers.
//!
//! Terms are arbitrary lexicon strings, so every term is escaped before it is
//! handed to the regex engine: `a.b` only ever matches the three characters
//! `a`, `.`, `b`. Compiled matchers are kept in a process-wide cache keyed by
//! the term itself, so repeated filter calls over the same lexicon compile
//! each term once.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use lazy_static::lazy_static;
use std::sync::{Arc, PoisonError, RwLock};
use std::collections::HashMap;

use crate::errors::LexiconError;

/// Terms longer than this are compiled per call instead of cached.
pub const MAX_TERM_LENGTH: usize = 1024;

/// A single compiled term matcher.
#[derive(Debug)]
pub struct CompiledTerm {
    /// The literal term as stored in the lexicon.
    pub term: String,
    /// Case-insensitive matcher for the escaped term.
    pub regex: Regex,
}

lazy_static! {
    static ref COMPILED_TERM_CACHE: RwLock<HashMap<String, Arc<CompiledTerm>>> = RwLock::new(HashMap::new());
}

/// Compiles `term` into a case-insensitive literal matcher.
pub fn compile_term(term: &str) -> Result<CompiledTerm, LexiconError> {
    let regex = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| LexiconError::TermCompilation(term.to_string(), e))?;

    Ok(CompiledTerm { term: term.to_string(), regex })
}

/// Gets a compiled matcher from the cache, compiling it if not found.
pub fn get_or_compile_term(term: &str) -> Result<Arc<CompiledTerm>, LexiconError> {
    if term.len() > MAX_TERM_LENGTH {
        debug!("Term of {} bytes exceeds cache limit; compiling uncached.", term.len());
        return compile_term(term).map(Arc::new);
    }

    {
        let cache = COMPILED_TERM_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(compiled) = cache.get(term) {
            return Ok(Arc::clone(compiled));
        }
    } // Read lock is released here.

    let compiled = Arc::new(compile_term(term)?);
    COMPILED_TERM_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(term.to_string(), Arc::clone(&compiled));

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metacharacters_are_literal() {
        let compiled = compile_term("a.b*").unwrap();
        assert!(compiled.regex.is_match("xxA.B*yy"));
        assert!(!compiled.regex.is_match("axbbb"));
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let first = get_or_compile_term("cache-me").unwrap();
        let second = get_or_compile_term("cache-me").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_long_terms_bypass_cache() {
        let long = "x".repeat(MAX_TERM_LENGTH + 1);
        let first = get_or_compile_term(&long).unwrap();
        let second = get_or_compile_term(&long).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(first.regex.is_match(&long.to_uppercase()));
    }
}
