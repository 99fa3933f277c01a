// lexguard-scan/src/lib.rs
//! Case-folding multi-pattern containment scanning.
//!
//! The crate answers one question quickly: which of a fixed set of literal
//! patterns occur anywhere inside a haystack, ignoring case. Patterns are
//! interned through a [`fold::PatternTable`] (which folds and dedupes them)
//! and compiled into a [`automaton::TermAutomaton`].
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod automaton;
pub mod fold;

pub use automaton::{Presence, ScanError, TermAutomaton};
pub use fold::{fold_case, PatternTable};

/// Index of an interned pattern inside a [`PatternTable`].
pub type PatternId = usize;
