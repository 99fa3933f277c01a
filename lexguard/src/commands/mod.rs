//! Command implementations for the `lexguard` binary.

pub mod inspect;
pub mod serve;
