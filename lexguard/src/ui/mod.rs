//! Terminal output helpers.

pub mod diff_viewer;
pub mod output_format;
