// lexguard/src/lib.rs
//! # lexguard CLI Application
//!
//! Command-line front end and stdio tool server for `lexguard-core`. The
//! binary loads the configured lexicons once, then either answers a single
//! command (`detect`, `filter`, `categories`, `count`) or serves all four
//! operations as JSON-RPC tools (`serve`).

pub mod cli;
pub mod commands;
pub mod logger;
pub mod mcp;
pub mod startup;
pub mod ui;

pub use mcp::McpServer;
pub use startup::{initialize, LoadOptions};
