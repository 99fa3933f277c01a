//! JSON-RPC 2.0 tool server over stdio.
//!
//! Exposes the detector's four operations as MCP-style tools:
//! `detect_sensitive_words`, `filter_sensitive_words`, `get_categories` and
//! `get_word_count`.

pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::{Tool, ToolError, ToolHandler};
