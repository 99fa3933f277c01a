//! Line-delimited JSON-RPC server.
//!
//! Reads one request per line from any async reader and writes one response
//! per line to any async writer. `serve` wires it to stdin/stdout; tests use
//! in-memory buffers.

use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use super::tools::{ToolError, ToolHandler};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "sensitive-lexicon-mcp";

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Serves the lexicon tools over a line-oriented stream.
#[derive(Debug, Clone)]
pub struct McpServer {
    tool_handler: ToolHandler,
}

impl McpServer {
    pub fn new(tool_handler: ToolHandler) -> Self {
        Self { tool_handler }
    }

    /// Processes requests until the reader reaches EOF.
    ///
    /// Malformed lines are answered with an error and skipped; only I/O
    /// failures on the stream itself end the loop early.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Tool server started, listening for requests...");
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).await.context("Failed to read request")?;
            if read == 0 {
                debug!("Received EOF, shutting down");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.process_line(line),
                Err(e) => {
                    warn!("Rejecting request that is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(format!("Invalid UTF-8 in request: {}", e)),
                    ))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let encoded = match serde_json::to_string(&response) {
                Ok(encoded) => encoded,
                Err(e) => {
                    error!("Failed to serialize response: {}", e);
                    let fallback = JsonRpcResponse::error(
                        response.id.clone(),
                        JsonRpcError::internal_error(format!("Serialization error: {}", e)),
                    );
                    serde_json::to_string(&fallback).context("Failed to serialize error response")?
                }
            };

            writer.write_all(encoded.as_bytes()).await.context("Failed to write response")?;
            writer.write_all(b"\n").await.context("Failed to write response")?;
            writer.flush().await.context("Failed to flush response")?;
        }

        info!("Tool server shutting down");
        Ok(())
    }

    /// Handles one input line. Returns `None` for blank lines and notifications.
    pub fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Rejecting unparseable request: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                ));
            }
        };

        // Valid JSON that is not a request object; echo its id when one can be read.
        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejecting malformed request: {}", e);
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        debug!("Received '{}' request", request.method);

        if request.is_notification() {
            debug!("Notification '{}' acknowledged without reply", request.method);
            return None;
        }

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        Some(match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            other => JsonRpcResponse::error(
                request.id.clone(),
                JsonRpcError::method_not_found(format!("Method not found: {}", other)),
            ),
        })
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = self.tool_handler.list_tools();
        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: ToolCallParams = match serde_json::from_value(request.params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Invalid tool call parameters: {}", e)),
                );
            }
        };

        match self.tool_handler.execute(&params.name, params.arguments) {
            Ok(payload) => {
                let text = match serde_json::to_string_pretty(&payload) {
                    Ok(text) => text,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            request.id,
                            JsonRpcError::internal_error(format!("Serialization error: {}", e)),
                        );
                    }
                };
                JsonRpcResponse::success(
                    request.id,
                    json!({ "content": [{ "type": "text", "text": text }] }),
                )
            }
            Err(e) => {
                warn!("Tool '{}' failed: {}", params.name, e);
                let error = match &e {
                    ToolError::UnknownTool(_) => JsonRpcError::method_not_found(e.to_string()),
                    ToolError::InvalidArguments { .. } => JsonRpcError::invalid_params(e.to_string()),
                    ToolError::Execution { .. } => JsonRpcError::internal_error(e.to_string()),
                };
                JsonRpcResponse::error(request.id, error)
            }
        }
    }
}
