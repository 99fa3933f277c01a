//! Tool definitions and dispatch.
//!
//! Also owns the JSON payload shapes of the four operations, which the CLI
//! reuses for `--json` output.

use lexguard_core::{CategorySelection, DetectionResult, Detector, FilterResult, LexiconError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const DETECT_TOOL: &str = "detect_sensitive_words";
pub const FILTER_TOOL: &str = "filter_sensitive_words";
pub const CATEGORIES_TOOL: &str = "get_categories";
pub const WORD_COUNT_TOOL: &str = "get_word_count";

/// Tool schema definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool arguments.
    pub input_schema: Value,
}

/// Why a tool call failed, mapped onto JSON-RPC error codes by the server.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Error executing tool {tool}: {source}")]
    Execution {
        tool: String,
        #[source]
        source: LexiconError,
    },
}

#[derive(Debug, Deserialize)]
struct DetectArgs {
    text: String,
    #[serde(default)]
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FilterArgs {
    text: String,
    #[serde(default)]
    replacement: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct WordCountArgs {
    #[serde(default)]
    category: Option<String>,
}

/// Dispatches tool calls to a shared [`Detector`].
#[derive(Debug, Clone)]
pub struct ToolHandler {
    detector: Detector,
}

impl ToolHandler {
    pub fn new(detector: Detector) -> Self {
        Self { detector }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: DETECT_TOOL.to_string(),
                description: "Detect sensitive words in text using the categorized lexicons".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The text to check for sensitive words"
                        },
                        "categories": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Optional: specific categories to check (e.g., [\"political\", \"violence\"]); an empty array checks nothing"
                        }
                    },
                    "required": ["text"]
                }),
            },
            Tool {
                name: FILTER_TOOL.to_string(),
                description: "Filter sensitive words from text by replacing them with a replacement string".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The text to filter"
                        },
                        "replacement": {
                            "type": "string",
                            "description": "String to replace sensitive words with (default: \"***\")",
                            "default": self.detector.default_replacement()
                        },
                        "categories": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Optional: specific categories to filter (e.g., [\"political\", \"violence\"]); an empty array filters nothing"
                        }
                    },
                    "required": ["text"]
                }),
            },
            Tool {
                name: CATEGORIES_TOOL.to_string(),
                description: "Get list of available sensitive word categories".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            Tool {
                name: WORD_COUNT_TOOL.to_string(),
                description: "Get the number of words in the sensitive word database".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Optional: get count for specific category only"
                        }
                    }
                }),
            },
        ]
    }

    /// Runs one tool and returns its JSON payload.
    pub fn execute(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        debug!("Executing tool '{}'", name);
        let exec_err = |source| ToolError::Execution { tool: name.to_string(), source };

        match name {
            DETECT_TOOL => {
                let args: DetectArgs = parse_args(name, arguments)?;
                let selection = CategorySelection::from(args.categories);
                let result = self.detector.detect(&args.text, &selection).map_err(exec_err)?;
                Ok(detect_payload(&result))
            }
            FILTER_TOOL => {
                let args: FilterArgs = parse_args(name, arguments)?;
                let selection = CategorySelection::from(args.categories);
                let result = self
                    .detector
                    .filter(&args.text, args.replacement.as_deref(), &selection)
                    .map_err(exec_err)?;
                Ok(filter_payload(&result))
            }
            CATEGORIES_TOOL => {
                let categories = self.detector.categories().map_err(exec_err)?;
                Ok(categories_payload(&categories))
            }
            WORD_COUNT_TOOL => {
                let args: WordCountArgs = parse_args(name, arguments)?;
                // An empty category name means "all", like an omitted one.
                let category = args.category.filter(|c| !c.is_empty());
                let count = self.detector.word_count(category.as_deref()).map_err(exec_err)?;
                Ok(word_count_payload(category.as_deref(), count))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

pub fn detect_payload(result: &DetectionResult) -> Value {
    let count = result.matches.len();
    let summary = if result.is_sensitive() {
        format!("Found {} sensitive word(s) in the text", count)
    } else {
        "No sensitive words detected".to_string()
    };
    json!({
        "isSensitive": result.is_sensitive(),
        "sensitiveWordsCount": count,
        "sensitiveWords": result.matches,
        "summary": summary,
    })
}

pub fn filter_payload(result: &FilterResult) -> Value {
    json!({
        "originalText": result.detection.original_text,
        "filteredText": result.filtered_text,
        "isSensitive": result.is_sensitive(),
        "sensitiveWordsFound": result.matches().len(),
        "sensitiveWords": result.matches(),
    })
}

pub fn categories_payload(categories: &[String]) -> Value {
    json!({
        "categories": categories,
        "totalCategories": categories.len(),
    })
}

pub fn word_count_payload(category: Option<&str>, count: usize) -> Value {
    json!({
        "category": category.unwrap_or("all"),
        "wordCount": count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexguard_core::{EngineType, LexiconStore};

    fn handler() -> ToolHandler {
        let mut store = LexiconStore::new();
        store.load("political", ["regime"]);
        store.load("violence", ["knife", "gun"]);
        let detector = Detector::new();
        detector.install(store, EngineType::Automaton).unwrap();
        ToolHandler::new(detector)
    }

    #[test]
    fn test_list_tools_uses_camel_case_schema_key() {
        let tools = serde_json::to_value(handler().list_tools()).unwrap();
        assert_eq!(tools.as_array().unwrap().len(), 4);
        assert!(tools[0].get("inputSchema").is_some());
        assert_eq!(tools[1]["inputSchema"]["properties"]["replacement"]["default"], json!("***"));
    }

    #[test]
    fn test_detect_payload() {
        let payload = handler()
            .execute(DETECT_TOOL, json!({"text": "A Knife and a REGIME"}))
            .unwrap();
        assert_eq!(payload["isSensitive"], json!(true));
        assert_eq!(payload["sensitiveWordsCount"], json!(2));
        assert_eq!(payload["sensitiveWords"][0], json!({"word": "regime", "category": "political"}));
        assert_eq!(payload["summary"], json!("Found 2 sensitive word(s) in the text"));
    }

    #[test]
    fn test_detect_with_empty_categories_checks_nothing() {
        let payload = handler()
            .execute(DETECT_TOOL, json!({"text": "knife", "categories": []}))
            .unwrap();
        assert_eq!(payload["isSensitive"], json!(false));
        assert_eq!(payload["summary"], json!("No sensitive words detected"));
    }

    #[test]
    fn test_filter_payload_default_and_custom_replacement() {
        let handler = handler();
        let payload = handler.execute(FILTER_TOOL, json!({"text": "gun, knife"})).unwrap();
        assert_eq!(payload["filteredText"], json!("***, ***"));
        assert_eq!(payload["originalText"], json!("gun, knife"));
        assert_eq!(payload["sensitiveWordsFound"], json!(2));

        let payload = handler
            .execute(FILTER_TOOL, json!({"text": "gun, knife", "replacement": "", "categories": ["violence", "nope"]}))
            .unwrap();
        assert_eq!(payload["filteredText"], json!(", "));
    }

    #[test]
    fn test_categories_and_word_count_payloads() {
        let handler = handler();
        let payload = handler.execute(CATEGORIES_TOOL, Value::Null).unwrap();
        assert_eq!(payload, json!({"categories": ["political", "violence"], "totalCategories": 2}));

        let payload = handler.execute(WORD_COUNT_TOOL, json!({})).unwrap();
        assert_eq!(payload, json!({"category": "all", "wordCount": 3}));
        let payload = handler.execute(WORD_COUNT_TOOL, json!({"category": "violence"})).unwrap();
        assert_eq!(payload, json!({"category": "violence", "wordCount": 2}));
        let payload = handler.execute(WORD_COUNT_TOOL, json!({"category": ""})).unwrap();
        assert_eq!(payload, json!({"category": "all", "wordCount": 3}));
        let payload = handler.execute(WORD_COUNT_TOOL, json!({"category": "missing"})).unwrap();
        assert_eq!(payload, json!({"category": "missing", "wordCount": 0}));
    }

    #[test]
    fn test_errors() {
        let handler = handler();
        assert!(matches!(handler.execute("nope", json!({})), Err(ToolError::UnknownTool(_))));
        assert!(matches!(
            handler.execute(DETECT_TOOL, json!({"categories": []})),
            Err(ToolError::InvalidArguments { .. })
        ));

        let uninitialized = ToolHandler::new(Detector::new());
        let err = uninitialized.execute(CATEGORIES_TOOL, json!({})).unwrap_err();
        assert!(matches!(err, ToolError::Execution { source: LexiconError::NotInitialized, .. }));
        assert!(err.to_string().starts_with("Error executing tool get_categories:"));
    }
}
