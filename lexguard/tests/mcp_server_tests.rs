// lexguard/tests/mcp_server_tests.rs
//! End-to-end tests for `lexguard serve`: JSON-RPC lines in on stdin,
//! responses out on stdout.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use tempfile::{tempdir, TempDir};

fn fixture() -> Result<TempDir> {
    let dir = tempdir()?;
    fs::write(dir.path().join("violence.txt"), "knife\ngun\n")?;
    fs::write(dir.path().join("ads.txt"), "buy now\n")?;
    fs::write(
        dir.path().join("config.yaml"),
        "sources:\n  - file: violence.txt\n    category: violence\n  - file: ads.txt\n    category: advertisement\n",
    )?;
    Ok(dir)
}

/// Runs `serve` over the given request lines and returns the parsed responses.
fn serve(dir: &TempDir, requests: &[Value]) -> Result<Vec<Value>> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let output = Command::cargo_bin("lexguard")?
        .env_remove("RUST_LOG")
        .arg("-q")
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("--lexicon-dir")
        .arg(dir.path())
        .args(["--enable", "violence,advertisement", "serve"])
        .write_stdin(input)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let responses = stdout.lines().map(serde_json::from_str).collect::<Result<Vec<Value>, _>>()?;
    Ok(responses)
}

fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_handshake_and_tool_calls() -> Result<()> {
    let dir = fixture()?;
    let responses = serve(
        &dir,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "detect_sensitive_words", "arguments": {"text": "BUY NOW, get a Knife"}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "filter_sensitive_words",
                              "arguments": {"text": "gun show", "replacement": "[x]"}}}),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "get_categories", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
                   "params": {"name": "get_word_count", "arguments": {"category": "violence"}}}),
        ],
    )?;

    // The notification gets no reply.
    assert_eq!(responses.len(), 6);
    let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, vec![&json!(1), &json!(2), &json!(3), &json!(4), &json!(5), &json!(6)]);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("sensitive-lexicon-mcp"));
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 4);

    let detect = tool_payload(&responses[2]);
    assert_eq!(
        detect["sensitiveWords"],
        json!([{"word": "knife", "category": "violence"}, {"word": "buy now", "category": "advertisement"}])
    );
    assert_eq!(detect["summary"], json!("Found 2 sensitive word(s) in the text"));

    let filter = tool_payload(&responses[3]);
    assert_eq!(filter["filteredText"], json!("[x] show"));
    assert_eq!(filter["originalText"], json!("gun show"));

    assert_eq!(
        tool_payload(&responses[4]),
        json!({"categories": ["violence", "advertisement"], "totalCategories": 2})
    );
    assert_eq!(tool_payload(&responses[5]), json!({"category": "violence", "wordCount": 2}));
    Ok(())
}

#[test]
fn test_protocol_errors() -> Result<()> {
    let dir = fixture()?;
    let responses = serve(
        &dir,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "no_such_tool", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "filter_sensitive_words", "arguments": {"replacement": "x"}}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "unknown/method"}),
        ],
    )?;

    assert_eq!(responses[0]["error"]["code"], json!(-32601));
    assert_eq!(responses[0]["error"]["message"], json!("Unknown tool: no_such_tool"));
    assert_eq!(responses[1]["error"]["code"], json!(-32602));
    assert_eq!(responses[2]["error"]["code"], json!(-32601));
    Ok(())
}
