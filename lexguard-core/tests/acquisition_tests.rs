// lexguard-core/tests/acquisition_tests.rs
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use lexguard_core::{
    load_lexicons, CategorySelection, Detector, DirectoryFetcher, EngineType, HttpFetcher,
    LexiconFetcher, LexiconSource,
};

fn source(file: &str, category: &str) -> LexiconSource {
    LexiconSource { file: file.to_string(), category: category.to_string() }
}

/// Serves canned lists; the slow file finishes last, the broken file fails.
struct ScriptedFetcher;

#[async_trait]
impl LexiconFetcher for ScriptedFetcher {
    fn name(&self) -> &str { "scripted" }

    async fn fetch(&self, file: &str) -> Result<String> {
        match file {
            "slow.txt" => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok("slowpoke\n".to_string())
            }
            "fast.txt" => Ok("# comment\nquick\n\nquick\n".to_string()),
            "broken.txt" => bail!("HTTP 404: Not Found"),
            other => bail!("unexpected file {}", other),
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_failures_are_isolated_and_order_is_configured_order() {
    let sources = vec![
        source("slow.txt", "slow"),
        source("broken.txt", "broken"),
        source("fast.txt", "fast"),
    ];
    let (store, report) = load_lexicons(Arc::new(ScriptedFetcher), &sources).await;

    assert_eq!(store.categories(), vec!["slow", "fast"]);
    assert_eq!(store.term_count(Some("fast")), 1);
    assert_eq!(store.term_count(Some("broken")), 0);
    assert!(!report.is_complete());
    assert_eq!(report.loaded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].category, "broken");
    assert!(report.failed[0].reason.contains("404"));
}

#[tokio::test]
async fn test_all_sources_failing_still_initializes() -> Result<()> {
    let sources = vec![source("broken.txt", "a")];
    let (store, report) = load_lexicons(Arc::new(ScriptedFetcher), &sources).await;
    assert!(store.is_empty());
    assert_eq!(report.failed.len(), 1);

    let detector = Detector::new();
    detector.install(store, EngineType::Automaton)?;
    assert!(detector.categories()?.is_empty());
    assert!(!detector.detect("anything", &CategorySelection::All)?.is_sensitive());
    Ok(())
}

#[tokio::test]
async fn test_directory_fetcher_loads_local_lists() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("violence.txt"), "knife\r\ngun\r\n# comment\r\n")?;
    std::fs::write(dir.path().join("政治类型.txt"), "regime\n")?;

    let sources = vec![
        source("violence.txt", "violence"),
        source("missing.txt", "missing"),
        source("政治类型.txt", "political"),
    ];
    let (store, report) = load_lexicons(Arc::new(DirectoryFetcher::new(dir.path())), &sources).await;

    assert_eq!(store.categories(), vec!["violence", "political"]);
    assert_eq!(store.terms("violence").unwrap(), ["knife", "gun"]);
    assert_eq!(report.failed[0].category, "missing");
    Ok(())
}

#[tokio::test]
async fn test_http_fetcher_against_mock_server() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("GET", "/Vocabulary/ads.txt")
        .with_status(200)
        .with_body("buy now\nfree money\n")
        .create_async()
        .await;
    let missing = server
        .mock("GET", "/Vocabulary/gone.txt")
        .with_status(404)
        .create_async()
        .await;

    let base_url = format!("{}/Vocabulary/", server.url());
    let fetcher = HttpFetcher::new(&base_url, Duration::from_secs(5))?;
    let sources = vec![source("ads.txt", "advertisement"), source("gone.txt", "gone")];
    let (store, report) = load_lexicons(Arc::new(fetcher), &sources).await;

    ok.assert_async().await;
    missing.assert_async().await;
    assert_eq!(store.categories(), vec!["advertisement"]);
    assert_eq!(store.term_count(None), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].reason.contains("HTTP 404"));
    Ok(())
}
