//! The `serve` command: the tool server on stdin/stdout.
//!
//! Lexicon loading runs as a separate task that installs into the shared
//! detector when every source has been attempted. Unless `--eager` is given,
//! requests are not read until that has happened, and a failed load ends the
//! command instead of serving an uninitialized detector.

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::task::JoinHandle;

use lexguard_core::{Detector, EngineType, LexiconConfig, LexiconFetcher, LoadReport};

use crate::cli::ServeCommand;
use crate::mcp::{McpServer, ToolHandler};
use crate::startup::{build_fetcher, failure_summary, load_detector, prepare_config, LoadOptions};

pub async fn run_serve(options: LoadOptions, cmd: &ServeCommand) -> Result<ExitCode> {
    let config = prepare_config(&options)?;
    let fetcher = build_fetcher(&config, options.lexicon_dir.as_deref())?;
    let detector = Detector::with_default_replacement(&config.replacement);

    let loader = spawn_loader(detector.clone(), fetcher, config, options.engine);

    if cmd.eager {
        // Tool calls answer NotInitialized until the task installs the engine.
        info!("Serving before lexicon loading has finished.");
    } else {
        loader.await.context("Lexicon loader task failed")??;
    }

    let server = McpServer::new(ToolHandler::new(detector));
    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(ExitCode::SUCCESS)
}

/// Loads every source into `detector` on a background task.
///
/// The outcome is logged either way; callers that wait on the handle also get
/// the error back.
pub fn spawn_loader(
    detector: Detector,
    fetcher: Arc<dyn LexiconFetcher>,
    config: LexiconConfig,
    engine: EngineType,
) -> JoinHandle<Result<LoadReport>> {
    tokio::spawn(async move {
        match load_detector(&detector, fetcher, &config, engine).await {
            Ok(report) => {
                if let Some(summary) = failure_summary(&report) {
                    warn!("{}", summary);
                }
                info!("Lexicons ready: {} categories loaded.", report.loaded.len());
                Ok(report)
            }
            Err(e) => {
                error!("Lexicon loading failed: {:#}", e);
                Err(e)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexguard_core::{DirectoryFetcher, LexiconSource, LexiconStore};
    use std::fs;
    use tempfile::tempdir;

    fn config_for(file: &str, category: &str) -> LexiconConfig {
        LexiconConfig {
            sources: vec![LexiconSource { file: file.to_string(), category: category.to_string() }],
            ..LexiconConfig::default()
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_loader_reports_success() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("knives.txt"), "knife\n").unwrap();
        let detector = Detector::new();

        let report = spawn_loader(
            detector.clone(),
            Arc::new(DirectoryFetcher::new(dir.path())),
            config_for("knives.txt", "blades"),
            EngineType::Scan,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(report.loaded.len(), 1);
        assert!(detector.is_initialized());
    }

    #[test_log::test(tokio::test)]
    async fn test_loader_returns_install_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("knives.txt"), "knife\n").unwrap();
        let detector = Detector::new();
        detector.install(LexiconStore::new(), EngineType::Scan).unwrap();

        let outcome = spawn_loader(
            detector,
            Arc::new(DirectoryFetcher::new(dir.path())),
            config_for("knives.txt", "blades"),
            EngineType::Automaton,
        )
        .await
        .unwrap();

        let err = outcome.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to initialize detector"));
    }
}
