// lexguard/src/main.rs
//! lexguard entry point.
//!
//! Parses arguments, sets up logging, loads lexicons and dispatches the command.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use lexguard::cli::{Cli, Commands};
use lexguard_core::Detector;
use lexguard::commands::{inspect, serve};
use lexguard::logger;
use lexguard::startup::{self, LoadOptions};
use lexguard::ui::output_format;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.global.quiet, cli.global.debug));

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            output_format::error_msg(format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let options = LoadOptions::from(&cli.global);
    let quiet = cli.global.quiet;

    match &cli.command {
        Commands::Serve(cmd) => serve::run_serve(options, cmd).await,
        Commands::Detect(cmd) => inspect::run_detect(&load(&options, quiet).await?, cmd),
        Commands::Filter(cmd) => inspect::run_filter(&load(&options, quiet).await?, cmd, quiet),
        Commands::Categories(cmd) => inspect::run_categories(&load(&options, quiet).await?, cmd),
        Commands::Count(cmd) => inspect::run_count(&load(&options, quiet).await?, cmd),
    }
}

async fn load(options: &LoadOptions, quiet: bool) -> Result<Detector> {
    let (detector, report) = startup::initialize(options).await?;
    if let Some(summary) = startup::failure_summary(&report) {
        output_format::warn_msg(summary, quiet);
    }
    Ok(detector)
}
