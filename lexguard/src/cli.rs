// lexguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the lexguard application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use lexguard_core::EngineType;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lexguard",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect and redact lexicon terms in text",
    long_about = "lexguard checks text against category-labelled word lexicons. It reports which listed terms occur (case-insensitively, anywhere in the text) and can produce a copy of the text with every match replaced. It runs one-shot from the shell or as a JSON-RPC tool server over stdio.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a lexicon configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", global = true, env = "LEXGUARD_CONFIG", help = "Path to a lexicon configuration file (YAML), merged over the built-in sources.")]
    pub config: Option<PathBuf>,

    /// Read lexicon files from a local directory instead of the configured URL.
    #[arg(long = "lexicon-dir", value_name = "DIR", global = true, env = "LEXGUARD_LEXICON_DIR", help = "Read lexicon files from a local directory instead of fetching them.")]
    pub lexicon_dir: Option<PathBuf>,

    /// Select which matching engine to use.
    #[arg(long = "engine", value_name = "ENGINE", global = true, default_value = "automaton", help = "Select a matching engine ('automaton' or 'scan').")]
    pub engine: EngineChoice,

    /// Only load these categories (comma-separated).
    #[arg(long, value_delimiter = ',', global = true, help = "Only load these categories (comma-separated).")]
    pub enable: Vec<String>,

    /// Do not load these categories (comma-separated).
    #[arg(long, value_delimiter = ',', global = true, help = "Do not load these categories (comma-separated).")]
    pub disable: Vec<String>,
}

/// All available commands for the `lexguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serves the lexicon tools as JSON-RPC over stdin/stdout.
    #[command(about = "Serve detect/filter/categories/count as JSON-RPC tools over stdio.")]
    Serve(ServeCommand),

    /// Reports which lexicon terms occur in the input.
    #[command(about = "Report which lexicon terms occur in the input.")]
    Detect(DetectCommand),

    /// Writes the input with every matched term replaced.
    #[command(about = "Write the input with every matched term replaced.")]
    Filter(FilterCommand),

    /// Lists the loaded categories.
    #[command(about = "List the loaded categories.")]
    Categories(ListCommand),

    /// Counts unique lexicon terms.
    #[command(about = "Count unique lexicon terms, in total or for one category.")]
    Count(CountCommand),
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Answer requests while lexicons are still loading.
    #[arg(long, help = "Start answering requests before lexicon loading has finished.")]
    pub eager: bool,
}

/// Arguments for the `detect` command.
#[derive(Parser, Debug)]
pub struct DetectCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Only check these categories (comma-separated).
    #[arg(long, short = 'c', value_delimiter = ',', help = "Only check these categories (comma-separated). An empty value checks nothing.")]
    pub categories: Option<Vec<String>>,

    /// Print the result as JSON.
    #[arg(long, help = "Print the result as JSON.")]
    pub json: bool,

    /// Exit with status 1 when any term is found.
    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if any term is found.")]
    pub fail_on_match: bool,
}

/// Arguments for the `filter` command.
#[derive(Parser, Debug)]
pub struct FilterCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write filtered output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Replacement for every matched term.
    #[arg(long, short = 'r', value_name = "TEXT", help = "Replacement for matched terms (defaults to the configured marker, '***').")]
    pub replacement: Option<String>,

    /// Only filter these categories (comma-separated).
    #[arg(long, short = 'c', value_delimiter = ',', help = "Only filter these categories (comma-separated). An empty value filters nothing.")]
    pub categories: Option<Vec<String>>,

    /// Show a unified diff instead of the filtered text.
    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "diff", help = "Print the result as JSON.")]
    pub json: bool,
}

/// Arguments for the `categories` command.
#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Print the result as JSON.
    #[arg(long, help = "Print the result as JSON.")]
    pub json: bool,
}

/// Arguments for the `count` command.
#[derive(Parser, Debug)]
pub struct CountCommand {
    /// Category to count (all categories if omitted).
    #[arg(value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Print the result as JSON.
    #[arg(long, help = "Print the result as JSON.")]
    pub json: bool,
}

/// Enum for selecting the matching engine.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum EngineChoice {
    /// One Aho-Corasick pass over the text for all terms.
    Automaton,
    /// One substring test per term.
    Scan,
}

impl From<EngineChoice> for EngineType {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Automaton => EngineType::Automaton,
            EngineChoice::Scan => EngineType::Scan,
        }
    }
}

/// Normalizes a `--categories` value: blank entries are dropped, so an empty
/// value becomes an explicit empty selection.
pub fn normalize_categories(categories: Option<Vec<String>>) -> Option<Vec<String>> {
    categories.map(|list| {
        list.into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    })
}
