//! One-shot commands: `detect`, `filter`, `categories` and `count`.
//!
//! Each runs against an already-loaded [`Detector`] and writes either a short
//! human-readable report or the same JSON payload the tool server returns.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use lexguard_core::{CategorySelection, DetectionResult, Detector};

use crate::cli::{normalize_categories, CountCommand, DetectCommand, FilterCommand, ListCommand};
use crate::mcp::tools::{categories_payload, detect_payload, filter_payload, word_count_payload};
use crate::ui::{diff_viewer, output_format};

/// Reads the whole input from `path`, or from stdin when absent.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_json<W: Write>(writer: &mut W, payload: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(payload).context("Failed to encode JSON output")?;
    writeln!(writer, "{}", text)?;
    Ok(())
}

/// Plain-text detection report: one `term<TAB>category` line per match.
pub fn write_detection_report<W: Write>(writer: &mut W, result: &DetectionResult) -> io::Result<()> {
    if !result.is_sensitive() {
        return writeln!(writer, "No sensitive words detected");
    }
    writeln!(writer, "Found {} sensitive word(s) in the text", result.matches.len())?;
    for m in &result.matches {
        writeln!(writer, "{}\t{}", m.term, m.category)?;
    }
    Ok(())
}

pub fn run_detect(detector: &Detector, cmd: &DetectCommand) -> Result<ExitCode> {
    let input = read_input(cmd.input_file.as_deref())?;
    let selection = CategorySelection::from(normalize_categories(cmd.categories.clone()));
    let result = detector.detect(&input, &selection)?;
    info!("Detection finished with {} match(es).", result.matches.len());

    let mut stdout = io::stdout().lock();
    if cmd.json {
        write_json(&mut stdout, &detect_payload(&result))?;
    } else {
        write_detection_report(&mut stdout, &result)?;
    }

    if cmd.fail_on_match && result.is_sensitive() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run_filter(detector: &Detector, cmd: &FilterCommand, quiet: bool) -> Result<ExitCode> {
    let input = read_input(cmd.input_file.as_deref())?;
    let selection = CategorySelection::from(normalize_categories(cmd.categories.clone()));
    let result = detector.filter(&input, cmd.replacement.as_deref(), &selection)?;
    info!("Filter finished with {} match(es).", result.matches().len());

    match &cmd.output {
        Some(path) => write_filter_output(path, cmd, &input, &result.filtered_text, &filter_payload(&result), quiet)?,
        None => {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            let mut writer = stdout.lock();
            if cmd.json {
                write_json(&mut writer, &filter_payload(&result))?;
            } else if cmd.diff {
                diff_viewer::print_diff(&input, &result.filtered_text, &mut writer, supports_color)?;
            } else {
                write!(writer, "{}", result.filtered_text)?;
                writer.flush()?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn write_filter_output(
    path: &Path,
    cmd: &FilterCommand,
    input: &str,
    filtered: &str,
    payload: &Value,
    quiet: bool,
) -> Result<()> {
    output_format::info_msg(format!("Writing filtered content to file: {}", path.display()), quiet);
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    if cmd.json {
        write_json(&mut file, payload)?;
    } else if cmd.diff {
        diff_viewer::print_diff(input, filtered, &mut file, false)?;
    } else {
        file.write_all(filtered.as_bytes())?;
    }
    Ok(())
}

pub fn run_categories(detector: &Detector, cmd: &ListCommand) -> Result<ExitCode> {
    let categories = detector.categories()?;
    let mut stdout = io::stdout().lock();
    if cmd.json {
        write_json(&mut stdout, &categories_payload(&categories))?;
    } else {
        for category in &categories {
            writeln!(stdout, "{}", category)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run_count(detector: &Detector, cmd: &CountCommand) -> Result<ExitCode> {
    let category = cmd.category.as_deref().filter(|c| !c.is_empty());
    let count = detector.word_count(category)?;
    let mut stdout = io::stdout().lock();
    if cmd.json {
        write_json(&mut stdout, &word_count_payload(category, count))?;
    } else {
        writeln!(stdout, "{}", count)?;
    }
    Ok(ExitCode::SUCCESS)
}
