// lexguard/src/ui/output_format.rs
//! Status messages written to stderr, colored when the stream is a terminal.
//!
//! License: MIT OR Apache-2.0

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Prints an informational message.
pub fn print_info_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", message.cyan())
    } else {
        writeln!(writer, "{}", message)
    }
}

/// Prints a warning, prefixed with `Warning:`.
pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), message.yellow())
    } else {
        writeln!(writer, "Warning: {}", message)
    }
}

/// Prints an error, prefixed with `Error:`.
pub fn print_error_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), message.red())
    } else {
        writeln!(writer, "Error: {}", message)
    }
}

/// Writes an info message to stderr unless `quiet`.
pub fn info_msg(message: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let stderr = io::stderr();
    let color = stderr.is_terminal();
    let _ = print_info_message(&mut stderr.lock(), message.as_ref(), color);
}

/// Writes a warning to stderr unless `quiet`.
pub fn warn_msg(message: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let stderr = io::stderr();
    let color = stderr.is_terminal();
    let _ = print_warn_message(&mut stderr.lock(), message.as_ref(), color);
}

/// Writes an error to stderr. Never suppressed.
pub fn error_msg(message: impl AsRef<str>) {
    let stderr = io::stderr();
    let color = stderr.is_terminal();
    let _ = print_error_message(&mut stderr.lock(), message.as_ref(), color);
}
