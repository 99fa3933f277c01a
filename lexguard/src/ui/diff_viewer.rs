// lexguard/src/ui/diff_viewer.rs
//! Line diff between the original and the filtered text.
//!
//! Removed lines are red, inserted lines green, context lines plain. Colors are
//! only emitted when the writer is a terminal.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a diff of `original` against `filtered` to `writer`.
pub fn print_diff<W: Write>(original: &str, filtered: &str, writer: &mut W, supports_color: bool) -> io::Result<()> {
    let header = "--- Diff Analysis ---";
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let patch = create_patch(original, filtered);
    if patch.hunks().is_empty() {
        return writeln!(writer, "No changes detected.");
    }

    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    let s = s.trim_end_matches('\n');
                    if supports_color {
                        writeln!(writer, "{}", format!("- {}", s).red())?;
                    } else {
                        writeln!(writer, "- {}", s)?;
                    }
                }
                DiffLine::Insert(s) => {
                    let s = s.trim_end_matches('\n');
                    if supports_color {
                        writeln!(writer, "{}", format!("+ {}", s).green())?;
                    } else {
                        writeln!(writer, "+ {}", s)?;
                    }
                }
                DiffLine::Context(s) => writeln!(writer, "  {}", s.trim_end_matches('\n'))?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_diff_marks_changed_line() {
        let mut buf = Vec::new();
        print_diff("keep\nbuy a gun\n", "keep\nbuy a ***\n", &mut buf, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("--- Diff Analysis ---\n"));
        assert!(out.contains("  keep\n"));
        assert!(out.contains("- buy a gun\n"));
        assert!(out.contains("+ buy a ***\n"));
    }

    #[test]
    fn test_identical_text_reports_no_changes() {
        let mut buf = Vec::new();
        print_diff("same\n", "same\n", &mut buf, false).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("No changes detected.\n"));
    }
}
