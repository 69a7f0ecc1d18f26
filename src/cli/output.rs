//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::{EntryKind, LogEntry};

/// Disable colors regardless of terminal detection.
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data/JSON)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a log entry, colored by kind, with its diagram indented below
pub fn entry(entry: &LogEntry) {
    let line = match entry.kind {
        EntryKind::Insert => format!("  {} {}", "+".green(), entry.message),
        EntryKind::Rotation => format!("  {} {}", "↻".magenta(), entry.message.magenta()),
        EntryKind::Complete => format!("  {} {}", "✓".green(), entry.message),
        EntryKind::Undo => format!("  {} {}", "↶".cyan(), entry.message),
        EntryKind::Clear => format!("  {} {}", "∅".cyan(), entry.message),
        EntryKind::Warning => format!("  {} {}", "!".yellow(), entry.message.yellow()),
    };
    println!("{}", line);
    if let Some(diagram) = &entry.diagram {
        for l in diagram.lines() {
            println!("      {}", l.dimmed());
        }
    }
}
