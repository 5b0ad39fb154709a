//! Terminal output: the result listing and colored status lines.

mod listing;

pub use listing::{format_entry, CursorMeta, Listing};

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::models::EntryDetails;
use crate::utils::{wrap_text, LISTING_WIDTH};

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Format a status line, colored when `color` is set.
pub fn status_line(status: Status, msg: &str, color: bool) -> String {
    let icon = status_icon(status);
    if !color {
        return format!("{} {}", icon, msg);
    }

    match status {
        Status::Success => format!("{} {}", icon.green().bold(), msg),
        Status::Error => format!("{} {}", icon.red().bold(), msg),
        Status::Warning => format!("{} {}", icon.yellow().bold(), msg),
        Status::Info => format!("{} {}", icon.cyan().bold(), msg),
        Status::Search => format!("{} {}", icon.yellow(), msg),
    }
}

/// Print a status line to stderr, keeping stdout for results.
pub fn print_status(status: Status, msg: &str) {
    let color = std::io::stderr().is_terminal();
    eprintln!("{}", status_line(status, msg, color));
}

/// Print search results header.
pub fn print_search_header(query: &str, count: usize) {
    let msg = format!("{} results for \"{}\"", format_number(count), query);
    print_status(Status::Search, &msg);
}

/// Render extended record details as plain lines.
pub fn format_details(details: &EntryDetails) -> Vec<String> {
    let mut lines = vec![details.identifier.clone()];

    if let Some(title) = &details.title {
        lines.extend(wrap_text(title, LISTING_WIDTH));
    }
    if !details.authors.is_empty() {
        lines.push(format!("Authors:   {}", details.authors.join("; ")));
    }
    if let Some(year) = &details.year {
        lines.push(format!("Year:      {}", year));
    }
    if let Some(publication) = &details.publication {
        lines.push(format!("Published: {}", publication));
    }
    if let Some(count) = details.citation_count {
        lines.push(format!("Citations: {}", format_number(count as usize)));
    }
    if let Some(text) = &details.r#abstract {
        lines.push(String::new());
        lines.extend(wrap_text(text, LISTING_WIDTH));
    }

    lines
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    n.to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}
