//! BibTeX label handling for fetched citation records.
//!
//! Records come back from the export service with the bibcode as their
//! label (`@ARTICLE{2008ApJ...681..626Q,`). The author-year policy swaps it
//! for a shorter key such as `Quataert2008`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Entry;

/// How the label of a fetched record is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    /// Keep the record exactly as exported
    Verbatim,
    /// First author's surname followed by the year
    #[default]
    AuthorYear,
}

impl fmt::Display for LabelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelPolicy::Verbatim => write!(f, "verbatim"),
            LabelPolicy::AuthorYear => write!(f, "author-year"),
        }
    }
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbatim" => Ok(LabelPolicy::Verbatim),
            "author-year" | "authoryear" | "author_year" => Ok(LabelPolicy::AuthorYear),
            other => Err(format!("unknown label policy: {}", other)),
        }
    }
}

/// Build an author-year label from an author string and a year
///
/// The surname is the text before the first comma of `authors`, without
/// whitespace. Returns an empty string when there is no surname.
pub fn synthesize_label(authors: &str, date: &str) -> String {
    let surname: String = authors
        .split(',')
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect();

    if surname.is_empty() {
        return String::new();
    }

    let year: String = date.chars().take(4).collect();
    format!("{}{}", surname, year)
}

/// The label of a record: the text between the first `{` and the next comma
pub fn record_label(record: &str) -> Option<&str> {
    label_span(record).map(|(start, end)| &record[start..end])
}

/// Byte range of the label token
fn label_span(record: &str) -> Option<(usize, usize)> {
    let start = record.find('{')? + 1;
    let end = start + record[start..].find(',')?;
    Some((start, end))
}

/// Replace the label of a record, leaving it untouched when `label` is empty
/// or the record has no label token
pub fn rewrite_label(record: &str, label: &str) -> String {
    match label_span(record) {
        Some((start, end)) if !label.is_empty() => {
            format!("{}{}{}", &record[..start], label, &record[end..])
        }
        _ => record.to_string(),
    }
}

/// Apply a label policy to a fetched record
///
/// The label comes from the entry's first author only. Without entry
/// metadata there is nothing to synthesize from, so the record is kept as
/// exported.
pub fn apply_label_policy(record: String, entry: Option<&Entry>, policy: LabelPolicy) -> String {
    match (policy, entry) {
        (LabelPolicy::Verbatim, _) | (LabelPolicy::AuthorYear, None) => record,
        (LabelPolicy::AuthorYear, Some(entry)) => {
            let label = synthesize_label(entry.first_author().unwrap_or_default(), &entry.date);
            rewrite_label(&record, &label)
        }
    }
}
