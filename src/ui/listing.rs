//! Fixed-width result listing.
//!
//! Each entry renders as:
//!
//! ```text
//!   1.  2008ApJ...681..626Q                                           (14.200)
//!         2008  Quataert, E.; Foo, B.
//!
//! Buoyancy Instabilities in Weakly Magnetized Plasmas
//! ```
//!
//! Entries are separated by two blank lines. [`Listing`] keeps a table from
//! line number to the entry rendered there, so a cursor position can be
//! mapped back to the entry without re-parsing the text.

use serde::Serialize;

use crate::models::Entry;
use crate::utils::{pad_between, truncate_to_width, wrap_text, LISTING_WIDTH};

/// Blank lines between consecutive entries
const ENTRY_GAP: usize = 2;

/// Metadata recoverable from a position in the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorMeta {
    pub index: usize,
    pub identifier: String,
    pub authors: Vec<String>,
    pub date: String,
}

impl From<&Entry> for CursorMeta {
    fn from(entry: &Entry) -> Self {
        Self {
            index: entry.index,
            identifier: entry.identifier.clone(),
            authors: entry.authors.clone(),
            date: entry.date.clone(),
        }
    }
}

/// Render one entry as listing lines
pub fn format_entry(entry: &Entry) -> Vec<String> {
    let heading = format!("{:>3}.  {}", entry.index, entry.identifier);
    let score = format!("({:.3})", entry.score);

    let byline = format!("        {}  {}", entry.date, entry.author_string());

    let mut lines = vec![
        pad_between(&heading, &score, LISTING_WIDTH),
        truncate_to_width(&byline, LISTING_WIDTH),
    ];

    if let Some(title) = entry.title.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(String::new());
        lines.extend(wrap_text(title, LISTING_WIDTH));
    }

    lines
}

/// Rendered entries plus a line -> entry table
#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<String>,
    /// Slot into `entries` for each line; `None` on separator lines
    owners: Vec<Option<usize>>,
    /// Byte offset at which each line starts in [`Listing::text`]
    line_starts: Vec<usize>,
    entries: Vec<CursorMeta>,
}

impl Listing {
    /// Render `entries` in order
    pub fn render(entries: &[Entry]) -> Self {
        let mut listing = Listing::default();

        for (slot, entry) in entries.iter().enumerate() {
            if slot > 0 {
                for _ in 0..ENTRY_GAP {
                    listing.push_line(String::new(), None);
                }
            }

            for line in format_entry(entry) {
                listing.push_line(line, Some(slot));
            }
            listing.entries.push(CursorMeta::from(entry));
        }

        listing
    }

    fn push_line(&mut self, line: String, owner: Option<usize>) {
        let start = match (self.line_starts.last(), self.lines.last()) {
            (Some(prev_start), Some(prev)) => prev_start + prev.len() + 1,
            _ => 0,
        };
        self.line_starts.push(start);
        self.lines.push(line);
        self.owners.push(owner);
    }

    /// Rendered lines, without trailing newlines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole listing as one string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry rendered on the 0-based `line`
    ///
    /// Separator lines and lines past the end belong to no entry.
    pub fn entry_at_line(&self, line: usize) -> Option<&CursorMeta> {
        let slot = (*self.owners.get(line)?)?;
        self.entries.get(slot)
    }

    /// Entry rendered at byte `offset` of [`Listing::text`]
    pub fn entry_at_offset(&self, offset: usize) -> Option<&CursorMeta> {
        let line = self.line_at_offset(offset)?;
        self.entry_at_line(line)
    }

    fn line_at_offset(&self, offset: usize) -> Option<usize> {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .checked_sub(1)?;
        let end = self.line_starts[line] + self.lines[line].len();
        (offset <= end).then_some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryBuilder;
    use crate::utils::display_width;

    fn entry(index: usize, identifier: &str, title: Option<&str>) -> Entry {
        let mut builder = EntryBuilder::new(index, identifier)
            .score(1.5)
            .date("2008")
            .authors(["Quataert, E.", "Foo, B."]);
        if let Some(title) = title {
            builder = builder.title(title);
        }
        builder.build()
    }

    #[test]
    fn test_format_entry_layout() {
        let lines = format_entry(&entry(1, "2008ApJ...681..626Q", Some("Buoyancy")));

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  1.  2008ApJ...681..626Q "));
        assert!(lines[0].ends_with("(1.500)"));
        assert_eq!(display_width(&lines[0]), LISTING_WIDTH);
        assert_eq!(lines[1], "        2008  Quataert, E.; Foo, B.");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Buoyancy");
    }

    #[test]
    fn test_long_identifier_collapses_pad() {
        let identifier = "X".repeat(90);
        let lines = format_entry(&entry(12, &identifier, None));
        assert_eq!(lines[0], format!(" 12.  {}(1.500)", identifier));
    }

    #[test]
    fn test_byline_is_truncated_not_wrapped() {
        let mut e = entry(1, "A", None);
        e.authors = (0..40).map(|i| format!("Author{}, X.", i)).collect();

        let lines = format_entry(&e);
        assert_eq!(lines.len(), 2);
        assert_eq!(display_width(&lines[1]), LISTING_WIDTH);
    }

    #[test]
    fn test_missing_title_omits_block() {
        let lines = format_entry(&entry(1, "A", None));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_long_title_wraps() {
        let title = "word ".repeat(40);
        let lines = format_entry(&entry(1, "A", Some(&title)));
        assert!(lines.len() > 4);
        assert!(lines.iter().all(|l| display_width(l) <= LISTING_WIDTH));
    }

    #[test]
    fn test_entry_separation() {
        let listing = Listing::render(&[
            entry(1, "A", Some("First")),
            entry(2, "B", None),
            entry(3, "C", Some("Third")),
        ]);
        let text = listing.text();

        assert!(text.contains("First\n\n\n  2.  B"));
        assert!(text.contains("Foo, B.\n\n\n  3.  C"));
        assert!(!text.contains("\n\n\n\n"));
        assert!(!text.ends_with('\n'));
        assert!(text.ends_with("Third"));
    }

    #[test]
    fn test_line_lookup_round_trip() {
        let entries = vec![
            entry(1, "2001ApJ...550..400A", Some("One")),
            entry(2, "2002ApJ...551..401B", None),
        ];
        let listing = Listing::render(&entries);

        for (line_no, line) in listing.lines().iter().enumerate() {
            if let Some(meta) = listing.entry_at_line(line_no) {
                let source = &entries[meta.index - 1];
                assert_eq!(meta.identifier, source.identifier);
                assert_eq!(meta.authors, source.authors);
                assert_eq!(meta.date, source.date);
            } else {
                assert!(line.is_empty());
            }
        }

        // Lines 0-3 are entry 1, 4-5 the gap, 6-7 entry 2
        assert_eq!(listing.entry_at_line(3).map(|m| m.index), Some(1));
        assert_eq!(listing.entry_at_line(4), None);
        assert_eq!(listing.entry_at_line(6).map(|m| m.index), Some(2));
        assert_eq!(listing.entry_at_line(8), None);
    }

    #[test]
    fn test_offset_lookup() {
        let listing = Listing::render(&[entry(1, "A", Some("One")), entry(2, "B", None)]);
        let text = listing.text();

        let offset = text.find("  2.  B").unwrap();
        assert_eq!(listing.entry_at_offset(offset).map(|m| m.index), Some(2));
        assert_eq!(listing.entry_at_offset(0).map(|m| m.index), Some(1));
        assert_eq!(listing.entry_at_offset(text.find("One").unwrap() + 1).map(|m| m.index), Some(1));
        assert_eq!(listing.entry_at_offset(text.len() + 5), None);
    }

    #[test]
    fn test_empty_listing() {
        let listing = Listing::render(&[]);
        assert!(listing.is_empty());
        assert_eq!(listing.text(), "");
        assert_eq!(listing.entry_at_line(0), None);
    }
}
