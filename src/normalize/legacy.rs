//! Classic HTML result tables.
//!
//! Each result spans two adjacent `<tr>` rows. The first starts with the
//! result number and carries the bibcode link, score and date; the second
//! carries authors and title. The markup has no semantic labels, so fields
//! are taken by position from the concatenated cells of the pair.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use crate::client::AdsError;
use crate::models::{Entry, EntryBuilder};

/// Cell offsets within a concatenated row pair
///
/// These follow the current classic markup and are expected to drift with
/// it; override them rather than patching the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyLayout {
    /// Cell holding the bibcode anchor
    pub link: usize,
    pub score: usize,
    pub date: usize,
    pub authors: usize,
    pub title: usize,
}

impl Default for LegacyLayout {
    /// Row one: number, link, score, date, access links.
    /// Row two: spacer, authors, title.
    fn default() -> Self {
        Self {
            link: 1,
            score: 2,
            date: 3,
            authors: 6,
            title: 7,
        }
    }
}

/// Parse every complete row pair in `html`
///
/// Returned entries are not yet indexed. Pairs whose link cell lacks an
/// anchor are skipped.
pub fn parse_table(html: &str, layout: &LegacyLayout) -> Vec<Entry> {
    let document = Html::parse_document(html);
    let (Ok(row_selector), Ok(anchor_selector)) =
        (Selector::parse("tr"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut pending: Option<Vec<ElementRef>> = None;

    for row in document.select(&row_selector) {
        let cells = row_cells(row);
        let Some(first) = cells.first() else {
            continue;
        };

        if starts_with_number(first) {
            if pending.is_some() {
                tracing::debug!("Classic result row without a continuation row, skipping");
            }
            pending = Some(cells);
            continue;
        }

        let Some(mut pair) = pending.take() else {
            continue;
        };
        pair.extend(cells);

        match parse_pair(&pair, layout, &anchor_selector) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::debug!("Dropping classic result: {}", e),
        }
    }

    entries
}

/// Direct `<td>` children of a row
fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .collect()
}

fn starts_with_number(cell: &ElementRef) -> bool {
    cell_text(cell)
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Text content with whitespace runs collapsed
fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_pair(
    cells: &[ElementRef],
    layout: &LegacyLayout,
    anchor_selector: &Selector,
) -> Result<Entry, AdsError> {
    let text_at = |offset: usize| cells.get(offset).map(cell_text).unwrap_or_default();

    let link = cells
        .get(layout.link)
        .ok_or_else(|| AdsError::MalformedUpstream(format!("no cell at offset {}", layout.link)))?;
    let identifier = anchor_identifier(link, anchor_selector)?;

    let score_text = text_at(layout.score);
    let score = score_text.parse::<f64>().unwrap_or_else(|_| {
        tracing::debug!("Unparseable score {:?} for {}", score_text, identifier);
        0.0
    });

    let authors: Vec<String> = text_at(layout.authors)
        .split(';')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect();

    let mut builder = EntryBuilder::new(0, identifier)
        .score(score)
        .date(year_of(&text_at(layout.date)))
        .authors(authors);

    let title = text_at(layout.title);
    if !title.is_empty() {
        builder = builder.title(title);
    }

    Ok(builder.build())
}

/// Bibcode from the link cell's anchor, which must have an href and text
fn anchor_identifier(cell: &ElementRef, selector: &Selector) -> Result<String, AdsError> {
    let anchor = cell
        .select(selector)
        .find(|a| a.value().attr("href").is_some_and(|h| !h.trim().is_empty()))
        .ok_or_else(|| AdsError::MalformedUpstream("link cell has no anchor".to_string()))?;

    let text = cell_text(&anchor).replace("&amp;", "&");
    if text.is_empty() {
        return Err(AdsError::MalformedUpstream("anchor has no text".to_string()));
    }

    Ok(text)
}

/// First four-digit run in a date cell such as `05/2008`
fn year_of(date: &str) -> String {
    static YEAR: OnceLock<Option<regex::Regex>> = OnceLock::new();
    YEAR.get_or_init(|| regex::Regex::new(r"\d{4}").ok())
        .as_ref()
        .and_then(|re| re.find(date))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_row(number: usize, link: &str, score: &str, date: &str) -> String {
        format!(
            "<tr><td nowrap><input type=\"checkbox\" name=\"bibcode\">&nbsp;{}</td>\
             <td width=\"25%\">{}</td><td align=\"center\">{}</td><td>{}</td>\
             <td><a href=\"/links/A\">A</a> <a href=\"/links/F\">F</a></td></tr>",
            number, link, score, date
        )
    }

    fn second_row(authors: &str, title: &str) -> String {
        format!(
            "<tr><td></td><td colspan=\"3\">{}</td><td colspan=\"3\">{}</td></tr>",
            authors, title
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><table><tr><th>#</th><th>Bibcode</th></tr>{}</table></body></html>",
            rows.concat()
        )
    }

    #[test]
    fn test_parse_row_pairs() {
        let html = page(&[
            first_row(
                1,
                "<a href=\"https://adsabs.harvard.edu/abs/2008ApJ...681..626Q\">2008ApJ...681..626Q</a>",
                "1.000",
                "05/2008",
            ),
            second_row(
                "Quataert, E.; Foo, B.",
                "Buoyancy Instabilities in Weakly Magnetized Plasmas",
            ),
        ]);

        let entries = parse_table(&html, &LegacyLayout::default());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.identifier, "2008ApJ...681..626Q");
        assert_eq!(entry.score, 1.0);
        assert_eq!(entry.date, "2008");
        assert_eq!(entry.authors, vec!["Quataert, E.", "Foo, B."]);
        assert_eq!(
            entry.title.as_deref(),
            Some("Buoyancy Instabilities in Weakly Magnetized Plasmas")
        );
    }

    #[test]
    fn test_ampersand_in_identifier() {
        let html = page(&[
            first_row(
                1,
                "<a href=\"/abs/2009A&amp;A...500..123B\">2009A&amp;A...500..123B</a>",
                "0.812",
                "01/2009",
            ),
            second_row("Bar, C.", "Title"),
        ]);

        let entries = parse_table(&html, &LegacyLayout::default());
        assert_eq!(entries[0].identifier, "2009A&A...500..123B");
    }

    #[test]
    fn test_pair_without_anchor_is_dropped() {
        let html = page(&[
            first_row(1, "<a href=\"/abs/A\">2001ApJ...550..400A</a>", "1.000", "2001"),
            second_row("First, A.", "One"),
            first_row(2, "2002ApJ...551..401B", "0.900", "2002"),
            second_row("Second, B.", "Two"),
            first_row(3, "<a href=\"/abs/C\">2003ApJ...552..402C</a>", "0.800", "2003"),
            second_row("Third, C.", "Three"),
        ]);

        let entries = parse_table(&html, &LegacyLayout::default());
        let ids: Vec<&str> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["2001ApJ...550..400A", "2003ApJ...552..402C"]);
    }

    #[test]
    fn test_anchor_without_href_or_text_is_dropped() {
        let html = page(&[
            first_row(1, "<a name=\"x\">2001ApJ...550..400A</a>", "1.000", "2001"),
            second_row("First, A.", "One"),
            first_row(2, "<a href=\"/abs/B\"> </a>", "0.900", "2002"),
            second_row("Second, B.", "Two"),
        ]);

        assert!(parse_table(&html, &LegacyLayout::default()).is_empty());
    }

    #[test]
    fn test_unpaired_rows_are_ignored() {
        let html = page(&[
            second_row("Orphan, O.", "No leading row"),
            first_row(1, "<a href=\"/abs/A\">2001ApJ...550..400A</a>", "1.000", "2001"),
            first_row(2, "<a href=\"/abs/B\">2002ApJ...551..401B</a>", "0.900", "2002"),
            second_row("Second, B.", "Two"),
        ]);

        let entries = parse_table(&html, &LegacyLayout::default());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].identifier, "2002ApJ...551..401B");
        assert_eq!(entries[0].authors, vec!["Second, B."]);
    }

    #[test]
    fn test_missing_title_and_bad_score() {
        let html = page(&[
            first_row(1, "<a href=\"/abs/A\">2001ApJ...550..400A</a>", "n/a", "2001"),
            second_row("First, A.", ""),
        ]);

        let entries = parse_table(&html, &LegacyLayout::default());
        assert_eq!(entries[0].score, 0.0);
        assert_eq!(entries[0].title, None);
    }

    #[test]
    fn test_custom_layout() {
        // Markup without the access-links column
        let html = "<table>\
            <tr><td>1</td><td><a href=\"/abs/A\">2001ApJ...550..400A</a></td><td>0.5</td><td>2001</td></tr>\
            <tr><td></td><td>First, A.</td><td>One</td></tr>\
            </table>";
        let layout = LegacyLayout {
            authors: 5,
            title: 6,
            ..LegacyLayout::default()
        };

        let entries = parse_table(html, &layout);
        assert_eq!(entries[0].authors, vec!["First, A."]);
        assert_eq!(entries[0].title.as_deref(), Some("One"));
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("05/2008"), "2008");
        assert_eq!(year_of("2008"), "2008");
        assert_eq!(year_of("n.d."), "n.d.");
    }
}
