//! Conversion of raw upstream results into indexed [`Entry`] values.
//!
//! The service answers in one of two shapes: the structured JSON search
//! response, or the classic HTML result table. Both go through
//! [`normalize`], which assigns the display indices.

mod legacy;
mod structured;

pub use legacy::{parse_table, LegacyLayout};
pub use structured::{RawDoc, SearchEnvelope};

use crate::models::Entry;

/// Raw results as returned by the service
#[derive(Debug, Clone)]
pub enum RawResult {
    /// Documents from the JSON search API
    Structured(Vec<RawDoc>),
    /// HTML page from the classic search form
    LegacyTable(String),
}

/// Normalize raw results into entries indexed `1..=n` in display order
///
/// Structured documents map one-to-one, except those with a blank bibcode.
/// Those, and legacy row pairs that cannot be parsed, are dropped and do not
/// consume an index.
pub fn normalize(raw: RawResult, layout: &LegacyLayout) -> Vec<Entry> {
    let entries = match raw {
        RawResult::Structured(docs) => docs
            .into_iter()
            .filter(|doc| {
                let keep = !doc.bibcode.trim().is_empty();
                if !keep {
                    tracing::debug!("Dropping document without a bibcode");
                }
                keep
            })
            .map(RawDoc::into_entry)
            .collect(),
        RawResult::LegacyTable(html) => parse_table(&html, layout),
    };

    assign_indices(entries)
}

fn assign_indices(entries: Vec<Entry>) -> Vec<Entry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, mut entry)| {
            entry.index = i + 1;
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_indices_follow_input_order() {
        let body = r#"{"response": {"numFound": 3, "docs": [
            {"bibcode": "2008ApJ...681..626Q", "year": "2008", "author": ["Quataert, E."], "title": ["Buoyancy"], "score": 9.5},
            {"bibcode": "2001ApJ...550..400Z", "year": 2001, "author": [], "score": 3.0},
            {"bibcode": "1999MNRAS.300..100A", "year": "1999", "title": ["Third"]}
        ]}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        let entries = normalize(
            RawResult::Structured(envelope.response.docs),
            &LegacyLayout::default(),
        );

        assert_eq!(entries.len(), 3);
        let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(entries[0].identifier, "2008ApJ...681..626Q");
        assert_eq!(entries[1].date, "2001");
        assert_eq!(entries[1].title, None);
        assert_eq!(entries[2].score, 0.0);
    }

    #[test]
    fn test_blank_bibcodes_are_dropped() {
        let body = r#"{"response": {"numFound": 3, "docs": [
            {"bibcode": "2008ApJ...681..626Q", "year": "2008"},
            {"bibcode": "  ", "year": "2005"},
            {"bibcode": "1999MNRAS.300..100A", "year": "1999"}
        ]}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        let entries = normalize(
            RawResult::Structured(envelope.response.docs),
            &LegacyLayout::default(),
        );

        let keys: Vec<(usize, &str)> = entries
            .iter()
            .map(|e| (e.index, e.identifier.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(1, "2008ApJ...681..626Q"), (2, "1999MNRAS.300..100A")]
        );
    }

    #[test]
    fn test_empty_structured_result() {
        let entries = normalize(RawResult::Structured(Vec::new()), &LegacyLayout::default());
        assert!(entries.is_empty());
    }
}
