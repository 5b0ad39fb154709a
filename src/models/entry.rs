//! Entry model representing one normalized search result.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::client::AdsError;

/// Separator used when an entry's authors are shown on one line
pub const AUTHOR_SEPARATOR: &str = "; ";

/// One search result with a stable display index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// 1-based position in the result set
    pub index: usize,

    /// Relevance score reported by the search backend
    pub score: f64,

    /// Bibliographic code, the join key for all follow-up requests
    pub identifier: String,

    /// Publication year
    pub date: String,

    /// Authors in upstream order
    pub authors: Vec<String>,

    /// Title, when the record has one
    pub title: Option<String>,
}

impl Entry {
    /// Authors joined for display
    pub fn author_string(&self) -> String {
        self.authors.join(AUTHOR_SEPARATOR)
    }

    /// First listed author, if any
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(|s| s.as_str())
    }
}

/// Builder for constructing Entry objects
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    /// Create a new builder with the required fields
    pub fn new(index: usize, identifier: impl Into<String>) -> Self {
        Self {
            entry: Entry {
                index,
                score: 0.0,
                identifier: identifier.into(),
                date: String::new(),
                authors: Vec::new(),
                title: None,
            },
        }
    }

    /// Set score
    pub fn score(mut self, score: f64) -> Self {
        self.entry.score = score;
        self
    }

    /// Set date (year)
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.entry.date = date.into();
        self
    }

    /// Set authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.entry.title = Some(title.into());
        self
    }

    /// Build the Entry
    pub fn build(self) -> Entry {
        self.entry
    }
}

/// Key used to find an entry in a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// 1-based display index
    Index(usize),
    /// Bibliographic code
    Identifier(String),
}

impl From<usize> for Lookup {
    fn from(index: usize) -> Self {
        Lookup::Index(index)
    }
}

impl From<&str> for Lookup {
    fn from(identifier: &str) -> Self {
        Lookup::Identifier(identifier.to_string())
    }
}

impl FromStr for Lookup {
    type Err = std::convert::Infallible;

    /// All-digit input is an index, anything else an identifier
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(index) => Lookup::Index(index),
            Err(_) => Lookup::Identifier(s.to_string()),
        })
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Index(index) => write!(f, "#{}", index),
            Lookup::Identifier(id) => write!(f, "{}", id),
        }
    }
}

/// The entries produced by one query
///
/// Indices are contiguous from 1, so index lookups are a direct slot access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    entries: Vec<Entry>,
    query: Option<String>,
}

impl ResultSet {
    /// Create a result set from normalized entries
    pub fn new(entries: Vec<Entry>, query: Option<String>) -> Self {
        debug_assert!(entries.iter().enumerate().all(|(i, e)| e.index == i + 1));
        Self { entries, query }
    }

    /// The free-text query that produced this set (`None` for advanced searches)
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Entries in display order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by index or identifier
    pub fn lookup(&self, key: impl Into<Lookup>) -> Result<&Entry, AdsError> {
        let key = key.into();
        let found = match &key {
            Lookup::Index(index) => index
                .checked_sub(1)
                .and_then(|slot| self.entries.get(slot)),
            Lookup::Identifier(id) => self.entries.iter().find(|e| &e.identifier == id),
        };

        found.ok_or_else(|| AdsError::NotFound(format!("No entry {} in the current results", key)))
    }
}

/// Extended metadata for a single record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDetails {
    pub identifier: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub year: Option<String>,
    pub r#abstract: Option<String>,
    /// Journal or other publication venue
    pub publication: Option<String>,
    pub citation_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ResultSet {
        let entries = vec![
            EntryBuilder::new(1, "2008ApJ...681..626Q")
                .score(1.0)
                .date("2008")
                .authors(["Quataert, E.", "Foo, B."])
                .title("Convection in galaxy-cluster plasmas")
                .build(),
            EntryBuilder::new(2, "2009A&A...500..123B")
                .date("2009")
                .authors(["Bar, C."])
                .build(),
        ];
        ResultSet::new(entries, Some("quataert".to_string()))
    }

    #[test]
    fn test_entry_builder() {
        let entry = EntryBuilder::new(3, "2001ApJ...550..400Z")
            .score(0.75)
            .date("2001")
            .authors(["Zed, A.", "Why, B."])
            .title("A title")
            .build();

        assert_eq!(entry.index, 3);
        assert_eq!(entry.identifier, "2001ApJ...550..400Z");
        assert_eq!(entry.author_string(), "Zed, A.; Why, B.");
        assert_eq!(entry.first_author(), Some("Zed, A."));
        assert_eq!(entry.title.as_deref(), Some("A title"));
    }

    #[test]
    fn test_lookup_by_index_and_identifier() {
        let set = sample_set();

        assert_eq!(set.lookup(2usize).unwrap().identifier, "2009A&A...500..123B");
        assert_eq!(set.lookup("2008ApJ...681..626Q").unwrap().index, 1);
        assert_eq!(set.query(), Some("quataert"));
    }

    #[test]
    fn test_lookup_missing() {
        let set = sample_set();

        assert!(matches!(set.lookup(0usize), Err(AdsError::NotFound(_))));
        assert!(matches!(set.lookup(3usize), Err(AdsError::NotFound(_))));
        assert!(matches!(set.lookup("nope"), Err(AdsError::NotFound(_))));
    }

    #[test]
    fn test_lookup_from_str() {
        assert_eq!("12".parse::<Lookup>().unwrap(), Lookup::Index(12));
        assert_eq!(
            "2008ApJ...681..626Q".parse::<Lookup>().unwrap(),
            Lookup::Identifier("2008ApJ...681..626Q".to_string())
        );
    }
}
