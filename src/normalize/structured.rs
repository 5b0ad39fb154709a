//! Structured JSON search responses.

use serde::{Deserialize, Deserializer};

use crate::models::{Entry, EntryBuilder, EntryDetails};

/// Top-level search API response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub docs: Vec<RawDoc>,
    #[serde(rename = "numFound")]
    pub num_found: Option<u64>,
}

/// A single document from the search API
///
/// Only `bibcode` is guaranteed by the field projection; everything else
/// may be missing on sparse records.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDoc {
    pub bibcode: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    pub author: Option<Vec<String>>,
    pub title: Option<Vec<String>>,
    pub score: Option<f64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(rename = "pub")]
    pub publication: Option<String>,
    pub citation_count: Option<u32>,
}

impl RawDoc {
    /// Map to an entry; the index is assigned by the normalizer
    pub fn into_entry(self) -> Entry {
        let mut builder = EntryBuilder::new(0, self.bibcode)
            .score(self.score.unwrap_or(0.0))
            .date(self.year.unwrap_or_default())
            .authors(self.author.unwrap_or_default());

        if let Some(title) = self.title.and_then(|t| t.into_iter().next()) {
            builder = builder.title(title);
        }

        builder.build()
    }

    /// Map to extended metadata
    pub fn into_details(self) -> EntryDetails {
        EntryDetails {
            identifier: self.bibcode,
            title: self.title.and_then(|t| t.into_iter().next()),
            authors: self.author.unwrap_or_default(),
            year: self.year,
            r#abstract: self.abstract_text,
            publication: self.publication,
            citation_count: self.citation_count,
        }
    }
}

/// Accepts the year as either a JSON string or a number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(i64),
    }

    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}
