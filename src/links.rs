//! Follow-up resource URLs for a record.
//!
//! The link resolver takes a bibcode and a link-type token and redirects to
//! the journal page, full text, preprint, data archive or catalog entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_LINK_URL;

/// Kind of follow-up resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Publisher's journal page
    Journal,
    /// Scanned or full-text article
    Article,
    /// arXiv preprint
    ArxivPreprint,
    /// Associated data archive
    DataArchive,
    /// SIMBAD object cross-references
    Simbad,
    /// NED object cross-references
    Ned,
    /// Any other name; resolves to an empty link type
    Unknown(String),
}

impl ResourceKind {
    /// All known kinds
    pub const KNOWN: [ResourceKind; 6] = [
        ResourceKind::Journal,
        ResourceKind::Article,
        ResourceKind::ArxivPreprint,
        ResourceKind::DataArchive,
        ResourceKind::Simbad,
        ResourceKind::Ned,
    ];

    /// Link-type token understood by the resolver
    pub fn token(&self) -> &'static str {
        match self {
            ResourceKind::Journal => "EJOURNAL",
            ResourceKind::Article => "ARTICLE",
            ResourceKind::ArxivPreprint => "PREPRINT",
            ResourceKind::DataArchive => "DATA",
            ResourceKind::Simbad => "SIMBAD",
            ResourceKind::Ned => "NED",
            ResourceKind::Unknown(_) => "",
        }
    }

    /// Get the kind name
    pub fn name(&self) -> &str {
        match self {
            ResourceKind::Journal => "journal",
            ResourceKind::Article => "article",
            ResourceKind::ArxivPreprint => "arxiv-preprint",
            ResourceKind::DataArchive => "data-archive",
            ResourceKind::Simbad => "simbad",
            ResourceKind::Ned => "ned",
            ResourceKind::Unknown(name) => name,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "journal" | "ejournal" => ResourceKind::Journal,
            "article" | "pdf" => ResourceKind::Article,
            "arxiv-preprint" | "arxiv" | "preprint" => ResourceKind::ArxivPreprint,
            "data-archive" | "data" => ResourceKind::DataArchive,
            "simbad" => ResourceKind::Simbad,
            "ned" => ResourceKind::Ned,
            _ => ResourceKind::Unknown(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds resolver URLs against a configurable base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    base_url: String,
}

impl Default for ResourceLocator {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_URL)
    }
}

impl ResourceLocator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the `kind` resource for `identifier`
    ///
    /// Never fails: an unknown kind yields a well-formed URL with an empty
    /// link type.
    pub fn url(&self, identifier: &str, kind: &ResourceKind) -> String {
        format!(
            "{}?bibcode={}&link_type={}&db_key=ALL",
            self.base_url,
            urlencoding::encode(identifier),
            kind.token()
        )
    }
}

/// [`ResourceLocator::url`] against the default resolver
pub fn resource_url(identifier: &str, kind: &ResourceKind) -> String {
    ResourceLocator::default().url(identifier, kind)
}
