//! Advanced search criteria for the classic search form.

use serde::{Deserialize, Serialize};

/// Combinator for list-valued fields (authors, objects)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListLogic {
    #[default]
    Or,
    And,
}

impl ListLogic {
    /// Token expected by the search form
    pub fn token(&self) -> &'static str {
        match self {
            ListLogic::Or => "OR",
            ListLogic::And => "AND",
        }
    }
}

/// Combinator for free-text fields (title, abstract)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextLogic {
    #[default]
    Or,
    And,
    /// Simple logic: `+word` / `-word` markers
    Simple,
    /// Full boolean expression
    Bool,
}

impl TextLogic {
    /// Token expected by the search form
    pub fn token(&self) -> &'static str {
        match self {
            TextLogic::Or => "OR",
            TextLogic::And => "AND",
            TextLogic::Simple => "SIMPLE",
            TextLogic::Bool => "BOOL",
        }
    }
}

/// Publication date window; every bound is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_month: Option<u8>,
    pub start_year: Option<u16>,
    pub end_month: Option<u8>,
    pub end_year: Option<u16>,
}

/// Structured criteria for an advanced search
///
/// Empty or absent fields are sent as empty-valued parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearchCriteria {
    /// Search the astronomy database
    pub astronomy: bool,

    /// Search the physics database
    pub physics: bool,

    /// Search the arXiv preprint database
    pub preprints: bool,

    /// Author names, one per element
    pub authors: Vec<String>,

    pub author_logic: ListLogic,

    pub dates: DateRange,

    /// Object name resolved through the selected catalogs
    pub object: String,

    /// Resolve the object through SIMBAD
    pub simbad: bool,

    /// Resolve the object through NED
    pub ned: bool,

    /// Resolve the object through the ADS object service
    pub ads_objects: bool,

    pub object_logic: ListLogic,

    pub title: String,

    pub title_logic: TextLogic,

    /// Words to match in the abstract
    pub abstract_text: String,

    pub abstract_logic: TextLogic,
}

impl AdvancedSearchCriteria {
    /// Create empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the databases to search
    pub fn databases(mut self, astronomy: bool, physics: bool, preprints: bool) -> Self {
        self.astronomy = astronomy;
        self.physics = physics;
        self.preprints = preprints;
        self
    }

    /// Add an author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Set author combinator
    pub fn author_logic(mut self, logic: ListLogic) -> Self {
        self.author_logic = logic;
        self
    }

    /// Set start of date range
    pub fn since(mut self, month: Option<u8>, year: u16) -> Self {
        self.dates.start_month = month;
        self.dates.start_year = Some(year);
        self
    }

    /// Set end of date range
    pub fn until(mut self, month: Option<u8>, year: u16) -> Self {
        self.dates.end_month = month;
        self.dates.end_year = Some(year);
        self
    }

    /// Set object name
    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = object.into();
        self
    }

    /// Select the object catalogs
    pub fn catalogs(mut self, simbad: bool, ned: bool, ads_objects: bool) -> Self {
        self.simbad = simbad;
        self.ned = ned;
        self.ads_objects = ads_objects;
        self
    }

    /// Set object combinator
    pub fn object_logic(mut self, logic: ListLogic) -> Self {
        self.object_logic = logic;
        self
    }

    /// Set title words and combinator
    pub fn title(mut self, title: impl Into<String>, logic: TextLogic) -> Self {
        self.title = title.into();
        self.title_logic = logic;
        self
    }

    /// Set abstract words and combinator
    pub fn abstract_text(mut self, text: impl Into<String>, logic: TextLogic) -> Self {
        self.abstract_text = text.into();
        self.abstract_logic = logic;
        self
    }
}
