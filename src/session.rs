//! A search session: the client plus the current result set.
//!
//! Follow-up operations (citation lookup, resource links) take their
//! selection from the session's current results, which each new search
//! replaces in full.

use crate::client::{AdsClient, AdsError};
use crate::config::Config;
use crate::links::{ResourceKind, ResourceLocator};
use crate::models::{AdvancedSearchCriteria, Entry, EntryDetails, Lookup, ResultSet};
use crate::ui::Listing;
use crate::utils::LabelPolicy;

/// Search session state
#[derive(Debug, Clone)]
pub struct Session {
    client: AdsClient,
    locator: ResourceLocator,
    label_policy: LabelPolicy,
    results: Option<ResultSet>,
}

impl Session {
    /// Create a session with default resolver and label policy
    pub fn new(client: AdsClient) -> Self {
        Self {
            client,
            locator: ResourceLocator::default(),
            label_policy: LabelPolicy::default(),
            results: None,
        }
    }

    /// Create a session from configuration
    pub fn from_config(config: &Config) -> Result<Self, AdsError> {
        let client = AdsClient::from_config(&config.api)?;
        Ok(Self::new(client)
            .with_locator(ResourceLocator::new(&config.api.link_url))
            .with_label_policy(config.citation.label_policy))
    }

    pub fn with_locator(mut self, locator: ResourceLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    pub fn client(&self) -> &AdsClient {
        &self.client
    }

    pub fn label_policy(&self) -> LabelPolicy {
        self.label_policy
    }

    /// Current results, if a search has succeeded
    pub fn current(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Run a free-text search, replacing the current results
    ///
    /// On failure the previous results are kept.
    pub async fn search(&mut self, query: &str) -> Result<&ResultSet, AdsError> {
        let results = self.client.search(query).await?;
        Ok(self.results.insert(results))
    }

    /// Run an advanced search, replacing the current results
    pub async fn search_advanced(
        &mut self,
        criteria: &AdvancedSearchCriteria,
    ) -> Result<&ResultSet, AdsError> {
        let results = self.client.search_advanced(criteria).await?;
        Ok(self.results.insert(results))
    }

    /// Find an entry in the current results
    pub fn lookup(&self, key: impl Into<Lookup>) -> Result<&Entry, AdsError> {
        let key = key.into();
        match &self.results {
            Some(results) => results.lookup(key),
            None => Err(AdsError::NotFound(format!(
                "No entry {}: no search has been run",
                key
            ))),
        }
    }

    /// Fetch the citation record for `key` using the session's label policy
    pub async fn resolve_citation(&self, key: impl Into<Lookup>) -> Result<String, AdsError> {
        self.resolve_citation_with(key, self.label_policy).await
    }

    /// Fetch the citation record for `key` with an explicit label policy
    ///
    /// An index must exist in the current results. An identifier need not;
    /// if it is absent the record keeps its exported label.
    pub async fn resolve_citation_with(
        &self,
        key: impl Into<Lookup>,
        policy: LabelPolicy,
    ) -> Result<String, AdsError> {
        let key = key.into();
        let (identifier, entry) = match &key {
            Lookup::Index(_) => {
                let entry = self.lookup(key.clone())?;
                (entry.identifier.clone(), Some(entry))
            }
            Lookup::Identifier(id) => (id.clone(), self.lookup(key.clone()).ok()),
        };

        self.client
            .resolve_citation(&identifier, entry, policy)
            .await
    }

    /// Fetch extended metadata for `key`
    pub async fn fetch_details(&self, key: impl Into<Lookup>) -> Result<EntryDetails, AdsError> {
        let identifier = self.identifier_for(key.into())?;
        self.client.fetch_details(&identifier).await
    }

    /// Resolver URL for `key`
    pub fn resource_url(
        &self,
        key: impl Into<Lookup>,
        kind: &ResourceKind,
    ) -> Result<String, AdsError> {
        let identifier = self.identifier_for(key.into())?;
        Ok(self.locator.url(&identifier, kind))
    }

    /// Render the current results, empty before the first search
    pub fn listing(&self) -> Listing {
        self.results
            .as_ref()
            .map(|r| Listing::render(r.entries()))
            .unwrap_or_default()
    }

    /// Indices resolve through the current results; identifiers pass through
    fn identifier_for(&self, key: Lookup) -> Result<String, AdsError> {
        match key {
            Lookup::Index(_) => Ok(self.lookup(key)?.identifier.clone()),
            Lookup::Identifier(id) => Ok(id),
        }
    }
}
