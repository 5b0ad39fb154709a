//! Client for the ADS search service.
//!
//! [`AdsClient`] issues the four request shapes the pipeline needs:
//!
//! - free-text search against the JSON API ([`AdsClient::search`])
//! - advanced search against the classic form ([`AdsClient::search_advanced`])
//! - BibTeX export for one bibcode ([`AdsClient::fetch_citation`])
//! - extended metadata for one bibcode ([`AdsClient::fetch_details`])
//!
//! Every request requires a bearer token; a missing token fails with
//! [`AdsError::Auth`] before anything is sent. Failures are reported once,
//! without retries.

mod advanced;
mod mock;
mod transport;

pub use advanced::{advanced_params, encode_advanced};
pub use mock::MockTransport;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ApiConfig, DEFAULT_API_URL, DEFAULT_CLASSIC_URL};
use crate::models::{AdvancedSearchCriteria, Entry, EntryDetails, ResultSet};
use crate::normalize::{normalize, LegacyLayout, RawResult, SearchEnvelope};
use crate::utils::{apply_label_policy, LabelPolicy};

/// Fields requested for result listings
pub const SEARCH_FIELDS: &str = "bibcode,year,author,title,score";

/// Fields requested for a single record's details
pub const DETAIL_FIELDS: &str = "bibcode,title,author,year,abstract,pub,citation_count";

/// Maximum rows requested by a free-text search
pub const MAX_ROWS: usize = 2000;

/// Errors that can occur when talking to the search service
#[derive(Debug, thiserror::Error)]
pub enum AdsError {
    /// No usable API token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network failure, HTTP error status or undecodable body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request succeeded but returned nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A classic result row did not have the expected shape
    #[error("Malformed upstream data: {0}")]
    MalformedUpstream(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AdsError {
    fn from(err: serde_json::Error) -> Self {
        AdsError::Transport(format!("Invalid JSON response: {}", err))
    }
}

#[derive(Debug, Deserialize)]
struct ExportResponse {
    export: Option<String>,
}

/// Client for the ADS search service
#[derive(Debug, Clone)]
pub struct AdsClient {
    transport: Arc<dyn Transport>,
    token: Option<String>,
    base_url: String,
    classic_url: String,
    layout: LegacyLayout,
}

impl AdsClient {
    /// Create a client for the default endpoints
    pub fn new(transport: Arc<dyn Transport>, token: Option<String>) -> Self {
        Self {
            transport,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: DEFAULT_API_URL.to_string(),
            classic_url: DEFAULT_CLASSIC_URL.to_string(),
            layout: LegacyLayout::default(),
        }
    }

    /// Create a client with an HTTP transport built from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, AdsError> {
        let transport =
            HttpTransport::with_timeout(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client from configuration with a custom transport
    pub fn with_transport(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, config.token().map(String::from))
            .with_base_url(&config.base_url)
            .with_classic_url(&config.classic_url)
    }

    /// Override the JSON API endpoint
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Override the classic search form endpoint
    pub fn with_classic_url(mut self, url: &str) -> Self {
        self.classic_url = url.to_string();
        self
    }

    /// Override the classic table cell offsets
    pub fn with_layout(mut self, layout: LegacyLayout) -> Self {
        self.layout = layout;
        self
    }

    fn token(&self) -> Result<&str, AdsError> {
        self.token.as_deref().ok_or_else(|| {
            AdsError::Auth("no API token configured (set ADS_API_TOKEN or [api] token)".to_string())
        })
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: HttpRequest) -> Result<String, AdsError> {
        let url = request.url.clone();
        tracing::debug!("{:?} {}", request.method, url);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            let excerpt: String = response.body.chars().take(200).collect();
            return Err(AdsError::Transport(format!(
                "{} returned status {}: {}",
                url, response.status, excerpt
            )));
        }

        Ok(response.body)
    }

    /// Run a free-text search and normalize the results
    pub async fn search(&self, query: &str) -> Result<ResultSet, AdsError> {
        let token = self.token()?;

        let request = HttpRequest::get(format!("{}/search/query", self.base_url))
            .bearer(token)
            .query("q", query)
            .query("fl", SEARCH_FIELDS)
            .query("rows", MAX_ROWS.to_string());

        let body = self.send(request).await?;
        let envelope: SearchEnvelope = serde_json::from_str(&body)?;
        if let Some(found) = envelope.response.num_found {
            tracing::debug!("{} records match {:?}", found, query);
        }

        let entries = normalize(RawResult::Structured(envelope.response.docs), &self.layout);
        tracing::info!("Search {:?} returned {} entries", query, entries.len());

        Ok(ResultSet::new(entries, Some(query.to_string())))
    }

    /// Run an advanced search through the classic form
    pub async fn search_advanced(
        &self,
        criteria: &AdvancedSearchCriteria,
    ) -> Result<ResultSet, AdsError> {
        let token = self.token()?;

        let url = format!("{}?{}", self.classic_url, encode_advanced(criteria));
        let request = HttpRequest::get(url)
            .bearer(token)
            .header("Accept", "text/html");

        let html = self.send(request).await?;
        let entries = normalize(RawResult::LegacyTable(html), &self.layout);
        tracing::info!("Advanced search returned {} entries", entries.len());

        Ok(ResultSet::new(entries, None))
    }

    /// Fetch the BibTeX record for `identifier` as exported
    pub async fn fetch_citation(&self, identifier: &str) -> Result<String, AdsError> {
        let token = self.token()?;

        let request = HttpRequest::post(format!("{}/export/bibtex", self.base_url))
            .bearer(token)
            .json(serde_json::json!({ "bibcode": [identifier] }));

        let body = self.send(request).await?;
        let export: ExportResponse = serde_json::from_str(&body)?;

        export
            .export
            .filter(|record| !record.trim().is_empty())
            .ok_or_else(|| AdsError::NotFound(format!("No citation record for {}", identifier)))
    }

    /// Fetch the BibTeX record for `identifier` and apply a label policy
    ///
    /// `entry` supplies the author and year for the author-year label.
    pub async fn resolve_citation(
        &self,
        identifier: &str,
        entry: Option<&Entry>,
        policy: LabelPolicy,
    ) -> Result<String, AdsError> {
        let record = self.fetch_citation(identifier).await?;
        if entry.is_none() && policy == LabelPolicy::AuthorYear {
            tracing::debug!("{} is not in the current results, keeping exported label", identifier);
        }

        Ok(apply_label_policy(record, entry, policy))
    }

    /// Fetch extended metadata (abstract, journal, citation count)
    pub async fn fetch_details(&self, identifier: &str) -> Result<EntryDetails, AdsError> {
        let token = self.token()?;

        let request = HttpRequest::get(format!("{}/search/query", self.base_url))
            .bearer(token)
            .query("q", format!("bibcode:\"{}\"", identifier))
            .query("fl", DETAIL_FIELDS)
            .query("rows", "1");

        let body = self.send(request).await?;
        let envelope: SearchEnvelope = serde_json::from_str(&body)?;

        envelope
            .response
            .docs
            .into_iter()
            .next()
            .map(|doc| doc.into_details())
            .ok_or_else(|| AdsError::NotFound(format!("No record for {}", identifier)))
    }
}
