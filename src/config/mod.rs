//! Configuration management.
//!
//! Settings come from a TOML file (see [`file_config`]) with environment
//! overrides using the `ADS_SEARCH` prefix, e.g. `ADS_SEARCH_API__TOKEN`.
//! When no token is configured, `ADS_API_TOKEN` is used.

mod file_config;

pub use file_config::{default_config_path, find_config_file, load_config, save_config, ConfigFileError};

use serde::{Deserialize, Serialize};

use crate::utils::LabelPolicy;

/// Default REST endpoint of the search service
pub const DEFAULT_API_URL: &str = "https://api.adsabs.harvard.edu/v1";

/// Classic search form, answered with an HTML result table
pub const DEFAULT_CLASSIC_URL: &str = "https://adsabs.harvard.edu/cgi-bin/nph-abs_connect";

/// Link resolver for full text, data and catalog cross-references
pub const DEFAULT_LINK_URL: &str = "https://adsabs.harvard.edu/cgi-bin/nph-data_query";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service endpoints and credentials
    #[serde(default)]
    pub api: ApiConfig,

    /// Citation settings
    #[serde(default)]
    pub citation: CitationConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoints and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the REST API
    #[serde(default = "default_token")]
    pub token: Option<String>,

    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_classic_url")]
    pub classic_url: String,

    #[serde(default = "default_link_url")]
    pub link_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            base_url: default_api_url(),
            classic_url: default_classic_url(),
            link_url: default_link_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// The configured token, treating an empty string as absent
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn default_token() -> Option<String> {
    std::env::var("ADS_API_TOKEN").ok()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_classic_url() -> String {
    DEFAULT_CLASSIC_URL.to_string()
}

fn default_link_url() -> String {
    DEFAULT_LINK_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Citation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationConfig {
    /// How the label of a fetched BibTeX record is chosen
    #[serde(default)]
    pub label_policy: LabelPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
