//! Configuration file support for ads-search.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! token = "your-api-token"
//! base_url = "https://api.adsabs.harvard.edu/v1"
//! classic_url = "https://adsabs.harvard.edu/cgi-bin/nph-abs_connect"
//! link_url = "https://adsabs.harvard.edu/cgi-bin/nph-data_query"
//! timeout_seconds = 30
//!
//! [citation]
//! label_policy = "author-year"   # or "verbatim"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// Environment prefix for overrides (`ADS_SEARCH_API__TOKEN`, ...)
const ENV_PREFIX: &str = "ADS_SEARCH";

/// Load configuration from a TOML file, applying environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigFileError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(|e| ConfigFileError::Parse(e.to_string()))?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigFileError::Parse(e.to_string()))
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Per-user location of the configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ads-search").join("config.toml"))
}

/// Find an existing configuration file, checking the working directory first
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("ads-search.toml");
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|p| p.is_file())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
