//! # ADS Search
//!
//! A client for the NASA ADS literature service: run a query, list the
//! results with stable indices, and fetch a BibTeX record or follow-up link
//! for any entry.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`client`]: Query execution against the JSON API and the classic search form
//! - [`normalize`]: Conversion of both response shapes into indexed entries
//! - [`models`]: Core data structures (Entry, ResultSet, AdvancedSearchCriteria)
//! - [`session`]: The current result set and the follow-up operations on it
//! - [`links`]: Resolver URLs for journal pages, preprints, data and catalogs
//! - [`ui`]: Fixed-width listing and terminal status output
//! - [`utils`]: Citation labels and column-aware text helpers
//! - [`config`]: Configuration management

pub mod client;
pub mod config;
pub mod links;
pub mod models;
pub mod normalize;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use client::{AdsClient, AdsError};
pub use links::{resource_url, ResourceKind, ResourceLocator};
pub use models::{AdvancedSearchCriteria, Entry, ResultSet};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
