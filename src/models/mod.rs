//! Core data models for search results and advanced search criteria.

mod criteria;
mod entry;

pub use criteria::{AdvancedSearchCriteria, DateRange, ListLogic, TextLogic};
pub use entry::{Entry, EntryBuilder, EntryDetails, Lookup, ResultSet};
