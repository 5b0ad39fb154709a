//! Utility modules supporting the result pipeline.
//!
//! - [`LabelPolicy`], [`synthesize_label`], [`rewrite_label`]: BibTeX label handling
//! - [`truncate_to_width`], [`pad_between`], [`wrap_text`]: fixed-width text layout
//!
//! # Citation labels
//!
//! ```rust
//! use ads_search::utils::{rewrite_label, synthesize_label};
//!
//! let label = synthesize_label("Quataert, E.; Foo, B.", "2008");
//! assert_eq!(label, "Quataert2008");
//!
//! let record = "@ARTICLE{2008ApJ...681..626Q,\n  year = 2008,\n}";
//! assert!(rewrite_label(record, &label).starts_with("@ARTICLE{Quataert2008,"));
//! ```

mod cite;
mod display;

pub use cite::{apply_label_policy, record_label, rewrite_label, synthesize_label, LabelPolicy};
pub use display::{display_width, pad_between, truncate_to_width, wrap_text, LISTING_WIDTH};
