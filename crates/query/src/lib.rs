//! # Query Crate
//!
//! Turns a free-text search request into the normalized term set the
//! filter pipeline matches against.
//!
//! ## Example Usage
//!
//! ```ignore
//! use query::SearchTerms;
//!
//! let terms = SearchTerms::extract("engineering colleges in Delhi");
//! assert!(terms.contains("engineering"));
//! assert!(terms.contains("delhi"));
//! ```

pub mod terms;

pub use terms::{extract, SearchTerms, MIN_TERM_LEN, STOP_WORDS};
