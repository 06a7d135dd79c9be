//! Filter engine for college records.
//!
//! This crate provides:
//! - Filter trait and the term filters built on it
//! - FilterPipeline for composing filters
//! - MatchPolicy to pick conjunctive or disjunctive matching
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, MatchPolicy};
//! use query::SearchTerms;
//!
//! let pipeline = FilterPipeline::for_policy(MatchPolicy::All);
//! let terms = SearchTerms::extract("engineering colleges in Delhi");
//! let matches = pipeline.filter_catalog(&catalog, &terms)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod searchable;
pub mod traits;

// Re-export main types
pub use filter_pipeline::{filter, FilterPipeline, MatchPolicy};
pub use searchable::searchable_text;
pub use traits::Filter;
