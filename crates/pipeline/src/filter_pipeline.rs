//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern, plus the
//! `MatchPolicy` that decides which term filter a default pipeline uses.

use crate::filters::all_terms::matches_all;
use crate::filters::{AllTermsFilter, AnyTermFilter};
use crate::traits::Filter;
use anyhow::Result;
use catalog::{Catalog, CollegeRecord};
use query::SearchTerms;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How search terms combine when matching a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Every term must match (precision over recall)
    #[default]
    All,
    /// One matching term is enough
    Any,
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(MatchPolicy::All),
            "any" => Ok(MatchPolicy::Any),
            other => Err(format!("unknown match policy '{other}', expected 'all' or 'any'")),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::All => write!(f, "all"),
            MatchPolicy::Any => write!(f, "any"),
        }
    }
}

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new().add_filter(AllTermsFilter);
/// let matches = pipeline.filter_catalog(&catalog, &terms)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard pipeline: a single term filter chosen by `policy`.
    pub fn for_policy(policy: MatchPolicy) -> Self {
        match policy {
            MatchPolicy::All => Self::new().add_filter(AllTermsFilter),
            MatchPolicy::Any => Self::new().add_filter(AnyTermFilter),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the records.
    ///
    /// # Returns
    /// * `Ok(Vec<CollegeRecord>)` - The surviving records, in input order
    /// * `Err` - If any filter fails
    pub fn apply(&self, records: Vec<CollegeRecord>, terms: &SearchTerms) -> Result<Vec<CollegeRecord>> {
        let mut current = records;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, terms)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }

    /// Run the pipeline over a whole catalog.
    ///
    /// The catalog itself is never touched; matches are owned copies in
    /// catalog order.
    pub fn filter_catalog(&self, catalog: &Catalog, terms: &SearchTerms) -> Result<Vec<CollegeRecord>> {
        self.apply(catalog.records().to_vec(), terms)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::for_policy(MatchPolicy::default())
    }
}

/// Select the catalog records containing every term, in catalog order.
pub fn filter(catalog: &Catalog, terms: &SearchTerms) -> Vec<CollegeRecord> {
    catalog
        .iter()
        .filter(|record| matches_all(record, terms))
        .cloned()
        .collect()
}
