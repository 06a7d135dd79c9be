//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a set of college records.

use anyhow::Result;
use catalog::CollegeRecord;
use query::SearchTerms;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets one pipeline serve every concurrent request
/// - Filters take ownership of the Vec and return the survivors
/// - Filters must keep the relative order of the records they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of records.
    ///
    /// # Arguments
    /// * `records` - The records to filter (takes ownership)
    /// * `terms` - Normalized search terms of the current query
    fn apply(&self, records: Vec<CollegeRecord>, terms: &SearchTerms) -> Result<Vec<CollegeRecord>>;
}
