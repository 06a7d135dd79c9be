//! Filter implementations for the record pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod all_terms;
pub mod any_term;

// Re-export for convenience
pub use all_terms::AllTermsFilter;
pub use any_term::AnyTermFilter;

use catalog::CollegeRecord;
use rayon::prelude::*;

/// Catalogs at least this large are filtered on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Keep the records matching `keep`, preserving their order.
///
/// Rayon's indexed collect keeps input order, so both branches return the
/// same sequence.
pub(crate) fn retain_ordered<F>(records: Vec<CollegeRecord>, keep: F) -> Vec<CollegeRecord>
where
    F: Fn(&CollegeRecord) -> bool + Sync + Send,
{
    if records.len() >= PARALLEL_THRESHOLD {
        records.into_par_iter().filter(|r| keep(r)).collect()
    } else {
        records.into_iter().filter(|r| keep(r)).collect()
    }
}
