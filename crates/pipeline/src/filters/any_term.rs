//! Disjunctive term filter.
//!
//! Broader than [`AllTermsFilter`](super::AllTermsFilter): one matching
//! term is enough. Only used when the match policy is configured as `any`.

use crate::searchable::searchable_text;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CollegeRecord;
use query::SearchTerms;

use super::retain_ordered;

/// Keeps records whose searchable text contains at least one term.
///
/// An empty term set places no constraint, so every record is kept.
pub struct AnyTermFilter;

impl Filter for AnyTermFilter {
    fn name(&self) -> &str {
        "AnyTermFilter"
    }

    fn apply(&self, records: Vec<CollegeRecord>, terms: &SearchTerms) -> Result<Vec<CollegeRecord>> {
        if terms.is_empty() {
            return Ok(records);
        }

        Ok(retain_ordered(records, |record| {
            let text = searchable_text(record);
            terms.iter().any(|term| text.contains(term))
        }))
    }
}
