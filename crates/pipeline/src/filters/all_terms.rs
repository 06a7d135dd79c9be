//! Conjunctive term filter.
//!
//! A record survives only if its searchable text contains every search
//! term. More terms narrow the result, never widen it.

use crate::searchable::searchable_text;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CollegeRecord;
use query::SearchTerms;

use super::retain_ordered;

/// Keeps records whose searchable text contains every term.
///
/// ## Algorithm
/// For each record:
/// 1. Build the case-folded searchable text
/// 2. Check every term is a substring of it
///
/// An empty term set keeps every record.
pub struct AllTermsFilter;

/// True when the record's searchable text contains every term
pub fn matches_all(record: &CollegeRecord, terms: &SearchTerms) -> bool {
    let text = searchable_text(record);
    terms.iter().all(|term| text.contains(term))
}

impl Filter for AllTermsFilter {
    fn name(&self) -> &str {
        "AllTermsFilter"
    }

    fn apply(&self, records: Vec<CollegeRecord>, terms: &SearchTerms) -> Result<Vec<CollegeRecord>> {
        if terms.is_empty() {
            return Ok(records);
        }

        Ok(retain_ordered(records, |record| matches_all(record, terms)))
    }
}
