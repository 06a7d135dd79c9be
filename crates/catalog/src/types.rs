//! Core domain types for the college catalog.
//!
//! The catalog is loaded once at startup and then only ever read, so every
//! type here is plain data: no interior mutability, no indices that need
//! to be kept in sync.

use serde::{Deserialize, Serialize};

// =============================================================================
// College Record
// =============================================================================

/// A single institution in the catalog.
///
/// Records are identified by their `name` + `location` pair. Uniqueness of
/// that pair is assumed by the data set, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRecord {
    pub name: String,
    pub location: String,
    /// Average rating on a 0-5 scale
    pub rating: f64,
    /// Human-formatted fees, e.g. "₹2.5 Lakhs/year"
    pub fees: String,
    /// Courses in display order; the first two are the "top" courses
    #[serde(default)]
    pub courses: Vec<String>,
    /// Highlights in display order; the first one is the headline
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl CollegeRecord {
    /// The first `n` courses, in catalog order.
    pub fn top_courses(&self, n: usize) -> &[String] {
        &self.courses[..self.courses.len().min(n)]
    }

    /// The headline highlight, if the record has any.
    pub fn headline(&self) -> Option<&str> {
        self.highlights.first().map(String::as_str)
    }
}

// =============================================================================
// Catalog - The In-Memory Store
// =============================================================================

/// Ordered, read-only collection of college records.
///
/// Order matters: filtering and response generation both preserve it, so
/// the position of a record in the source file decides which colleges make
/// the top three of a fallback answer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CollegeRecord>,
}

impl Catalog {
    /// Wraps already-validated records, keeping their order
    pub fn from_records(records: Vec<CollegeRecord>) -> Self {
        Self { records }
    }

    /// All records in catalog order
    pub fn records(&self) -> &[CollegeRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollegeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CollegeRecord>> for Catalog {
    fn from(records: Vec<CollegeRecord>) -> Self {
        Self::from_records(records)
    }
}
