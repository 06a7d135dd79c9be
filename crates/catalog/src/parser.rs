//! Parser for catalog documents.
//!
//! A catalog document is a JSON array of records:
//!
//! ```json
//! [{"name": "...", "location": "...", "rating": 4.5, "fees": "...",
//!   "courses": ["..."], "highlights": ["..."]}]
//! ```
//!
//! Every record is validated before the catalog is handed out, so code
//! downstream can rely on non-empty names and in-range ratings.

use crate::error::{CatalogError, Result};
use crate::types::{Catalog, CollegeRecord};
use std::fs;
use std::path::Path;
use tracing::info;

/// The data set compiled into the binary, used when no catalog file is given
const BUILTIN_CATALOG: &str = include_str!("../data/colleges.json");

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Parse a catalog document.
///
/// `origin` is only used for error messages (a file path or "builtin").
pub fn parse_catalog(json: &str, origin: &str) -> Result<Catalog> {
    let records: Vec<CollegeRecord> =
        serde_json::from_str(json).map_err(|source| CatalogError::ParseError {
            origin: origin.to_string(),
            source,
        })?;

    for (index, record) in records.iter().enumerate() {
        validate_record(index, record)?;
    }

    Ok(Catalog::from_records(records))
}

fn validate_record(index: usize, record: &CollegeRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            index,
            field: "name".to_string(),
            value: record.name.clone(),
        });
    }
    if record.location.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            index,
            field: "location".to_string(),
            value: record.location.clone(),
        });
    }
    if !record.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&record.rating) {
        return Err(CatalogError::InvalidValue {
            index,
            field: "rating".to_string(),
            value: record.rating.to_string(),
        });
    }
    Ok(())
}

impl Catalog {
    /// Load the data set embedded in the binary
    pub fn builtin() -> Result<Self> {
        let catalog = parse_catalog(BUILTIN_CATALOG, "builtin")?;
        info!("Loaded built-in catalog with {} colleges", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog document from disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::FileNotFound {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = parse_catalog(&content, &path.display().to_string())?;
        info!(
            "Loaded catalog with {} colleges from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }
}
