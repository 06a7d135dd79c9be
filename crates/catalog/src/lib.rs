//! # Catalog Crate
//!
//! This crate owns the static college catalog: the record type, the
//! ordered in-memory store and the JSON loader.
//!
//! ## Main Components
//!
//! - **types**: `CollegeRecord` and the ordered `Catalog`
//! - **parser**: load and validate catalog documents (file or built-in)
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = match path {
//!     Some(path) => Catalog::load_from_file(Path::new(path))?,
//!     None => Catalog::builtin()?,
//! };
//! println!("{} colleges loaded", catalog.len());
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::parse_catalog;
pub use types::{Catalog, CollegeRecord};
