//! Error types for the catalog crate.
//!
//! Every failure that can come out of loading the course catalog or reading
//! from a [`CourseRepository`](crate::store::CourseRepository) is one of these
//! variants. Callers further up the stack wrap them without rewriting them.

use thiserror::Error;

/// Errors that can occur while loading documents or querying the store
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line in a JSON Lines export couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A document field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., enrollment for a course not in the catalog)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The store is not connected (never opened, or already disconnected)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query against a connected store failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl CatalogError {
    /// True for failures raised by a live store query, as opposed to load-time
    /// problems with the seed documents.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::QueryFailed(_))
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
