//! # Catalog Crate
//!
//! Record types and storage access for the course catalog and its
//! enrollment collection.
//!
//! ## Main Components
//!
//! - **types**: Core records (Course, Enrollment, PopularCourse, CourseIndex)
//! - **parser**: Parse JSON Lines exports into typed records
//! - **index**: Build and validate a CourseIndex from an export directory
//! - **rank**: Bounded top-K selection shared by every ranking path
//! - **store**: The `CourseRepository` trait and its in-memory implementation
//! - **error**: Error types for loading and querying
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CourseRepository, MemoryStore};
//! use std::path::Path;
//!
//! let store = MemoryStore::new();
//! store.connect(Path::new("data/eduhub")).await?;
//!
//! let enrolled = store.lookup_enrolled_course_ids("user_1").await?;
//! let popular = store.global_popularity_top(5).await?;
//!
//! store.disconnect().await;
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod rank;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use store::{CourseRepository, MemoryStore};
pub use types::{
    // Type aliases
    CourseId,
    StudentId,
    // Core types
    Course,
    CourseIndex,
    Enrollment,
    PopularCourse,
};
