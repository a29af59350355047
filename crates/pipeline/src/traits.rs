//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable
//! filters to be applied to candidate sets before scoring.

use catalog::Course;
use sources::StudentContext;

/// Core trait for filtering candidates.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent requests
/// - Filters take ownership of the Vec<Course> and return the kept subset
/// - Filtering never fails; a filter that can't decide keeps the candidate
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - Student context with enrollments and interest profile
    fn apply(&self, candidates: Vec<Course>, context: &StudentContext) -> Vec<Course>;
}
