//! Filter to remove courses the student is already enrolled in.
//!
//! The candidate query already excludes enrolled ids, but the store is only
//! eventually consistent, so the exclusion is re-checked against the
//! enrollment set that built the interest profile.

use crate::traits::Filter;
use catalog::Course;
use sources::StudentContext;

/// Removes candidates present in `StudentContext::enrolled`.
pub struct AlreadyEnrolledFilter;

impl Filter for AlreadyEnrolledFilter {
    fn name(&self) -> &str {
        "AlreadyEnrolledFilter"
    }

    fn apply(&self, candidates: Vec<Course>, context: &StudentContext) -> Vec<Course> {
        candidates
            .into_iter()
            .filter(|candidate| !context.enrolled.contains(&candidate.course_id))
            .collect()
    }
}
