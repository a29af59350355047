//! Popularity aggregation restricted to the candidate set.
//!
//! Counting only candidate ids keeps the cost proportional to the number of
//! candidates rather than to the size of the enrollment collection.

use catalog::{Course, CourseId, CourseRepository, Result};
use std::collections::HashMap;
use tracing::debug;

/// Enrollment counts per course. Absent ids have popularity 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularityMap {
    counts: HashMap<CourseId, u32>,
}

impl PopularityMap {
    pub fn new(counts: HashMap<CourseId, u32>) -> Self {
        Self { counts }
    }

    /// Popularity of a course, 0 when it has no enrollments
    pub fn get(&self, course_id: &str) -> u32 {
        self.counts.get(course_id).copied().unwrap_or(0)
    }

    /// Number of courses with at least one enrollment
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(CourseId, u32)> for PopularityMap {
    fn from_iter<I: IntoIterator<Item = (CourseId, u32)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Computes popularity for a candidate list
#[derive(Debug, Clone, Copy, Default)]
pub struct PopularityAggregator;

impl PopularityAggregator {
    /// Count enrollments for exactly the given candidates
    pub async fn aggregate(
        &self,
        repo: &dyn CourseRepository,
        candidates: &[Course],
    ) -> Result<PopularityMap> {
        if candidates.is_empty() {
            return Ok(PopularityMap::default());
        }

        let ids: Vec<CourseId> = candidates.iter().map(|c| c.course_id.clone()).collect();
        let counts = repo.count_enrollments_by_course(&ids).await?;

        debug!(
            "Popularity computed for {} candidates ({} with enrollments)",
            ids.len(),
            counts.len()
        );
        Ok(PopularityMap::new(counts))
    }
}
