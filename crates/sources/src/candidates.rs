//! Candidate generation: every catalog course the student hasn't taken.
//!
//! Only used on the personalized path. A student without enrollments never
//! reaches this stage; their request is answered from global popularity.

use catalog::{Course, CourseId, CourseRepository, Result};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Pulls candidate courses out of the repository
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    /// Optional cap on how many candidates are kept (first N by course id)
    max_candidates: Option<usize>,
}

impl CandidateGenerator {
    /// Create a generator that keeps every candidate
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max` candidates (default: unbounded)
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = Some(max);
        self
    }

    /// Fetch all courses not in `enrolled`, ordered by course id
    #[instrument(skip(self, repo, enrolled), fields(enrolled = enrolled.len()))]
    pub async fn generate(
        &self,
        repo: &dyn CourseRepository,
        enrolled: &HashSet<CourseId>,
    ) -> Result<Vec<Course>> {
        let mut candidates = repo.fetch_candidate_courses(enrolled).await?;

        // Stores aren't required to return a stable order
        candidates.sort_unstable_by(|a, b| a.course_id.cmp(&b.course_id));
        if let Some(max) = self.max_candidates {
            candidates.truncate(max);
        }

        debug!("Generated {} candidates", candidates.len());
        Ok(candidates)
    }
}
