//! Request-scoped types shared by the candidate sources.

use crate::profile::InterestProfile;
use catalog::{CourseId, StudentId};
use std::collections::HashSet;

/// Everything known about the requesting student for one recommendation call
#[derive(Debug, Clone)]
pub struct StudentContext {
    pub student_id: StudentId,
    /// Distinct ids of courses already taken
    pub enrolled: HashSet<CourseId>,
    /// Interests derived from the enrolled courses
    pub profile: InterestProfile,
}

impl StudentContext {
    /// A context with no history at all
    pub fn new(student_id: impl Into<StudentId>) -> Self {
        Self {
            student_id: student_id.into(),
            enrolled: HashSet::new(),
            profile: InterestProfile::default(),
        }
    }

    /// No enrollments means the request is served from global popularity
    pub fn is_cold_start(&self) -> bool {
        self.enrolled.is_empty()
    }
}
