//! Helper functions to build a StudentContext from the repository
//!
//! Resolves what the student has already taken and summarises it into an
//! interest profile, so later stages don't go back to the store for it.

use crate::profile::{CategoryMatch, InterestProfile};
use crate::types::StudentContext;
use catalog::{CourseId, CourseRepository, Result};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Distinct course ids the student is enrolled in.
///
/// An empty set is a normal answer, not an error.
pub async fn lookup_enrollments(
    repo: &dyn CourseRepository,
    student_id: &str,
) -> Result<HashSet<CourseId>> {
    let enrolled = repo.lookup_enrolled_course_ids(student_id).await?;
    debug!("Student {} is enrolled in {} courses", student_id, enrolled.len());
    Ok(enrolled)
}

/// Build a StudentContext for a given student
///
/// Only goes back to the store for course records when the student has any
/// enrollments; a cold-start context carries an empty profile.
#[instrument(skip(repo))]
pub async fn build_student_context(
    repo: &dyn CourseRepository,
    student_id: &str,
    category_match: CategoryMatch,
) -> Result<StudentContext> {
    let mut context = StudentContext::new(student_id);
    context.enrolled = lookup_enrollments(repo, student_id).await?;

    if context.is_cold_start() {
        return Ok(context);
    }

    let taken = repo.fetch_courses(&context.enrolled).await?;
    context.profile = InterestProfile::from_courses(&taken, category_match);

    debug!(
        "Interest profile for {}: {} tags, {} categories",
        student_id,
        context.profile.tags.len(),
        context.profile.categories.len()
    );
    Ok(context)
}
