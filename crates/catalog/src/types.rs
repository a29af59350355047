//! Core record types for the course catalog.
//!
//! Documents in the store are loosely shaped; these types pin down which
//! fields are required and which may be absent. A course without tags or
//! without a category is valid and simply contributes nothing for that field.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable, unique identifier of a course (e.g. "PYT")
pub type CourseId = String;

/// Identifier of a learner (e.g. "user_3")
pub type StudentId = String;

// =============================================================================
// Documents
// =============================================================================

/// A catalog entry.
///
/// Immutable for the duration of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: CourseId,
    /// Display title; a missing or null title reads as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Single category label. Absent or empty categories never match anything.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text labels, stored as written (case is normalised at match time).
    /// `null` reads as no tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Course {
    /// Convenience constructor used mostly by tests and fixtures
    pub fn new(course_id: impl Into<CourseId>, title: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            title: title.into(),
            category: None,
            tags: Vec::new(),
            price: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Link between a student and a course.
///
/// Every record is one popularity unit, so a duplicated (student, course)
/// pair is counted twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

impl Enrollment {
    pub fn new(student_id: impl Into<StudentId>, course_id: impl Into<CourseId>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }
}

/// One row of the global popularity ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularCourse {
    pub course_id: CourseId,
    pub title: String,
    pub popularity: u32,
}

/// Greater means "ranks higher": more enrollments first, then the smaller
/// course id.
impl Ord for PopularCourse {
    fn cmp(&self, other: &Self) -> Ordering {
        self.popularity
            .cmp(&other.popularity)
            .then_with(|| other.course_id.cmp(&self.course_id))
            .then_with(|| other.title.cmp(&self.title))
    }
}

impl PartialOrd for PopularCourse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// CourseIndex - in-memory document collections
// =============================================================================

/// Holds the course and enrollment collections plus the lookups built on them.
///
/// Methods hand out references; the index is shared read-only behind an `Arc`
/// once loading is done.
#[derive(Debug)]
pub struct CourseIndex {
    pub(crate) courses: HashMap<CourseId, Course>,

    /// Course ids per student, in insertion order (may contain duplicates)
    pub(crate) student_enrollments: HashMap<StudentId, Vec<CourseId>>,
    /// Number of enrollment records per course
    pub(crate) course_enrollment_counts: HashMap<CourseId, u32>,

    pub(crate) enrollment_total: usize,
    /// Ids inserted more than once; reported by `validate`
    pub(crate) duplicate_course_ids: Vec<CourseId>,
}

impl CourseIndex {
    /// Creates a new, empty CourseIndex
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
            student_enrollments: HashMap::new(),
            course_enrollment_counts: HashMap::new(),
            enrollment_total: 0,
            duplicate_course_ids: Vec::new(),
        }
    }

    /// Get a course by ID
    pub fn get_course(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Course ids a student is enrolled in, duplicates included.
    ///
    /// Returns an empty slice for unknown students.
    pub fn get_student_enrollments(&self, student_id: &str) -> &[CourseId] {
        self.student_enrollments
            .get(student_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of enrollment records referencing a course (0 if none)
    pub fn get_enrollment_count(&self, course_id: &str) -> u32 {
        self.course_enrollment_counts
            .get(course_id)
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over every course in the catalog (unordered)
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Iterate over (course id, enrollment count) pairs with at least one enrollment
    pub fn enrollment_counts(&self) -> impl Iterator<Item = (&CourseId, u32)> {
        self.course_enrollment_counts.iter().map(|(id, &n)| (id, n))
    }

    /// All student ids that have at least one enrollment, sorted
    pub fn student_ids(&self) -> Vec<StudentId> {
        let mut ids: Vec<StudentId> = self.student_enrollments.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Insert a course into the index
    pub fn insert_course(&mut self, course: Course) {
        if self.courses.contains_key(&course.course_id) {
            self.duplicate_course_ids.push(course.course_id.clone());
        }
        self.courses.insert(course.course_id.clone(), course);
    }

    /// Insert an enrollment and update the lookups
    pub fn insert_enrollment(&mut self, enrollment: Enrollment) {
        *self
            .course_enrollment_counts
            .entry(enrollment.course_id.clone())
            .or_insert(0) += 1;

        self.student_enrollments
            .entry(enrollment.student_id)
            .or_default()
            .push(enrollment.course_id);

        self.enrollment_total += 1;
    }

    /// (courses, students with enrollments, enrollment records)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.courses.len(),
            self.student_enrollments.len(),
            self.enrollment_total,
        )
    }
}

impl Default for CourseIndex {
    fn default() -> Self {
        Self::new()
    }
}
