//! CourseIndex building and validation.
//!
//! Loads the two collection exports, fills the primary maps and checks
//! referential integrity before the index is handed to a store.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl CourseIndex {
    /// Load the course and enrollment collections from a directory
    ///
    /// Expects `courses.jsonl` and `enrollments.jsonl` inside `data_dir`.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading course catalog from {:?}", data_dir);

        let courses_path = data_dir.join("courses.jsonl");
        let enrollments_path = data_dir.join("enrollments.jsonl");

        // Both exports are independent, parse them side by side
        let (courses, enrollments) = rayon::join(
            || parser::parse_courses(&courses_path),
            || parser::parse_enrollments(&enrollments_path),
        );
        let courses = courses?;
        let enrollments = enrollments?;

        info!(
            "Parsed {} courses and {} enrollments",
            courses.len(),
            enrollments.len()
        );

        let index = Self::from_documents(courses, enrollments);
        index.validate()?;

        debug!("CourseIndex built and validated");
        Ok(index)
    }

    /// Build an index from already-parsed documents (no validation)
    pub fn from_documents(
        courses: impl IntoIterator<Item = Course>,
        enrollments: impl IntoIterator<Item = Enrollment>,
    ) -> Self {
        let mut index = CourseIndex::new();
        for course in courses {
            index.insert_course(course);
        }
        for enrollment in enrollments {
            index.insert_enrollment(enrollment);
        }
        index
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - no courseId was inserted twice
    /// - every enrollment references a course present in the catalog
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.duplicate_course_ids.first() {
            return Err(CatalogError::ValidationError(format!(
                "duplicate courseId {:?}",
                id
            )));
        }

        for course_id in self.course_enrollment_counts.keys() {
            if !self.courses.contains_key(course_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Course".to_string(),
                    id: course_id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &Path, courses: &str, enrollments: &str) {
        fs::write(dir.join("courses.jsonl"), courses).unwrap();
        fs::write(dir.join("enrollments.jsonl"), enrollments).unwrap();
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            concat!(
                r#"{"courseId": "PYT", "title": "Python", "category": "Programming", "tags": ["python", "programming"], "price": 100}"#,
                "\n",
                r#"{"courseId": "SQL", "title": "SQL", "category": "Database", "tags": ["sql", "database"], "price": 80}"#,
                "\n",
            ),
            concat!(
                r#"{"enrollmentId": "enr_1", "studentId": "user_1", "courseId": "PYT"}"#,
                "\n",
                r#"{"enrollmentId": "enr_2", "studentId": "user_2", "courseId": "PYT"}"#,
                "\n",
                r#"{"enrollmentId": "enr_3", "studentId": "user_2", "courseId": "SQL"}"#,
                "\n",
            ),
        );

        let index = CourseIndex::load_from_dir(dir.path()).unwrap();
        assert_eq!(index.counts(), (2, 2, 3));
        assert_eq!(index.get_enrollment_count("PYT"), 2);
        assert_eq!(index.get_student_enrollments("user_2"), &["PYT", "SQL"]);
    }

    #[test]
    fn test_enrollment_for_unknown_course_is_rejected() {
        let index = CourseIndex::from_documents(
            vec![Course::new("PYT", "Python")],
            vec![Enrollment::new("user_1", "GHOST")],
        );

        let err = index.validate().unwrap_err();
        assert!(matches!(err, CatalogError::MissingReference { ref id, .. } if id == "GHOST"));
    }

    #[test]
    fn test_duplicate_course_is_rejected() {
        let index = CourseIndex::from_documents(
            vec![Course::new("PYT", "Python"), Course::new("PYT", "Python 2")],
            Vec::new(),
        );
        assert!(matches!(
            index.validate(),
            Err(CatalogError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let err = CourseIndex::load_from_dir(Path::new("/no/such/dataset")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
