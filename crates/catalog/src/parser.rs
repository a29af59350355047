//! Parser for JSON Lines exports of the document store.
//!
//! Each collection is exported as one JSON document per line:
//! - courses.jsonl: `{"courseId": "PYT", "title": "Python", "category": "Programming", "tags": ["python"], "price": 100}`
//! - enrollments.jsonl: `{"studentId": "user_1", "courseId": "PYT"}`
//!
//! Unknown fields (descriptions, dates, resources...) are ignored.

use crate::error::{CatalogError, Result};
use crate::types::{Course, Enrollment};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file, turning "not found" into a dedicated error
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })
}

/// Deserialize every non-empty line of `content` as a `T`.
///
/// `file` is only used to label errors.
pub fn parse_lines<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    let mut documents = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let document = serde_json::from_str(line_trimmed).map_err(|e| CatalogError::ParseError {
            file: file.to_string(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        documents.push(document);
    }

    Ok(documents)
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            field: field.to_string(),
            value: format!("{:?}", value),
        });
    }
    Ok(())
}

/// Parse the courses.jsonl file
pub fn parse_courses(path: &Path) -> Result<Vec<Course>> {
    let content = read_file(path)?;
    let courses: Vec<Course> = parse_lines(&content, "courses.jsonl")?;

    for course in &courses {
        require_non_empty("courseId", &course.course_id)?;
        if let Some(price) = course.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(CatalogError::InvalidValue {
                field: "price".to_string(),
                value: price.to_string(),
            });
        }
    }
    Ok(courses)
}

/// Parse the enrollments.jsonl file
pub fn parse_enrollments(path: &Path) -> Result<Vec<Enrollment>> {
    let content = read_file(path)?;
    let enrollments: Vec<Enrollment> = parse_lines(&content, "enrollments.jsonl")?;

    for enrollment in &enrollments {
        require_non_empty("studentId", &enrollment.student_id)?;
        require_non_empty("courseId", &enrollment.course_id)?;
    }
    Ok(enrollments)
}
