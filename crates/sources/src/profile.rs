//! Interest profile derived from the courses a student has taken.
//!
//! Tags are always lower-cased so that "Python" and "python" overlap.
//! Categories keep their original spelling unless the caller opts into
//! [`CategoryMatch::CaseInsensitive`]; the default mirrors how category
//! labels have always been matched against the catalog.

use catalog::Course;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How category labels are compared between the profile and a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatch {
    /// Byte-for-byte comparison ("Data" does not match "data")
    #[default]
    Exact,
    /// Both sides lower-cased before comparison
    CaseInsensitive,
}

impl CategoryMatch {
    fn key(self, category: &str) -> String {
        match self {
            Self::Exact => category.to_string(),
            Self::CaseInsensitive => category.to_lowercase(),
        }
    }
}

/// An empty label counts as no category
fn non_empty(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty())
}

/// Request-scoped summary of a student's interests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestProfile {
    /// Lower-cased tags of every taken course
    pub tags: HashSet<String>,
    /// Category labels of every taken course, keyed per `category_match`
    pub categories: HashSet<String>,
    pub category_match: CategoryMatch,
}

impl InterestProfile {
    /// Build a profile from the student's enrolled course records.
    ///
    /// Missing tags or categories contribute nothing.
    pub fn from_courses<'a, I>(courses: I, category_match: CategoryMatch) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let mut profile = Self {
            category_match,
            ..Self::default()
        };

        for course in courses {
            for tag in &course.tags {
                profile.tags.insert(tag.to_lowercase());
            }
            if let Some(category) = non_empty(course.category.as_deref()) {
                profile.categories.insert(category_match.key(category));
            }
        }
        profile
    }

    /// Number of the course's (lower-cased, distinct) tags present in the profile
    pub fn tag_overlap(&self, tags: &[String]) -> usize {
        tags.iter()
            .map(|t| t.to_lowercase())
            .collect::<HashSet<_>>()
            .iter()
            .filter(|t| self.tags.contains(*t))
            .count()
    }

    /// Whether the course's category is one of the profile's categories
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        non_empty(category)
            .map(|c| self.categories.contains(&self.category_match.key(c)))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.categories.is_empty()
    }
}
