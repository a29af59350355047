//! Result shapes returned to callers.
//!
//! Personalized results carry a score; cold-start results are ranked on
//! popularity alone and have none. The two never mix in one list.

use catalog::{CourseId, PopularCourse};
use pipeline::ScoredCandidate;
use serde::Serialize;

/// One entry of a personalized (content-scored) list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecommendation {
    pub course_id: CourseId,
    pub title: String,
    pub score: f64,
    pub popularity: u32,
}

impl From<ScoredCandidate> for ContentRecommendation {
    fn from(scored: ScoredCandidate) -> Self {
        Self {
            course_id: scored.course_id,
            title: scored.title,
            score: scored.score,
            popularity: scored.popularity,
        }
    }
}

/// One entry of a cold-start (popularity-only) list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityRecommendation {
    pub course_id: CourseId,
    pub title: String,
    pub popularity: u32,
}

impl From<PopularCourse> for PopularityRecommendation {
    fn from(row: PopularCourse) -> Self {
        Self {
            course_id: row.course_id,
            title: row.title,
            popularity: row.popularity,
        }
    }
}

/// An ordered recommendation list, best first.
///
/// Serializes as a plain JSON array of `{courseId, title, score?, popularity}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recommendations {
    Personalized(Vec<ContentRecommendation>),
    ColdStart(Vec<PopularityRecommendation>),
}

/// Borrowed view of one entry regardless of which path produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationEntry<'a> {
    pub course_id: &'a str,
    pub title: &'a str,
    pub score: Option<f64>,
    pub popularity: u32,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        match self {
            Self::Personalized(items) => items.len(),
            Self::ColdStart(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_cold_start(&self) -> bool {
        matches!(self, Self::ColdStart(_))
    }

    /// Entries in rank order
    pub fn entries(&self) -> Vec<RecommendationEntry<'_>> {
        match self {
            Self::Personalized(items) => items
                .iter()
                .map(|r| RecommendationEntry {
                    course_id: &r.course_id,
                    title: &r.title,
                    score: Some(r.score),
                    popularity: r.popularity,
                })
                .collect(),
            Self::ColdStart(items) => items
                .iter()
                .map(|r| RecommendationEntry {
                    course_id: &r.course_id,
                    title: &r.title,
                    score: None,
                    popularity: r.popularity,
                })
                .collect(),
        }
    }

    pub fn course_ids(&self) -> Vec<&str> {
        self.entries().into_iter().map(|e| e.course_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_start_serializes_without_score() {
        let recs = Recommendations::ColdStart(vec![PopularityRecommendation {
            course_id: "A".into(),
            title: "Algebra".into(),
            popularity: 10,
        }]);

        let json = serde_json::to_value(&recs).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "courseId": "A", "title": "Algebra", "popularity": 10 }])
        );
    }

    #[test]
    fn test_personalized_serializes_with_score() {
        let recs = Recommendations::Personalized(vec![ContentRecommendation {
            course_id: "Y".into(),
            title: "Databases".into(),
            score: 13.0,
            popularity: 20,
        }]);

        let json = serde_json::to_value(&recs).unwrap();
        assert_eq!(json[0]["score"], 13.0);
        assert_eq!(json[0]["courseId"], "Y");
        assert_eq!(recs.entries()[0].score, Some(13.0));
        assert!(!recs.is_cold_start());
    }
}
