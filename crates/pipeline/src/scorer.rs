//! Composite relevance scoring for candidates.
//!
//! ```text
//! score = tag * |profile.tags ∩ lowercase(course.tags)|
//!       + category * [course.category ∈ profile.categories]
//!       + popularity * enrollment_count
//! ```
//!
//! Scoring is a pure function of the profile, the candidate and the weights.

use catalog::{Course, CourseId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sources::{InterestProfile, PopularityMap};
use std::cmp::Ordering;
use thiserror::Error;

/// A weight that can't be used for scoring
#[derive(Error, Debug, Clone, PartialEq)]
#[error("weight {name} must be a finite number, got {value}")]
pub struct InvalidWeight {
    pub name: &'static str,
    pub value: f64,
}

/// Weights applied to each feature. Every field is caller-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per shared tag
    pub tag: f64,
    /// Flat bonus for a category match
    pub category: f64,
    /// Per enrollment record
    pub popularity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tag: 3.0,
            category: 2.0,
            popularity: 0.5,
        }
    }
}

impl ScoringWeights {
    pub fn new(tag: f64, category: f64, popularity: f64) -> Self {
        Self {
            tag,
            category,
            popularity,
        }
    }

    /// Reject NaN and infinite weights
    pub fn validate(&self) -> Result<(), InvalidWeight> {
        for (name, value) in [
            ("tag", self.tag),
            ("category", self.category),
            ("popularity", self.popularity),
        ] {
            if !value.is_finite() {
                return Err(InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Raw features of one candidate, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFeatures {
    pub tag_overlap: usize,
    pub category_match: bool,
    pub popularity: u32,
}

impl CandidateFeatures {
    /// Extract features; absent tags or category contribute zero
    pub fn extract(course: &Course, profile: &InterestProfile, popularity: &PopularityMap) -> Self {
        Self {
            tag_overlap: profile.tag_overlap(&course.tags),
            category_match: profile.matches_category(course.category.as_deref()),
            popularity: popularity.get(&course.course_id),
        }
    }
}

/// A candidate with its composite score
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub course_id: CourseId,
    pub title: String,
    pub score: f64,
    pub popularity: u32,
}

/// Greater means "ranks higher": score, then popularity, then the smaller
/// course id.
impl Ord for ScoredCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.popularity.cmp(&other.popularity))
            .then_with(|| other.course_id.cmp(&self.course_id))
    }
}

impl PartialOrd for ScoredCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoredCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredCandidate {}

/// Scores candidates against an interest profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted sum of the features. Never fails.
    pub fn score(&self, features: &CandidateFeatures) -> f64 {
        let category = if features.category_match { 1.0 } else { 0.0 };
        self.weights.tag * features.tag_overlap as f64
            + self.weights.category * category
            + self.weights.popularity * f64::from(features.popularity)
    }

    /// Score one candidate
    pub fn score_candidate(
        &self,
        course: &Course,
        profile: &InterestProfile,
        popularity: &PopularityMap,
    ) -> ScoredCandidate {
        let features = CandidateFeatures::extract(course, profile, popularity);
        ScoredCandidate {
            course_id: course.course_id.clone(),
            title: course.title.clone(),
            score: self.score(&features),
            popularity: features.popularity,
        }
    }

    /// Score every candidate in parallel, preserving input order
    pub fn score_candidates(
        &self,
        candidates: &[Course],
        profile: &InterestProfile,
        popularity: &PopularityMap,
    ) -> Vec<ScoredCandidate> {
        candidates
            .par_iter()
            .map(|course| self.score_candidate(course, profile, popularity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CategoryMatch;

    fn profile_from(tags: &[&str], category: &str) -> InterestProfile {
        let taken = Course::new("TAKEN", "Taken")
            .with_category(category)
            .with_tags(tags.iter().copied());
        InterestProfile::from_courses([&taken], CategoryMatch::Exact)
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights, ScoringWeights::new(3.0, 2.0, 0.5));
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let err = ScoringWeights::new(3.0, f64::NAN, 0.5).validate().unwrap_err();
        assert_eq!(err.name, "category");
        assert!(ScoringWeights::new(f64::INFINITY, 2.0, 0.5).validate().is_err());
    }

    #[test]
    fn test_scenario_scores() {
        let profile = profile_from(&["python", "sql"], "Programming");
        let popularity: PopularityMap =
            [("X".to_string(), 5), ("Y".to_string(), 20)].into_iter().collect();

        let x = Course::new("X", "ML").with_category("Data").with_tags(["python", "ml"]);
        let y = Course::new("Y", "Databases").with_category("Database").with_tags(["sql"]);

        let scorer = Scorer::default();
        assert_eq!(scorer.score_candidate(&x, &profile, &popularity).score, 5.5);
        assert_eq!(scorer.score_candidate(&y, &profile, &popularity).score, 13.0);
    }

    #[test]
    fn test_one_more_shared_tag_adds_exactly_tag_weight() {
        let scorer = Scorer::new(ScoringWeights::new(1.75, 2.0, 0.5));
        for overlap in 0..5 {
            let base = CandidateFeatures {
                tag_overlap: overlap,
                category_match: true,
                popularity: 11,
            };
            let more = CandidateFeatures {
                tag_overlap: overlap + 1,
                ..base
            };
            let delta = scorer.score(&more) - scorer.score(&base);
            assert!(scorer.score(&more) > scorer.score(&base));
            assert!((delta - 1.75).abs() < 1e-12);
        }
    }

    #[test]
    fn test_category_match_and_case() {
        let profile = profile_from(&[], "Data");
        let empty = PopularityMap::default();
        let scorer = Scorer::default();

        let same = Course::new("A", "A").with_category("Data");
        let other_case = Course::new("B", "B").with_category("data");
        assert_eq!(scorer.score_candidate(&same, &profile, &empty).score, 2.0);
        assert_eq!(scorer.score_candidate(&other_case, &profile, &empty).score, 0.0);
    }

    #[test]
    fn test_candidate_without_metadata_scores_popularity_only() {
        let profile = profile_from(&["python"], "Programming");
        let popularity: PopularityMap = [("BARE".to_string(), 4)].into_iter().collect();

        let bare = Course::new("BARE", "Bare");
        let scored = Scorer::default().score_candidate(&bare, &profile, &popularity);
        assert_eq!(scored.score, 2.0);
        assert_eq!(scored.popularity, 4);
    }

    #[test]
    fn test_score_candidates_preserves_order() {
        let profile = profile_from(&["python"], "Programming");
        let candidates: Vec<Course> = (0..50)
            .map(|i| Course::new(format!("C{i:02}"), format!("Course {i}")))
            .collect();

        let scored = Scorer::default().score_candidates(&candidates, &profile, &PopularityMap::default());
        assert_eq!(scored.len(), 50);
        assert!(scored.iter().zip(&candidates).all(|(s, c)| s.course_id == c.course_id));
    }

    #[test]
    fn test_ordering_tie_breaks() {
        let make = |id: &str, score: f64, popularity: u32| ScoredCandidate {
            course_id: id.to_string(),
            title: id.to_string(),
            score,
            popularity,
        };

        assert!(make("A", 5.0, 1) > make("B", 4.0, 100));
        assert!(make("A", 5.0, 2) > make("B", 5.0, 1));
        assert!(make("A", 5.0, 2) > make("B", 5.0, 2));
    }
}
