//! # Recommendation Engine
//!
//! Coordinates one recommendation request end to end:
//! 1. Validate the request
//! 2. Look up the student's enrollments
//! 3. No enrollments: rank by global popularity and stop
//! 4. Build the interest profile
//! 5. Generate and filter candidates
//! 6. Aggregate candidate popularity
//! 7. Score and select the top `limit`
//!
//! Every store read is awaited in sequence; scoring and selection run in
//! memory between them. Any store failure aborts the whole request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, instrument, warn};

use catalog::{rank, CourseRepository};
use pipeline::filters::AlreadyEnrolledFilter;
use pipeline::{select_top, FilterPipeline, Scorer, ScoringWeights};
use sources::{
    build_student_context, CandidateGenerator, CategoryMatch, PopularityAggregator,
    StudentContext,
};

use crate::error::RecommendError;
use crate::recommendation::{ContentRecommendation, PopularityRecommendation, Recommendations};

/// Default number of recommendations per request
pub const DEFAULT_LIMIT: usize = 10;

/// Caller-controlled knobs for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendRequest {
    /// Upper bound on the result length
    pub limit: usize,
    pub weights: ScoringWeights,
    pub category_match: CategoryMatch,
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            weights: ScoringWeights::default(),
            category_match: CategoryMatch::default(),
        }
    }
}

impl RecommendRequest {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_category_match(mut self, category_match: CategoryMatch) -> Self {
        self.category_match = category_match;
        self
    }
}

/// Stateless engine; cheap to clone and share across tasks
#[derive(Clone)]
pub struct RecommendationEngine {
    repo: Arc<dyn CourseRepository>,
    candidate_generator: CandidateGenerator,
    filter_pipeline: Arc<FilterPipeline>,
}

impl RecommendationEngine {
    /// Create an engine reading from `repo`.
    ///
    /// The repository's connection lifecycle stays with the caller.
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self {
            repo,
            candidate_generator: CandidateGenerator::new(),
            filter_pipeline: Arc::new(FilterPipeline::new().add_filter(AlreadyEnrolledFilter)),
        }
    }

    /// Replace the candidate generator (e.g. to cap candidate counts)
    pub fn with_candidate_generator(mut self, generator: CandidateGenerator) -> Self {
        self.candidate_generator = generator;
        self
    }

    /// Main entry point: recommend courses for a student
    ///
    /// # Returns
    /// * `Recommendations::Personalized` when the student has enrollments
    /// * `Recommendations::ColdStart` when they have none
    #[instrument(skip(self, request), fields(limit = request.limit))]
    pub async fn recommend_for_student(
        &self,
        student_id: &str,
        request: &RecommendRequest,
    ) -> Result<Recommendations, RecommendError> {
        let start_time = Instant::now();
        validate(student_id, request)?;

        let recommendations = self
            .route(student_id, request)
            .await
            .inspect_err(|e| log_repository_failure(student_id, e))?;

        info!(
            "Returned {} recommendations for student {} in {:.2?}",
            recommendations.len(),
            student_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Same as [`recommend_for_student`](Self::recommend_for_student), failing
    /// as a whole if it takes longer than `timeout`.
    pub async fn recommend_with_timeout(
        &self,
        student_id: &str,
        request: &RecommendRequest,
        timeout: Duration,
    ) -> Result<Recommendations, RecommendError> {
        tokio::time::timeout(timeout, self.recommend_for_student(student_id, request))
            .await
            .map_err(|_| RecommendError::Timeout(timeout))?
    }

    /// Pick the cold-start or content path from the student's history
    async fn route(
        &self,
        student_id: &str,
        request: &RecommendRequest,
    ) -> Result<Recommendations, RecommendError> {
        let context =
            build_student_context(self.repo.as_ref(), student_id, request.category_match).await?;

        if context.is_cold_start() {
            info!("Student {} has no enrollments, using global popularity", student_id);
            self.cold_start(request.limit).await
        } else {
            self.personalized(&context, request).await
        }
    }

    /// Content path: profile-based scoring of every untaken course
    async fn personalized(
        &self,
        context: &StudentContext,
        request: &RecommendRequest,
    ) -> Result<Recommendations, RecommendError> {
        let candidates = self
            .candidate_generator
            .generate(self.repo.as_ref(), &context.enrolled)
            .await?;
        let candidates = self.filter_pipeline.apply(candidates, context);

        let popularity = PopularityAggregator
            .aggregate(self.repo.as_ref(), &candidates)
            .await?;

        let scorer = Scorer::new(request.weights);
        let scored = scorer.score_candidates(&candidates, &context.profile, &popularity);
        debug!("Scored {} candidates", scored.len());

        let top = select_top(scored, request.limit);
        Ok(Recommendations::Personalized(
            top.into_iter().map(ContentRecommendation::from).collect(),
        ))
    }

    /// Cold-start path: most-enrolled courses overall, no score
    async fn cold_start(&self, limit: usize) -> Result<Recommendations, RecommendError> {
        let rows = self.repo.global_popularity_top(limit).await?;

        // Re-apply the ranking so ties come out the same whatever the store did
        let ranked = rank::top_k(rows, limit);
        Ok(Recommendations::ColdStart(
            ranked.into_iter().map(PopularityRecommendation::from).collect(),
        ))
    }
}

fn log_repository_failure(student_id: &str, err: &RecommendError) {
    let RecommendError::Repository(source) = err else {
        return;
    };
    if source.is_store_failure() {
        warn!("Store query failed for student {}: {}", student_id, source);
    } else {
        error!("Catalog data error for student {}: {}", student_id, source);
    }
}

/// Reject malformed input before any store access
fn validate(student_id: &str, request: &RecommendRequest) -> Result<(), RecommendError> {
    if student_id.trim().is_empty() {
        return Err(RecommendError::InvalidInput(
            "student id must not be empty".to_string(),
        ));
    }
    if student_id.chars().any(char::is_control) {
        return Err(RecommendError::InvalidInput(format!(
            "student id {:?} contains control characters",
            student_id
        )));
    }
    request
        .weights
        .validate()
        .map_err(|e| RecommendError::InvalidInput(e.to_string()))
}
