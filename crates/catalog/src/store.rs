//! Repository abstraction over the document store.
//!
//! The recommendation logic never touches a connection directly; it receives a
//! `CourseRepository` and issues the handful of read queries below. Opening
//! and closing the underlying store is the caller's job.

use crate::error::{CatalogError, Result};
use crate::rank;
use crate::types::{Course, CourseId, CourseIndex, PopularCourse};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Read queries the recommendation engine needs from the store.
///
/// Implementations must be safe to call concurrently; every method is a
/// read and none of them mutate shared state.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Distinct course ids the student is enrolled in (empty for no history)
    async fn lookup_enrolled_course_ids(&self, student_id: &str) -> Result<HashSet<CourseId>>;

    /// Catalog records for the given ids; unknown ids are skipped
    async fn fetch_courses(&self, ids: &HashSet<CourseId>) -> Result<Vec<Course>>;

    /// Every catalog record whose id is not in `excluding`
    async fn fetch_candidate_courses(&self, excluding: &HashSet<CourseId>) -> Result<Vec<Course>>;

    /// Enrollment record counts, restricted to `ids`.
    ///
    /// Courses with no enrollments are absent from the map.
    async fn count_enrollments_by_course(&self, ids: &[CourseId]) -> Result<HashMap<CourseId, u32>>;

    /// The `limit` most-enrolled courses across the whole collection, best
    /// first, joined with their titles.
    async fn global_popularity_top(&self, limit: usize) -> Result<Vec<PopularCourse>>;
}

/// In-memory store backed by a [`CourseIndex`].
///
/// Starts disconnected unless built with [`MemoryStore::from_index`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: RwLock<Option<Arc<CourseIndex>>>,
}

impl MemoryStore {
    /// Create a store with no data attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already connected to `index`
    pub fn from_index(index: CourseIndex) -> Self {
        Self {
            index: RwLock::new(Some(Arc::new(index))),
        }
    }

    /// Load the collections from `data_dir` and attach them
    pub async fn connect(&self, data_dir: &Path) -> Result<()> {
        let dir = data_dir.to_path_buf();
        let index = tokio::task::spawn_blocking(move || CourseIndex::load_from_dir(&dir))
            .await
            .map_err(|e| CatalogError::Unavailable(format!("loader task failed: {e}")))??;

        let (courses, students, enrollments) = index.counts();
        info!(
            "Store connected: {} courses, {} students, {} enrollments",
            courses, students, enrollments
        );

        *self.index.write().await = Some(Arc::new(index));
        Ok(())
    }

    /// Detach the data; later queries fail with `Unavailable`
    pub async fn disconnect(&self) {
        if self.index.write().await.take().is_some() {
            info!("Store disconnected");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.index.read().await.is_some()
    }

    /// Snapshot of the attached index, for read-only reporting
    pub async fn snapshot(&self) -> Result<Arc<CourseIndex>> {
        self.index
            .read()
            .await
            .clone()
            .ok_or_else(|| CatalogError::Unavailable("store is not connected".to_string()))
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn lookup_enrolled_course_ids(&self, student_id: &str) -> Result<HashSet<CourseId>> {
        let index = self.snapshot().await?;
        Ok(index
            .get_student_enrollments(student_id)
            .iter()
            .cloned()
            .collect())
    }

    async fn fetch_courses(&self, ids: &HashSet<CourseId>) -> Result<Vec<Course>> {
        let index = self.snapshot().await?;
        let mut courses: Vec<Course> = ids
            .iter()
            .filter_map(|id| index.get_course(id).cloned())
            .collect();
        courses.sort_unstable_by(|a, b| a.course_id.cmp(&b.course_id));
        Ok(courses)
    }

    async fn fetch_candidate_courses(&self, excluding: &HashSet<CourseId>) -> Result<Vec<Course>> {
        let index = self.snapshot().await?;
        let mut courses: Vec<Course> = index
            .courses()
            .filter(|course| !excluding.contains(&course.course_id))
            .cloned()
            .collect();
        courses.sort_unstable_by(|a, b| a.course_id.cmp(&b.course_id));
        debug!("{} candidate courses after excluding {}", courses.len(), excluding.len());
        Ok(courses)
    }

    async fn count_enrollments_by_course(&self, ids: &[CourseId]) -> Result<HashMap<CourseId, u32>> {
        let index = self.snapshot().await?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                let count = index.get_enrollment_count(id);
                (count > 0).then(|| (id.clone(), count))
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn global_popularity_top(&self, limit: usize) -> Result<Vec<PopularCourse>> {
        let index = self.snapshot().await?;

        // Rank on counts first, then join titles; a course missing from the
        // catalog drops out of the result instead of failing it.
        let ranked = rank::top_k(
            index.enrollment_counts().map(|(id, popularity)| PopularCourse {
                course_id: id.clone(),
                title: String::new(),
                popularity,
            }),
            limit,
        );

        Ok(ranked
            .into_iter()
            .filter_map(|mut row| {
                let course = index.get_course(&row.course_id)?;
                row.title = course.title.clone();
                Some(row)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Enrollment;

    fn build_store() -> MemoryStore {
        let courses = vec![
            Course::new("A", "Algebra").with_category("Math").with_tags(["math"]),
            Course::new("B", "Biology").with_category("Science"),
            Course::new("C", "Chemistry").with_category("Science"),
            Course::new("D", "Drawing"),
        ];
        let mut enrollments = Vec::new();
        for (course, n) in [("A", 10), ("B", 7), ("C", 7)] {
            for i in 0..n {
                enrollments.push(Enrollment::new(format!("user_{i}"), course));
            }
        }
        MemoryStore::from_index(CourseIndex::from_documents(courses, enrollments))
    }

    #[tokio::test]
    async fn test_lookup_is_distinct() {
        let index = CourseIndex::from_documents(
            vec![Course::new("A", "Algebra")],
            vec![Enrollment::new("s1", "A"), Enrollment::new("s1", "A")],
        );
        let store = MemoryStore::from_index(index);

        let ids = store.lookup_enrolled_course_ids("s1").await.unwrap();
        assert_eq!(ids.len(), 1);
        assert!(store.lookup_enrolled_course_ids("nobody").await.unwrap().is_empty());

        // Duplicates still count twice towards popularity
        let counts = store.count_enrollments_by_course(&["A".to_string()]).await.unwrap();
        assert_eq!(counts["A"], 2);
    }

    #[tokio::test]
    async fn test_candidates_exclude_enrolled() {
        let store = build_store();
        let excluding: HashSet<CourseId> = ["A".to_string(), "C".to_string()].into();

        let candidates = store.fetch_candidate_courses(&excluding).await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "D"]);
    }

    #[tokio::test]
    async fn test_counts_are_restricted_and_sparse() {
        let store = build_store();
        let ids = vec!["B".to_string(), "D".to_string()];

        let counts = store.count_enrollments_by_course(&ids).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["B"], 7);
        assert!(!counts.contains_key("D"));
        assert!(!counts.contains_key("A"));
    }

    #[tokio::test]
    async fn test_global_popularity_top_breaks_ties_by_id() {
        let store = build_store();

        let top = store.global_popularity_top(2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].course_id, "A");
        assert_eq!(top[0].title, "Algebra");
        assert_eq!(top[0].popularity, 10);
        assert_eq!(top[1].course_id, "B");
        assert_eq!(top[1].popularity, 7);
    }

    #[tokio::test]
    async fn test_disconnected_store_is_unavailable() {
        let store = build_store();
        assert!(store.is_connected().await);

        store.disconnect().await;
        let err = store.global_popularity_top(5).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
        assert!(err.is_store_failure());

        let never_opened = MemoryStore::new();
        assert!(never_opened.fetch_courses(&HashSet::new()).await.is_err());
    }
}
