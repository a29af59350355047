//! End-to-end tests: JSON Lines exports on disk through to serialized output.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use catalog::MemoryStore;
use server::{EngineConfig, RecommendError, RecommendationEngine, Recommendations};

fn write_collections(dir: &Path) {
    let courses = [
        r#"{"courseId":"PY101","title":"Python Basics","category":"Programming","tags":["python","beginner"],"price":0}"#,
        r#"{"courseId":"PY201","title":"Advanced Python","category":"Programming","tags":["Python","advanced"],"price":49.5}"#,
        r#"{"courseId":"DB101","title":"Intro to SQL","category":"Database","tags":["sql","beginner"]}"#,
        r#"{"courseId":"ART1","title":"Sketching","category":"Art"}"#,
    ];
    let enrollments = [
        r#"{"studentId":"alice","courseId":"PY101"}"#,
        r#"{"studentId":"bob","courseId":"PY101"}"#,
        r#"{"studentId":"bob","courseId":"DB101"}"#,
        r#"{"studentId":"carol","courseId":"DB101"}"#,
        r#"{"studentId":"dave","courseId":"DB101"}"#,
        r#"{"studentId":"dave","courseId":"ART1"}"#,
    ];
    fs::write(dir.join("courses.jsonl"), courses.join("\n")).unwrap();
    fs::write(dir.join("enrollments.jsonl"), enrollments.join("\n") + "\n").unwrap();
}

async fn connected_engine(dir: &Path) -> (Arc<MemoryStore>, RecommendationEngine) {
    let store = Arc::new(MemoryStore::new());
    store.connect(dir).await.expect("failed to load collections");
    let engine = RecommendationEngine::new(store.clone());
    (store, engine)
}

#[tokio::test]
async fn test_personalized_from_exports() {
    let dir = tempfile::tempdir().unwrap();
    write_collections(dir.path());
    let (_store, engine) = connected_engine(dir.path()).await;

    let recs = engine
        .recommend_for_student("alice", &EngineConfig::default().request())
        .await
        .unwrap();

    // PY201: tag "python" (3.0) + Programming (2.0), no enrollments
    // DB101: tag "beginner" (3.0) + 3 enrollments (1.5)
    // ART1:  1 enrollment (0.5)
    assert!(!recs.is_cold_start());
    assert_eq!(recs.course_ids(), vec!["PY201", "DB101", "ART1"]);

    let scores: Vec<f64> = recs.entries().iter().filter_map(|e| e.score).collect();
    assert_eq!(scores, vec![5.0, 4.5, 0.5]);

    let json = serde_json::to_value(&recs).unwrap();
    assert_eq!(json[0]["courseId"], "PY201");
    assert_eq!(json[0]["title"], "Advanced Python");
    assert_eq!(json[1]["popularity"], 3);
}

#[tokio::test]
async fn test_cold_start_from_exports() {
    let dir = tempfile::tempdir().unwrap();
    write_collections(dir.path());
    let (_store, engine) = connected_engine(dir.path()).await;

    let config = EngineConfig::from_toml_str("default_limit = 2").unwrap();
    let recs = engine
        .recommend_for_student("erin", &config.request())
        .await
        .unwrap();

    let Recommendations::ColdStart(items) = &recs else {
        panic!("expected cold-start results");
    };
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].course_id.as_str(), items[0].popularity), ("DB101", 3));
    assert_eq!((items[1].course_id.as_str(), items[1].popularity), ("PY101", 2));

    let json = serde_json::to_value(&recs).unwrap();
    assert!(json[0].get("score").is_none());
}

#[tokio::test]
async fn test_capped_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write_collections(dir.path());
    let (_store, engine) = connected_engine(dir.path()).await;

    let config = EngineConfig::from_toml_str("max_candidates = 1").unwrap();
    let engine = engine.with_candidate_generator(config.candidate_generator());

    // Only the first untaken course by id survives the cap
    let recs = engine
        .recommend_for_student("alice", &config.request())
        .await
        .unwrap();
    assert_eq!(recs.course_ids(), vec!["ART1"]);
}

#[tokio::test]
async fn test_disconnected_store_fails_request() {
    let dir = tempfile::tempdir().unwrap();
    write_collections(dir.path());
    let (store, engine) = connected_engine(dir.path()).await;

    store.disconnect().await;
    let err = engine
        .recommend_with_timeout("alice", &EngineConfig::default().request(), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::Repository(_)));
}

#[tokio::test]
async fn test_dangling_enrollment_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_collections(dir.path());
    fs::write(
        dir.path().join("enrollments.jsonl"),
        r#"{"studentId":"alice","courseId":"GONE"}"#,
    )
    .unwrap();

    let store = MemoryStore::new();
    assert!(store.connect(dir.path()).await.is_err());
    assert!(!store.is_connected().await);
}
