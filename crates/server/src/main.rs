//! Simple test harness for the recommendation engine.
//!
//! Loads the exported collections and prints recommendations for one
//! student: `course-recs-server [student_id] [config.toml]`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use catalog::MemoryStore;
use server::{EngineConfig, RecommendationEngine};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")
            }),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let student_id = args.next().unwrap_or_else(|| "s1".to_string());
    let config = match args.next() {
        Some(path) => EngineConfig::load(Path::new(&path))?,
        None => EngineConfig::default(),
    };

    info!("Starting course recommendation test harness");

    let store = Arc::new(MemoryStore::new());
    store
        .connect(&config.data_dir)
        .await
        .with_context(|| format!("Failed to load collections from {}", config.data_dir.display()))?;

    let engine = RecommendationEngine::new(store.clone())
        .with_candidate_generator(config.candidate_generator());
    let request = config.request();

    info!("Getting recommendations for student {} (limit: {})", student_id, request.limit);
    let result = engine
        .recommend_with_timeout(&student_id, &request, config.timeout())
        .await;
    store.disconnect().await;
    let recommendations = result?;

    if recommendations.is_cold_start() {
        info!("No enrollment history, showing most popular courses");
    }
    for (i, entry) in recommendations.entries().iter().enumerate() {
        match entry.score {
            Some(score) => info!(
                "{}. {} [{}] - Score: {:.2} ({} enrollments)",
                i + 1,
                entry.title,
                entry.course_id,
                score,
                entry.popularity
            ),
            None => info!(
                "{}. {} [{}] - {} enrollments",
                i + 1,
                entry.title,
                entry.course_id,
                entry.popularity
            ),
        }
    }
    println!("{}", serde_json::to_string_pretty(&recommendations)?);

    Ok(())
}
