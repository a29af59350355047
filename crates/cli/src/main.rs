use anyhow::{Context, Result, bail};
use catalog::{CourseRepository, MemoryStore};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::ScoringWeights;
use server::{EngineConfig, RecommendationEngine, Recommendations};
use sources::{CategoryMatch, build_student_context};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// course-recs - Course Recommendation Engine
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Course recommendations from tag overlap, category match and popularity", long_about = None)]
struct Cli {
    /// Directory holding courses.jsonl and enrollments.jsonl
    #[arg(short, long, env = "COURSE_RECS_DATA_DIR", default_value = "data/eduhub")]
    data_dir: PathBuf,

    /// Optional engine config (TOML)
    #[arg(short, long, env = "COURSE_RECS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get course recommendations for a student
    Recommend {
        /// Student ID to get recommendations for
        #[arg(long)]
        student_id: String,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Weight per shared tag
        #[arg(long)]
        tag_weight: Option<f64>,

        /// Bonus for a matching category
        #[arg(long)]
        category_weight: Option<f64>,

        /// Weight per enrollment
        #[arg(long)]
        pop_weight: Option<f64>,

        /// Compare category labels ignoring case
        #[arg(long)]
        case_insensitive_categories: bool,

        /// Print the result as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show a student's enrollments and interest profile
    Student {
        /// Student ID to display
        #[arg(long)]
        student_id: String,
    },

    /// Show the most-enrolled courses overall
    Popular {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.data_dir = cli.data_dir.clone();

    eprintln!("Loading course catalog from {}...", config.data_dir.display());
    let start = Instant::now();
    let store = Arc::new(MemoryStore::new());
    store
        .connect(&config.data_dir)
        .await
        .context("Failed to load course catalog")?;
    eprintln!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let result = match cli.command {
        Commands::Recommend {
            student_id,
            limit,
            tag_weight,
            category_weight,
            pop_weight,
            case_insensitive_categories,
            json,
        } => {
            let defaults = config.weights;
            let weights = ScoringWeights::new(
                tag_weight.unwrap_or(defaults.tag),
                category_weight.unwrap_or(defaults.category),
                pop_weight.unwrap_or(defaults.popularity),
            );
            if let Some(limit) = limit {
                config.default_limit = limit;
            }
            config.weights = weights;
            if case_insensitive_categories {
                config.category_match = CategoryMatch::CaseInsensitive;
            }
            handle_recommend(store.clone(), &config, &student_id, json).await
        }
        Commands::Student { student_id } => {
            handle_student(store.as_ref(), &config, &student_id).await
        }
        Commands::Popular { limit } => handle_popular(store.as_ref(), limit).await,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(store.clone(), &config, requests, concurrent).await,
    };

    store.disconnect().await;
    result
}

fn build_engine(store: Arc<MemoryStore>, config: &EngineConfig) -> RecommendationEngine {
    RecommendationEngine::new(store).with_candidate_generator(config.candidate_generator())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    store: Arc<MemoryStore>,
    config: &EngineConfig,
    student_id: &str,
    json: bool,
) -> Result<()> {
    let engine = build_engine(store, config);
    debug!("Effective request: {:?}", config.request());
    let recommendations = engine
        .recommend_with_timeout(student_id, &config.request(), config.timeout())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(student_id, &recommendations);
    }
    Ok(())
}

/// Handle the 'student' command
async fn handle_student(store: &MemoryStore, config: &EngineConfig, student_id: &str) -> Result<()> {
    let context = build_student_context(store, student_id, config.category_match).await?;

    println!("{}", format!("Student: {}", student_id).bold().blue());
    if context.is_cold_start() {
        println!("{}No enrollments (recommendations use global popularity)", "• ".yellow());
        return Ok(());
    }

    let taken = store.fetch_courses(&context.enrolled).await?;
    println!("{}Enrolled in {} courses:", "• ".green(), taken.len());
    for course in &taken {
        println!(
            "  - {} [{}] {}",
            course.title,
            course.course_id,
            course.category.as_deref().unwrap_or("-").dimmed()
        );
    }

    let mut tags: Vec<_> = context.profile.tags.iter().map(String::as_str).collect();
    tags.sort_unstable();
    let mut categories: Vec<_> = context.profile.categories.iter().map(String::as_str).collect();
    categories.sort_unstable();
    println!("{}Interest tags: {}", "• ".cyan(), tags.join(", "));
    println!("{}Interest categories: {}", "• ".cyan(), categories.join(", "));
    Ok(())
}

/// Handle the 'popular' command
async fn handle_popular(store: &MemoryStore, limit: usize) -> Result<()> {
    let top = store.global_popularity_top(limit).await?;

    println!("{}", "Most popular courses:".bold().blue());
    for (i, row) in top.iter().enumerate() {
        println!(
            "{}. {} [{}] - {} enrollments",
            (i + 1).to_string().green(),
            row.title,
            row.course_id,
            row.popularity
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<MemoryStore>,
    config: &EngineConfig,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be positive");
    }

    let students = store.snapshot().await?.student_ids();
    if students.is_empty() {
        bail!("catalog has no students to benchmark with");
    }

    let engine = build_engine(store, config);
    let request = config.request();
    let timeout = config.timeout();
    let permits = Arc::new(Semaphore::new(concurrent));

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let student_id = students[rand::random_range(0..students.len())].clone();
        let engine = engine.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            engine.recommend_with_timeout(&student_id, &request, timeout).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    Ok(())
}

fn print_recommendations(student_id: &str, recommendations: &Recommendations) {
    let header = if recommendations.is_cold_start() {
        format!("Popular courses for new student {}:", student_id)
    } else {
        format!("Recommendations for {}:", student_id)
    };
    println!("{}", header.bold().blue());

    if recommendations.is_empty() {
        println!("  {}", "(nothing to recommend)".dimmed());
        return;
    }

    for (i, entry) in recommendations.entries().iter().enumerate() {
        let rank = (i + 1).to_string().green();
        match entry.score {
            Some(score) => println!(
                "{}. {} [{}] - Score: {:.2} ({} enrollments)",
                rank, entry.title, entry.course_id, score, entry.popularity
            ),
            None => println!(
                "{}. {} [{}] - {} enrollments",
                rank, entry.title, entry.course_id, entry.popularity
            ),
        }
    }
}
