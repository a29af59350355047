//! # Sources Crate
//!
//! Everything the recommendation engine reads from the store before any
//! scoring happens.
//!
//! ## Components
//!
//! ### Student context
//! - Enrollment lookup: the distinct courses a student has taken
//! - Interest profile: lower-cased tags and category labels of those courses
//!
//! ### Candidates
//! - Every catalog course not yet taken, in course-id order
//!
//! ### Popularity
//! - Enrollment counts for the candidate set only
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_student_context, CandidateGenerator, CategoryMatch, PopularityAggregator};
//!
//! let context = build_student_context(&store, "user_1", CategoryMatch::Exact).await?;
//! if !context.is_cold_start() {
//!     let candidates = CandidateGenerator::new().generate(&store, &context.enrolled).await?;
//!     let popularity = PopularityAggregator.aggregate(&store, &candidates).await?;
//! }
//! ```

// Public modules
pub mod types;
pub mod profile;
pub mod student_context;
pub mod candidates;
pub mod popularity;

// Re-export commonly used types
pub use types::StudentContext;
pub use profile::{CategoryMatch, InterestProfile};
pub use student_context::{build_student_context, lookup_enrollments};
pub use candidates::CandidateGenerator;
pub use popularity::{PopularityAggregator, PopularityMap};
