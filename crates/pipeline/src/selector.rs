//! Top-K selection of scored candidates.
//!
//! Ranking key, best first: score, then popularity, then ascending course
//! id. The last key makes the order total, so equal-scoring candidates come
//! out in the same order on every run.

use crate::scorer::ScoredCandidate;
use catalog::rank;
use tracing::debug;

/// Keep the best `limit` candidates, best first.
///
/// Uses a bounded heap rather than sorting the full list.
pub fn select_top(scored: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    let total = scored.len();
    let selected = rank::top_k(scored, limit);
    debug!("Selected {} of {} scored candidates", selected.len(), total);
    selected
}
