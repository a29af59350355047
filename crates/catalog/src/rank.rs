//! Bounded top-K selection.
//!
//! Keeps at most `k` items in a min-heap whose root is the weakest item kept
//! so far. Each new item only displaces the root when it ranks higher, so the
//! whole pass costs O(n log k) instead of sorting all n items.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Return the `k` highest-ranked items, best first.
///
/// "Highest-ranked" is defined by `Ord`: greater items rank higher. Items
/// must have a total order with no ties between distinct items if the output
/// order is to be fully deterministic.
pub fn top_k<T, I>(items: I, k: usize) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    if k == 0 {
        return Vec::new();
    }

    // Size by the input, not by `k`: callers may pass an effectively unbounded limit
    let items = items.into_iter();
    let mut heap: BinaryHeap<Reverse<T>> = BinaryHeap::with_capacity(items.size_hint().0.min(k));
    for item in items {
        if heap.len() < k {
            heap.push(Reverse(item));
            continue;
        }
        // Heap is full: only replace the weakest kept item
        if let Some(mut weakest) = heap.peek_mut()
            && item > weakest.0
        {
            *weakest = Reverse(item);
        }
    }

    // Ascending by Reverse<T> is descending by T
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(item)| item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_best_first() {
        let picked = top_k(vec![4, 9, 1, 7, 3, 8], 3);
        assert_eq!(picked, vec![9, 8, 7]);
    }

    #[test]
    fn test_fewer_items_than_k() {
        let picked = top_k(vec![2, 5], 10);
        assert_eq!(picked, vec![5, 2]);
    }

    #[test]
    fn test_zero_k_is_empty() {
        let picked = top_k(vec![1, 2, 3], 0);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_unbounded_k_returns_everything() {
        let picked = top_k(vec![3, 1, 2], usize::MAX);
        assert_eq!(picked, vec![3, 2, 1]);

        let picked = top_k((0..1000u32).filter(|i| i % 2 == 0), 1 << 40);
        assert_eq!(picked.len(), 500);
        assert_eq!(picked[0], 998);
    }

    #[test]
    fn test_empty_input() {
        let picked: Vec<u32> = top_k(Vec::new(), 5);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_matches_full_sort() {
        let items: Vec<u64> = (0..500u64).map(|i| (i * 7919) % 1009).collect();

        let mut sorted = items.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(25);

        assert_eq!(top_k(items, 25), sorted);
    }
}
