//! Hash function utilities backed by ahash
//!
//! Settings lists and custom entity tables are hashed with ahash for
//! consistent performance across platforms with `DoS` resistance.

use ahash::RandomState;
use core::hash::Hash;
use std::collections::{HashMap, HashSet};

/// Create a new `HashMap` with the crate-wide hasher
///
/// # Example
///
/// ```rust
/// use vtt_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, String>();
/// map.insert("hellip".to_string(), "\u{2026}".to_string());
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V, RandomState> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashSet` with specific capacity and the crate-wide hasher
#[must_use]
pub fn create_hash_set_with_capacity<T>(capacity: usize) -> HashSet<T, RandomState> {
    HashSet::with_capacity_and_hasher(capacity, RandomState::new())
}

/// Remove repeated values, keeping the first occurrence of each in place
///
/// Distinct values of the same kind survive in their original order, so
/// `[align:start, align:start, align:end]` becomes `[align:start, align:end]`.
///
/// # Example
///
/// ```rust
/// use vtt_core::utils::hashers::dedup_preserving_order;
///
/// assert_eq!(dedup_preserving_order(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
/// ```
#[must_use]
pub fn dedup_preserving_order<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    if items.len() < 2 {
        return items;
    }
    let mut seen = create_hash_set_with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
