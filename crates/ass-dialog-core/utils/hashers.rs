//! Hash map construction with ahash
//!
//! Keeps hasher selection in one place so counters and lookup tables across
//! the crate share the same `RandomState`.

use ahash::RandomState;
use std::collections::HashMap;

/// Hash map type used throughout the crate
pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

/// Create a new `HashMap` with the crate's hasher
///
/// # Example
///
/// ```rust
/// use ass_dialog_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<&str, usize>();
/// map.insert("skipped", 3);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with specific capacity
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_start_empty() {
        let map = create_hash_map::<u8, u8>();
        assert!(map.is_empty());

        let map = create_hash_map_with_capacity::<u8, u8>(16);
        assert!(map.capacity() >= 16);
    }

    #[test]
    fn insert_and_lookup() {
        let mut map = create_hash_map();
        *map.entry("style").or_insert(0) += 1;
        *map.entry("style").or_insert(0) += 1;
        assert_eq!(map.get("style"), Some(&2));
    }
}
