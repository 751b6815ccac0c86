//! Per-column value cache.
//!
//! Rebuilding the same value for every row is wasteful when a column only
//! has a few thousand distinct magnitudes. The cache maps a key derived from
//! the magnitude to the `Arc<BenchValue>` built the first time it was seen,
//! so later rows share that instance.
//!
//! Capacity is fixed per column. Nothing is ever evicted: once a column's
//! slot is full, new magnitudes are still produced by the caller but are
//! simply not stored.
//!
//! Keys come from [`cache_key`]. Signed keys keep `+v` and `-v` apart;
//! sign-insensitive keys let them share a slot, and whichever sign was built
//! first is what later lookups return.

use bench_core::BenchValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Default number of cached values per column.
pub const DEFAULT_VALUE_CACHE_SIZE: usize = 1 << 20;

/// Cache key for a magnitude.
///
/// Negative magnitudes under signed keys map above `2^63`, so they never
/// meet a sign-insensitive key of the same column.
pub fn cache_key(magnitude: i64, sign_insensitive: bool) -> u64 {
    if sign_insensitive {
        magnitude.unsigned_abs()
    } else {
        magnitude as u64
    }
}

/// Bounded key-to-value cache with one slot per column.
#[derive(Debug, Clone)]
pub struct ValueCache {
    capacity: usize,
    columns: Vec<HashMap<u64, Arc<BenchValue>>>,
}

impl Default for ValueCache {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_CACHE_SIZE)
    }
}

impl ValueCache {
    /// Create an empty cache holding up to `capacity` values per column.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            columns: Vec::new(),
        }
    }

    /// Maximum number of values cached per column.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a column and return its index.
    pub fn add_column(&mut self) -> usize {
        self.columns.push(HashMap::new());
        self.columns.len() - 1
    }

    /// Look up a previously built value.
    pub fn get(&self, column: usize, key: u64) -> Option<Arc<BenchValue>> {
        self.columns.get(column)?.get(&key).cloned()
    }

    /// Store a value. Returns false if the column is full or unknown.
    pub fn put(&mut self, column: usize, key: u64, value: Arc<BenchValue>) -> bool {
        let capacity = self.capacity;
        let Some(slot) = self.columns.get_mut(column) else {
            return false;
        };
        if !slot.contains_key(&key) && slot.len() >= capacity {
            return false;
        }
        slot.insert(key, value);
        true
    }

    /// Number of values cached for a column.
    pub fn len(&self, column: usize) -> usize {
        self.columns.get(column).map_or(0, HashMap::len)
    }

    /// Check if a column has no cached values.
    pub fn is_empty(&self, column: usize) -> bool {
        self.len(column) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: i64) -> Arc<BenchValue> {
        Arc::new(BenchValue::Long(v))
    }

    #[test]
    fn test_get_returns_same_instance() {
        let mut cache = ValueCache::new(10);
        let col = cache.add_column();

        let v = value(5);
        assert!(cache.put(col, 5, v.clone()));

        let a = cache.get(col, 5).unwrap();
        let b = cache.get(col, 5).unwrap();
        assert!(Arc::ptr_eq(&a, &v));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(cache.get(col, 6).is_none());
    }

    #[test]
    fn test_no_eviction_at_capacity() {
        let mut cache = ValueCache::new(3);
        let col = cache.add_column();

        for k in 0..3 {
            assert!(cache.put(col, k, value(k as i64)));
        }
        assert!(!cache.put(col, 3, value(3)));
        assert_eq!(cache.len(col), 3);
        assert!(cache.get(col, 3).is_none());
        for k in 0..3 {
            assert!(cache.get(col, k).is_some());
        }
        // Existing keys can still be replaced when full
        assert!(cache.put(col, 2, value(2)));
    }

    #[test]
    fn test_cache_key_sign_handling() {
        assert_eq!(cache_key(20, true), cache_key(-20, true));
        assert_ne!(cache_key(20, false), cache_key(-20, false));
        assert_eq!(cache_key(20, false), cache_key(20, true));

        // Signed negatives stay clear of every sign-insensitive key
        for m in [-1i64, -3, -1_000_000, i64::MIN + 1] {
            assert!(cache_key(m, false) > cache_key(i64::MAX, true));
        }
    }

    #[test]
    fn test_sign_insensitive_keys_collapse() {
        let mut cache = ValueCache::new(10);
        let col = cache.add_column();

        let positive = value(20);
        cache.put(col, cache_key(20, true), positive.clone());
        let hit = cache.get(col, cache_key(-20, true)).unwrap();
        assert!(Arc::ptr_eq(&hit, &positive));
        assert!(cache.get(col, cache_key(-20, false)).is_none());
    }

    #[test]
    fn test_columns_are_independent() {
        let mut cache = ValueCache::new(1);
        let a = cache.add_column();
        let b = cache.add_column();

        assert!(cache.put(a, 1, value(1)));
        assert!(cache.put(b, 2, value(2)));
        assert!(cache.get(a, 2).is_none());
        assert!(cache.get(b, 1).is_none());
        assert!(!cache.put(a, 3, value(3)));
    }

    #[test]
    fn test_unknown_column() {
        let mut cache = ValueCache::default();
        assert_eq!(cache.capacity(), DEFAULT_VALUE_CACHE_SIZE);
        assert!(!cache.put(0, 1, value(1)));
        assert!(cache.get(0, 1).is_none());
        assert!(cache.is_empty(0));
    }
}
