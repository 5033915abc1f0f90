use dashmap::DashMap;
use std::sync::Arc;

/// Unbounded memo cache keyed by name.
///
/// Values live for as long as the cache does: there is no eviction, expiry or
/// revalidation. Values are stored behind `Arc` so a hit hands out a cheap
/// clone of the shared value instead of copying it.
///
/// The cache performs no request de-duplication. Two callers that miss on the
/// same key at the same time will both compute a value and both insert it;
/// the last write wins.
///
/// # Examples
///
/// ```
/// use types_probe_core::cache::MemoCache;
/// use std::sync::Arc;
///
/// let cache: MemoCache<String> = MemoCache::new();
/// assert!(cache.get("left-pad").is_none());
///
/// let stored = cache.insert("left-pad", "1.3.0".to_string());
/// let hit = cache.get("left-pad").unwrap();
/// assert!(Arc::ptr_eq(&stored, &hit));
/// ```
#[derive(Debug)]
pub struct MemoCache<V> {
    entries: DashMap<String, Arc<V>>,
}

impl<V> MemoCache<V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the cached value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Returns the shared handle that was stored.
    pub fn insert(&self, key: impl Into<String>, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(key.into(), Arc::clone(&value));
        value
    }

    /// Returns `true` if a value is cached for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_creation() {
        let cache: MemoCache<u32> = MemoCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let cache = MemoCache::new();
        cache.insert("react", 18);

        assert!(cache.contains("react"));
        assert_eq!(*cache.get("react").unwrap(), 18);
        assert!(cache.get("vue").is_none());
    }

    #[test]
    fn test_hits_share_storage() {
        let cache = MemoCache::new();
        cache.insert("lodash", vec![1, 2, 3]);

        let first = cache.get("lodash").unwrap();
        let second = cache.get("lodash").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_last_write_wins() {
        let cache = MemoCache::new();
        cache.insert("express", "4.18.2");
        cache.insert("express", "4.19.0");

        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get("express").unwrap(), "4.19.0");
    }

    #[test]
    fn test_scoped_keys_are_distinct() {
        let cache = MemoCache::new();
        cache.insert("@types/node", 1);
        cache.insert("node", 2);

        assert_eq!(cache.len(), 2);
        assert_eq!(*cache.get("@types/node").unwrap(), 1);
    }
}
