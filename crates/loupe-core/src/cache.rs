use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Bounded least-recently-used map from cleaned source text to its
/// translation, shared by every pipeline worker.
///
/// A single lock covers lookup, recency update and eviction, so each call is
/// atomic with respect to the others. Contention is low: at most a handful of
/// workers are alive at once.
pub struct TranslationCache {
    entries: Mutex<LruCache<String, String>>,
}

impl TranslationCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached translation and marks `key` most recently used.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Inserts or replaces `key`, marking it most recently used.
    ///
    /// Inserting a new key into a full cache evicts exactly one entry, the
    /// one touched longest ago.
    pub fn put(&self, key: String, value: String) {
        let mut entries = self.entries.lock();
        if let Some((old_key, _)) = entries.push(key, value)
            && !entries.contains(&old_key)
        {
            tracing::trace!("evicted cached translation for {:?}", old_key);
        }
    }

    /// Membership test that leaves recency untouched
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn cache(capacity: usize) -> TranslationCache {
        TranslationCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_get_miss_and_hit() {
        let cache = cache(4);
        assert_eq!(cache.get("hello"), None);
        cache.put("hello".into(), "bonjour".into());
        assert_eq!(cache.get("hello").as_deref(), Some("bonjour"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let cache = cache(3);
        for key in ["a", "b", "c", "d"] {
            cache.put(key.into(), key.to_uppercase());
        }
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
        assert!(cache.contains("d"));
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let cache = cache(3);
        for key in ["a", "b", "c"] {
            cache.put(key.into(), key.to_uppercase());
        }
        assert!(cache.get("a").is_some());
        cache.put("d".into(), "D".into());

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_put_existing_updates_and_promotes() {
        let cache = cache(2);
        cache.put("a".into(), "1".into());
        cache.put("b".into(), "2".into());
        cache.put("a".into(), "3".into());
        assert_eq!(cache.len(), 2);

        cache.put("c".into(), "4".into());
        assert_eq!(cache.get("a").as_deref(), Some("3"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_contains_does_not_promote() {
        let cache = cache(2);
        cache.put("a".into(), "1".into());
        cache.put("b".into(), "2".into());
        assert!(cache.contains("a"));
        cache.put("c".into(), "3".into());
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_capacity_one() {
        let cache = cache(1);
        cache.put("a".into(), "1".into());
        cache.put("b".into(), "2".into());
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_concurrent_access_stays_bounded() {
        let cache = Arc::new(cache(64));
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..500 {
                        let key = format!("key-{}", (worker * 31 + i) % 100);
                        cache.put(key.clone(), format!("value-{worker}-{i}"));
                        let _ = cache.get(&key);
                    }
                });
            }
        });
        assert_eq!(cache.len(), 64);
    }
}
