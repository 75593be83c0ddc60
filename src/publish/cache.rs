//! Process-lifetime record of published sources.
//!
//! Keys are the alias-resolved strings callers passed to `publish`, not
//! canonical paths. `css/app.css` and `./css/app.css` are two entries even
//! though they name the same file. Entries are never evicted.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;

/// Where a source was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishRecord {
    pub path: PathBuf,
    pub url: String,
}

impl PublishRecord {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Thread-safe publish memo with per-key publish locks.
#[derive(Debug, Default)]
pub struct PublishCache {
    records: DashMap<String, PublishRecord>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PublishCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<PublishRecord> {
        self.records.get(key).map(|r| r.clone())
    }

    pub fn put(&self, key: impl Into<String>, record: PublishRecord) {
        self.records.insert(key.into(), record);
    }

    /// Lock serializing publishes of one key.
    ///
    /// Different keys never contend. After a successful publish the lock
    /// lives as long as the record it guards; see [`release_lock`](Self::release_lock)
    /// for failures.
    pub fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(key) {
            return Arc::clone(&lock);
        }
        Arc::clone(&self.locks.entry(key.to_owned()).or_default())
    }

    /// Forget the lock of a key whose publish failed.
    ///
    /// The caller must still hold its handle from `key_lock`. The entry is
    /// kept while any other caller holds one too.
    pub fn release_lock(&self, key: &str) {
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) <= 2);
    }

    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put() {
        let cache = PublishCache::new();
        assert!(cache.get("/src/app.css").is_none());

        let record = PublishRecord::new("/pub/abc/app.css", "/assets/abc/app.css");
        cache.put("/src/app.css", record.clone());

        assert_eq!(cache.get("/src/app.css"), Some(record));
        assert_eq!(cache.len(), 1);
        // Different spelling, different entry
        assert!(cache.get("/src/./app.css").is_none());
    }

    #[test]
    fn test_key_lock_shared_per_key() {
        let cache = PublishCache::new();
        let a = cache.key_lock("a");
        let a2 = cache.key_lock("a");
        let b = cache.key_lock("b");

        assert!(Arc::ptr_eq(&a, &a2));
        assert!(!Arc::ptr_eq(&a, &b));

        let _guard = a.lock();
        assert!(b.try_lock().is_some());
        assert!(a2.try_lock().is_none());
    }

    #[test]
    fn test_release_lock() {
        let cache = PublishCache::new();
        let lock = cache.key_lock("a");
        cache.release_lock("a");
        assert_eq!(cache.lock_count(), 0);
        drop(lock);

        // Kept while another caller waits on it
        let lock = cache.key_lock("b");
        let waiter = cache.key_lock("b");
        cache.release_lock("b");
        assert_eq!(cache.lock_count(), 1);
        drop(waiter);
        cache.release_lock("b");
        assert_eq!(cache.lock_count(), 0);
        drop(lock);
    }
}
