// In-memory response cache with TTL check-on-read, backed by DashMap
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub text: String,
    pub stored_at: Instant,
}

/// Thread-safe response cache.
///
/// Entries older than the TTL are treated as absent on read and
/// overwritten on the next store. There is no background eviction;
/// distinct keys accumulate for the life of the process.
pub struct ResponseCache {
    map: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.map.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.text.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: String, text: String) {
        self.map.insert(
            key,
            CacheEntry {
                text,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }
}
