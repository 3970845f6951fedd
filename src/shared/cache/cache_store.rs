use dashmap::DashMap;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cached entry with TTL support
#[derive(Clone)]
struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(value: Arc<dyn Any + Send + Sync>, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
    pub expired_cleanups: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// In-memory TTL store shared by every query path
///
/// Values are stored type-erased and read back by type. Two tasks computing
/// the same key concurrently both write; the last writer wins.
pub struct CacheStore {
    cache: Arc<DashMap<String, CacheEntry>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    cleanups: Arc<AtomicU64>,
    cleanup_task_started: Arc<AtomicBool>,
    default_ttl: Duration,
    max_entries: usize,
}

impl CacheStore {
    /// Create a new store with the given default TTL and entry bound
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        let store = Self {
            cache: Arc::new(DashMap::new()),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            cleanups: Arc::new(AtomicU64::new(0)),
            cleanup_task_started: Arc::new(AtomicBool::new(false)),
            default_ttl,
            max_entries: max_entries.max(1),
        };

        // Start the sweep now if a runtime is available, otherwise on first write
        if tokio::runtime::Handle::try_current().is_ok() {
            store.ensure_cleanup_task_started();
        }

        store
    }

    /// Get a cached value if present, unexpired and of type `T`
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.cache.get(key).map(|e| e.clone());

        if let Some(entry) = entry {
            if entry.is_expired() {
                self.cache.remove(key);
                self.cleanups.fetch_add(1, Ordering::Relaxed);
                debug!("Removed expired cache entry for key: {}", key);
            } else if let Some(value) = entry.value.downcast_ref::<T>() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                return Some(value.clone());
            } else {
                debug!("Cache entry for key {} holds a different type", key);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);
        None
    }

    /// Store a value under the default TTL
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store a value with an explicit TTL
    pub fn set_with_ttl<T>(&self, key: impl Into<String>, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        self.ensure_cleanup_task_started();

        if self.cache.len() >= self.max_entries {
            self.evict_oldest_entries();
        }

        let key = key.into();
        debug!("Cached value for key: {} with TTL: {:?}", key, ttl);
        self.cache.insert(key, CacheEntry::new(Arc::new(value), ttl));
    }

    /// Whether an unexpired entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.cache
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    pub fn remove(&self, key: &str) {
        self.cache.remove(key);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get current cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.cache.len(),
            expired_cleanups: self.cleanups.load(Ordering::Relaxed),
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.cleanups.store(0, Ordering::Relaxed);
        info!("Cache cleared");
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        purge_expired_entries(&self.cache, &self.cleanups)
    }

    /// Ensure cleanup task is started (idempotent)
    fn ensure_cleanup_task_started(&self) {
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }

        if self
            .cleanup_task_started
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return; // Task already started
        }

        self.start_cleanup_task();
        debug!("Background cleanup task started");
    }

    /// Start background task for cleaning up expired entries
    ///
    /// The task holds only a weak handle and exits once the store is dropped.
    fn start_cleanup_task(&self) {
        let cache: Weak<DashMap<String, CacheEntry>> = Arc::downgrade(&self.cache);
        let cleanups = self.cleanups.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300)); // Every 5 minutes
            interval.tick().await;

            loop {
                interval.tick().await;

                let Some(cache) = cache.upgrade() else {
                    break;
                };

                let expired_count = purge_expired_entries(&cache, &cleanups);
                if expired_count > 0 {
                    debug!("Cleaned up {} expired cache entries", expired_count);
                }
            }
        });
    }

    /// Evict oldest entries when cache is full
    fn evict_oldest_entries(&self) {
        let current_size = self.cache.len();
        if current_size < self.max_entries {
            return;
        }

        let mut entries: Vec<(String, Instant)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().created_at))
            .collect();

        entries.sort_by_key(|(_, created_at)| *created_at);

        // Evict back down to 90% of capacity
        let target_size = (self.max_entries * 9) / 10;
        let entries_to_evict = current_size.saturating_sub(target_size).max(1);

        for (key, _) in entries.into_iter().take(entries_to_evict) {
            self.cache.remove(&key);
        }

        debug!(
            "Evicted {} old cache entries (was {}, now {})",
            entries_to_evict,
            current_size,
            self.cache.len()
        );
    }
}

impl Default for CacheStore {
    /// One-day default TTL, 10k entries
    fn default() -> Self {
        Self::new(Duration::from_secs(86_400), 10_000)
    }
}

fn purge_expired_entries(cache: &DashMap<String, CacheEntry>, cleanups: &AtomicU64) -> usize {
    let expired_keys: Vec<String> = cache
        .iter()
        .filter(|entry| entry.value().is_expired())
        .map(|entry| entry.key().clone())
        .collect();

    let expired_count = expired_keys.len();
    for key in expired_keys {
        cache.remove(&key);
    }

    if expired_count > 0 {
        cleanups.fetch_add(expired_count as u64, Ordering::Relaxed);
    }

    expired_count
}
