//! Compiled expression cache with TTL expiry

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::expr::{ParseMode, ScopeExpr};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of compiled expressions kept
    pub capacity: usize,

    /// Time-to-live for a compiled expression
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            ttl: Duration::from_secs(60),
        }
    }
}

/// Expressions compiled under different modes can differ, so the mode is
/// part of the key
type CacheKey = (ParseMode, String);

/// Cached entry with creation time
#[derive(Clone)]
struct CachedEntry {
    expr: Arc<ScopeExpr>,
    cached_at: Instant,
}

impl CachedEntry {
    fn new(expr: Arc<ScopeExpr>) -> Self {
        Self {
            expr,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Thread-safe cache of compiled expressions
///
/// Provides:
/// - Concurrent access through DashMap
/// - TTL-based expiration, detected on read
/// - Capacity bound, evicting about a tenth of the entries when full
/// - Hit, miss and expiration counters
pub struct ExpressionCache {
    /// Compiled expressions by `(mode, source)`
    entries: Arc<DashMap<CacheKey, CachedEntry>>,

    /// Cache configuration
    config: CacheConfig,

    /// Cache statistics
    stats: Arc<DashMap<String, usize>>,
}

impl ExpressionCache {
    /// Create a new expression cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
            stats: Arc::new(DashMap::new()),
        }
    }

    /// Get a compiled expression if present and not expired
    pub fn get(&self, mode: ParseMode, expression: &str) -> Option<Arc<ScopeExpr>> {
        let key = (mode, expression.to_string());

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_expired(self.config.ttl) {
                // Release the shard lock before removing
                drop(entry);
                self.entries.remove(&key);
                self.increment_stat("expirations");
                self.increment_stat("misses");
                return None;
            }

            self.increment_stat("hits");
            return Some(Arc::clone(&entry.expr));
        }

        self.increment_stat("misses");
        None
    }

    /// Store a compiled expression
    ///
    /// Replacing an existing key never evicts. A cache with zero capacity
    /// stores nothing.
    pub fn put(&self, mode: ParseMode, expression: &str, expr: Arc<ScopeExpr>) {
        if self.config.capacity == 0 {
            return;
        }

        let key = (mode, expression.to_string());
        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.capacity {
            self.evict_oldest();
        }

        self.entries.insert(key, CachedEntry::new(expr));
    }

    /// Clear all entries and statistics
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.clear();
    }

    /// Removes expired entries
    pub fn cleanup_expired(&self) {
        let ttl = self.config.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            entries: self.entries.len(),
            max_entries: self.config.capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Evicts entries in iteration order until a tenth of capacity is freed
    fn evict_oldest(&self) {
        let to_remove = (self.config.capacity / 10).max(1);
        let mut removed = 0;

        self.entries.retain(|_, _| {
            if removed < to_remove {
                removed += 1;
                false
            } else {
                true
            }
        });

        debug!(removed, capacity = self.config.capacity, "Evicted cached expressions");
    }

    fn increment_stat(&self, key: &str) {
        self.stats
            .entry(key.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub expirations: usize,
    pub entries: usize,
    pub max_entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(scope: &str) -> Arc<ScopeExpr> {
        Arc::new(ScopeExpr::literal(scope))
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let cache = ExpressionCache::new(CacheConfig::default());

        assert!(cache.get(ParseMode::Compatible, "public").is_none());

        cache.put(ParseMode::Compatible, "public", compiled("public"));
        let cached = cache.get(ParseMode::Compatible, "public").unwrap();
        assert_eq!(*cached, ScopeExpr::literal("public"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_mode_is_part_of_key() {
        let cache = ExpressionCache::new(CacheConfig::default());
        cache.put(ParseMode::Compatible, "a", compiled("a"));

        assert!(cache.get(ParseMode::Strict, "a").is_none());
        assert!(cache.get(ParseMode::Compatible, "a").is_some());
    }

    #[test]
    fn test_cache_expiration() {
        let cache = ExpressionCache::new(CacheConfig {
            capacity: 10,
            ttl: Duration::from_millis(20),
        });
        cache.put(ParseMode::Compatible, "a", compiled("a"));

        std::thread::sleep(Duration::from_millis(50));

        assert!(cache.get(ParseMode::Compatible, "a").is_none());
        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = ExpressionCache::new(CacheConfig {
            capacity: 10,
            ttl: Duration::from_millis(20),
        });
        cache.put(ParseMode::Compatible, "a", compiled("a"));
        cache.put(ParseMode::Strict, "b", compiled("b"));
        assert_eq!(cache.len(), 2);

        std::thread::sleep(Duration::from_millis(50));
        cache.cleanup_expired();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_eviction() {
        let cache = ExpressionCache::new(CacheConfig {
            capacity: 20,
            ttl: Duration::from_secs(60),
        });

        for i in 0..50 {
            let source = format!("scope{}", i);
            cache.put(ParseMode::Compatible, &source, compiled(&source));
        }

        assert!(cache.len() <= 20);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = ExpressionCache::new(CacheConfig {
            capacity: 0,
            ttl: Duration::from_secs(60),
        });
        cache.put(ParseMode::Compatible, "a", compiled("a"));

        assert!(cache.is_empty());
        assert!(cache.get(ParseMode::Compatible, "a").is_none());
        assert_eq!(cache.stats().max_entries, 0);
    }

    #[test]
    fn test_replacing_key_at_capacity_keeps_others() {
        let cache = ExpressionCache::new(CacheConfig {
            capacity: 3,
            ttl: Duration::from_secs(60),
        });
        for source in ["a", "b", "c"] {
            cache.put(ParseMode::Compatible, source, compiled(source));
        }

        cache.put(ParseMode::Compatible, "b", compiled("b"));

        assert_eq!(cache.len(), 3);
        for source in ["a", "b", "c"] {
            assert!(cache.get(ParseMode::Compatible, source).is_some());
        }
    }

    #[test]
    fn test_clear() {
        let cache = ExpressionCache::new(CacheConfig::default());
        cache.put(ParseMode::Compatible, "a", compiled("a"));
        cache.get(ParseMode::Compatible, "a");

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats {
            max_entries: 10_000,
            ..CacheStats::default()
        });
    }
}
