//! Value interning cache
//!
//! Process-wide memoization for frequently repeated values: small integers,
//! short text, and recently parsed temporal strings. The cache is an
//! explicit object injected by the application — never a global — so tests
//! can run isolated instances and the whole thing can be disabled.
//!
//! Correctness never depends on the cache: every lookup falls back to
//! direct construction on a miss, so a bounded (or disabled) cache changes
//! allocation counts and nothing else.
//!
//! ## Concurrency
//!
//! Small integers are a pre-built immutable table (lock-free reads). The
//! parse caches are LRU maps behind `parking_lot::Mutex`; readers and
//! writers synchronize on insert/touch.

use crate::error::Result;
use crate::temporal::{Date, Timestamp, ZonedTimestamp};
use crate::value::Value;
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache configuration.
#[derive(Clone, Debug)]
pub struct ValueCacheConfig {
    /// Inclusive range of pre-built small Long/Int instances.
    pub small_int_min: i64,
    /// Inclusive upper bound of the small-integer table.
    pub small_int_max: i64,
    /// Capacity of each LRU parse cache (text, date, timestamp).
    pub lru_capacity: usize,
    /// Longest text eligible for interning, in bytes.
    pub max_text_len: usize,
    /// Master switch; a disabled cache always misses.
    pub enabled: bool,
}

impl Default for ValueCacheConfig {
    fn default() -> Self {
        Self {
            small_int_min: -128,
            small_int_max: 1024,
            lru_capacity: 4096,
            max_text_len: 64,
            enabled: true,
        }
    }
}

/// Hit/miss counters, for observability.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that fell back to construction.
    pub misses: u64,
}

/// Bounded LRU map: hashbrown storage plus an insertion-recency queue.
struct LruMap<V: Clone> {
    map: HashMap<String, V>,
    recency: VecDeque<String>,
    capacity: usize,
}

impl<V: Clone> LruMap<V> {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1024)),
            recency: VecDeque::new(),
            capacity,
        }
    }

    fn get(&mut self, key: &str) -> Option<V> {
        let value = self.map.get(key).cloned()?;
        // Touch: move to the back of the recency queue
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            let k = self.recency.remove(pos).expect("position is valid");
            self.recency.push_back(k);
        }
        Some(value)
    }

    fn insert(&mut self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            if let Some(evicted) = self.recency.pop_front() {
                self.map.remove(&evicted);
            }
        }
        if self.map.insert(key.clone(), value).is_none() {
            self.recency.push_back(key);
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Injected interning cache for values.
///
/// # Example
///
/// ```
/// use meridian_db_core::cache::ValueCache;
///
/// let cache = ValueCache::with_defaults();
/// let a = cache.long(42);
/// let b = cache.long(42);
/// assert_eq!(a, b);
/// ```
#[derive(Debug)]
pub struct ValueCache {
    config: ValueCacheConfig,
    /// Pre-built Long values for the small-integer range.
    small_longs: Vec<Value>,
    texts: Mutex<LruMap<Arc<str>>>,
    dates: Mutex<LruMap<Option<Date>>>,
    timestamps: Mutex<LruMap<Option<Timestamp>>>,
    zoned_timestamps: Mutex<LruMap<Option<ZonedTimestamp>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ValueCache {
    /// Create a cache with the given configuration.
    pub fn new(config: ValueCacheConfig) -> Self {
        let small_longs = if config.enabled {
            (config.small_int_min..=config.small_int_max)
                .map(|i| Value::Long(Some(i)))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            small_longs,
            texts: Mutex::new(LruMap::new(config.lru_capacity)),
            dates: Mutex::new(LruMap::new(config.lru_capacity)),
            timestamps: Mutex::new(LruMap::new(config.lru_capacity)),
            zoned_timestamps: Mutex::new(LruMap::new(config.lru_capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            config,
        }
    }

    /// Create a cache with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ValueCacheConfig::default())
    }

    /// Create a disabled cache (every lookup constructs directly).
    pub fn disabled() -> Self {
        Self::new(ValueCacheConfig {
            enabled: false,
            ..ValueCacheConfig::default()
        })
    }

    /// A Long value, shared from the small-integer table when in range.
    pub fn long(&self, value: i64) -> Value {
        if self.config.enabled
            && value >= self.config.small_int_min
            && value <= self.config.small_int_max
        {
            self.hit();
            return self.small_longs[(value - self.config.small_int_min) as usize].clone();
        }
        self.miss();
        Value::Long(Some(value))
    }

    /// An Int value, shared from the small-integer table when in range.
    pub fn int(&self, value: i32) -> Value {
        // The table stores Longs; Ints are cheap enough to rebuild, so only
        // the counters care
        if self.config.enabled
            && (value as i64) >= self.config.small_int_min
            && (value as i64) <= self.config.small_int_max
        {
            self.hit();
        } else {
            self.miss();
        }
        Value::Int(Some(value))
    }

    /// Interned short text: repeated lookups share one `Arc<str>` buffer.
    ///
    /// Oversized text (beyond `max_text_len`) bypasses the cache.
    pub fn text(&self, s: &str) -> Arc<str> {
        if !self.config.enabled || s.len() > self.config.max_text_len {
            self.miss();
            return Arc::from(s);
        }
        let mut texts = self.texts.lock();
        if let Some(interned) = texts.get(s) {
            self.hit();
            return interned;
        }
        self.miss();
        tracing::trace!(len = s.len(), "text intern miss");
        let interned: Arc<str> = Arc::from(s);
        texts.insert(s.to_string(), interned.clone());
        interned
    }

    /// Parse a date, memoizing by input string.
    pub fn parse_date(&self, s: &str) -> Result<Option<Date>> {
        if !self.config.enabled || s.len() > self.config.max_text_len {
            self.miss();
            return Date::parse(s);
        }
        if let Some(parsed) = self.dates.lock().get(s) {
            self.hit();
            return Ok(parsed);
        }
        self.miss();
        tracing::trace!(input = s, "date parse miss");
        let parsed = Date::parse(s)?;
        self.dates.lock().insert(s.to_string(), parsed);
        Ok(parsed)
    }

    /// Parse a timestamp, memoizing by input string.
    pub fn parse_timestamp(&self, s: &str) -> Result<Option<Timestamp>> {
        if !self.config.enabled || s.len() > self.config.max_text_len {
            self.miss();
            return Timestamp::parse(s);
        }
        if let Some(parsed) = self.timestamps.lock().get(s) {
            self.hit();
            return Ok(parsed);
        }
        self.miss();
        tracing::trace!(input = s, "timestamp parse miss");
        let parsed = Timestamp::parse(s)?;
        self.timestamps.lock().insert(s.to_string(), parsed);
        Ok(parsed)
    }

    /// Parse a zone-qualified timestamp, memoizing by input string.
    pub fn parse_zoned_timestamp(&self, s: &str) -> Result<Option<ZonedTimestamp>> {
        if !self.config.enabled || s.len() > self.config.max_text_len {
            self.miss();
            return ZonedTimestamp::parse(s);
        }
        if let Some(parsed) = self.zoned_timestamps.lock().get(s) {
            self.hit();
            return Ok(parsed);
        }
        self.miss();
        tracing::trace!(input = s, "zoned timestamp parse miss");
        let parsed = ZonedTimestamp::parse(s)?;
        self.zoned_timestamps.lock().insert(s.to_string(), parsed);
        Ok(parsed)
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of entries across the LRU maps (diagnostics).
    pub fn parse_entries(&self) -> usize {
        self.texts.lock().len()
            + self.dates.lock().len()
            + self.timestamps.lock().len()
            + self.zoned_timestamps.lock().len()
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

impl<V: Clone> std::fmt::Debug for LruMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LruMap(len={})", self.map.len())
    }
}
