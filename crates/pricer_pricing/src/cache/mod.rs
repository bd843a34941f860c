//! Per-instrument valuation cache.
//!
//! Each instrument owns one [`ValuationCache`] keyed by the exact inputs of
//! its valuation. Floating inputs enter keys by bit pattern, so two inputs
//! share an entry only when they are bitwise identical (with `-0.0` folded
//! onto `0.0`). Caches are never shared between instruments.
//!
//! ```rust
//! use pricer_pricing::cache::{CachePolicy, StockCacheKey, ValuationCache};
//!
//! let mut cache = ValuationCache::new(CachePolicy::Unbounded);
//! let key = StockCacheKey::new(100.0, 10);
//! assert_eq!(cache.get(&key), None);
//! cache.insert(key, 1000.0);
//! assert_eq!(cache.get(&key), Some(1000.0));
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

mod keys;

pub use keys::{canonical_bits, OptionCacheKey, StockCacheKey};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Capacity policy of a valuation cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum CachePolicy {
    /// Grows without bound.
    #[default]
    Unbounded,
    /// Holds at most `capacity` entries, evicting the least recently used.
    /// A capacity of zero stores nothing.
    Lru {
        /// Maximum number of entries.
        capacity: usize,
    },
}

/// Lookup counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped to respect the capacity.
    pub evictions: u64,
}

impl CacheStats {
    /// Total lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    value: f64,
    last_used: u64,
}

/// Memo of computed values keyed by valuation inputs.
#[derive(Clone, Debug)]
pub struct ValuationCache<K> {
    policy: CachePolicy,
    entries: HashMap<K, Entry>,
    // Tick of last use -> key; maintained only under `Lru`.
    recency: BTreeMap<u64, K>,
    tick: u64,
    stats: CacheStats,
}

impl<K: Eq + Hash + Clone> Default for ValuationCache<K> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl<K: Eq + Hash + Clone> ValuationCache<K> {
    /// Creates an empty cache.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    /// Capacity policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Cached value for `key`, counting a hit or a miss.
    pub fn get(&mut self, key: &K) -> Option<f64> {
        let tick = self.next_tick();
        let lru = self.is_lru();
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.stats.hits += 1;
                if lru {
                    self.recency.remove(&entry.last_used);
                    self.recency.insert(tick, key.clone());
                }
                entry.last_used = tick;
                Some(entry.value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Cached value for `key` without touching counters or recency.
    pub fn peek(&self, key: &K) -> Option<f64> {
        self.entries.get(key).map(|e| e.value)
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`, evicting the least recently used entry
    /// when an `Lru` cache is full.
    pub fn insert(&mut self, key: K, value: f64) {
        let tick = self.next_tick();
        match self.policy {
            CachePolicy::Lru { capacity: 0 } => return,
            CachePolicy::Lru { capacity } => {
                if let Some(previous) = self.entries.get(&key) {
                    self.recency.remove(&previous.last_used);
                } else if self.entries.len() >= capacity {
                    self.evict_oldest();
                }
                self.recency.insert(tick, key.clone());
            }
            CachePolicy::Unbounded => {}
        }
        self.entries.insert(
            key,
            Entry {
                value,
                last_used: tick,
            },
        );
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// Lookup counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn is_lru(&self) -> bool {
        matches!(self.policy, CachePolicy::Lru { .. })
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_oldest(&mut self) {
        if let Some((_, key)) = self.recency.pop_first() {
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }
}
