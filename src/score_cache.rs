//! SpeedChess - Evaluation score cache
//!
//! Fixed-capacity map from Zobrist key to score. When full, an arbitrary
//! (randomly chosen) entry is evicted to make room; this is not an LRU.

use std::collections::HashMap;

use rand::prelude::*;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 10_000;

/// Evictions between debug reports
const EVICTION_REPORT_INTERVAL: u64 = 1_000;

pub struct ScoreCache {
    /// key -> (score, index into `keys`)
    entries: HashMap<u64, (i32, usize)>,
    keys: Vec<u64>,
    capacity: usize,
    rng: StdRng,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ScoreCache {
            entries: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            capacity,
            rng: StdRng::seed_from_u64(capacity as u64),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn lookup(&mut self, key: u64) -> Option<i32> {
        match self.entries.get(&key) {
            Some(&(score, _)) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn store(&mut self, key: u64, score: i32) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.0 = score;
            return;
        }

        if self.keys.len() >= self.capacity {
            self.evict_one();
        }

        self.entries.insert(key, (score, self.keys.len()));
        self.keys.push(key);
    }

    fn evict_one(&mut self) {
        let idx = self.rng.gen_range(0..self.keys.len());
        let victim = self.keys.swap_remove(idx);
        self.entries.remove(&victim);

        // The former last key now lives at `idx`
        if let Some(&moved) = self.keys.get(idx) {
            if let Some(entry) = self.entries.get_mut(&moved) {
                entry.1 = idx;
            }
        }
        self.evictions += 1;
        if self.evictions % EVICTION_REPORT_INTERVAL == 0 {
            debug!(
                evictions = self.evictions,
                size = self.keys.len(),
                "score cache full, evicting"
            );
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        ScoreCache::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_looks_up() {
        let mut cache = ScoreCache::new(4);
        assert_eq!(cache.lookup(1), None);
        cache.store(1, 42);
        cache.store(1, 43);
        assert_eq!(cache.lookup(1), Some(43));
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits, cache.misses), (1, 1));
    }

    #[test]
    fn size_stays_bounded() {
        let mut cache = ScoreCache::new(16);
        for key in 0..1000u64 {
            cache.store(key, key as i32);
            assert!(cache.len() <= 16);
        }
        assert_eq!(cache.len(), 16);
        assert_eq!(cache.evictions, 1000 - 16);

        // every surviving entry is still reachable with its own score
        let survivors: Vec<u64> = cache.keys.clone();
        for key in survivors {
            assert_eq!(cache.lookup(key), Some(key as i32));
        }
        assert!(cache.lookup(999).is_some());
    }

    #[test]
    fn clear_empties() {
        let mut cache = ScoreCache::new(2);
        cache.store(1, 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
    }
}
