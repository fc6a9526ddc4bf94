//! Bounded memo table backed by a [`HashMap`].
//!
//! The solver memoises root isolation and projection results. Values are
//! cloned out of the table, and the whole table is dropped once it reaches
//! its capacity (`2^bits` entries), so memory stays bounded without any
//! per-entry bookkeeping.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

pub struct Cache<K, V> {
    map: HashMap<K, V>,
    capacity: usize,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new(14)
    }
}

impl<K, V> Cache<K, V> {
    /// Creates a new cache holding at most `2^bits` entries.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Cache bits should be in the range 0..=31");
        let capacity = 1 << bits;
        Self {
            map: HashMap::with_capacity(capacity.min(1024)),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of entries dropped because the table was full.
    pub fn evictions(&self) -> usize {
        self.evictions
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            debug!("cache full ({} entries), clearing", self.map.len());
            self.evictions += self.map.len();
            self.map.clear();
        }
        self.map.insert(key, value);
    }
}
