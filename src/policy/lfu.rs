use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use indexmap::IndexSet;

use super::ReplacementPolicy;

/// Least-frequently-used eviction.
///
/// `buckets` maps a frequency count to the (insertion-ordered) set of keys
/// currently at that frequency; `frequency` is the reverse lookup used to
/// find a key's current bucket in O(1). Together they form the bidirectional
/// frequency/key mapping: moving a key to a new frequency is a remove from
/// its old bucket (dropping the bucket if it becomes empty) followed by an
/// insert into the new one.
#[derive(Debug, Clone)]
pub struct Lfu<K> {
    buckets: BTreeMap<u64, IndexSet<K>>,
    frequency: HashMap<K, u64>,
}

impl<K: Eq + Hash> Lfu<K> {
    pub fn new() -> Self {
        Lfu {
            buckets: BTreeMap::new(),
            frequency: HashMap::new(),
        }
    }

    fn move_bucket(&mut self, key: &K, from: u64, to: u64)
    where
        K: Clone,
    {
        if let Some(bucket) = self.buckets.get_mut(&from) {
            bucket.shift_remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&from);
            }
        }
        self.buckets.entry(to).or_default().insert(key.clone());
    }
}

impl<K: Eq + Hash> Default for Lfu<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> ReplacementPolicy<K> for Lfu<K> {
    fn insert(&mut self, key: K) {
        const INIT: u64 = 1;
        self.buckets.entry(INIT).or_default().insert(key.clone());
        self.frequency.insert(key, INIT);
    }

    fn touch(&mut self, key: &K) {
        // A key absent from `frequency` is silently ignored, mirroring the
        // defensive behaviour the original cache policies share.
        let Some(&current) = self.frequency.get(key) else {
            return;
        };
        self.move_bucket(key, current, current + 1);
        self.frequency.insert(key.clone(), current + 1);
    }

    fn erase(&mut self, key: &K) {
        if let Some(f) = self.frequency.remove(key) {
            if let Some(bucket) = self.buckets.get_mut(&f) {
                bucket.shift_remove(key);
                if bucket.is_empty() {
                    self.buckets.remove(&f);
                }
            }
        }
    }

    fn victim(&self) -> Option<K> {
        // Within the lowest-frequency bucket, the most recently inserted or
        // promoted-into-this-bucket key goes first: it has had the least
        // time at this frequency to prove itself relative to its
        // bucket-mates, not just the fewest touches overall.
        self.buckets
            .iter()
            .next()
            .and_then(|(_, bucket)| bucket.iter().next_back())
            .cloned()
    }

    fn tracks(&self, key: &K) -> bool {
        self.frequency.contains_key(key)
    }

    fn len(&self) -> usize {
        self.frequency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_frequently_used() {
        let mut p = Lfu::new();
        p.insert(1);
        p.insert(2);
        p.insert(3);
        p.touch(&1);
        p.touch(&1);
        p.touch(&2);
        // 3 is still at frequency 1, the lowest.
        assert_eq!(p.victim(), Some(3));
    }

    #[test]
    fn ties_break_toward_the_most_recent_arrival_in_the_bucket() {
        let mut p = Lfu::new();
        p.insert(1);
        p.insert(2);
        // both at frequency 1; 2 arrived in the bucket most recently.
        assert_eq!(p.victim(), Some(2));
    }

    #[test]
    fn touch_on_missing_key_is_ignored() {
        let mut p: Lfu<i64> = Lfu::new();
        p.touch(&42);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn erase_cleans_up_empty_buckets() {
        let mut p = Lfu::new();
        p.insert(1);
        p.erase(&1);
        assert!(p.buckets.is_empty());
        assert!(!p.tracks(&1));
    }
}
