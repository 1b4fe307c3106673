use std::collections::VecDeque;
use std::hash::Hash;

use super::ReplacementPolicy;

fn remove_value<K: Eq>(deque: &mut VecDeque<K>, key: &K) -> bool {
    if let Some(pos) = deque.iter().position(|k| k == key) {
        deque.remove(pos);
        true
    } else {
        false
    }
}

/// Adaptive Replacement Cache: the flat, explicit four-deque representation
/// (`T1`/`T2`/`B1`/`B2` plus the scalar adaptation target `p`), rather than
/// composing an inner LRU and LFU policy — the composed form is what an
/// earlier revision of this algorithm's source did, and it drifts from the
/// adaptive-replacement literature (`touch` ends up reordering by frequency
/// inside what should be a pure recency list).
///
/// `T1`/`T2` hold real entries; `B1`/`B2` are ghost lists of keys only. Front
/// of every deque is most-recently-used, back is the next candidate.
#[derive(Debug, Clone)]
pub struct Arc<K> {
    t1: VecDeque<K>,
    t2: VecDeque<K>,
    b1: VecDeque<K>,
    b2: VecDeque<K>,
    /// Target size of `T1`. Invariant: `0 <= p <= capacity`.
    p: usize,
    capacity: usize,
    /// The key `replace` last demoted out of `T1`/`T2`, drained by
    /// [`ReplacementPolicy::take_evicted`]. This is the one piece of state
    /// the generic `BoundedCache` needs back out of ARC's self-managed
    /// eviction to keep its own map in sync.
    evicted: Option<K>,
}

impl<K: Eq + Hash + Clone> Arc<K> {
    pub fn new(capacity: usize) -> Self {
        Arc {
            t1: VecDeque::new(),
            t2: VecDeque::new(),
            b1: VecDeque::new(),
            b2: VecDeque::new(),
            p: 0,
            capacity,
            evicted: None,
        }
    }

    /// Target size for `T1`, exposed for invariant checks in tests.
    pub fn p(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Demote the tail of `T1` or `T2` into its ghost list, following the
    /// same decision every `Insert` case uses to free room.
    fn replace(&mut self, in_b2: bool) {
        let demote_from_t1 =
            !self.t1.is_empty() && ((in_b2 && self.t1.len() == self.p) || self.t1.len() > self.p);
        if demote_from_t1 {
            if let Some(k) = self.t1.pop_back() {
                self.b1.push_front(k.clone());
                self.evicted = Some(k);
            }
        } else if let Some(k) = self.t2.pop_back() {
            self.b2.push_front(k.clone());
            self.evicted = Some(k);
        }
    }

    fn would_replace_from_t1(&self, in_b2: bool) -> bool {
        !self.t1.is_empty() && ((in_b2 && self.t1.len() == self.p) || self.t1.len() > self.p)
    }
}

impl<K: Eq + Hash + Clone> ReplacementPolicy<K> for Arc<K> {
    fn insert(&mut self, key: K) {
        if self.b1.contains(&key) {
            let ratio = std::cmp::max(1, self.b2.len() / self.b1.len());
            self.p = std::cmp::min(self.capacity, self.p + ratio);
            self.replace(false);
            remove_value(&mut self.b1, &key);
            self.t2.push_front(key);
        } else if self.b2.contains(&key) {
            let ratio = std::cmp::max(1, self.b1.len() / self.b2.len());
            self.p = self.p.saturating_sub(ratio);
            self.replace(true);
            remove_value(&mut self.b2, &key);
            self.t2.push_front(key);
        } else {
            if self.t1.len() + self.b1.len() == self.capacity {
                if self.t1.len() < self.capacity {
                    self.b1.pop_back();
                    self.replace(false);
                } else if let Some(k) = self.t1.pop_back() {
                    // `T1` alone already fills the ghost-inclusive budget:
                    // the LRU end is dropped outright, no ghost kept (there
                    // is no room left to remember it in `B1` either).
                    self.evicted = Some(k);
                }
            } else {
                let total = self.t1.len() + self.t2.len() + self.b1.len() + self.b2.len();
                if total >= self.capacity {
                    if total == 2 * self.capacity {
                        self.b2.pop_back();
                    }
                    self.replace(false);
                }
            }
            self.t1.push_front(key);
        }
    }

    fn touch(&mut self, key: &K) {
        if remove_value(&mut self.t1, key) {
            self.t2.push_front(key.clone());
        } else if remove_value(&mut self.t2, key) {
            self.t2.push_front(key.clone());
        }
    }

    fn erase(&mut self, key: &K) {
        if remove_value(&mut self.t1, key) {
            self.b1.push_front(key.clone());
        } else if remove_value(&mut self.t2, key) {
            self.b2.push_front(key.clone());
        }
    }

    fn victim(&self) -> Option<K> {
        if self.t1.is_empty() && self.t2.is_empty() {
            return None;
        }
        if self.would_replace_from_t1(false) {
            self.t1.back().cloned()
        } else {
            self.t2.back().cloned()
        }
    }

    fn tracks(&self, key: &K) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn self_manages_capacity(&self) -> bool {
        true
    }

    fn take_evicted(&mut self) -> Option<K> {
        self.evicted.take()
    }
}
