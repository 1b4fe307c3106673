use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::policy::ReplacementPolicy;

/// A fixed-capacity key/value map that delegates eviction to a
/// [`ReplacementPolicy`].
///
/// The policy's tracked key set and `map`'s key set are kept equal after
/// every public operation; that equivalence is exercised directly in the
/// property tests in `tests/`.
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V, P> {
    map: HashMap<K, V>,
    policy: P,
    capacity: usize,
}

impl<K, V, P> BoundedCache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: ReplacementPolicy<K>,
{
    pub fn new(policy: P, capacity: usize) -> Self {
        BoundedCache {
            map: HashMap::new(),
            policy,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn size(&self) -> usize {
        self.map.len()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Whether the policy is still tracking `key`, independent of `map`.
    /// Exists so the map/policy key-set equivalence can be checked from
    /// outside the module instead of assumed.
    pub fn policy_tracks(&self, key: &K) -> bool {
        self.policy.tracks(key)
    }

    /// Insert or update `key`. Returns the displaced entry, if any.
    ///
    /// A zero-capacity cache never admits anything: the pair handed in is
    /// returned straight back out as its own victim.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return Some((key, value));
        }
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            self.policy.touch(&key);
            return None;
        }
        if self.policy.self_manages_capacity() {
            // ARC can evict in response to a ghost hit independent of
            // whether the real tracked set is currently at capacity, so it
            // manages its own eviction inside `insert` instead of the
            // generic victim-then-erase dance below.
            self.policy.insert(key.clone());
            self.map.insert(key, value);
            return self.policy.take_evicted().map(|victim| {
                let victim_value = self
                    .map
                    .remove(&victim)
                    .expect("policy/map key sets diverged");
                (victim, victim_value)
            });
        }
        if self.map.len() >= self.capacity {
            let victim = self
                .policy
                .victim()
                .expect("full cache must have a policy-tracked victim");
            self.policy.erase(&victim);
            let victim_value = self
                .map
                .remove(&victim)
                .expect("policy/map key sets diverged");
            self.policy.insert(key.clone());
            self.map.insert(key, value);
            Some((victim, victim_value))
        } else {
            self.policy.insert(key.clone());
            self.map.insert(key, value);
            None
        }
    }

    pub fn get(&mut self, key: &K, touch: bool) -> Result<&V> {
        if !self.map.contains_key(key) {
            return Err(Error::NotFound);
        }
        if touch {
            self.policy.touch(key);
        }
        Ok(self.map.get(key).expect("presence checked above"))
    }

    pub fn erase(&mut self, key: &K) {
        if self.map.remove(key).is_some() {
            self.policy.erase(key);
        }
    }
}
