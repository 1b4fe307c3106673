//! Block replacement policies shared by every [`crate::cache::BoundedCache`].
//!
//! Each policy tracks a set of keys and can nominate one of them as the next
//! eviction victim. A policy never removes an entry on its own; the
//! containing cache drives `insert`/`touch`/`erase` and treats `victim` as a
//! pure query (see module docs on [`ReplacementPolicy::victim`]).

mod arc;
mod fifo;
mod lfu;
mod lru;

pub use self::arc::Arc;
pub use self::fifo::Fifo;
pub use self::lfu::Lfu;
pub use self::lru::Lru;

use std::hash::Hash;

/// Capability shared by all eviction policies.
pub trait ReplacementPolicy<K> {
    /// Start tracking `key`. Precondition: `key` is not already tracked.
    fn insert(&mut self, key: K);

    /// Record a hit on `key`. No-op if `key` isn't tracked.
    fn touch(&mut self, key: &K);

    /// Stop tracking `key`. No-op if `key` isn't tracked.
    fn erase(&mut self, key: &K);

    /// Return the key that would be evicted next. Does not mutate state;
    /// removal requires a subsequent [`ReplacementPolicy::erase`] call.
    fn victim(&self) -> Option<K>;

    /// Whether `key` is currently tracked. Used to check the cache/policy
    /// key-set invariant in tests.
    fn tracks(&self, key: &K) -> bool;

    /// Number of keys currently tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this policy enforces its own capacity bound from inside
    /// `insert` rather than relying on the cache to call
    /// `victim`/`erase` first. Only ARC overrides this: its ghost-hit
    /// admission (cases 1/2 of `Insert`) triggers a real-entry demotion on
    /// its own, independent of whether the real tracked set happens to be
    /// at capacity, so layering the generic evict-then-insert dance on top
    /// would demote a second entry it was never asked to.
    fn self_manages_capacity(&self) -> bool {
        false
    }

    /// Drain the key (if any) this policy demoted out of its real tracked
    /// set during the most recent `insert` call. Only meaningful when
    /// [`ReplacementPolicy::self_manages_capacity`] is true.
    fn take_evicted(&mut self) -> Option<K> {
        None
    }
}

/// The four caching disciplines a [`crate::storage_cache::StorageCache`] can
/// be configured with.
///
/// A hand-written dispatch enum rather than a trait object: `enum_dispatch`
/// generates its forwarding impls for monomorphic traits, and our key type
/// stays generic (`i64` in the migration engine, small test integers in unit
/// tests), which the macro can't specialize over. The match arms below are
/// the entire cost of doing it by hand.
#[derive(Debug, Clone)]
pub enum Policy<K> {
    Fifo(Fifo<K>),
    Lru(Lru<K>),
    Lfu(Lfu<K>),
    Arc(Arc<K>),
}

impl<K: Eq + Hash + Clone> Policy<K> {
    pub fn fifo() -> Self {
        Policy::Fifo(Fifo::new())
    }

    pub fn lru() -> Self {
        Policy::Lru(Lru::new())
    }

    pub fn lfu() -> Self {
        Policy::Lfu(Lfu::new())
    }

    pub fn arc(capacity: usize) -> Self {
        Policy::Arc(Arc::new(capacity))
    }
}

impl<K: Eq + Hash + Clone> ReplacementPolicy<K> for Policy<K> {
    fn insert(&mut self, key: K) {
        match self {
            Policy::Fifo(p) => p.insert(key),
            Policy::Lru(p) => p.insert(key),
            Policy::Lfu(p) => p.insert(key),
            Policy::Arc(p) => p.insert(key),
        }
    }

    fn touch(&mut self, key: &K) {
        match self {
            Policy::Fifo(p) => p.touch(key),
            Policy::Lru(p) => p.touch(key),
            Policy::Lfu(p) => p.touch(key),
            Policy::Arc(p) => p.touch(key),
        }
    }

    fn erase(&mut self, key: &K) {
        match self {
            Policy::Fifo(p) => p.erase(key),
            Policy::Lru(p) => p.erase(key),
            Policy::Lfu(p) => p.erase(key),
            Policy::Arc(p) => p.erase(key),
        }
    }

    fn victim(&self) -> Option<K> {
        match self {
            Policy::Fifo(p) => p.victim(),
            Policy::Lru(p) => p.victim(),
            Policy::Lfu(p) => p.victim(),
            Policy::Arc(p) => p.victim(),
        }
    }

    fn tracks(&self, key: &K) -> bool {
        match self {
            Policy::Fifo(p) => p.tracks(key),
            Policy::Lru(p) => p.tracks(key),
            Policy::Lfu(p) => p.tracks(key),
            Policy::Arc(p) => p.tracks(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            Policy::Fifo(p) => p.len(),
            Policy::Lru(p) => p.len(),
            Policy::Lfu(p) => p.len(),
            Policy::Arc(p) => p.len(),
        }
    }

    fn self_manages_capacity(&self) -> bool {
        match self {
            Policy::Fifo(p) => p.self_manages_capacity(),
            Policy::Lru(p) => p.self_manages_capacity(),
            Policy::Lfu(p) => p.self_manages_capacity(),
            Policy::Arc(p) => p.self_manages_capacity(),
        }
    }

    fn take_evicted(&mut self) -> Option<K> {
        match self {
            Policy::Fifo(p) => p.take_evicted(),
            Policy::Lru(p) => p.take_evicted(),
            Policy::Lfu(p) => p.take_evicted(),
            Policy::Arc(p) => p.take_evicted(),
        }
    }
}
