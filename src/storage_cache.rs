use std::cell::Cell;

use parking_lot::Mutex;

use crate::cache::BoundedCache;
use crate::error::{Error, Result};
use crate::policy::Policy;
use crate::types::{BlockStatus, CachingKind, DeviceKind};

fn encode(status: BlockStatus) -> i64 {
    match status {
        BlockStatus::Clean => 0,
        BlockStatus::Dirty => 1,
    }
}

fn decode(value: i64) -> Result<BlockStatus> {
    match value {
        0 => Ok(BlockStatus::Clean),
        1 => Ok(BlockStatus::Dirty),
        other => Err(Error::invariant(format!(
            "victim carried an illegal block status discriminant {other}"
        ))),
    }
}

/// A [`BoundedCache`] specialized to `(block id -> block status)`, plus a
/// sequentiality detector used by the latency table to pick seq/random rates.
///
/// Operations are serialized through a [`parking_lot::Mutex`]: uncontended in
/// this single-threaded simulator, but it keeps the observable ordering
/// explicit and the type reusable from more than one thread.
pub struct StorageCache {
    device_kind: DeviceKind,
    caching_kind: CachingKind,
    inner: Mutex<BoundedCache<i64, i64, Policy<i64>>>,
    last_block_seen: Cell<Option<i64>>,
}

impl StorageCache {
    pub fn new(device_kind: DeviceKind, caching_kind: CachingKind, capacity: usize) -> Self {
        let policy = match caching_kind {
            CachingKind::Fifo => Policy::fifo(),
            CachingKind::Lru => Policy::lru(),
            CachingKind::Lfu => Policy::lfu(),
            CachingKind::Arc => Policy::arc(capacity),
        };
        StorageCache {
            device_kind,
            caching_kind,
            inner: Mutex::new(BoundedCache::new(policy, capacity)),
            last_block_seen: Cell::new(None),
        }
    }

    pub fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    pub fn caching_kind(&self) -> CachingKind {
        self.caching_kind
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn contains(&self, block: i64) -> bool {
        self.inner.lock().contains_key(&block)
    }

    /// Insert or update `block`'s status, returning any displaced
    /// `(block, status)` pair.
    pub fn put(&self, block: i64, status: BlockStatus) -> Result<Option<(i64, BlockStatus)>> {
        let victim = self.inner.lock().put(block, encode(status));
        match victim {
            None => Ok(None),
            Some((k, v)) => Ok(Some((k, decode(v)?))),
        }
    }

    pub fn get(&self, block: i64, touch: bool) -> Result<BlockStatus> {
        let value = *self.inner.lock().get(&block, touch)?;
        decode(value)
    }

    pub fn erase(&self, block: i64) {
        self.inner.lock().erase(&block);
    }

    /// True iff `next` is one away from the previously observed block,
    /// regardless of direction. Updates the running cursor either way; the
    /// first call on a fresh cache is never sequential.
    pub fn is_sequential(&self, next: i64) -> bool {
        let last = self.last_block_seen.get();
        self.last_block_seen.set(Some(next));
        matches!(last, Some(last) if (next - last).abs() == 1)
    }
}
