//! Randomized invariant checks over the four replacement policies (spec
//! testable properties 1-3): the policy/cache key-set equivalence, the
//! capacity bound, and ARC's ghost-list bounds.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use tiercache_sim::cache::BoundedCache;
use tiercache_sim::policy::{Policy, ReplacementPolicy};

#[derive(Clone, Debug)]
enum Op {
    Put(i64, i64),
    Get(i64),
    Erase(i64),
}

impl quickcheck::Arbitrary for Op {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let key = *g.choose(&(0..16i64).collect::<Vec<_>>()).unwrap();
        match u32::arbitrary(g) % 3 {
            0 => Op::Put(key, i64::arbitrary(g)),
            1 => Op::Get(key),
            _ => Op::Erase(key),
        }
    }
}

fn check_tracking_invariant(cache: &BoundedCache<i64, i64, Policy<i64>>, keys: &[i64]) -> bool {
    keys.iter()
        .all(|k| cache.contains_key(k) == cache.policy_tracks(k))
}

fn run_sequence(mut cache: BoundedCache<i64, i64, Policy<i64>>, ops: &[Op], capacity: usize) -> TestResult {
    let mut seen_keys = std::collections::HashSet::new();
    for op in ops {
        match op {
            Op::Put(k, v) => {
                seen_keys.insert(*k);
                cache.put(*k, *v);
            }
            Op::Get(k) => {
                seen_keys.insert(*k);
                let _ = cache.get(k, true);
            }
            Op::Erase(k) => {
                cache.erase(k);
            }
        }
        if cache.size() > capacity {
            return TestResult::failed();
        }
        let keys: Vec<i64> = seen_keys.iter().copied().collect();
        if !check_tracking_invariant(&cache, &keys) {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn fifo_cache_respects_capacity_bound(ops: Vec<Op>) -> TestResult {
    let capacity = 4;
    run_sequence(BoundedCache::new(Policy::fifo(), capacity), &ops, capacity)
}

#[quickcheck]
fn lru_cache_respects_capacity_bound(ops: Vec<Op>) -> TestResult {
    let capacity = 4;
    run_sequence(BoundedCache::new(Policy::lru(), capacity), &ops, capacity)
}

#[quickcheck]
fn lfu_cache_respects_capacity_bound(ops: Vec<Op>) -> TestResult {
    let capacity = 4;
    run_sequence(BoundedCache::new(Policy::lfu(), capacity), &ops, capacity)
}

#[quickcheck]
fn arc_cache_respects_capacity_bound(ops: Vec<Op>) -> TestResult {
    let capacity = 4;
    run_sequence(BoundedCache::new(Policy::arc(capacity), capacity), &ops, capacity)
}

/// ARC-specific bound invariant (testable property 3): `|T1|+|B1| <= c` and
/// `|T1|+|T2|+|B1|+|B2| <= 2c` and `0 <= p <= c`, checked directly against
/// the policy (not the wrapping cache) after every operation.
#[quickcheck]
fn arc_internal_bounds_hold(ops: Vec<Op>) -> TestResult {
    let capacity = 4;
    let mut arc = tiercache_sim::policy::Arc::<i64>::new(capacity);
    for op in &ops {
        match op {
            Op::Put(k, _) => {
                if !arc.tracks(k) {
                    arc.insert(*k);
                }
            }
            Op::Get(k) => arc.touch(k),
            Op::Erase(k) => arc.erase(k),
        }
        if arc.p() > capacity {
            return TestResult::failed();
        }
        if arc.t1_len() + arc.b1_len() > capacity {
            return TestResult::failed();
        }
        if arc.t1_len() + arc.t2_len() + arc.b1_len() + arc.b2_len() > 2 * capacity {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}
