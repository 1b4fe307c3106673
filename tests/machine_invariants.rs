//! Randomized replay against the public `Machine` API: testable properties
//! 4 and 5 (every referenced block stays resident somewhere, and
//! `total_duration` never decreases).

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use tiercache_sim::config::Configuration;
use tiercache_sim::machine::Machine;
use tiercache_sim::types::{CachingKind, HierarchyKind};

#[derive(Clone, Debug)]
enum Op {
    Read(i64),
    Write(i64),
    Flush(i64),
}

impl quickcheck::Arbitrary for Op {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let block = *g.choose(&(0..8i64).collect::<Vec<_>>()).unwrap();
        match u32::arbitrary(g) % 3 {
            0 => Op::Read(block),
            1 => Op::Write(block),
            _ => Op::Flush(block),
        }
    }
}

fn machine(hierarchy: HierarchyKind, caching_kind: CachingKind) -> Machine {
    let config = Configuration {
        hierarchy_type: hierarchy,
        caching_type: caching_kind,
        size_type: 1,
        latency_type: 1,
        migration_frequency: 3,
        operation_count: 0,
        file_name: String::new(),
        verbose: false,
    };
    Machine::new(&config, 11).unwrap()
}

fn replay(hierarchy: HierarchyKind, caching_kind: CachingKind, ops: &[Op]) -> TestResult {
    let mut m = machine(hierarchy, caching_kind);
    let mut last_duration = m.total_duration();
    let mut referenced = std::collections::HashSet::new();

    for op in ops {
        let (block, result) = match op {
            Op::Read(b) => (*b, m.read(*b)),
            Op::Write(b) => (*b, m.write(*b)),
            Op::Flush(b) => (*b, m.flush(*b)),
        };
        if result.is_err() {
            return TestResult::failed();
        }
        if !matches!(op, Op::Flush(_)) {
            referenced.insert(block);
        }

        if m.total_duration() < last_duration {
            return TestResult::failed();
        }
        last_duration = m.total_duration();
    }

    for block in referenced {
        if m.locate(block).is_none() {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn dram_nvm_ssd_invariants_hold(ops: Vec<Op>) -> TestResult {
    replay(HierarchyKind::DramNvmSsd, CachingKind::Lru, &ops)
}

#[quickcheck]
fn dram_ssd_invariants_hold(ops: Vec<Op>) -> TestResult {
    replay(HierarchyKind::DramSsd, CachingKind::Fifo, &ops)
}

#[quickcheck]
fn nvm_only_invariants_hold(ops: Vec<Op>) -> TestResult {
    replay(HierarchyKind::Nvm, CachingKind::Arc, &ops)
}
