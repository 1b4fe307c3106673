use crate::error::{Error, Result};
use crate::types::DeviceKind;

/// Access pattern a latency lookup is keyed on, decided per-call by the
/// target device's sequentiality detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Seq,
    Rnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

/// `nvm_read_latency` / `nvm_write_latency` multiplier pair for a given
/// `latency_type` configuration row.
fn nvm_multiplier(latency_type: u8) -> Result<(f64, f64)> {
    match latency_type {
        1 => Ok((2.0, 4.0)),
        2 => Ok((2.0, 10.0)),
        3 => Ok((4.0, 4.0)),
        4 => Ok((4.0, 8.0)),
        5 => Ok((8.0, 8.0)),
        other => Err(Error::Configuration(format!(
            "latency_type must be 1..=5, got {other}"
        ))),
    }
}

/// Per-(device kind, pattern, op) latency, in the same opaque unit
/// [`crate::machine::Machine::total_duration`] accumulates in.
#[derive(Debug, Clone)]
pub struct LatencyTable {
    // Indexed [kind][pattern][op], kinds in `DeviceKind` declaration order.
    table: [[[f64; 2]; 2]; 5],
}

fn kind_index(kind: DeviceKind) -> usize {
    match kind {
        DeviceKind::Cache => 0,
        DeviceKind::Dram => 1,
        DeviceKind::Nvm => 2,
        DeviceKind::Ssd => 3,
        DeviceKind::Hdd => 4,
    }
}

impl LatencyTable {
    pub fn new(latency_type: u8) -> Result<Self> {
        let (nvm_read, nvm_write) = nvm_multiplier(latency_type)?;
        let dram = 100.0;
        let mut table = [[[0.0; 2]; 2]; 5];
        // Cache: flat 10 across pattern and op.
        table[kind_index(DeviceKind::Cache)] = [[10.0, 10.0], [10.0, 10.0]];
        // DRAM: flat 100.
        table[kind_index(DeviceKind::Dram)] = [[dram, dram], [dram, dram]];
        // NVM: DRAM scaled by the configured multiplier.
        table[kind_index(DeviceKind::Nvm)] = [
            [dram * nvm_read, dram * nvm_write],
            [dram * nvm_read, dram * nvm_write],
        ];
        // SSD: seq read 10_000, seq write 25_000, rnd read 10_000, rnd write 40_000.
        table[kind_index(DeviceKind::Ssd)] = [[10_000.0, 25_000.0], [10_000.0, 40_000.0]];
        // HDD: ambient addition, one order of magnitude slower than SSD throughout.
        table[kind_index(DeviceKind::Hdd)] = [[100_000.0, 250_000.0], [100_000.0, 400_000.0]];
        Ok(LatencyTable { table })
    }

    pub fn latency(&self, kind: DeviceKind, pattern: Pattern, op: Op) -> f64 {
        let pattern_idx = match pattern {
            Pattern::Seq => 0,
            Pattern::Rnd => 1,
        };
        let op_idx = match op {
            Op::Read => 0,
            Op::Write => 1,
        };
        self.table[kind_index(kind)][pattern_idx][op_idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_latency_is_flat() {
        let table = LatencyTable::new(1).unwrap();
        assert_eq!(table.latency(DeviceKind::Cache, Pattern::Seq, Op::Read), 10.0);
        assert_eq!(table.latency(DeviceKind::Cache, Pattern::Rnd, Op::Write), 10.0);
    }

    #[test]
    fn nvm_scales_with_latency_type() {
        let table = LatencyTable::new(1).unwrap();
        assert_eq!(table.latency(DeviceKind::Nvm, Pattern::Seq, Op::Read), 200.0);
        assert_eq!(table.latency(DeviceKind::Nvm, Pattern::Seq, Op::Write), 400.0);
    }

    #[test]
    fn ssd_distinguishes_pattern_and_op() {
        let table = LatencyTable::new(1).unwrap();
        assert_eq!(table.latency(DeviceKind::Ssd, Pattern::Seq, Op::Write), 25_000.0);
        assert_eq!(table.latency(DeviceKind::Ssd, Pattern::Rnd, Op::Write), 40_000.0);
    }

    #[test]
    fn hdd_is_an_order_of_magnitude_slower_than_ssd() {
        let table = LatencyTable::new(1).unwrap();
        assert_eq!(
            table.latency(DeviceKind::Hdd, Pattern::Rnd, Op::Write),
            table.latency(DeviceKind::Ssd, Pattern::Rnd, Op::Write) * 10.0
        );
    }

    #[test]
    fn rejects_out_of_range_latency_type() {
        assert!(LatencyTable::new(0).is_err());
        assert!(LatencyTable::new(6).is_err());
    }
}
