//! Run-end reporting: the summary file the source writes to
//! `outputfile.summary`, plus an optional verbose log line.

use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::machine::Machine;

pub const DEFAULT_SUMMARY_FILE: &str = "outputfile.summary";

/// Operations per second, given the number of operations actually replayed
/// and the accumulated latency in the latency table's unit.
pub fn throughput(operation_count: u64, total_duration: f64) -> f64 {
    if total_duration == 0.0 {
        return 0.0;
    }
    operation_count as f64 * 1_000_000.0 / total_duration
}

pub fn write_summary(path: &Path, operation_count: u64, total_duration: f64) -> Result<()> {
    let achieved = throughput(operation_count, total_duration);
    let mut file = std::fs::File::create(path)
        .map_err(|e| Error::invariant(format!("could not open {}: {e}", path.display())))?;
    writeln!(file, "{achieved:.2}")
        .map_err(|e| Error::invariant(format!("could not write {}: {e}", path.display())))?;
    Ok(())
}

/// Emits the `info!` end-of-run line a verbose configuration asks for:
/// achieved throughput plus per-device occupancy.
pub fn log_verbose_summary(machine: &Machine, operation_count: u64) {
    let achieved = throughput(operation_count, machine.total_duration());
    info!("throughput: {achieved:.2} ops/s");
    for device in machine.devices() {
        info!(
            "  {:?}: {}/{} blocks resident",
            device.kind(),
            device.cache.size(),
            device.capacity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_of_zero_duration_is_zero() {
        assert_eq!(throughput(100, 0.0), 0.0);
    }

    #[test]
    fn throughput_matches_the_literal_formula() {
        assert!((throughput(10, 2_000_000.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn write_summary_produces_a_two_decimal_line() {
        let dir = std::env::temp_dir().join(format!("tiersim-summary-test-{}", std::process::id()));
        write_summary(&dir, 10, 2_000_000.0).unwrap();
        let contents = std::fs::read_to_string(&dir).unwrap();
        assert_eq!(contents.trim(), "5.00");
        std::fs::remove_file(&dir).unwrap();
    }
}
