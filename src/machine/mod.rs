//! The simulated machine: the device hierarchy, the latency accumulator and
//! the block-location queries the migration engine is built from.
//!
//! Replaces the source's file-scope globals (`state`, `total_duration`,
//! `device_size`) with one explicit record threaded through every operation.

mod ops;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Configuration;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::hierarchy;
use crate::latency::{LatencyTable, Op, Pattern};
use crate::types::{BlockStatus, DeviceKind};

pub struct Machine {
    devices: Vec<Device>,
    latency: LatencyTable,
    rng: StdRng,
    migration_frequency: u32,
    /// Running latency accumulator, in the latency table's opaque unit.
    total_duration: f64,
}

impl Machine {
    pub fn new(config: &Configuration, seed: u64) -> Result<Self> {
        let devices = hierarchy::build(
            config.hierarchy_type,
            config.size_type,
            config.caching_type,
        )?;
        let latency = LatencyTable::new(config.latency_type)?;
        Ok(Machine {
            devices,
            latency,
            rng: StdRng::seed_from_u64(seed),
            migration_frequency: config.migration_frequency,
            total_duration: 0.0,
        })
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// The kind of the first device (in hierarchy order) whose cache
    /// contains `block`, if any.
    pub fn locate(&self, block: i64) -> Option<DeviceKind> {
        self.devices
            .iter()
            .find(|d| d.cache.contains(block))
            .map(|d| d.kind())
    }

    pub fn exists(&self, kind: DeviceKind) -> bool {
        self.devices.iter().any(|d| d.kind() == kind)
    }

    pub fn offset(&self, kind: DeviceKind) -> Result<usize> {
        self.devices
            .iter()
            .position(|d| d.kind() == kind)
            .ok_or_else(|| Error::invariant(format!("no {kind:?} device in this hierarchy")))
    }

    /// Next tier down from `source`. `Dram` goes to `Nvm` when present,
    /// otherwise `Ssd`; `Nvm` always goes to `Ssd`; `Cache` falls through to
    /// the first of `Dram`/`Nvm`/`Ssd` present, the same "next real tier"
    /// rule the source applies to `Dram`, generalized one level up since the
    /// distilled migration rule also pushes dirty victims out of `Cache`
    /// (see DESIGN.md).
    pub fn lower(&self, source: DeviceKind) -> Result<DeviceKind> {
        match source {
            DeviceKind::Dram => Ok(if self.exists(DeviceKind::Nvm) {
                DeviceKind::Nvm
            } else {
                DeviceKind::Ssd
            }),
            DeviceKind::Nvm => Ok(DeviceKind::Ssd),
            DeviceKind::Cache => {
                if self.exists(DeviceKind::Dram) {
                    Ok(DeviceKind::Dram)
                } else if self.exists(DeviceKind::Nvm) {
                    Ok(DeviceKind::Nvm)
                } else {
                    Ok(DeviceKind::Ssd)
                }
            }
            other => Err(Error::invariant(format!("{other:?} has no lower tier"))),
        }
    }

    fn device(&self, kind: DeviceKind) -> Result<&Device> {
        let offset = self.offset(kind)?;
        Ok(&self.devices[offset])
    }

    fn backing_kind(&self) -> DeviceKind {
        self.devices
            .last()
            .expect("a machine always has at least one device")
            .kind()
    }

    fn read_latency(&self, source: Option<DeviceKind>, block: i64) -> Result<f64> {
        match source {
            None => Ok(0.0),
            Some(kind) => {
                let device = self.device(kind)?;
                let pattern = if device.cache.is_sequential(block) {
                    Pattern::Seq
                } else {
                    Pattern::Rnd
                };
                Ok(self.latency.latency(kind, pattern, Op::Read))
            }
        }
    }

    fn write_latency(&self, destination: DeviceKind, block: i64) -> Result<f64> {
        let device = self.device(destination)?;
        let pattern = if device.cache.is_sequential(block) {
            Pattern::Seq
        } else {
            Pattern::Rnd
        };
        Ok(self.latency.latency(destination, pattern, Op::Write))
    }

    /// `Copy(dest, src, block, status)`: write `block` into `dest`'s cache,
    /// charge read+write latency, and push any displaced entry further down.
    fn copy(
        &mut self,
        dest: DeviceKind,
        src: Option<DeviceKind>,
        block: i64,
        status: BlockStatus,
    ) -> Result<()> {
        let final_status = if dest == self.backing_kind() {
            BlockStatus::Clean
        } else {
            status
        };
        let offset = self.offset(dest)?;
        let victim = self.devices[offset].cache.put(block, final_status)?;

        self.total_duration += self.read_latency(src, block)?;
        self.total_duration += self.write_latency(dest, block)?;

        self.move_victim(dest, victim)
    }

    /// `MoveVictim(source_tier, victim)`: push a displaced dirty block from
    /// a memory tier one level further down.
    fn move_victim(&mut self, source: DeviceKind, victim: Option<(i64, BlockStatus)>) -> Result<()> {
        let Some((block, status)) = victim else {
            return Ok(());
        };
        let from_memory = matches!(
            source,
            DeviceKind::Dram | DeviceKind::Nvm | DeviceKind::Cache
        );
        if from_memory && status.is_dirty() {
            let destination = self.lower(source)?;
            self.copy(destination, Some(source), block, status)?;
        }
        Ok(())
    }
}
