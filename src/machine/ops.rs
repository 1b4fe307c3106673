use rand::Rng;

use super::Machine;
use crate::error::{Error, Result};
use crate::types::{BlockStatus, DeviceKind};

impl Machine {
    /// Ensure every unique block observed in a trace has a clean resident
    /// copy on the backing device, then reset the latency accumulator.
    /// Callers are expected to de-duplicate `blocks` themselves (the source
    /// tracks a `block_list` set across its pre-pass for the same reason);
    /// re-bootstrapping an already-resident block is harmless but wasted
    /// work.
    pub fn bootstrap(&mut self, blocks: impl IntoIterator<Item = i64>) -> Result<()> {
        let backing = self.backing_kind();
        let offset = self.offset(backing)?;
        for block in blocks {
            self.devices[offset].cache.put(block, BlockStatus::Clean)?;
        }
        self.total_duration = 0.0;
        Ok(())
    }

    pub fn read(&mut self, block: i64) -> Result<()> {
        self.bring_to_memory(block)?;
        let location = self.locate(block);
        self.total_duration += self.read_latency(location, block)?;
        if location.is_none() {
            return Err(Error::invariant(format!(
                "block {block} still not resident after bring_to_memory"
            )));
        }
        Ok(())
    }

    pub fn write(&mut self, block: i64) -> Result<()> {
        self.bring_to_memory(block)?;
        match self.locate(block) {
            None => {
                let (top, status) = self.top_volatile_tier_for_write();
                self.copy(top, None, block, status)?;
            }
            Some(destination) => self.write_existing(destination, block)?,
        }
        Ok(())
    }

    /// Identical to `write`'s existing-block branch: the source distinguishes
    /// `WriteBlock`'s two cases rather than exposing two entry points, so
    /// this is a thin alias that insists the block already has a location.
    pub fn update(&mut self, block: i64) -> Result<()> {
        self.bring_to_memory(block)?;
        let destination = self.locate(block).ok_or_else(|| {
            Error::invariant(format!("update on block {block} with no prior residency"))
        })?;
        self.write_existing(destination, block)
    }

    pub fn flush(&mut self, block: i64) -> Result<()> {
        let Some(location) = self.locate(block) else {
            return Ok(());
        };
        if !location.is_volatile() {
            return Ok(());
        }
        let offset = self.offset(location)?;
        let status = self.devices[offset].cache.get(block, true)?;
        if status.is_dirty() {
            self.bring_to_storage(block, status)?;
        }
        Ok(())
    }

    fn write_existing(&mut self, destination: DeviceKind, block: i64) -> Result<()> {
        if destination.is_volatile() {
            let offset = self.offset(destination)?;
            let victim = self.devices[offset].cache.put(block, BlockStatus::Dirty)?;
            if victim.is_some() {
                return Err(Error::invariant(
                    "re-put of an already-resident block unexpectedly evicted an entry",
                ));
            }
        }
        self.total_duration += self.write_latency(destination, block)?;
        Ok(())
    }

    fn top_volatile_tier_for_write(&self) -> (DeviceKind, BlockStatus) {
        if self.exists(DeviceKind::Cache) {
            (DeviceKind::Cache, BlockStatus::Dirty)
        } else if self.exists(DeviceKind::Dram) {
            (DeviceKind::Dram, BlockStatus::Dirty)
        } else {
            // NVM as the only volatile tier has no dirty semantics of its own.
            (DeviceKind::Nvm, BlockStatus::Clean)
        }
    }

    fn draw_promotion(&mut self) -> bool {
        self.rng.gen_range(0..self.migration_frequency) == 0
    }

    fn bring_to_memory(&mut self, block: i64) -> Result<()> {
        let in_memory = self.locate(block).map(|k| k.is_memory()).unwrap_or(false);
        if !in_memory {
            if let Some(storage_location) = self.locate(block) {
                let dest = if self.exists(DeviceKind::Nvm) {
                    DeviceKind::Nvm
                } else {
                    DeviceKind::Dram
                };
                self.copy(dest, Some(storage_location), block, BlockStatus::Clean)?;
            }
        }

        if self.locate(block) == Some(DeviceKind::Nvm)
            && self.exists(DeviceKind::Dram)
            && self.draw_promotion()
        {
            self.copy(DeviceKind::Dram, Some(DeviceKind::Nvm), block, BlockStatus::Clean)?;
        }

        if self.locate(block) == Some(DeviceKind::Dram)
            && self.exists(DeviceKind::Cache)
            && self.draw_promotion()
        {
            self.copy(DeviceKind::Cache, Some(DeviceKind::Dram), block, BlockStatus::Clean)?;
        }

        Ok(())
    }

    fn bring_to_storage(&mut self, block: i64, status: BlockStatus) -> Result<()> {
        let Some(origin) = self.locate(block) else {
            return Ok(());
        };
        if !origin.is_volatile() {
            return Ok(());
        }
        let destination = if self.exists(DeviceKind::Nvm) {
            DeviceKind::Nvm
        } else {
            DeviceKind::Ssd
        };
        self.copy(destination, Some(origin), block, status)?;

        let offset = self.offset(origin)?;
        let victim = self.devices[offset].cache.put(block, BlockStatus::Clean)?;
        if victim.is_some() {
            return Err(Error::invariant(
                "marking the origin clean unexpectedly evicted an entry",
            ));
        }
        self.total_duration += self.write_latency(origin, block)?;
        Ok(())
    }
}
