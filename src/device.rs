use crate::storage_cache::StorageCache;
use crate::types::{CachingKind, DeviceKind};

/// 4 KiB-block scale factor the capacity table is expressed in before
/// multiplying out raw size-table units. The source computes this as
/// `1000/4` in integer arithmetic, not the `1024/4` a binary-unit reading
/// would suggest; kept exactly as the source has it.
const SCALE_FACTOR: usize = 1000 / 4;

/// The backing device's capacity after bootstrap, overriding whatever the
/// size table would otherwise give it: large enough to hold the full
/// working set of any trace this simulator is fed.
const BACKING_DEVICE_CAPACITY: usize = 1024 * 1024;

fn raw_size(kind: DeviceKind, size_type: u8) -> Result<usize, crate::error::Error> {
    use crate::error::Error;
    match kind {
        DeviceKind::Cache => Ok(8),
        DeviceKind::Ssd => Ok(32 * 1024),
        DeviceKind::Hdd => Ok(256 * 1024),
        DeviceKind::Dram => match size_type {
            1 | 2 => Ok(16),
            3 | 4 => Ok(128),
            5 => Ok(128),
            other => Err(Error::Configuration(format!(
                "size_type must be 1..=5, got {other}"
            ))),
        },
        DeviceKind::Nvm => match size_type {
            1 => Ok(16),
            2 => Ok(128),
            3 => Ok(16),
            4 => Ok(128),
            5 => Ok(512),
            other => Err(Error::Configuration(format!(
                "size_type must be 1..=5, got {other}"
            ))),
        },
    }
}

/// A single tier of the storage hierarchy: a kind tag, a fixed capacity, and
/// the [`StorageCache`] backing it.
pub struct Device {
    kind: DeviceKind,
    capacity: usize,
    pub cache: StorageCache,
}

impl Device {
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Builds [`Device`]s from the `size_type`/`caching_type` configuration,
/// matching the source's `DeviceFactory::GetDevice`.
pub struct DeviceFactory;

impl DeviceFactory {
    pub fn build(
        kind: DeviceKind,
        size_type: u8,
        caching_kind: CachingKind,
        is_backing_device: bool,
    ) -> Result<Device, crate::error::Error> {
        let capacity = if is_backing_device {
            BACKING_DEVICE_CAPACITY
        } else {
            raw_size(kind, size_type)? * SCALE_FACTOR
        };
        Ok(Device {
            kind,
            capacity,
            cache: StorageCache::new(kind, caching_kind, capacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_backing_capacity_is_scaled() {
        let device = DeviceFactory::build(DeviceKind::Dram, 1, CachingKind::Lru, false).unwrap();
        assert_eq!(device.capacity(), 16 * SCALE_FACTOR);
    }

    #[test]
    fn backing_device_gets_full_working_set_capacity() {
        let device = DeviceFactory::build(DeviceKind::Ssd, 1, CachingKind::Lru, true).unwrap();
        assert_eq!(device.capacity(), BACKING_DEVICE_CAPACITY);
    }

    #[test]
    fn cache_and_ssd_capacity_are_independent_of_size_type() {
        let a = DeviceFactory::build(DeviceKind::Cache, 1, CachingKind::Lru, false).unwrap();
        let b = DeviceFactory::build(DeviceKind::Cache, 4, CachingKind::Lru, false).unwrap();
        assert_eq!(a.capacity(), b.capacity());
    }

    #[test]
    fn rejects_out_of_range_size_type() {
        assert!(DeviceFactory::build(DeviceKind::Dram, 0, CachingKind::Lru, false).is_err());
        assert!(DeviceFactory::build(DeviceKind::Nvm, 6, CachingKind::Lru, false).is_err());
    }
}
