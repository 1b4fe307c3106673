use crate::device::DeviceFactory;
use crate::error::Result;
use crate::types::{CachingKind, DeviceKind, HierarchyKind};

/// Expands a `HierarchyKind` into the concrete, ordered list of device
/// kinds it builds: a leading `Cache` tier (every hierarchy gets one, be it
/// implicit or, for `CacheDramNvmSsd`, the hierarchy's own first-named tier)
/// followed by `HierarchyKind::tiers()`.
pub fn device_kinds(hierarchy: HierarchyKind) -> Vec<DeviceKind> {
    let mut kinds = vec![DeviceKind::Cache];
    kinds.extend_from_slice(hierarchy.tiers());
    kinds
}

/// Builds the ordered device list for a hierarchy, using `size_type` for
/// per-device capacity and `caching_kind` for every tier's eviction policy.
/// The last device built is the backing device and gets the full-working-set
/// capacity override instead of a size-table entry.
pub fn build(
    hierarchy: HierarchyKind,
    size_type: u8,
    caching_kind: CachingKind,
) -> Result<Vec<crate::device::Device>> {
    let kinds = device_kinds(hierarchy);
    let last = kinds.len() - 1;
    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| DeviceFactory::build(kind, size_type, caching_kind, i == last))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hierarchy_gets_a_leading_cache_tier() {
        for h in [
            HierarchyKind::Nvm,
            HierarchyKind::DramNvm,
            HierarchyKind::DramSsd,
            HierarchyKind::DramNvmSsd,
            HierarchyKind::DramNvmSsdHdd,
            HierarchyKind::CacheDramNvmSsd,
        ] {
            assert_eq!(device_kinds(h)[0], DeviceKind::Cache);
        }
    }

    #[test]
    fn dram_nvm_ssd_hierarchy_has_expected_order() {
        let kinds = device_kinds(HierarchyKind::DramNvmSsd);
        assert_eq!(
            kinds,
            vec![
                DeviceKind::Cache,
                DeviceKind::Dram,
                DeviceKind::Nvm,
                DeviceKind::Ssd
            ]
        );
    }

    #[test]
    fn last_device_is_the_backing_device() {
        let devices = build(HierarchyKind::DramNvmSsd, 1, CachingKind::Lru).unwrap();
        assert_eq!(devices.last().unwrap().kind(), DeviceKind::Ssd);
        assert_eq!(
            devices.last().unwrap().capacity(),
            1024 * 1024,
            "backing device must get the full-working-set override"
        );
    }
}
