//! Small data types shared across the cache, device and migration layers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a resident block still needs to be written down before it can be
/// safely discarded from a volatile tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Clean,
    Dirty,
}

impl BlockStatus {
    pub fn is_dirty(self) -> bool {
        matches!(self, BlockStatus::Dirty)
    }
}

/// A tier in the storage hierarchy, fastest/smallest to slowest/largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Cache,
    Dram,
    Nvm,
    Ssd,
    Hdd,
}

impl DeviceKind {
    /// `Cache` and `Dram` are volatile: their residents can be dropped
    /// without being written down, as long as they aren't `Dirty`.
    pub fn is_volatile(self) -> bool {
        matches!(self, DeviceKind::Cache | DeviceKind::Dram)
    }

    /// `Cache`, `Dram` and `Nvm` are the memory tiers a block passes through
    /// on its way up from storage.
    pub fn is_memory(self) -> bool {
        matches!(self, DeviceKind::Cache | DeviceKind::Dram | DeviceKind::Nvm)
    }
}

/// The subsequence of device kinds a configured hierarchy is built from.
///
/// The last kind listed is always the backing device: every block ever
/// referenced resides there at minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HierarchyKind {
    Nvm,
    DramNvm,
    DramSsd,
    DramNvmSsd,
    DramNvmSsdHdd,
    CacheDramNvmSsd,
}

impl HierarchyKind {
    /// The device kinds present, in hierarchy order, *excluding* the
    /// implicit leading `Cache` tier every hierarchy gets (§3, `Device`).
    pub fn tiers(self) -> &'static [DeviceKind] {
        use DeviceKind::*;
        match self {
            HierarchyKind::Nvm => &[Nvm],
            HierarchyKind::DramNvm => &[Dram, Nvm],
            HierarchyKind::DramSsd => &[Dram, Ssd],
            HierarchyKind::DramNvmSsd => &[Dram, Nvm, Ssd],
            HierarchyKind::DramNvmSsdHdd => &[Dram, Nvm, Ssd, Hdd],
            HierarchyKind::CacheDramNvmSsd => &[Dram, Nvm, Ssd],
        }
    }
}

impl FromStr for HierarchyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nvm" => Ok(HierarchyKind::Nvm),
            "dram-nvm" => Ok(HierarchyKind::DramNvm),
            "dram-ssd" => Ok(HierarchyKind::DramSsd),
            "dram-nvm-ssd" => Ok(HierarchyKind::DramNvmSsd),
            "dram-nvm-ssd-hdd" => Ok(HierarchyKind::DramNvmSsdHdd),
            "cache-dram-nvm-ssd" => Ok(HierarchyKind::CacheDramNvmSsd),
            other => Err(format!("unknown hierarchy_type {other:?}")),
        }
    }
}

/// Which eviction discipline every [`crate::storage_cache::StorageCache`] in
/// the machine is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachingKind {
    Fifo,
    Lru,
    Lfu,
    Arc,
}

impl FromStr for CachingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fifo" => Ok(CachingKind::Fifo),
            "lru" => Ok(CachingKind::Lru),
            "lfu" => Ok(CachingKind::Lfu),
            "arc" => Ok(CachingKind::Arc),
            other => Err(format!("unknown caching_type {other:?}")),
        }
    }
}
