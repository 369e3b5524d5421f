//! Resolved address value types
//!
//! Everything here is a plain value computed per call by the
//! [`AddressResolver`](super::AddressResolver); nothing carries state or a
//! lifecycle beyond the call that produced it.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

// =============================================================================
// Slot Range
// =============================================================================

/// The candidate slots of one cache line.
///
/// Slots are laid out contiguously per line: way `w` of line `l` occupies
/// global slot `l * ways + w`. A lookup must probe every slot in the range
/// to decide hit or miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRange {
    base: u64,
    ways: u64,
}

impl SlotRange {
    /// Create the slot range for a cache line.
    pub fn new(line_index: u64, ways: u64) -> Self {
        Self {
            base: line_index * ways,
            ways,
        }
    }

    /// First slot of the range.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Number of slots in the range (the associativity).
    pub fn len(&self) -> usize {
        self.ways as usize
    }

    /// Check whether the range is empty (never the case for validated geometry).
    pub fn is_empty(&self) -> bool {
        self.ways == 0
    }

    /// Global slot index of way `way`, or `None` past the associativity.
    pub fn get(&self, way: u64) -> Option<u64> {
        (way < self.ways).then_some(self.base + way)
    }

    /// Check whether a global slot index belongs to this line.
    pub fn contains(&self, slot: u64) -> bool {
        slot >= self.base && slot < self.base + self.ways
    }

    /// Iterate the global slot indices in way order.
    pub fn iter(&self) -> Range<u64> {
        self.base..self.base + self.ways
    }
}

impl IntoIterator for SlotRange {
    type Item = u64;
    type IntoIter = Range<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Resolved Address
// =============================================================================

/// Where one virtual LBA lives: its backing cluster and its cache line.
///
/// Produced by [`AddressResolver::resolve`](super::AddressResolver::resolve).
/// The lookup component compares `tag` against the stored tag of each slot in
/// `slots`, and on a hit uses `cluster_offset` to index within the cached
/// cluster's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Index of the cluster owning this block
    pub cluster_index: u64,

    /// Position of the block within its cluster, in `[0, cluster_lbas)`
    pub cluster_offset: u64,

    /// Distinguishes which generation of clusters occupies the cache line
    pub tag: u64,

    /// The cache line (set) this cluster maps to, in `[0, cache_lines)`
    pub line_index: u64,

    /// Candidate slots the lookup must probe for this line
    pub slots: SlotRange,
}

impl ResolvedAddress {
    /// Translate to a physical LBA, given where the cached cluster starts.
    ///
    /// The resolver never knows physical placement; the caller supplies the
    /// cluster's physical start LBA once the lookup has found it.
    pub fn physical_lba(&self, cluster_plba: u64) -> u64 {
        cluster_plba + self.cluster_offset
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cluster {} +{} (tag {}, line {}, slots {})",
            self.cluster_index, self.cluster_offset, self.tag, self.line_index, self.slots
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
