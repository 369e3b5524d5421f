//! Address resolution engine
//!
//! Construction validates the geometry and hoists the two divisors every
//! call needs; resolution itself is four integer operations and never fails.

use tracing::debug;

use super::{ResolvedAddress, SlotRange};
use crate::error::{Error, Result};
use crate::geometry::CacheGeometry;

// =============================================================================
// Address Resolver
// =============================================================================

/// Pure translator from virtual LBAs to cluster and cache-line coordinates.
///
/// The resolver holds only immutable geometry: `resolve` retains no state
/// between calls and touches nothing shared, so one instance may be called
/// concurrently from any number of threads without coordination. Changing
/// geometry means building a new resolver.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    /// Validated geometry
    geometry: CacheGeometry,
    /// Blocks per cluster, hoisted at construction
    cluster_lbas: u64,
    /// Cache lines (sets), hoisted at construction
    cache_lines: u64,
}

impl AddressResolver {
    /// Create a resolver over validated geometry.
    ///
    /// Geometry is checked once here and never re-checked per call; a
    /// resolver that constructed successfully can resolve any virtual LBA.
    pub fn new(geometry: CacheGeometry) -> Result<Self> {
        geometry.validate()?;

        let cluster_lbas = geometry.cluster_lbas();
        let cache_lines = geometry.cache_lines();

        debug!(
            "Address resolver ready: {} ({} LBAs per cluster, {} lines)",
            geometry, cluster_lbas, cache_lines
        );

        Ok(Self {
            geometry,
            cluster_lbas,
            cache_lines,
        })
    }

    /// Get the geometry this resolver was built over.
    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    /// Get the number of logical blocks per cluster.
    pub fn cluster_lbas(&self) -> u64 {
        self.cluster_lbas
    }

    /// Get the number of cache lines (sets).
    pub fn cache_lines(&self) -> u64 {
        self.cache_lines
    }

    /// Resolve a virtual LBA to its cluster and cache-line coordinates.
    ///
    /// Total over all of `u64`: truncating division and modulo on
    /// non-negative integers, no search, no branching on the value.
    pub fn resolve(&self, vlba: u64) -> ResolvedAddress {
        let cluster_index = vlba / self.cluster_lbas;
        let cluster_offset = vlba % self.cluster_lbas;
        let tag = cluster_index / self.cache_lines;
        let line_index = cluster_index % self.cache_lines;

        ResolvedAddress {
            cluster_index,
            cluster_offset,
            tag,
            line_index,
            slots: SlotRange::new(line_index, self.geometry.cache_associativity),
        }
    }

    /// Resolve a virtual LBA arriving through a signed interface.
    ///
    /// Block numbers crossing an ioctl or wire boundary are often carried
    /// in signed fields; negative values are rejected rather than wrapped.
    pub fn resolve_signed(&self, vlba: i64) -> Result<ResolvedAddress> {
        if vlba < 0 {
            return Err(Error::NegativeLba(vlba));
        }
        Ok(self.resolve(vlba as u64))
    }

    /// Check whether a transfer crosses a cluster boundary.
    ///
    /// `length0` is 0-based (NVMe-style): a value of `n` means `n + 1`
    /// blocks starting at `vlba`. A transfer that spans clusters cannot be
    /// served from a single slot and must be split or bypassed by the
    /// caller.
    pub fn spans_clusters(&self, vlba: u64, length0: u16) -> bool {
        vlba / self.cluster_lbas != (vlba + u64::from(length0)) / self.cluster_lbas
    }

    /// Cluster index owning a byte address.
    ///
    /// Backing stores report cluster placement as byte addresses; this
    /// truncates one to cluster granularity.
    pub fn cluster_of_byte(&self, byte_addr: u64) -> u64 {
        byte_addr / self.geometry.cluster_size_bytes
    }

    /// First virtual LBA of a cluster.
    pub fn cluster_start_lba(&self, cluster_index: u64) -> u64 {
        cluster_index * self.cluster_lbas
    }
}

// =============================================================================
// Tests
// =============================================================================
