//! Cache geometry configuration
//!
//! The geometry ties together two fixed layouts: the backing device's
//! cluster layout (how many logical blocks make up one cluster) and the
//! cache's slot layout (how many slots total, grouped into lines of
//! `cache_associativity` ways). Both are fixed for the lifetime of a
//! device/cache pairing; changing either requires building a new
//! [`AddressResolver`](crate::resolver::AddressResolver).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Constants
// =============================================================================

/// Default cluster size (64 KB)
pub const DEFAULT_CLUSTER_SIZE_BYTES: u64 = 64 * 1024;

/// Default logical block size (512 bytes, the classic sector)
pub const DEFAULT_LBA_SIZE_BYTES: u64 = 512;

/// Default total number of cache slots
pub const DEFAULT_CACHE_SLOTS: u64 = 32 * 1024;

/// Default associativity (ways per cache line)
pub const DEFAULT_CACHE_ASSOCIATIVITY: u64 = 4;

// =============================================================================
// Configuration
// =============================================================================

/// Geometry of the backing clusters and the set-associative cache.
///
/// All fields must satisfy the divisibility invariants checked by
/// [`validate`](CacheGeometry::validate): `cluster_size_bytes` is a positive
/// multiple of `lba_size_bytes`, and `cache_associativity` evenly divides
/// `cache_slots`. The derived quantities [`cluster_lbas`](CacheGeometry::cluster_lbas)
/// and [`cache_lines`](CacheGeometry::cache_lines) are only meaningful for
/// validated geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGeometry {
    /// Size of one storage cluster in bytes (must be a positive multiple
    /// of `lba_size_bytes`)
    #[serde(default = "default_cluster_size_bytes")]
    pub cluster_size_bytes: u64,

    /// Size of one logical block in bytes (conventionally 512)
    #[serde(default = "default_lba_size_bytes")]
    pub lba_size_bytes: u64,

    /// Total number of addressable cache slots across all lines
    #[serde(default = "default_cache_slots")]
    pub cache_slots: u64,

    /// Number of slots ("ways") per cache line; must evenly divide
    /// `cache_slots`
    #[serde(default = "default_cache_associativity")]
    pub cache_associativity: u64,
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            cluster_size_bytes: DEFAULT_CLUSTER_SIZE_BYTES,
            lba_size_bytes: DEFAULT_LBA_SIZE_BYTES,
            cache_slots: DEFAULT_CACHE_SLOTS,
            cache_associativity: DEFAULT_CACHE_ASSOCIATIVITY,
        }
    }
}

impl CacheGeometry {
    /// Validate the geometry.
    pub fn validate(&self) -> Result<()> {
        // Positivity first; the divisibility checks below divide by these fields.
        if self.lba_size_bytes == 0 {
            return Err(Error::InvalidGeometry(
                "lba_size_bytes must be positive".into(),
            ));
        }
        if self.cluster_size_bytes == 0 {
            return Err(Error::InvalidGeometry(
                "cluster_size_bytes must be positive".into(),
            ));
        }
        if !self.cluster_size_bytes.is_multiple_of(self.lba_size_bytes) {
            return Err(Error::InvalidGeometry(format!(
                "cluster_size_bytes {} is not a multiple of lba_size_bytes {}",
                self.cluster_size_bytes, self.lba_size_bytes
            )));
        }
        if self.cache_associativity == 0 {
            return Err(Error::InvalidGeometry(
                "cache_associativity must be positive".into(),
            ));
        }
        if self.cache_slots == 0 {
            return Err(Error::InvalidGeometry("cache_slots must be positive".into()));
        }
        if !self.cache_slots.is_multiple_of(self.cache_associativity) {
            return Err(Error::InvalidGeometry(format!(
                "cache_associativity {} does not evenly divide cache_slots {}",
                self.cache_associativity, self.cache_slots
            )));
        }
        Ok(())
    }

    /// Logical blocks per cluster.
    pub fn cluster_lbas(&self) -> u64 {
        self.cluster_size_bytes / self.lba_size_bytes
    }

    /// Number of cache lines (sets).
    pub fn cache_lines(&self) -> u64 {
        self.cache_slots / self.cache_associativity
    }
}

impl fmt::Display for CacheGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}B clusters of {}B blocks, {} slots, {}-way",
            self.cluster_size_bytes, self.lba_size_bytes, self.cache_slots, self.cache_associativity
        )
    }
}

fn default_cluster_size_bytes() -> u64 {
    DEFAULT_CLUSTER_SIZE_BYTES
}

fn default_lba_size_bytes() -> u64 {
    DEFAULT_LBA_SIZE_BYTES
}

fn default_cache_slots() -> u64 {
    DEFAULT_CACHE_SLOTS
}

fn default_cache_associativity() -> u64 {
    DEFAULT_CACHE_ASSOCIATIVITY
}

// =============================================================================
// Tests
// =============================================================================
