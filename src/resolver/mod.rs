//! Virtual LBA address resolution
//!
//! Splits a virtual LBA into its backing-cluster coordinates and the cache
//! line that may hold a copy of that cluster, plus the candidate slots a
//! lookup has to probe. Resolution is the whole job: hit/miss decisions,
//! eviction, and data movement belong to the callers consuming these
//! addresses.
//!
//! # Address structure
//!
//! With the default geometry (128-block clusters, 8192 lines) a virtual LBA
//! decomposes as:
//!
//! ```text
//! (msb) tag--------------------------  line---------  off----      (lsb)
//! ttttttttttttttttttttttttttttttttttt  lllllllllllll  ooooooo  ---------
//! [================cluster_index====================]  [ block boundary ]
//! ```
//!
//! The split is plain truncating arithmetic, not bit extraction, so geometry
//! is never required to be power-of-two; the diagram's bit boundaries are
//! the default geometry's special case.

mod address;
mod engine;

#[cfg(test)]
mod proptest;

pub use address::{ResolvedAddress, SlotRange};
pub use engine::AddressResolver;

// =============================================================================
// Tests
// =============================================================================
