//! lbacache - Set-Associative Address Resolution for Virtual Block Devices
//!
//! Maps virtual logical block addresses (LBAs) onto backing-store clusters
//! and the set-associative cache slots that may hold them. The resolver is
//! the addressing contract of a larger caching data path: lookup, eviction,
//! and data movement consume its output but live elsewhere.
//!
//! # Architecture
//!
//! ```text
//! vlba ──► AddressResolver ──► ResolvedAddress { cluster, offset, tag, line, slots }
//!                                      │
//!                                      └──► cache lookup / eviction (external)
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types
//! - [`geometry`] - Cluster and cache geometry configuration
//! - [`resolver`] - The address resolver and its value types

pub mod error;
pub mod geometry;
pub mod resolver;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::CacheGeometry;
pub use resolver::{AddressResolver, ResolvedAddress, SlotRange};
