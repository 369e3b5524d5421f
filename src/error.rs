//! Error types for the LBA cache address resolver

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving an address resolver
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Resolver Errors
    // =========================================================================
    /// Cache geometry violates a divisibility or positivity invariant
    #[error("Invalid cache geometry: {0}")]
    InvalidGeometry(String),

    /// Virtual LBA arrived through a signed interface and is negative
    #[error("Negative virtual LBA: {0}")]
    NegativeLba(i64),

    // =========================================================================
    // Geometry File Errors
    // =========================================================================
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geometry file parse error
    #[error("Failed to parse geometry file: {0}")]
    GeometryFile(#[from] serde_yaml::Error),
}
