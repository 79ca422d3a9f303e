//! Error types for the Cascade engine.
//!
//! All crates return `CascadeResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Cascade engine.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Domain extents or region bounds are malformed.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A stored flag byte does not map to a defined cell flag.
    #[error("Invalid cell flag byte: {0}")]
    InvalidFlag(u8),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The simulation left the stable regime (NaN/Inf distributions or
    /// collapsing density). Detected by the driver's sanity scan, never
    /// by the collision kernel itself.
    #[error("Simulation diverged at timestep {timestep}: {detail}")]
    Diverged { timestep: u32, detail: String },
}

/// Convenience alias for `Result<T, CascadeError>`.
pub type CascadeResult<T> = Result<T, CascadeError>;
