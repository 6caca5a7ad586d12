//! Error types for Relief.
//!
//! All crates return `ReliefResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for Relief.
#[derive(Debug, Error)]
pub enum ReliefError {
    /// Input grid is undersized or its coordinate grids do not match it.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A render was requested with no geometry.
    #[error("Empty mesh list: at least one mesh is required to render")]
    EmptyMeshList,

    /// The rendering collaborator could not be initialized or failed.
    #[error("Render backend error: {0}")]
    RenderBackend(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, ReliefError>`.
pub type ReliefResult<T> = Result<T, ReliefError>;
