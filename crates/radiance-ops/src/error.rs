//! Error types for raster operations.

use thiserror::Error;

/// Error type for raster operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid target dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Core container error.
    #[error(transparent)]
    Core(#[from] radiance_core::Error),
}

/// Result type for raster operations.
pub type OpsResult<T> = Result<T, OpsError>;
