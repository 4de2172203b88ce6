//! Error types for npr-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] npr_core::Error),

    /// Raster has fewer than the 3 channels the filter needs
    #[error("unsupported format: expected at least 3 channels, got {channels}")]
    UnsupportedFormat { channels: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
