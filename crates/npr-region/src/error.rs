//! Error types for npr-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] npr_core::Error),

    /// Raster has fewer than the 3 channels the segmenter needs
    #[error("unsupported format: expected at least 3 channels, got {channels}")]
    UnsupportedFormat { channels: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
