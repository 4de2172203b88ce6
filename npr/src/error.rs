//! Error types for the npr session layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by mode selection and the session
#[derive(Debug, Error)]
pub enum NprError {
    /// Mode ID outside 0..=5
    #[error("invalid output mode {0}: expected 0..=5")]
    InvalidMode(u8),

    /// Loading a raster failed; the session keeps its previous rasters
    #[error("failed to load '{}': {source}", path.display())]
    LoadFailure {
        path: PathBuf,
        source: npr_io::IoError,
    },

    /// Saving a raster failed
    #[error("failed to save '{}': {source}", path.display())]
    SaveFailure {
        path: PathBuf,
        source: npr_io::IoError,
    },

    /// Grayscale filter error
    #[error("color error: {0}")]
    Color(#[from] npr_color::ColorError),

    /// Segmentation error
    #[error("region error: {0}")]
    Region(#[from] npr_region::RegionError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] npr_core::Error),
}

impl NprError {
    /// Check whether this is a filter rejecting a raster with fewer than 3
    /// channels.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            NprError::Color(npr_color::ColorError::UnsupportedFormat { .. })
                | NprError::Region(npr_region::RegionError::UnsupportedFormat { .. })
        )
    }
}

/// Result type for session operations
pub type NprResult<T> = Result<T, NprError>;
