//! Error types for npr-core
//!
//! Provides a unified error type for raster construction and pixel access.
//! Each variant captures enough context for diagnostics without exposing
//! the internal buffer layout.

use thiserror::Error;

/// npr-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Channel count outside 1..=4
    #[error("invalid channel count: {0}")]
    InvalidChannels(u32),

    /// Pixel buffer does not match width * height * channels
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Coordinates outside the raster
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} raster")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for npr-core operations
pub type Result<T> = std::result::Result<T, Error>;
