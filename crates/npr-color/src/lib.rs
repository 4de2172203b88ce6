//! npr Color - Luminance conversion for RGB(A) rasters
//!
//! - **Grayscale** ([`grayscale`]): weighted-luma conversion that keeps the
//!   raster's shape and alpha, plus the pixel-level [`rgb_to_luma`]

pub mod error;
pub mod grayscale;

// Re-export core types
pub use npr_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export grayscale types and functions
pub use grayscale::{
    // Constants
    PARALLEL,
    // Types
    LumaWeights,
    // Functions
    grayscale,
    grayscale_with_weights,
    is_grayscale,
    rgb_to_luma,
};
