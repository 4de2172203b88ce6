//! npr-region - Region labeling for npr
//!
//! This crate provides:
//!
//! - **Label matrices** ([`LabelMatrix`]) - Flat per-pixel region IDs
//! - **Region growing** ([`region_grow`]) - Single-pass greedy grouping of
//!   pixels by color similarity to their up and left neighbors
//!
//! # Examples
//!
//! ```
//! use npr_core::{Raster, Rgb};
//! use npr_region::{region_grow, RegionGrowOptions};
//!
//! let raster = Raster::filled(2, 2, 3, Rgb::gray(10)).unwrap();
//! let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
//! assert_eq!(seg.labels.as_slice(), &[0, 0, 0, 0]);
//! assert_eq!(seg.region_count(), 1);
//! ```

pub mod error;
pub mod label;
pub mod region_grow;

// Re-export core types
pub use npr_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export label types
pub use label::LabelMatrix;

// Re-export region growing types and functions
pub use region_grow::{
    ColorArithmetic, DEFAULT_THRESHOLD, RegionGrowOptions, Segmentation, region_grow,
    region_grow_simple,
};
