//! npr-test - Regression test helpers for npr
//!
//! Provides [`RegParams`], a small regression harness that numbers each
//! check, records failures and reports them at the end, plus loaders for
//! test images. Two modes are supported:
//!
//! - **Compare** (default): run the checks only
//! - **Display**: also write intermediate rasters to `tests/regout` for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use npr_test::RegParams;
//!
//! let mut rp = RegParams::new("grayscale");
//! rp.compare_values(51.0, luma as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use npr_core::{Raster, Rgb};
use std::path::Path;

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "giraffe.png")
pub fn load_test_image(name: &str) -> TestResult<Raster> {
    let path = test_data_path(name);
    npr_io::read_raster(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Load a test image, or fall back to a synthetic one when the asset is
/// not checked out.
pub fn load_test_image_or_synthetic(name: &str) -> TestResult<Raster> {
    if Path::new(&test_data_path(name)).exists() {
        load_test_image(name)
    } else {
        synthetic_scene(64, 48)
    }
}

/// Smooth RGB gradient: red grows along x, green along y, blue is their
/// mix.
pub fn synthetic_gradient(width: u32, height: u32) -> TestResult<Raster> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let r = scale(x, width);
            let g = scale(y, height);
            let b = ((u16::from(r) + u16::from(g)) / 2) as u8;
            data.extend_from_slice(&[r, g, b]);
        }
    }
    Ok(Raster::from_data(width, height, 3, data)?)
}

/// A scene of flat color blocks over a dark background, so segmentation
/// has clear regions to find.
pub fn synthetic_scene(width: u32, height: u32) -> TestResult<Raster> {
    const PALETTE: [Rgb; 4] = [
        Rgb::new(220, 180, 40),
        Rgb::new(30, 120, 200),
        Rgb::new(200, 40, 60),
        Rgb::new(90, 200, 90),
    ];
    let background = Rgb::new(16, 16, 24);

    let mut raster = Raster::filled(width, height, 3, background)?.to_mut();
    let bw = (width / 4).max(1);
    let bh = (height / 3).max(1);
    for y in 0..height {
        for x in 0..width {
            let (bx, by) = (x / bw, y / bh);
            // Checkerboard of blocks, leaving background between them
            if (bx + by) % 2 == 0 {
                let color = PALETTE[((bx + by * 4) % 4) as usize];
                raster.set_rgb_unchecked(x, y, color);
            }
        }
    }
    Ok(raster.into())
}

fn scale(v: u32, extent: u32) -> u8 {
    if extent <= 1 {
        return 0;
    }
    ((v as u64 * 255) / (extent as u64 - 1)) as u8
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // npr-test is at crates/npr-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_gradient_corners() {
        let r = synthetic_gradient(5, 3).unwrap();
        assert_eq!(r.get_rgb(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(r.get_rgb(4, 2), Some(Rgb::new(255, 255, 255)));
        assert_eq!(r.get_rgb(4, 0), Some(Rgb::new(255, 0, 127)));
    }

    #[test]
    fn test_synthetic_scene_has_blocks_and_background() {
        let r = synthetic_scene(16, 12).unwrap();
        assert_eq!(r.get_rgb(0, 0), Some(Rgb::new(220, 180, 40)));
        assert_eq!(r.get_rgb(4, 0), Some(Rgb::new(16, 16, 24)));
    }

    #[test]
    fn test_missing_asset_falls_back() {
        let r = load_test_image_or_synthetic("does-not-exist.png").unwrap();
        assert_eq!((r.width(), r.height(), r.channels()), (64, 48, 3));
    }
}
