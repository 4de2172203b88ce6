//! Grayscale conversion
//!
//! Computes a weighted luma for every pixel and writes it into the red,
//! green and blue channels of a new raster of the same shape. Alpha is
//! carried over untouched. Each output pixel depends only on the same
//! input pixel, so rows are converted independently (in parallel with the
//! `parallel` feature).
//!
//! The default weights are `0.2 R + 0.71 G + 0.07 B`. They sum to 0.98,
//! so a gray input darkens very slightly instead of passing through. The
//! default weighting is evaluated in integer hundredths so that exact
//! halves round up; custom weights go through `f32`.

use crate::{ColorError, ColorResult};
use npr_core::{Raster, Rgb};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Whether rows are converted in parallel (the `parallel` feature).
pub const PARALLEL: bool = cfg!(feature = "parallel");

/// Per-channel weights of the luma sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self {
            red: 0.2,
            green: 0.71,
            blue: 0.07,
        }
    }
}

impl LumaWeights {
    /// Create weights from explicit factors.
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Check that every weight is finite and non-negative.
    pub fn validate(&self) -> ColorResult<()> {
        for (name, w) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if !w.is_finite() || w < 0.0 {
                return Err(ColorError::InvalidParameters(format!(
                    "{} weight must be finite and >= 0, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }

    /// Weighted luma of a color, rounded to nearest (halves up) and
    /// saturated at 255.
    #[inline]
    pub fn luma(&self, c: Rgb) -> u8 {
        if *self == Self::default() {
            return default_luma(c);
        }
        let v = self.red * c.r as f32 + self.green * c.g as f32 + self.blue * c.b as f32;
        v.round().min(255.0) as u8
    }
}

/// `round(0.2 R + 0.71 G + 0.07 B)` in hundredths; `0.71` and `0.07` are
/// not exact in `f32`, which would pull `.5` cases down.
#[inline]
fn default_luma(c: Rgb) -> u8 {
    let sum = 20 * u32::from(c.r) + 71 * u32::from(c.g) + 7 * u32::from(c.b);
    ((sum + 50) / 100).min(255) as u8
}

/// Luma of a single color with the default weights.
///
/// # Example
///
/// ```
/// use npr_color::rgb_to_luma;
///
/// assert_eq!(rgb_to_luma(255, 255, 255), 250);
/// assert_eq!(rgb_to_luma(0, 0, 0), 0);
/// ```
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    LumaWeights::default().luma(Rgb::new(r, g, b))
}

/// Convert a raster to grayscale with the default weights.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedFormat`] for rasters with fewer than
/// 3 channels; callers treat that as a no-op.
pub fn grayscale(raster: &Raster) -> ColorResult<Raster> {
    grayscale_with_weights(raster, LumaWeights::default())
}

/// Convert a raster to grayscale with custom weights.
///
/// The output has the same width, height and channel count as the input.
/// Luma is computed from the input's bytes only; R, G and B of each output
/// pixel receive the luma and any alpha byte is copied.
pub fn grayscale_with_weights(raster: &Raster, weights: LumaWeights) -> ColorResult<Raster> {
    if !raster.is_rgb() {
        return Err(ColorError::UnsupportedFormat {
            channels: raster.channels(),
        });
    }
    weights.validate()?;

    let channels = raster.channels() as usize;
    let stride = raster.stride();
    let src = raster.data();
    let mut out = raster.to_mut();

    let convert_row = |(dst_row, src_row): (&mut [u8], &[u8])| {
        for (dst, s) in dst_row
            .chunks_exact_mut(channels)
            .zip(src_row.chunks_exact(channels))
        {
            Rgb::gray(weights.luma(Rgb::from_slice(s))).write_to(dst);
        }
    };

    #[cfg(feature = "parallel")]
    out.data_mut()
        .par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(convert_row);

    #[cfg(not(feature = "parallel"))]
    out.data_mut()
        .chunks_mut(stride)
        .zip(src.chunks(stride))
        .for_each(convert_row);

    debug!(
        width = raster.width(),
        height = raster.height(),
        channels = raster.channels(),
        "grayscale conversion"
    );
    Ok(out.into())
}

/// Check whether every pixel has R = G = B.
///
/// Rasters with fewer than 3 channels are gray by construction.
pub fn is_grayscale(raster: &Raster) -> bool {
    if !raster.is_rgb() {
        return true;
    }
    raster
        .data()
        .chunks_exact(raster.channels() as usize)
        .all(|p| Rgb::from_slice(p).is_gray())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_luma_primaries() {
        assert_eq!(rgb_to_luma(255, 0, 0), 51);
        assert_eq!(rgb_to_luma(0, 255, 0), 181);
        assert_eq!(rgb_to_luma(0, 0, 255), 18);
        assert_eq!(rgb_to_luma(10, 20, 30), 18);
        assert_eq!(rgb_to_luma(123, 45, 67), 61);
    }

    #[test]
    fn test_rgb_to_luma_rounds_halves_up() {
        // 0.71 * 33 + 0.07 * 1 = 23.5
        assert_eq!(rgb_to_luma(0, 33, 1), 24);
        // 0.71 * 50 = 35.5
        assert_eq!(rgb_to_luma(0, 50, 0), 36);
        // 0.2 * 5 + 0.71 * 50 = 36.5
        assert_eq!(rgb_to_luma(5, 50, 0), 37);
    }

    #[test]
    fn test_luma_saturates() {
        let w = LumaWeights::new(1.0, 1.0, 1.0);
        assert_eq!(w.luma(Rgb::new(200, 200, 200)), 255);
    }

    #[test]
    fn test_weights_validate() {
        assert!(LumaWeights::default().validate().is_ok());
        assert!(LumaWeights::new(-0.1, 0.5, 0.5).validate().is_err());
        assert!(LumaWeights::new(f32::NAN, 0.5, 0.5).validate().is_err());
    }

    #[test]
    fn test_grayscale_writes_luma_and_keeps_alpha() {
        let data = vec![
            255, 0, 0, 10, //
            0, 255, 0, 20, //
            0, 0, 255, 30, //
            10, 20, 30, 40,
        ];
        let raster = Raster::from_data(2, 2, 4, data).unwrap();
        let gray = grayscale(&raster).unwrap();

        assert!(gray.sizes_equal(&raster));
        assert_eq!(
            gray.data(),
            &[
                51, 51, 51, 10, //
                181, 181, 181, 20, //
                18, 18, 18, 30, //
                18, 18, 18, 40,
            ]
        );
        // Input untouched
        assert_eq!(raster.get_rgb(0, 0), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_grayscale_rejects_fewer_than_three_channels() {
        for channels in [1, 2] {
            let raster = Raster::new(3, 3, channels).unwrap();
            match grayscale(&raster) {
                Err(ColorError::UnsupportedFormat { channels: c }) => assert_eq!(c, channels),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_grayscale_custom_weights() {
        let raster = Raster::filled(2, 2, 3, Rgb::new(100, 50, 25)).unwrap();
        let gray = grayscale_with_weights(&raster, LumaWeights::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(gray.get_rgb(1, 1), Some(Rgb::gray(100)));
    }

    #[test]
    fn test_is_grayscale() {
        let raster = Raster::filled(2, 2, 3, Rgb::new(1, 2, 3)).unwrap();
        assert!(!is_grayscale(&raster));
        assert!(is_grayscale(&grayscale(&raster).unwrap()));
        assert!(is_grayscale(&Raster::new(2, 2, 1).unwrap()));
    }
}
