//! npr Core - Basic data structures for the npr filters
//!
//! This crate provides the fundamental data structures shared by the
//! grayscale filter, the region-growing segmenter and the I/O layer:
//!
//! - [`Raster`] / [`RasterMut`] - Interleaved 8-bit pixel buffer (immutable / mutable)
//! - [`Rgb`] - A single color sample
//! - [`ImageFormat`] - Encoded file formats known to the I/O layer

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{ImageFormat, Raster, RasterMut};

/// Color channel indices and helpers for interleaved pixels.
///
/// # Pixel format
///
/// Pixels are stored as consecutive bytes `R, G, B[, A]` for 3/4-channel
/// rasters, `V[, A]` for 1/2-channel rasters.
pub mod color {
    /// Red channel offset
    pub const RED: usize = 0;
    /// Green channel offset
    pub const GREEN: usize = 1;
    /// Blue channel offset
    pub const BLUE: usize = 2;
    /// Alpha channel offset in a 4-channel raster
    pub const ALPHA: usize = 3;

    /// An 8-bit RGB color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rgb {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Rgb {
        /// Create a color from its components.
        #[inline]
        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }

        /// Create a neutral gray with all components set to `v`.
        #[inline]
        pub const fn gray(v: u8) -> Self {
            Self { r: v, g: v, b: v }
        }

        /// Check if all three components are equal.
        #[inline]
        pub fn is_gray(self) -> bool {
            self.r == self.g && self.g == self.b
        }

        /// Read a color from the first three bytes of a pixel.
        ///
        /// # Panics
        ///
        /// Panics if `pixel` has fewer than 3 bytes.
        #[inline]
        pub fn from_slice(pixel: &[u8]) -> Self {
            Self {
                r: pixel[RED],
                g: pixel[GREEN],
                b: pixel[BLUE],
            }
        }

        /// Write the color into the first three bytes of a pixel.
        ///
        /// Bytes past the third (alpha) are left untouched.
        #[inline]
        pub fn write_to(self, pixel: &mut [u8]) {
            pixel[RED] = self.r;
            pixel[GREEN] = self.g;
            pixel[BLUE] = self.b;
        }
    }

    impl From<(u8, u8, u8)> for Rgb {
        fn from((r, g, b): (u8, u8, u8)) -> Self {
            Self { r, g, b }
        }
    }

}

pub use color::Rgb;
