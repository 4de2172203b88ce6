//! Pixel access functions
//!
//! Getters and setters for individual pixels. The `_unchecked` variants
//! skip the explicit bounds test and rely on slice indexing, so they panic
//! rather than return an error on bad coordinates.

use super::{Raster, RasterMut};
use crate::color::Rgb;
use crate::error::{Error, Result};

impl Raster {
    /// Get the bytes of pixel `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data()[start..start + self.channels() as usize])
    }

    /// Get the RGB color at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds or the raster has
    /// fewer than 3 channels.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if !self.is_rgb() {
            return None;
        }
        self.get_pixel(x, y).map(Rgb::from_slice)
    }

    /// Get the RGB color at `(x, y)` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the offset falls outside the buffer.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_slice(&self.data()[self.offset(x, y)..])
    }
}

impl RasterMut {
    /// Get the RGB color at `(x, y)`.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if self.channels() < 3 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the RGB color at `(x, y)` without bounds checking.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_slice(&self.data()[self.offset(x, y)..])
    }

    /// Set the RGB color at `(x, y)`, leaving alpha untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::InvalidChannels`] for rasters with fewer than 3 channels.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if self.channels() < 3 {
            return Err(Error::InvalidChannels(self.channels()));
        }
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_rgb_unchecked(x, y, color);
        Ok(())
    }

    /// Set the RGB color at `(x, y)` without bounds checking.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        let start = self.offset(x, y);
        color.write_to(&mut self.data_mut()[start..]);
    }

    /// Get mutable access to the bytes of pixel `(x, y)`.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = self.offset(x, y);
        let channels = self.channels() as usize;
        Some(&mut self.data_mut()[start..start + channels])
    }
}
