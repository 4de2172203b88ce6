//! Raster - The main image container
//!
//! A `Raster` is a rectangular grid of 8-bit pixels with a fixed number of
//! interleaved channels.
//!
//! # Pixel layout
//!
//! - Rows are stored top to bottom, pixels left to right
//! - Rows are tightly packed (no padding)
//! - Channel `c` of pixel `(x, y)` lives at byte `C * (y * W + x) + c`
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for anything unrecognized.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" | "jfif" => Self::Jpeg,
            _ => Self::Unknown,
        }
    }
}

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Interleaved channels per pixel (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA)
    channels: u32,
    /// Input file format
    informat: ImageFormat,
    /// Pixel bytes, `width * height * channels` long
    data: Vec<u8>,
}

impl RasterData {
    fn validate(width: u32, height: u32, channels: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if !(1..=4).contains(&channels) {
            return Err(Error::InvalidChannels(channels));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            informat: self.informat,
            data: self.data.clone(),
        }
    }
}

/// Raster - Main image container
///
/// `Raster` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use npr_core::Raster;
///
/// // Create a new RGB raster
/// let raster = Raster::new(640, 480, 3).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// assert_eq!(raster.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions and channel count.
    ///
    /// The pixel data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::InvalidChannels`] if `channels` is not in `1..=4`.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = RasterData::validate(width, height, channels)?;
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                informat: ImageFormat::Unknown,
                data: vec![0u8; len],
            }),
        })
    }

    /// Wrap an existing interleaved pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len() != width * height * channels`,
    /// plus the errors of [`Raster::new`].
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = RasterData::validate(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Create a raster filled with a single RGB color.
    ///
    /// For 4-channel rasters alpha is set to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] unless `channels` is 3 or 4.
    pub fn filled(width: u32, height: u32, channels: u32, color: crate::Rgb) -> Result<Self> {
        if channels < 3 {
            return Err(Error::InvalidChannels(channels));
        }
        let mut raster = Self::new(width, height, channels)?.to_mut();
        for pixel in raster.data_mut().chunks_exact_mut(channels as usize) {
            color.write_to(pixel);
            if channels == 4 {
                pixel[crate::color::ALPHA] = 255;
            }
        }
        Ok(raster.into())
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Check whether the raster carries at least R, G and B.
    #[inline]
    pub fn is_rgb(&self) -> bool {
        self.inner.channels >= 3
    }

    /// Check whether the last channel is alpha (2 or 4 channels).
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.channels == 2 || self.inner.channels == 4
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get the number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Get the number of bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels as usize
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// Does not check bounds.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        self.inner.channels as usize * (y as usize * self.inner.width as usize + x as usize)
    }

    /// Get raw access to the pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two rasters have the same width, height and channel count.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Create a zeroed raster with the same shape and input format.
    pub fn create_template(&self) -> Self {
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                informat: self.inner.informat,
                data: vec![0u8; self.inner.data.len()],
            }),
        }
    }

    /// Create a deep copy of this raster.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Return this raster tagged with an input format.
    ///
    /// Reuses the buffer when this is the only reference, otherwise copies.
    pub fn with_informat(self, format: ImageFormat) -> Self {
        let mut raster = self.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
        raster.set_informat(format);
        raster.into()
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always copies the pixel data.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: self.inner.duplicate(),
        }
    }

    /// Write raster metadata to a writer (for debugging).
    pub fn print_info(&self, writer: &mut impl std::io::Write, label: Option<&str>) -> Result<()> {
        if let Some(text) = label {
            writeln!(writer, "  Raster Info for {text}:")?;
        }
        writeln!(
            writer,
            "    width = {}, height = {}, channels = {}",
            self.inner.width, self.inner.height, self.inner.channels
        )?;
        writeln!(
            writer,
            "    input format: {}",
            self.inner.informat.extension()
        )?;
        Ok(())
    }
}

/// Mutable raster
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get the number of bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels as usize
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// Does not check bounds.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        self.inner.channels as usize * (y as usize * self.inner.width as usize + x as usize)
    }

    /// Get raw access to the pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the pixel bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every byte of the raster to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
