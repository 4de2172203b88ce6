//! JPEG image format support
//!
//! Reads with `jpeg-decoder` (8-bit grayscale and 24-bit RGB) and writes with
//! `jpeg-encoder`. JPEG has no alpha, so 4-channel rasters lose it on write
//! and 2-channel (gray + alpha) rasters are rejected.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use npr_core::{ImageFormat, Raster};
use std::io::{Read, Write};

/// Default JPEG quality used by [`write_jpeg`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Returns
/// A 1-channel raster for grayscale files, 3-channel for RGB.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let channels = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::RGB24 => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let raster = Raster::from_data(
        u32::from(info.width),
        u32::from(info.height),
        channels,
        pixels,
    )?;
    Ok(raster.with_informat(ImageFormat::Jpeg))
}

/// Write a JPEG image at [`DEFAULT_QUALITY`].
pub fn write_jpeg<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(raster, writer, DEFAULT_QUALITY)
}

/// Write a JPEG image with an explicit quality (1–100).
pub fn write_jpeg_with_quality<W: Write>(raster: &Raster, writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }

    let color_type = match raster.channels() {
        1 => ColorType::Luma,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} channels as JPEG",
                n
            )));
        }
    };

    let width = u16::try_from(raster.width())
        .map_err(|_| IoError::EncodeError(format!("width {} too large", raster.width())))?;
    let height = u16::try_from(raster.height())
        .map_err(|_| IoError::EncodeError(format!("height {} too large", raster.height())))?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(raster.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    Ok(())
}
