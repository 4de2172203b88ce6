//! PNG image format support
//!
//! Palette, low bit depth and 16-bit images are normalized to 8 bits per
//! sample on read, so every decoded raster has 1–4 interleaved 8-bit
//! channels.

use crate::{IoError, IoResult};
use npr_core::{ImageFormat, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };

    let (color_type, bit_depth) = reader.output_color_type();
    let channels = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let stride = width as usize * channels as usize;
    let line_size = output_info.line_size;
    if line_size < stride {
        return Err(IoError::InvalidData(format!(
            "PNG line size {} shorter than {} bytes",
            line_size, stride
        )));
    }

    let mut data = Vec::with_capacity(stride * height as usize);
    for row in buf.chunks(line_size).take(height as usize) {
        data.extend_from_slice(&row[..stride]);
    }

    Ok(Raster::from_data(width, height, channels, data)?.with_informat(ImageFormat::Png))
}

/// Write a PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.channels() {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} channels as PNG",
                n
            )));
        }
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use npr_core::Rgb;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut raster = Raster::new(5, 5, 3).unwrap().to_mut();
        raster.set_rgb(0, 0, Rgb::new(255, 0, 0)).unwrap();
        raster.set_rgb(1, 1, Rgb::new(0, 255, 0)).unwrap();
        raster.set_rgb(2, 2, Rgb::new(0, 0, 255)).unwrap();
        let raster: Raster = raster.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();

        let raster2 = read_png(Cursor::new(buffer)).unwrap();
        assert!(raster2.sizes_equal(&raster));
        assert_eq!(raster2.data(), raster.data());
        assert_eq!(raster2.informat(), ImageFormat::Png);
    }

    #[test]
    fn test_png_roundtrip_rgba_keeps_alpha() {
        let data: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 7) as u8).collect();
        let raster = Raster::from_data(3, 2, 4, data).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster2.channels(), 4);
        assert_eq!(raster2.data(), raster.data());
    }

    #[test]
    fn test_png_roundtrip_grayscale() {
        let data: Vec<u8> = (0..10 * 10).map(|i| (i * 2) as u8).collect();
        let raster = Raster::from_data(10, 10, 1, data).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster2.channels(), 1);
        assert_eq!(raster2.data(), raster.data());
    }

    #[test]
    fn test_png_read_garbage() {
        let result = read_png(Cursor::new(vec![0u8; 16]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
