//! npr I/O - Raster load/save boundary
//!
//! Decodes image files into [`Raster`]s and encodes rasters back to disk.
//! Format support is selected by cargo features:
//!
//! - `png-format` (default): PNG read/write
//! - `jpeg` (default): JPEG read/write
//!
//! # Example
//!
//! ```no_run
//! use npr_io::{read_raster, write_raster, ImageFormat};
//!
//! let raster = read_raster("giraffe.jpg").unwrap();
//! write_raster(&raster, "giraffe.png", ImageFormat::Png).unwrap();
//! ```

pub mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use npr_core::ImageFormat;

use npr_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use tracing::debug;

/// Read a raster from a file, detecting the format from its header.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    let raster = read_with_format(reader, format)?;
    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        channels = raster.channels(),
        "read raster"
    );
    Ok(raster)
}

/// Read a raster from an in-memory encoded image.
pub fn read_raster_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    read_with_format(Cursor::new(data), format)
}

/// Write a raster to a file in the given format.
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_with_format(raster, &mut writer, format)?;
    writer.flush()?;
    debug!(path = %path.display(), format = format.extension(), "wrote raster");
    Ok(())
}

/// Encode a raster into memory in the given format.
pub fn write_raster_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_with_format(raster, &mut buffer, format)?;
    Ok(buffer)
}

fn read_with_format<R>(reader: R, format: ImageFormat) -> IoResult<Raster>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        other => {
            drop(reader);
            Err(IoError::UnsupportedFormat(format!(
                "reading {:?} is not enabled",
                other
            )))
        }
    }
}

fn write_with_format<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(raster, writer),
        other => {
            drop(writer);
            Err(IoError::UnsupportedFormat(format!(
                "writing {:?} is not enabled",
                other
            )))
        }
    }
}
