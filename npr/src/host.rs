//! Raster load/save boundary
//!
//! The session never touches the filesystem directly; it goes through an
//! [`ImageHost`]. [`FsHost`] is the file-backed implementation.

use crate::{NprError, NprResult};
use npr_core::{ImageFormat, Raster};
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads and saves rasters on behalf of a session.
pub trait ImageHost {
    /// Load a raster from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NprError::LoadFailure`] if the raster cannot be read.
    fn load_raster(&mut self, path: &Path) -> NprResult<Raster>;

    /// Save `raster` under the base name `name` and return where it went.
    ///
    /// # Errors
    ///
    /// Returns [`NprError::SaveFailure`] if the raster cannot be written.
    fn save_raster(&mut self, raster: &Raster, name: &str) -> NprResult<PathBuf>;
}

/// File-backed host: reads any supported format, writes into
/// `output_dir` as `<name>.<ext>`.
#[derive(Debug, Clone)]
pub struct FsHost {
    pub output_dir: PathBuf,
    pub format: ImageFormat,
}

impl Default for FsHost {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: ImageFormat::Png,
        }
    }
}

impl FsHost {
    /// Create a host writing `format` files into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    /// Path a save under `name` would write to.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", name, self.format.extension()))
    }
}

impl ImageHost for FsHost {
    fn load_raster(&mut self, path: &Path) -> NprResult<Raster> {
        let raster = npr_io::read_raster(path).map_err(|source| NprError::LoadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            width = raster.width(),
            height = raster.height(),
            channels = raster.channels(),
            "loaded raster"
        );
        Ok(raster)
    }

    fn save_raster(&mut self, raster: &Raster, name: &str) -> NprResult<PathBuf> {
        let path = self.output_path(name);
        npr_io::write_raster(raster, &path, self.format).map_err(|source| {
            NprError::SaveFailure {
                path: path.clone(),
                source,
            }
        })?;
        info!(path = %path.display(), "saved raster");
        Ok(path)
    }
}
