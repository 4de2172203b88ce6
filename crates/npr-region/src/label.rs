//! Per-pixel region labels
//!
//! A [`LabelMatrix`] holds one region ID per pixel in a single flat
//! allocation indexed by `y * width + x`.

use npr_core::{Error, Raster, Rgb};

use crate::RegionResult;

/// Flat grid of region IDs, one per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatrix {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    region_count: u32,
}

impl LabelMatrix {
    /// Marker for a pixel that has not been labeled yet.
    pub const UNASSIGNED: u32 = u32::MAX;

    /// Create a matrix with every entry [`UNASSIGNED`](Self::UNASSIGNED).
    ///
    /// # Errors
    ///
    /// Returns a core `InvalidDimension` error if width or height is 0.
    pub fn new(width: u32, height: u32) -> RegionResult<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            labels: vec![Self::UNASSIGNED; width as usize * height as usize],
            region_count: 0,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Label at `(x, y)`, or `None` outside the matrix.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[self.index(x, y)])
    }

    /// Label at `(x, y)` without the explicit bounds test.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the matrix.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u32 {
        self.labels[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn set_unchecked(&mut self, x: u32, y: u32, label: u32) {
        let idx = self.index(x, y);
        self.labels[idx] = label;
    }

    /// Allocate the next region ID.
    #[inline]
    pub(crate) fn next_label(&mut self) -> u32 {
        let label = self.region_count;
        self.region_count += 1;
        label
    }

    /// All labels in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.labels.chunks_exact(self.width as usize)
    }

    /// Number of regions created (labels are `0..region_count`).
    #[inline]
    pub fn region_count(&self) -> u32 {
        self.region_count
    }

    /// Check that no entry is still unassigned.
    pub fn is_complete(&self) -> bool {
        !self.labels.contains(&Self::UNASSIGNED)
    }

    /// Pixel count of each region, indexed by label.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.region_count as usize];
        for &label in &self.labels {
            if let Some(size) = sizes.get_mut(label as usize) {
                *size += 1;
            }
        }
        sizes
    }

    /// Render the labels as a false-color RGB raster.
    ///
    /// Each label maps to a fixed pseudo-random color; unassigned pixels
    /// are black.
    pub fn to_raster(&self) -> RegionResult<Raster> {
        let mut data = Vec::with_capacity(self.labels.len() * 3);
        for &label in &self.labels {
            let c = label_color(label);
            data.extend_from_slice(&[c.r, c.g, c.b]);
        }
        Ok(Raster::from_data(self.width, self.height, 3, data)?)
    }
}

fn label_color(label: u32) -> Rgb {
    if label == LabelMatrix::UNASSIGNED {
        return Rgb::gray(0);
    }
    // Multiplicative hash spreads consecutive labels across the color cube
    let h = (label.wrapping_add(1)).wrapping_mul(0x9E37_79B9);
    Rgb::new((h >> 24) as u8, (h >> 16) as u8, (h >> 8) as u8)
}
