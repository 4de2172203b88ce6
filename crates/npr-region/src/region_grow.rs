//! Region growing segmentation
//!
//! A single greedy pass over the raster in row-major order. Every pixel is
//! compared with its already-visited up and left neighbors; if the closer
//! of the two lies within `threshold` (L1 color distance) the pixel joins
//! that neighbor's region and takes on its color, otherwise it starts a new
//! region and keeps its own color.
//!
//! Neighbor colors are read from the output being built, not from the
//! input, so a region's color propagates transitively from its first
//! pixel. There is no backward merging: two regions that meet later in the
//! scan stay separate. The result is an approximate grouping, not true
//! connected components.
//!
//! Each pixel depends on the row above and the pixel to its left, so the
//! pass is strictly sequential.

use crate::{LabelMatrix, RegionError, RegionResult};
use npr_core::{Raster, Rgb};
use tracing::debug;

/// Default maximum L1 distance for joining a neighbor's region.
pub const DEFAULT_THRESHOLD: u32 = 200;

/// How color components are interpreted before differencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorArithmetic {
    /// Components are 0..=255.
    #[default]
    Unsigned,
    /// Components are reinterpreted as signed bytes (-128..=127), so values
    /// above 127 wrap around. Reproduces the signed-char wrap-around in
    /// distances; the tie-break between neighbors is unchanged.
    SignedByte,
}

impl ColorArithmetic {
    #[inline]
    fn component(self, v: u8) -> i32 {
        match self {
            Self::Unsigned => i32::from(v),
            Self::SignedByte => i32::from(v as i8),
        }
    }

    /// L1 distance between two colors under this interpretation.
    #[inline]
    pub fn distance(self, a: Rgb, b: Rgb) -> u32 {
        let d = |x: u8, y: u8| (self.component(x) - self.component(y)).unsigned_abs();
        d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
    }
}

/// Options for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGrowOptions {
    /// Maximum L1 distance (inclusive) to join a neighbor's region.
    ///
    /// 0 only merges identical colors; 765 merges everything under
    /// unsigned arithmetic.
    pub threshold: u32,

    /// Component interpretation used for distances.
    pub arithmetic: ColorArithmetic,
}

impl Default for RegionGrowOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            arithmetic: ColorArithmetic::Unsigned,
        }
    }
}

impl RegionGrowOptions {
    /// Set the merge threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the component interpretation.
    pub fn with_arithmetic(mut self, arithmetic: ColorArithmetic) -> Self {
        self.arithmetic = arithmetic;
        self
    }
}

/// Result of a region growing pass
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Region ID of every pixel
    pub labels: LabelMatrix,
    /// Input recolored with each region's propagated color
    pub raster: Raster,
}

impl Segmentation {
    /// Number of regions found.
    pub fn region_count(&self) -> u32 {
        self.labels.region_count()
    }
}

/// A causal neighbor candidate for the current pixel.
#[derive(Debug, Clone, Copy)]
struct Neighbor {
    distance: u32,
    color: Rgb,
    label: u32,
}

/// Segment a raster by region growing.
///
/// # Arguments
///
/// * `raster` - RGB or RGBA input; left unchanged
/// * `options` - Threshold and arithmetic
///
/// # Returns
///
/// The label matrix and a recolored copy of the input. Channels past the
/// third (alpha) are copied from the input.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedFormat`] for rasters with fewer than
/// 3 channels.
pub fn region_grow(raster: &Raster, options: &RegionGrowOptions) -> RegionResult<Segmentation> {
    if !raster.is_rgb() {
        return Err(RegionError::UnsupportedFormat {
            channels: raster.channels(),
        });
    }

    let w = raster.width();
    let h = raster.height();
    let arithmetic = options.arithmetic;

    let mut labels = LabelMatrix::new(w, h)?;
    let mut out = raster.to_mut();

    for y in 0..h {
        for x in 0..w {
            let color = raster.get_rgb_unchecked(x, y);
            let neighbor_at = |nx: u32, ny: u32| {
                let c = out.get_rgb_unchecked(nx, ny);
                Neighbor {
                    distance: arithmetic.distance(color, c),
                    color: c,
                    label: labels.get_unchecked(nx, ny),
                }
            };

            let up = (y > 0).then(|| neighbor_at(x, y - 1));
            let left = (x > 0).then(|| neighbor_at(x - 1, y));

            // Closer neighbor wins, up on ties
            let nearest = match (up, left) {
                (Some(u), Some(l)) => Some(if u.distance <= l.distance { u } else { l }),
                (Some(n), None) | (None, Some(n)) => Some(n),
                (None, None) => None,
            };

            match nearest.filter(|n| n.distance <= options.threshold) {
                Some(n) => {
                    labels.set_unchecked(x, y, n.label);
                    out.set_rgb_unchecked(x, y, n.color);
                }
                None => {
                    let label = labels.next_label();
                    labels.set_unchecked(x, y, label);
                }
            }
        }
    }

    debug!(
        width = w,
        height = h,
        threshold = options.threshold,
        arithmetic = ?arithmetic,
        regions = labels.region_count(),
        "region growing"
    );

    Ok(Segmentation {
        labels,
        raster: out.into(),
    })
}

/// Region growing with unsigned arithmetic and the given threshold.
pub fn region_grow_simple(raster: &Raster, threshold: u32) -> RegionResult<Segmentation> {
    region_grow(raster, &RegionGrowOptions::default().with_threshold(threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_from_colors(width: u32, height: u32, colors: &[(u8, u8, u8)]) -> Raster {
        let data = colors.iter().flat_map(|&(r, g, b)| [r, g, b]).collect();
        Raster::from_data(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_distance_unsigned_and_signed() {
        let black = Rgb::gray(0);
        let white = Rgb::gray(255);
        assert_eq!(ColorArithmetic::Unsigned.distance(black, white), 765);
        // 255 reads as -1 when signed
        assert_eq!(ColorArithmetic::SignedByte.distance(black, white), 3);
        // 127 and 128 are adjacent unsigned but 255 apart signed
        assert_eq!(
            ColorArithmetic::SignedByte.distance(Rgb::new(127, 0, 0), Rgb::new(128, 0, 0)),
            255
        );
    }

    #[test]
    fn test_uniform_2x2_is_one_region() {
        let raster = Raster::filled(2, 2, 3, Rgb::gray(10)).unwrap();
        let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(seg.region_count(), 1);
        assert_eq!(seg.raster.data(), raster.data());
    }

    #[test]
    fn test_black_white_black_row() {
        let raster = raster_from_colors(3, 1, &[(0, 0, 0), (255, 255, 255), (0, 0, 0)]);
        let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 1, 2]);
        assert_eq!(seg.raster.data(), raster.data());
    }

    #[test]
    fn test_signed_byte_merges_wrapped_white() {
        let raster = raster_from_colors(3, 1, &[(0, 0, 0), (255, 255, 255), (0, 0, 0)]);
        let options = RegionGrowOptions::default().with_arithmetic(ColorArithmetic::SignedByte);
        let seg = region_grow(&raster, &options).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 0, 0]);
        assert_eq!(seg.raster.data(), &[0u8; 9][..]);
    }

    #[test]
    fn test_single_pixel() {
        let raster = raster_from_colors(1, 1, &[(12, 34, 56)]);
        let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0]);
        assert_eq!(seg.raster.get_rgb(0, 0), Some(Rgb::new(12, 34, 56)));
    }

    #[test]
    fn test_tie_goes_to_up_neighbor() {
        // Row 0: A B, row 1: C P. B and C start their own regions; P is
        // equally close to both.
        let raster = raster_from_colors(
            2,
            2,
            &[(0, 0, 0), (200, 0, 0), (200, 0, 100), (200, 0, 50)],
        );
        let seg = region_grow_simple(&raster, 100).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 1, 2, 1]);
        assert_eq!(seg.raster.get_rgb(1, 1), Some(Rgb::new(200, 0, 0)));
        assert_eq!(seg.region_count(), 3);
    }

    #[test]
    fn test_signed_byte_keeps_up_tie_break() {
        // Components below 128 read the same either way; the tie still
        // resolves to the up neighbor.
        let raster = raster_from_colors(
            2,
            2,
            &[(0, 0, 0), (100, 0, 0), (100, 0, 60), (100, 0, 30)],
        );
        let options = RegionGrowOptions::default()
            .with_threshold(60)
            .with_arithmetic(ColorArithmetic::SignedByte);
        let seg = region_grow(&raster, &options).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 1, 2, 1]);
        assert_eq!(seg.raster.get_rgb(1, 1), Some(Rgb::new(100, 0, 0)));
    }

    #[test]
    fn test_closer_left_neighbor_wins() {
        let raster = raster_from_colors(
            2,
            2,
            &[(0, 0, 0), (200, 0, 0), (200, 0, 100), (200, 0, 80)],
        );
        let seg = region_grow_simple(&raster, 100).unwrap();
        assert_eq!(seg.labels.as_slice(), &[0, 1, 2, 2]);
        assert_eq!(seg.raster.get_rgb(1, 1), Some(Rgb::new(200, 0, 100)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let raster = raster_from_colors(2, 1, &[(0, 0, 0), (100, 50, 50)]);
        assert_eq!(region_grow_simple(&raster, 200).unwrap().labels.as_slice(), &[0, 0]);
        assert_eq!(region_grow_simple(&raster, 199).unwrap().labels.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_labels_are_dense_and_first_seen_in_scan_order() {
        let colors: Vec<(u8, u8, u8)> = (0..12u8).map(|i| (i * 20, i * 20, i * 20)).collect();
        let raster = raster_from_colors(4, 3, &colors);
        let seg = region_grow_simple(&raster, 0).unwrap();

        assert!(seg.labels.is_complete());
        let mut max_seen = None;
        for &label in seg.labels.as_slice() {
            match max_seen {
                None => assert_eq!(label, 0),
                Some(m) => assert!(label <= m + 1),
            }
            max_seen = max_seen.max(Some(label));
        }
        assert_eq!(seg.region_count(), 12);
    }

    #[test]
    fn test_neighbors_read_from_recolored_output() {
        // A slow ramp: every step is within threshold of its left neighbor
        // but the ramp end is far from the start. Chaining against the
        // recolored output stops merging once the drift exceeds threshold.
        let colors: Vec<(u8, u8, u8)> = (0..6).map(|i| (i * 10, 0, 0)).collect();
        let raster = raster_from_colors(6, 1, &colors);
        let seg = region_grow_simple(&raster, 25).unwrap();

        // Compared with (0,0,0): 10, 20 join; 30 starts region 1 and keeps
        // its color; 40, 50 join it.
        assert_eq!(seg.labels.as_slice(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(seg.raster.get_rgb(2, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(seg.raster.get_rgb(5, 0), Some(Rgb::new(30, 0, 0)));
    }

    #[test]
    fn test_alpha_is_copied() {
        let data = vec![10, 10, 10, 1, 10, 10, 10, 2];
        let raster = Raster::from_data(2, 1, 4, data.clone()).unwrap();
        let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
        assert_eq!(seg.raster.data(), &data[..]);
    }

    #[test]
    fn test_rejects_fewer_than_three_channels() {
        let raster = Raster::new(2, 2, 2).unwrap();
        assert!(matches!(
            region_grow(&raster, &RegionGrowOptions::default()),
            Err(RegionError::UnsupportedFormat { channels: 2 })
        ));
    }
}
