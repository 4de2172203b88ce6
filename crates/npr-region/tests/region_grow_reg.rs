//! Region growing regression test
//!
//! Tests region_grow and region_grow_simple on a block scene and on small
//! hand-checked rasters.

use npr_core::{ImageFormat, Raster, Rgb};
use npr_region::{
    ColorArithmetic, DEFAULT_THRESHOLD, LabelMatrix, RegionError, RegionGrowOptions, region_grow,
    region_grow_simple,
};
use npr_test::{RegParams, load_test_image_or_synthetic, synthetic_gradient, synthetic_scene};

fn raster_from_colors(width: u32, height: u32, colors: &[(u8, u8, u8)]) -> Raster {
    let data = colors.iter().flat_map(|&(r, g, b)| [r, g, b]).collect();
    Raster::from_data(width, height, 3, data).unwrap()
}

/// Labels start at 0 and each new one is exactly one above the largest
/// seen so far in scan order.
fn labels_are_monotonic(labels: &LabelMatrix) -> bool {
    let mut next = 0u32;
    for &label in labels.as_slice() {
        if label > next {
            return false;
        }
        if label == next {
            next += 1;
        }
    }
    next == labels.region_count()
}

#[test]
fn region_grow_reg() {
    let mut rp = RegParams::new("region_grow");

    let raster = load_test_image_or_synthetic("giraffe.png").unwrap();
    let seg = region_grow(&raster, &RegionGrowOptions::default()).unwrap();

    rp.compare_values(1.0, seg.labels.is_complete() as u8 as f64, 0.0);
    rp.compare_values(1.0, labels_are_monotonic(&seg.labels) as u8 as f64, 0.0);
    rp.compare_values(0.0, seg.labels.get(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(1.0, seg.raster.sizes_equal(&raster) as u8 as f64, 0.0);

    let total: usize = seg.labels.region_sizes().iter().sum();
    rp.compare_values(raster.pixel_count() as f64, total as f64, 0.0);

    // Deterministic
    let again = region_grow(&raster, &RegionGrowOptions::default()).unwrap();
    rp.compare_labels(seg.labels.as_slice(), again.labels.as_slice());
    rp.compare_raster(&seg.raster, &again.raster);

    rp.write_raster(&seg.raster, ImageFormat::Png).unwrap();
    rp.write_raster(&seg.labels.to_raster().unwrap(), ImageFormat::Png)
        .unwrap();

    assert!(rp.cleanup());
}

#[test]
fn region_grow_scene_reg() {
    let mut rp = RegParams::new("region_grow_scene");

    // Blocks are far apart in color, so a low threshold separates every
    // flat area and recoloring changes nothing.
    let raster = synthetic_scene(16, 12).unwrap();
    let seg = region_grow_simple(&raster, 30).unwrap();
    rp.compare_raster(&raster, &seg.raster);

    // A block only ever touches background, so all of its pixels share one
    // label.
    let block = seg.labels.get(0, 0).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            rp.compare_values(block as f64, seg.labels.get(x, y).unwrap() as f64, 0.0);
        }
    }
    rp.compare_values(1.0, labels_are_monotonic(&seg.labels) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn region_grow_threshold_reg() {
    let mut rp = RegParams::new("region_grow_threshold");

    let raster = synthetic_gradient(32, 32).unwrap();

    // Threshold 765 merges everything into region 0 with the first color
    let seg = region_grow_simple(&raster, 765).unwrap();
    rp.compare_values(1.0, seg.region_count() as f64, 0.0);
    let first = raster.get_rgb(0, 0).unwrap();
    rp.compare_raster(&seg.raster, &Raster::filled(32, 32, 3, first).unwrap());

    // Threshold 0 only merges identical colors; the gradient has some
    // repeated neighbors but far from all
    let seg = region_grow_simple(&raster, 0).unwrap();
    rp.compare_values(1.0, (seg.region_count() > 1) as u8 as f64, 0.0);
    rp.compare_raster(&raster, &seg.raster);

    assert!(rp.cleanup());
}

#[test]
fn region_grow_small_cases_reg() {
    let mut rp = RegParams::new("region_grow_small");

    // 2x2 uniform
    let raster = Raster::filled(2, 2, 3, Rgb::gray(10)).unwrap();
    let seg = region_grow_simple(&raster, DEFAULT_THRESHOLD).unwrap();
    rp.compare_labels(&[0, 0, 0, 0], seg.labels.as_slice());

    // 1x3 black/white/black
    let raster = raster_from_colors(3, 1, &[(0, 0, 0), (255, 255, 255), (0, 0, 0)]);
    let seg = region_grow_simple(&raster, DEFAULT_THRESHOLD).unwrap();
    rp.compare_labels(&[0, 1, 2], seg.labels.as_slice());
    rp.compare_raster(&raster, &seg.raster);

    // Same row with signed bytes: 255 reads as -1, so everything is close
    let options = RegionGrowOptions::default().with_arithmetic(ColorArithmetic::SignedByte);
    let seg = region_grow(&raster, &options).unwrap();
    rp.compare_labels(&[0, 0, 0], seg.labels.as_slice());

    // 1x1
    let raster = raster_from_colors(1, 1, &[(7, 8, 9)]);
    let seg = region_grow_simple(&raster, DEFAULT_THRESHOLD).unwrap();
    rp.compare_labels(&[0], seg.labels.as_slice());
    rp.compare_raster(&raster, &seg.raster);

    // Tie between up and left goes to up
    let raster = raster_from_colors(
        2,
        2,
        &[(0, 0, 0), (200, 0, 0), (200, 0, 100), (200, 0, 50)],
    );
    let seg = region_grow_simple(&raster, 100).unwrap();
    rp.compare_labels(&[0, 1, 2, 1], seg.labels.as_slice());

    assert!(rp.cleanup());
}

#[test]
fn region_grow_unsupported_reg() {
    for channels in [1, 2] {
        let raster = Raster::new(4, 4, channels).unwrap();
        match region_grow(&raster, &RegionGrowOptions::default()) {
            Err(RegionError::UnsupportedFormat { channels: c }) => assert_eq!(c, channels),
            other => panic!("expected UnsupportedFormat, got {:?}", other.map(|s| s.region_count())),
        }
    }
}
