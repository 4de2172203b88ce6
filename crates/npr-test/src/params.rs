//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use npr_core::{ImageFormat, Raster};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run checks only (default)
    #[default]
    Compare,
    /// Run checks and write rasters for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "grayscale")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters, configured from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality of shape and bytes
    pub fn compare_raster(&mut self, r1: &Raster, r2: &Raster) -> bool {
        self.index += 1;

        if !r1.sizes_equal(r2) {
            self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - shape mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                r1.width(),
                r1.height(),
                r1.channels(),
                r2.width(),
                r2.height(),
                r2.channels()
            ));
            return false;
        }

        let stride = r1.channels() as usize;
        let mismatch = r1
            .data()
            .chunks_exact(stride)
            .zip(r2.data().chunks_exact(stride))
            .position(|(a, b)| a != b);

        if let Some(i) = mismatch {
            let x = i as u32 % r1.width();
            let y = i as u32 / r1.width();
            self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Compare two label slices for exact equality
    pub fn compare_labels(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.fail(format!(
                "Failure in {}_reg: label comparison for index {} - lengths {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
            return false;
        }

        if let Some(i) = expected.iter().zip(actual).position(|(e, a)| e != a) {
            self.fail(format!(
                "Failure in {}_reg: label comparison for index {} - entry {}: expected {}, got {}",
                self.test_name, self.index, i, expected[i], actual[i]
            ));
            return false;
        }

        true
    }

    /// Write a raster to `tests/regout` when in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `<test>.<index>.<ext>`.
    pub fn write_raster(&mut self, raster: &Raster, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );
        npr_io::write_raster(raster, &path, format).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npr_core::Rgb;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_raster() {
        let mut rp = RegParams::new("test");
        let a = Raster::filled(3, 2, 3, Rgb::gray(9)).unwrap();
        let mut b = a.to_mut();
        assert!(rp.compare_raster(&a, &a.deep_clone()));

        b.set_rgb_unchecked(2, 1, Rgb::gray(10));
        assert!(!rp.compare_raster(&a, &b.into()));
        assert!(rp.failures()[0].contains("(2, 1)"));

        let c = Raster::new(3, 2, 4).unwrap();
        assert!(!rp.compare_raster(&a, &c));
    }

    #[test]
    fn test_compare_labels() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_labels(&[0, 1, 2], &[0, 1, 2]));
        assert!(!rp.compare_labels(&[0, 1, 2], &[0, 1, 1]));
        assert!(!rp.compare_labels(&[0, 1], &[0, 1, 2]));
        assert!(!rp.cleanup());
    }
}
