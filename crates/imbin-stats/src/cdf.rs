//! Cumulative distribution function derived from a histogram
//!
//! A [`Cdf`] is a snapshot: it copies the bounds and per-bin cumulative
//! probability mass out of a [`Histogram`] at computation time and holds
//! no reference back. If the source histogram keeps accumulating, the
//! snapshot goes stale by design; recompute when fresher numbers matter.
//! Once computed it is immutable and safe to share for concurrent reads.
//!
//! # Two query semantics
//!
//! [`Cdf::cumulative_probability`] is a per-bin step function, while
//! [`Cdf::percentile`] inverts the CDF with linear interpolation inside
//! the bin. The asymmetry is intentional; the two are distinct contracts,
//! not one lookup with two names.

use crate::error::{CdfError, CdfResult};
use crate::histogram::Histogram;
use serde::{Deserialize, Serialize};

/// Cumulative distribution snapshot of a histogram
///
/// Starts uncomputed; [`Cdf::compute_from_histogram`] makes it valid and
/// [`Cdf::clear`] returns it to the uncomputed state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cdf {
    /// Cumulative probability per bin; non-decreasing, last element 1.0
    values: Vec<f64>,
    /// Lower bound copied from the source histogram
    min: f64,
    /// Upper bound copied from the source histogram
    max: f64,
    /// Bin width copied from the source histogram
    bin_width: f64,
    /// Bin count copied from the source histogram
    resolution: usize,
}

impl Cdf {
    /// Create an uncomputed CDF
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a computed CDF straight from a histogram
    pub fn from_histogram(hist: &Histogram) -> CdfResult<Self> {
        let mut cdf = Self::default();
        cdf.compute_from_histogram(hist)?;
        Ok(cdf)
    }

    /// Compute cumulative probabilities from a histogram's bins
    ///
    /// Copies the histogram's layout by value, accumulates per-bin
    /// probability mass, and forces the final element to exactly `1.0`
    /// to cancel floating-point drift. Fails with
    /// [`CdfError::EmptyHistogram`] when the histogram has no samples.
    pub fn compute_from_histogram(&mut self, hist: &Histogram) -> CdfResult<()> {
        let total = hist.total_count();
        if total == 0 {
            return Err(CdfError::EmptyHistogram);
        }

        self.resolution = hist.resolution();
        self.min = hist.min();
        self.max = hist.max();
        self.bin_width = hist.bin_width();

        self.values.clear();
        self.values.reserve(self.resolution);
        let mut cumulative = 0.0;
        for &count in hist.bin_counts() {
            cumulative += count as f64 / total as f64;
            self.values.push(cumulative);
        }

        // Pin the top end to exactly 1.0.
        self.values[self.resolution - 1] = 1.0;

        Ok(())
    }

    /// Fraction of samples at or below `value`, as a step function
    ///
    /// Returns `0.0` below `min` and `1.0` at or above `max`; in between
    /// it reports the cumulative value of the containing bin with no
    /// interpolation. An uncomputed CDF (and a NaN query) reports `0.0`.
    pub fn cumulative_probability(&self, value: f64) -> f64 {
        if self.values.is_empty() || value.is_nan() || value < self.min {
            return 0.0;
        }
        if value >= self.max {
            return 1.0;
        }

        let index = (((value - self.min) / self.bin_width) as usize).min(self.resolution - 1);
        self.values[index]
    }

    /// Invert the CDF: the value below which `percentile`% of samples fall
    ///
    /// Scans for the first bin whose cumulative probability reaches the
    /// target, then interpolates linearly inside that bin. A flat run
    /// (the target bin adds no probability mass, reachable at
    /// `percentile == 0` with an empty first bin) resolves to the bin's
    /// lower edge rather than dividing zero by zero.
    pub fn percentile(&self, percentile: f64) -> CdfResult<f64> {
        if !(0.0..=100.0).contains(&percentile) {
            return Err(CdfError::PercentileOutOfRange(percentile));
        }
        if self.values.is_empty() {
            return Err(CdfError::NotComputed);
        }

        let target = percentile / 100.0;

        for (i, &cumulative) in self.values.iter().enumerate() {
            if cumulative >= target {
                let bin_min = self.min + i as f64 * self.bin_width;
                let prev = if i > 0 { self.values[i - 1] } else { 0.0 };
                if cumulative <= prev {
                    // Flat run: no mass in this bin.
                    return Ok(bin_min);
                }
                let fraction = (target - prev) / (cumulative - prev);
                return Ok(bin_min + fraction * self.bin_width);
            }
        }

        // Unreachable with the final value pinned to 1.0.
        Ok(self.max)
    }

    /// Bin index holding a percentile, without interpolation
    ///
    /// Returns `None` for a percentile outside `[0, 100]` or an
    /// uncomputed CDF. A scan that somehow exhausts all bins reports the
    /// last bin.
    pub fn bin_index_for_percentile(&self, percentile: f64) -> Option<usize> {
        if !(0.0..=100.0).contains(&percentile) || self.values.is_empty() {
            return None;
        }

        let target = percentile / 100.0;
        for (i, &cumulative) in self.values.iter().enumerate() {
            if cumulative >= target {
                return Some(i);
            }
        }

        Some(self.resolution - 1)
    }

    /// Value range of the bin holding a percentile
    ///
    /// Reports `(0.0, 0.0)` when the percentile is invalid or the CDF is
    /// uncomputed.
    pub fn bin_range_for_percentile(&self, percentile: f64) -> (f64, f64) {
        match self.bin_index_for_percentile(percentile) {
            Some(index) => {
                let bin_min = self.min + index as f64 * self.bin_width;
                let bin_max = if index == self.resolution - 1 {
                    self.max
                } else {
                    bin_min + self.bin_width
                };
                (bin_min, bin_max)
            }
            None => (0.0, 0.0),
        }
    }

    /// Reset to the uncomputed state
    pub fn clear(&mut self) {
        self.values.clear();
        self.min = 0.0;
        self.max = 0.0;
        self.bin_width = 0.0;
        self.resolution = 0;
    }

    /// Cumulative probability per bin (empty until computed)
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lower bound of the snapshot
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the snapshot
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Bin width of the snapshot
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Bin count of the snapshot
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Check whether the CDF has been computed
    pub fn is_computed(&self) -> bool {
        !self.values.is_empty()
    }
}
