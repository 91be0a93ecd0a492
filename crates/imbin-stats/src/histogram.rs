//! Fixed-resolution histogram with merge and peak detection
//!
//! A [`Histogram`] partitions a value range `[min, max]` into `resolution`
//! equal-width bins and counts samples per bin. Bins are half-open
//! `[lo, hi)` except the last, which is closed at `max` so the upper bound
//! itself stays countable.
//!
//! Derived queries (tallest bin, local-maximum peaks) read the same count
//! array, and two histograms can be combined either exactly (identical bin
//! layout) or by reprojecting bin centers onto the union range.

use crate::error::{HistogramError, HistogramResult};
use serde::{Deserialize, Serialize};

/// Tolerance for treating two bin widths as identical during merge
const BIN_WIDTH_EPSILON: f64 = 1e-9;

/// Default peak prominence threshold, as a fraction of the tallest bin
pub const DEFAULT_MIN_PROMINENCE: f64 = 0.1;

/// Fixed-resolution histogram over a closed value range
///
/// Mutation (`add_sample`, `merge`, `clear`) is not internally
/// synchronized; confine an instance to one owner or lock externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// Lower bound of the value range
    min: f64,
    /// Upper bound of the value range
    max: f64,
    /// Number of bins
    resolution: usize,
    /// Width of each bin, `(max - min) / resolution`
    bin_width: f64,
    /// Per-bin sample counts, index 0 = lowest values
    bins: Vec<u64>,
    /// Running total of binned samples
    total_count: u64,
}

/// A detected peak: a bin strictly taller than both neighbors that also
/// clears the prominence thresholds of [`Histogram::find_peaks`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Bin index of the peak
    pub index: usize,
    /// Sample count in the peak bin
    pub count: u64,
    /// Value range covered by the peak bin
    pub range: (f64, f64),
}

impl Histogram {
    /// Create an empty histogram over `[min, max]` with `resolution` bins
    ///
    /// Bounds must be finite with `min < max`, and `resolution` must be
    /// at least 1.
    pub fn new(min: f64, max: f64, resolution: usize) -> HistogramResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(HistogramError::InvalidBounds { min, max });
        }
        if resolution == 0 {
            return Err(HistogramError::ZeroResolution);
        }

        Ok(Self {
            min,
            max,
            resolution,
            bin_width: (max - min) / resolution as f64,
            bins: vec![0; resolution],
            total_count: 0,
        })
    }

    /// Add a single sample
    ///
    /// Non-finite values and values outside `[min, max]` are dropped
    /// silently; this is expected behavior for anomalous samples, not an
    /// error condition.
    pub fn add_sample(&mut self, value: f64) {
        if let Some(index) = self.bin_index(value) {
            self.bins[index] += 1;
            self.total_count += 1;
        }
    }

    /// Add a batch of samples
    pub fn add_samples(&mut self, values: &[f64]) {
        for &value in values {
            self.add_sample(value);
        }
    }

    /// Map a value to its bin index
    ///
    /// Returns `None` for non-finite values and values outside
    /// `[min, max]`. `max` itself maps to the last bin; interior values
    /// use `floor((value - min) / bin_width)`, clamped into range to
    /// absorb floating-point edge error.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.min || value > self.max {
            return None;
        }

        if value == self.max {
            return Some(self.resolution - 1);
        }

        let index = ((value - self.min) / self.bin_width) as usize;
        Some(index.min(self.resolution - 1))
    }

    /// Get the sample count of one bin
    pub fn bin_count(&self, index: usize) -> HistogramResult<u64> {
        if index >= self.resolution {
            return Err(HistogramError::BinIndexOutOfRange {
                index,
                resolution: self.resolution,
            });
        }
        Ok(self.bins[index])
    }

    /// Get the value range `(lo, hi)` covered by one bin
    ///
    /// The last bin reports `hi == max`; every other bin reports
    /// `hi == lo + bin_width`.
    pub fn bin_range(&self, index: usize) -> HistogramResult<(f64, f64)> {
        if index >= self.resolution {
            return Err(HistogramError::BinIndexOutOfRange {
                index,
                resolution: self.resolution,
            });
        }
        Ok(self.bin_span(index))
    }

    /// Bin range without the bounds check, for indices already validated
    fn bin_span(&self, index: usize) -> (f64, f64) {
        let lo = self.min + index as f64 * self.bin_width;
        let hi = if index == self.resolution - 1 {
            self.max
        } else {
            lo + self.bin_width
        };
        (lo, hi)
    }

    /// Lower bound of the value range
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the value range
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of bins
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// All bin counts, in bin-index order
    pub fn bin_counts(&self) -> &[u64] {
        &self.bins
    }

    /// Total number of binned samples
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Check whether any samples have been binned
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Get `(count, index)` of the tallest bin
    ///
    /// Ties resolve to the lowest index.
    pub fn max_bin(&self) -> (u64, usize) {
        let mut max_count = 0;
        let mut max_index = 0;

        for (i, &count) in self.bins.iter().enumerate() {
            if count > max_count {
                max_count = count;
                max_index = i;
            }
        }

        (max_count, max_index)
    }

    /// Count of the tallest bin
    pub fn max_bin_count(&self) -> u64 {
        self.max_bin().0
    }

    /// Index of the tallest bin
    pub fn max_bin_index(&self) -> usize {
        self.max_bin().1
    }

    /// Detect local maxima in the bin counts
    ///
    /// A bin qualifies as a peak when, in order:
    ///
    /// 1. it is strictly taller than both immediate neighbors;
    /// 2. its count reaches `min_prominence` of the tallest bin;
    /// 3. it clears the average of its two neighbors by 10%;
    /// 4. it clears the global per-bin average by 50%.
    ///
    /// Boundary bins are never candidates, and fewer than 3 bins yield no
    /// peaks. Indices come back in ascending bin order - that is scan
    /// order, not significance; re-sort by count if significance matters.
    /// [`DEFAULT_MIN_PROMINENCE`] is the conventional threshold.
    pub fn find_peaks(&self, min_prominence: f64) -> Vec<usize> {
        let mut peaks = Vec::new();

        if self.resolution < 3 {
            return peaks;
        }

        let prominence_threshold = (self.max_bin_count() as f64 * min_prominence) as u64;
        let average_count = self.total_count as f64 / self.resolution as f64;

        for i in 1..self.resolution - 1 {
            let count = self.bins[i];
            if count <= self.bins[i - 1] || count <= self.bins[i + 1] {
                continue;
            }
            if count < prominence_threshold {
                continue;
            }
            let neighbor_average = (self.bins[i - 1] + self.bins[i + 1]) as f64 / 2.0;
            if count as f64 > neighbor_average * 1.1 && count as f64 > average_count * 1.5 {
                peaks.push(i);
            }
        }

        peaks
    }

    /// Detect peaks and report each with its count and value range
    ///
    /// Same ascending-index order as [`find_peaks`](Self::find_peaks).
    pub fn peaks_info(&self, min_prominence: f64) -> Vec<Peak> {
        self.find_peaks(min_prominence)
            .into_iter()
            .map(|index| Peak {
                index,
                count: self.bins[index],
                range: self.bin_span(index),
            })
            .collect()
    }

    /// Fold another histogram into this one
    ///
    /// When both histograms share the same bounds and bin width (within a
    /// small tolerance) counts add element-wise with no precision loss.
    /// Otherwise the bounds grow to the union of both ranges, this
    /// histogram's resolution is kept, and every nonzero source bin from
    /// both histograms is reprojected as a point mass at its bin center.
    /// That quantization is lossy: samples spread across a source bin all
    /// land wherever its center lands. A center outside the new range
    /// (which the union construction should preclude) still counts toward
    /// `total_count` without landing in any bin.
    pub fn merge(&mut self, other: &Histogram) {
        let new_min = self.min.min(other.min);
        let new_max = self.max.max(other.max);

        // Identical layout: bins line up one-to-one.
        if new_min == self.min
            && new_max == self.max
            && self.resolution == other.resolution
            && (self.bin_width - other.bin_width).abs() < BIN_WIDTH_EPSILON
        {
            for (bin, &other_count) in self.bins.iter_mut().zip(&other.bins) {
                *bin += other_count;
            }
            self.total_count += other.total_count;
            return;
        }

        let resolution = self.resolution;
        let new_bin_width = (new_max - new_min) / resolution as f64;
        let mut new_bins = vec![0u64; resolution];
        let mut new_total = 0u64;

        for source in [&*self, other] {
            for i in 0..source.resolution {
                let count = source.bins[i];
                if count == 0 {
                    continue;
                }

                let (lo, hi) = source.bin_span(i);
                let center = (lo + hi) / 2.0;

                let index = ((center - new_min) / new_bin_width) as isize;
                if index >= 0 && (index as usize) < resolution {
                    new_bins[index as usize] += count;
                }
                // Out-of-range centers still count toward the total.
                new_total += count;
            }
        }

        self.min = new_min;
        self.max = new_max;
        self.bin_width = new_bin_width;
        self.bins = new_bins;
        self.total_count = new_total;
    }

    /// Zero every bin and the running total; bounds and resolution stay
    pub fn clear(&mut self) {
        self.bins.fill(0);
        self.total_count = 0;
    }
}
