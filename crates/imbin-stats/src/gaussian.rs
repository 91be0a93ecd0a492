//! Discrete Gaussian smoothing of count sequences
//!
//! [`GaussianFilter`] convolves a 1-D sequence with a normalized Gaussian
//! kernel. At the sequence edges, where part of the kernel hangs past the
//! input, each output value divides by the sum of the kernel weights that
//! actually landed in range. That truncate-and-renormalize policy keeps
//! edge values at the scale of their neighborhood instead of decaying
//! toward zero the way zero-padding would.

use crate::error::{FilterError, FilterResult};
use serde::{Deserialize, Serialize};

/// Gaussian smoothing filter with a fixed standard deviation
///
/// Stateless apart from `sigma`; every [`filter`](Self::filter) call is a
/// pure function of the sigma and the input sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GaussianFilter {
    /// Standard deviation of the kernel, always positive
    sigma: f64,
}

impl GaussianFilter {
    /// Create a filter with the given standard deviation
    pub fn new(sigma: f64) -> FilterResult<Self> {
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(FilterError::NonPositiveSigma(sigma));
        }
        Ok(Self { sigma })
    }

    /// Replace the standard deviation
    pub fn set_sigma(&mut self, sigma: f64) -> FilterResult<()> {
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(FilterError::NonPositiveSigma(sigma));
        }
        self.sigma = sigma;
        Ok(())
    }

    /// Current standard deviation
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Smooth a sequence
    ///
    /// The kernel spans 3 sigma to each side (size `2 * ceil(3 sigma) + 1`),
    /// covering about 99.7% of the Gaussian mass. Empty input yields empty
    /// output.
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        if input.is_empty() {
            return Vec::new();
        }

        let radius = (3.0 * self.sigma).ceil() as usize;
        let kernel = self.kernel_weights(radius);

        let mut output = Vec::with_capacity(input.len());
        for i in 0..input.len() {
            let mut sum = 0.0;
            let mut weight_sum = 0.0;

            for (k, &weight) in kernel.iter().enumerate() {
                let idx = i as isize + k as isize - radius as isize;
                if idx >= 0 && (idx as usize) < input.len() {
                    sum += input[idx as usize] * weight;
                    weight_sum += weight;
                }
            }

            // Renormalize by the weights that actually landed in range.
            output.push(if weight_sum > 0.0 { sum / weight_sum } else { 0.0 });
        }

        output
    }

    /// Smooth a histogram's bin counts
    pub fn filter_counts(&self, counts: &[u64]) -> Vec<f64> {
        let input: Vec<f64> = counts.iter().map(|&count| count as f64).collect();
        self.filter(&input)
    }

    /// Build a normalized Gaussian kernel of the given (odd) size
    ///
    /// Weight at offset `x` from the center is `exp(-x^2 / (2 sigma^2))`,
    /// scaled so the weights sum to 1.
    pub fn generate_kernel(&self, size: usize) -> FilterResult<Vec<f64>> {
        if size % 2 == 0 {
            return Err(FilterError::EvenKernelSize(size));
        }
        Ok(self.kernel_weights(size / 2))
    }

    fn kernel_weights(&self, radius: usize) -> Vec<f64> {
        let size = 2 * radius + 1;
        let mut kernel = Vec::with_capacity(size);
        let mut sum = 0.0;

        for i in 0..size {
            let x = i as f64 - radius as f64;
            let value = (-(x * x) / (2.0 * self.sigma * self.sigma)).exp();
            kernel.push(value);
            sum += value;
        }

        for value in &mut kernel {
            *value /= sum;
        }

        kernel
    }
}
