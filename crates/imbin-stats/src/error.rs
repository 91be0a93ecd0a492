//! Error types for imbin-stats
//!
//! Provides error handling for:
//! - Histogram construction and bin access
//! - CDF computation and percentile queries
//! - Gaussian filter parameters
//!
//! Out-of-range or non-finite samples passed to
//! [`Histogram::add_sample`](crate::histogram::Histogram::add_sample) are
//! not errors; they are silently dropped.

use thiserror::Error;

/// Main error type for imbin-stats operations
#[derive(Error, Debug)]
pub enum StatsError {
    /// Histogram errors
    #[error("Histogram error: {0}")]
    Histogram(#[from] HistogramError),

    /// CDF errors
    #[error("CDF error: {0}")]
    Cdf(#[from] CdfError),

    /// Gaussian filter errors
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Errors related to histogram construction and bin access
#[derive(Error, Debug)]
pub enum HistogramError {
    /// Bounds rejected at construction
    #[error("Invalid bounds: min {min} must be finite and less than max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Zero bins requested at construction
    #[error("Resolution must be greater than 0")]
    ZeroResolution,

    /// Bin index past the last bin
    #[error("Bin index {index} out of range (resolution {resolution})")]
    BinIndexOutOfRange { index: usize, resolution: usize },
}

/// Errors related to CDF computation and queries
#[derive(Error, Debug)]
pub enum CdfError {
    /// CDF requested for a histogram with no samples
    #[error("Histogram has no data")]
    EmptyHistogram,

    /// Percentile outside [0, 100]
    #[error("Percentile must be between 0 and 100: got {0}")]
    PercentileOutOfRange(f64),

    /// Percentile queried before the CDF was computed
    #[error("CDF not computed")]
    NotComputed,
}

/// Errors related to Gaussian filter parameters
#[derive(Error, Debug)]
pub enum FilterError {
    /// Sigma must be positive
    #[error("Sigma must be greater than 0: got {0}")]
    NonPositiveSigma(f64),

    /// Gaussian kernels need a center element
    #[error("Kernel size must be odd: got {0}")]
    EvenKernelSize(usize),
}

/// Result type alias for imbin-stats operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Result type alias for histogram operations
pub type HistogramResult<T> = Result<T, HistogramError>;

/// Result type alias for CDF operations
pub type CdfResult<T> = Result<T, CdfError>;

/// Result type alias for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
