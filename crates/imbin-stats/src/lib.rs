//! imbin-stats - Histogram binning and distribution statistics
//!
//! This crate is the numeric core behind imbin's distribution views:
//!
//! - **Histogram**: fixed-resolution binning with merge and peak detection
//! - **Cdf**: cumulative distribution snapshots with percentile inversion
//! - **GaussianFilter**: discrete Gaussian smoothing of bin counts
//!
//! # Design Philosophy
//!
//! Samples flow in through [`Histogram::add_sample`]; everything else is
//! a read-only view derived from the bin counts. Renderers, exporters,
//! and UIs consume the accessors (bin counts, bin ranges, CDF values,
//! percentile queries, peak records, smoothed sequences) and never mutate
//! core state. A computed [`Cdf`] is a snapshot of its source histogram,
//! deliberately decoupled from later mutation.

pub mod cdf;
pub mod error;
pub mod gaussian;
pub mod histogram;

pub use cdf::*;
pub use error::*;
pub use gaussian::*;
pub use histogram::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
