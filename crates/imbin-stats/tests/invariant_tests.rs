//! Property-based invariant tests
//!
//! The structural invariants every histogram and CDF must hold, checked
//! over randomized bounds, resolutions, and sample sequences.

use imbin_stats::{Cdf, Histogram};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_bin_sum_matches_total_after_every_add(
        min in -1000.0f64..1000.0,
        span in 0.1f64..100.0,
        resolution in 1usize..64,
        samples in prop::collection::vec(-1200.0f64..1200.0, 0..200),
    ) {
        let mut hist = Histogram::new(min, min + span, resolution).unwrap();

        for &sample in &samples {
            hist.add_sample(sample);
            prop_assert_eq!(
                hist.bin_counts().iter().sum::<u64>(),
                hist.total_count()
            );
        }

        hist.clear();
        prop_assert_eq!(hist.total_count(), 0);
        prop_assert_eq!(hist.bin_counts().iter().sum::<u64>(), 0);
    }

    #[test]
    fn test_layout_invariants_hold(
        min in -1000.0f64..1000.0,
        span in 0.1f64..100.0,
        resolution in 1usize..64,
    ) {
        let hist = Histogram::new(min, min + span, resolution).unwrap();

        prop_assert_eq!(hist.bin_counts().len(), hist.resolution());
        let covered = hist.resolution() as f64 * hist.bin_width();
        prop_assert!((covered - span).abs() <= 1e-9 * span.max(1.0));
    }

    #[test]
    fn test_bin_index_stays_in_range(
        min in -1000.0f64..1000.0,
        span in 0.1f64..100.0,
        resolution in 1usize..64,
        value in -1200.0f64..1200.0,
    ) {
        let hist = Histogram::new(min, min + span, resolution).unwrap();

        if let Some(index) = hist.bin_index(value) {
            prop_assert!(index < hist.resolution());
            // Slack of a few ulps covers rounding at bin boundaries.
            let slack = 1e-9 * span.max(1.0);
            let (lo, hi) = hist.bin_range(index).unwrap();
            prop_assert!(lo <= value + slack);
            prop_assert!(value <= hi + slack);
        } else {
            prop_assert!(!value.is_finite() || value < hist.min() || value > hist.max());
        }
    }

    #[test]
    fn test_cdf_is_monotone_and_pinned_to_one(
        min in -1000.0f64..1000.0,
        span in 0.1f64..100.0,
        resolution in 1usize..64,
        samples in prop::collection::vec(-1200.0f64..1200.0, 0..200),
    ) {
        let mut hist = Histogram::new(min, min + span, resolution).unwrap();
        // Guarantee at least one in-range sample.
        hist.add_sample(min + span / 2.0);
        hist.add_samples(&samples);

        let cdf = Cdf::from_histogram(&hist).unwrap();

        prop_assert_eq!(cdf.values().len(), hist.resolution());
        for pair in cdf.values().windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        prop_assert_eq!(*cdf.values().last().unwrap(), 1.0);
    }

    #[test]
    fn test_percentile_results_stay_in_bounds(
        min in -1000.0f64..1000.0,
        span in 0.1f64..100.0,
        resolution in 1usize..64,
        samples in prop::collection::vec(-1200.0f64..1200.0, 1..200),
        percentile in 0.0f64..=100.0,
    ) {
        let mut hist = Histogram::new(min, min + span, resolution).unwrap();
        hist.add_sample(min + span / 2.0);
        hist.add_samples(&samples);

        let cdf = Cdf::from_histogram(&hist).unwrap();
        let value = cdf.percentile(percentile).unwrap();

        let slack = 1e-9 * span.max(1.0);
        prop_assert!(value >= hist.min() - slack);
        prop_assert!(value <= hist.max() + slack);
    }

    #[test]
    fn test_merge_preserves_combined_total(
        min_a in -100.0f64..100.0,
        span_a in 0.5f64..50.0,
        res_a in 1usize..32,
        min_b in -100.0f64..100.0,
        span_b in 0.5f64..50.0,
        res_b in 1usize..32,
        same_layout in any::<bool>(),
        samples_a in prop::collection::vec(-150.0f64..150.0, 0..100),
        samples_b in prop::collection::vec(-150.0f64..150.0, 0..100),
    ) {
        let mut a = Histogram::new(min_a, min_a + span_a, res_a).unwrap();
        let (lo, hi, res) = if same_layout {
            (min_a, min_a + span_a, res_a)
        } else {
            (min_b, min_b + span_b, res_b)
        };
        let mut b = Histogram::new(lo, hi, res).unwrap();

        a.add_samples(&samples_a);
        b.add_samples(&samples_b);
        let expected_total = a.total_count() + b.total_count();

        a.merge(&b);

        prop_assert_eq!(a.total_count(), expected_total);
        prop_assert_eq!(a.bin_counts().iter().sum::<u64>(), a.total_count());
        prop_assert_eq!(a.bin_counts().len(), a.resolution());
        prop_assert!(a.min() <= min_a);
        prop_assert!(a.max() >= min_a + span_a);
    }
}
