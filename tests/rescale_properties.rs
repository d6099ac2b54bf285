//! Property-based tests for the range rescaling transform

use proptest::prelude::*;
use sensorscope::scale_to_range;

fn span(values: &[f64]) -> f64 {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    max - min
}

fn series() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1.0e6f64..1.0e6, 2..200)
}

proptest! {
    #[test]
    fn scaled_series_spans_the_reference_range(data in series(), reference in series()) {
        // Near-degenerate spans make the transform numerically meaningless;
        // uniformly drawn inputs essentially never produce them.
        prop_assume!(span(&data) > 1e-3 && span(&reference) > 1e-3);

        let mapping = scale_to_range(&data, &reference).unwrap();
        prop_assert!(mapping.inverse.is_some());

        let ref_min = reference.iter().cloned().fold(f64::INFINITY, f64::min);
        let ref_max = reference.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let scaled_min = mapping.scaled.iter().cloned().fold(f64::INFINITY, f64::min);
        let scaled_max = mapping.scaled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let tolerance = 1e-6 * (1.0 + ref_min.abs().max(ref_max.abs()));
        prop_assert!((scaled_min - ref_min).abs() < tolerance);
        prop_assert!((scaled_max - ref_max).abs() < tolerance);
    }

    #[test]
    fn unscale_inverts_the_forward_transform(data in series(), reference in series()) {
        prop_assume!(span(&data) > 1e-3 && span(&reference) > 1e-3);

        let mapping = scale_to_range(&data, &reference).unwrap();
        let inverse = mapping.inverse.unwrap();

        let tolerance = 1e-6 * (1.0 + span(&data));
        for (&original, &scaled) in data.iter().zip(mapping.scaled.iter()) {
            prop_assert!((inverse.unscale(scaled) - original).abs() < tolerance);
        }
    }

    #[test]
    fn constant_data_maps_to_the_reference_midpoint(
        value in -1.0e6f64..1.0e6,
        len in 1usize..100,
        reference in series(),
    ) {
        let data = vec![value; len];
        let mapping = scale_to_range(&data, &reference).unwrap();

        prop_assert!(mapping.is_degenerate());

        let ref_min = reference.iter().cloned().fold(f64::INFINITY, f64::min);
        let ref_max = reference.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let midpoint = ref_min + (ref_max - ref_min) / 2.0;

        prop_assert_eq!(mapping.scaled.len(), len);
        for &v in &mapping.scaled {
            prop_assert_eq!(v, midpoint);
        }
    }
}
