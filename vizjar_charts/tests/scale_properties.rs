// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scale mapping.

use approx::assert_relative_eq;
use proptest::prelude::*;
use vizjar_charts::{Scale, ScaleDiscrete, ScaleLinear, ScaleSpec};
use vizjar_core::Value;

#[test]
fn discrete_lookup_and_unknown_values() {
    let scale = ScaleDiscrete::new(
        vec!["a".into(), "b".into()],
        vec![Value::Number(1.0), Value::Number(2.0)],
    );
    assert_eq!(scale.map(&"a".into()), Some(&Value::Number(1.0)));
    assert_eq!(scale.map(&"z".into()), None);
}

proptest! {
    #[test]
    fn linear_invert_round_trips_over_the_domain(
        d0 in -1e3_f64..1e3,
        span in 1e-2_f64..1e3,
        t in 0.0_f64..=1.0,
        height in 1.0_f64..2e3,
    ) {
        // Reversed range, as used for the y axis.
        let scale = ScaleLinear::new((d0, d0 + span), (height, 0.0));
        let x = d0 + t * span;
        assert_relative_eq!(scale.invert(scale.map(x)), x, epsilon = 1e-9 * (1.0 + x.abs()), max_relative = 1e-9);
    }

    #[test]
    fn linear_output_stays_in_range(x in -1e6_f64..1e6) {
        let scale = ScaleLinear::new((0.0, 10.0), (0.0, 500.0));
        let y = scale.map(x);
        prop_assert!((0.0..=500.0).contains(&y));
    }

    #[test]
    fn interval_bands_tile_the_range(n in 1_usize..20, spacing in 0.0_f64..1.0, margin in 0.0_f64..1.0) {
        let domain: Vec<Value> = (0..n).map(|i| Value::from(i as f64)).collect();
        let scale = ScaleSpec::interval(domain.clone())
            .with_margin(margin)
            .with_spacing(spacing)
            .instantiate((0.0, 100.0))
            .unwrap();
        let Scale::Interval(interval) = &scale else {
            panic!("expected an interval scale");
        };
        let step = interval.step();
        let last = scale.position(&domain[n - 1]).unwrap();
        // The last band ends one margin away from the range end.
        assert_relative_eq!(last + step + margin * step, 100.0, epsilon = 1e-9);
        let first = scale.position(&domain[0]).unwrap();
        assert_relative_eq!(first, margin * step, epsilon = 1e-9);
    }
}
