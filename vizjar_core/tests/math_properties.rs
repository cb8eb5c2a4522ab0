// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for quantiles and tick generation.

use approx::assert_relative_eq;
use proptest::prelude::*;
use vizjar_core::{nice_number, quantile, ticks};

proptest! {
    #[test]
    fn quantile_endpoints_are_first_and_last(mut values in prop::collection::vec(-1e6_f64..1e6, 1..50)) {
        values.sort_by(f64::total_cmp);
        prop_assert_eq!(quantile(0.0, &values, |v| *v), values.first().copied());
        prop_assert_eq!(quantile(1.0, &values, |v| *v), values.last().copied());
    }

    #[test]
    fn quantile_stays_within_bounds(mut values in prop::collection::vec(-1e6_f64..1e6, 1..50), q in 0.0_f64..1.0) {
        values.sort_by(f64::total_cmp);
        let got = quantile(q, &values, |v| *v).unwrap();
        prop_assert!(got >= values[0] - 1e-6);
        prop_assert!(got <= values[values.len() - 1] + 1e-6);
    }

    #[test]
    fn ticks_are_ascending_multiples_covering_the_interval(
        start in -1e4_f64..1e4,
        span in 1e-3_f64..1e5,
        n in 2_usize..12,
    ) {
        let end = start + span;
        let t = ticks(start, end, n, false);
        prop_assert!(t.len() >= 2);
        prop_assert!(t[0] <= start + 1e-8);
        prop_assert!(t[t.len() - 1] >= end - 1e-8);
        let step = t[1] - t[0];
        prop_assert!(step > 0.0);
        for w in t.windows(2) {
            prop_assert!(w[1] > w[0]);
            prop_assert!(((w[1] - w[0]) - step).abs() <= step * 1e-3 + 1e-8);
        }
    }

    #[test]
    fn nice_numbers_have_nice_mantissas(x in 1e-6_f64..1e9, round in any::<bool>()) {
        let nice = nice_number(x, round);
        let exp = nice.log10().floor();
        let mantissa = nice / 10_f64.powf(exp);
        prop_assert!(
            [1.0, 2.0, 5.0, 10.0].iter().any(|m| (mantissa - m).abs() < 1e-9),
            "mantissa {} of {} is not nice", mantissa, nice
        );
    }
}

#[test]
fn single_value_ticks() {
    for a in [-3.5, 0.0, 42.0] {
        assert_eq!(ticks(a, a, 5, false), vec![a]);
    }
}

#[test]
fn median_of_even_sequence() {
    assert_relative_eq!(quantile(0.5, &[1.0, 2.0, 3.0, 4.0], |v| *v).unwrap(), 2.5);
}
