// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart math: averaging, quantiles, "nice" numbers and tick generation.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::value::{Datum, Value};

/// Clamps `value` to `[min, max]`.
///
/// Unlike `f64::clamp` this never panics: with `min > max` the result is `max`. A `NaN` input
/// stays `NaN`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    value.max(min).min(max)
}

/// How [`average_with`] accumulates the sum of valid entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AverageMode {
    /// Sum the number extracted by `get_value`.
    #[default]
    Extracted,
    /// Sum each element's own numeric reading ([`AsNumber`]), using `get_value` only to decide
    /// which elements count.
    ///
    /// This is the legacy accumulation. It only agrees with [`AverageMode::Extracted`] when
    /// `get_value` is the identity; averaging rows this way yields `NaN`.
    Original,
}

/// Numeric reading of an element, used by [`AverageMode::Original`].
pub trait AsNumber {
    /// Returns the element read as a number (`NaN` when it has no numeric reading).
    fn as_number(&self) -> f64;
}

impl AsNumber for f64 {
    fn as_number(&self) -> f64 {
        *self
    }
}

impl AsNumber for Value {
    fn as_number(&self) -> f64 {
        self.to_number()
    }
}

impl AsNumber for Datum {
    fn as_number(&self) -> f64 {
        f64::NAN
    }
}

impl<T: AsNumber + ?Sized> AsNumber for &T {
    fn as_number(&self) -> f64 {
        (**self).as_number()
    }
}

/// Arithmetic mean of the numbers extracted by `get_value`.
///
/// Entries for which `get_value` returns `None` or `NaN` are skipped and do not count toward
/// the denominator. Returns `0.0` when no entry is valid.
pub fn average<T>(values: &[T], get_value: impl Fn(&T) -> Option<f64>) -> f64 {
    accumulate(values, get_value, |_, v| v)
}

/// Like [`average`], with an explicit accumulation [`AverageMode`].
pub fn average_with<T: AsNumber>(
    values: &[T],
    get_value: impl Fn(&T) -> Option<f64>,
    mode: AverageMode,
) -> f64 {
    match mode {
        AverageMode::Extracted => average(values, get_value),
        AverageMode::Original => accumulate(values, get_value, |item, _| item.as_number()),
    }
}

fn accumulate<T>(
    values: &[T],
    get_value: impl Fn(&T) -> Option<f64>,
    pick: impl Fn(&T, f64) -> f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_usize;
    for item in values {
        let Some(v) = get_value(item) else {
            continue;
        };
        if v.is_nan() {
            continue;
        }
        sum += pick(item, v);
        count += 1;
    }
    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// Returns the `q`-quantile of an ascending-sorted sequence.
///
/// `values` must already be sorted by the key `value_of` extracts. Uses linear interpolation
/// between the closest ranks (`h = (n - 1) * q`).
///
/// - empty input yields `None`,
/// - `q <= 0` or fewer than two values yields the first value,
/// - `q >= 1` yields the last value.
pub fn quantile<T>(q: f64, values: &[T], value_of: impl Fn(&T) -> f64) -> Option<f64> {
    let first = values.first()?;
    if q <= 0.0 || values.len() < 2 {
        return Some(value_of(first));
    }
    if q >= 1.0 {
        return values.last().map(&value_of);
    }
    let h = (values.len() - 1) as f64 * q;
    let rh = h.floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "0 <= h < len - 1 since 0 < q < 1"
    )]
    let i = rh as usize;
    let lo = value_of(&values[i]);
    let hi = value_of(&values[i + 1]);
    Some(lo + (hi - lo) * (h - rh))
}

/// Heckbert's "nice number": a value close to `x` of the form `{1, 2, 5, 10} * 10^k`.
///
/// With `round`, the mantissa is rounded to the closest nice value; otherwise it is taken to
/// the smallest nice value not below it. `x` must be positive.
pub fn nice_number(x: f64, round: bool) -> f64 {
    let exp = x.log10().floor();
    let base = 10_f64.powf(exp);
    let f = x / base;
    let nf = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * base
}

/// Generates evenly spaced "nice" tick values covering `[start, end]`.
///
/// The step is derived from the nice range of the interval and the requested count `n`
/// (values below `2` are treated as `2`). Ticks start at the largest multiple of the step not
/// above `start` and end at the smallest multiple not below `end`, rounded to 8 decimals.
///
/// With `tight`, only ticks strictly inside `(start, end)` are kept and `start`/`end` are
/// added as the first and last ticks. Reversed bounds are swapped; equal bounds yield a single
/// tick.
pub fn ticks(start: f64, end: f64, n: usize, tight: bool) -> Vec<f64> {
    if start == end {
        return alloc::vec![start];
    }
    if end < start {
        return ticks(end, start, n, tight);
    }
    let n = n.max(2);
    let range = nice_number(end - start, false);
    let step = nice_number(range / (n - 1) as f64, true);
    let first = (start / step).floor() * step;
    let last = (end / step).ceil() * step;

    let count_f = ((last - first) / step).round();
    let count = if count_f.is_finite() && count_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks"
        )]
        {
            count_f as usize
        }
    } else {
        0
    };

    let values = (0..=count).map(|i| round_decimals(first + step * i as f64, 8));
    if tight {
        let mut out = Vec::with_capacity(count + 3);
        out.push(start);
        out.extend(values.filter(|&v| start < v && v < end));
        out.push(end);
        out
    } else {
        values.collect()
    }
}

fn round_decimals(v: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powf(f64::from(decimals));
    (v * scale).round() / scale
}

/// Returns `(min, max)` over the finite values extracted by `get_value`.
///
/// Returns `None` if no finite values are present.
pub fn extent<T>(values: &[T], get_value: impl Fn(&T) -> Option<f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().filter_map(get_value) {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}
