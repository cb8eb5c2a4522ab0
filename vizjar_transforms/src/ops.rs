// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregation operations over a group of rows.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use vizjar_core::{Datum, Value, average, quantile};

use crate::TransformError;

/// An aggregation operation reducing a group of rows to a single value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Field value of the first row.
    First,
    /// Field value of the last row.
    Last,
    /// Minimum numeric value (`NaN` if any value is not a number).
    Min,
    /// Maximum numeric value (`NaN` if any value is not a number).
    Max,
    /// 0.25 quantile.
    Q1,
    /// 0.5 quantile.
    Q2,
    /// 0.5 quantile (alias of [`AggregateOp::Q2`]).
    Median,
    /// 0.75 quantile.
    Q3,
    /// Mean of the numeric values.
    Mean,
    /// Sum of the numeric readings.
    Sum,
    /// Number of rows.
    Count,
}

impl AggregateOp {
    /// Every registered operation, in registry order.
    pub const ALL: [Self; 11] = [
        Self::First,
        Self::Last,
        Self::Min,
        Self::Max,
        Self::Q1,
        Self::Q2,
        Self::Median,
        Self::Q3,
        Self::Mean,
        Self::Sum,
        Self::Count,
    ];

    /// Registry name of this operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Min => "min",
            Self::Max => "max",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Median => "median",
            Self::Q3 => "q3",
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Count => "count",
        }
    }

    /// Looks up an operation by registry name.
    pub fn from_name(name: &str) -> Result<Self, TransformError> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| TransformError::UnknownOperation(name.to_string()))
    }

    /// Applies the operation to `field` over `items`.
    ///
    /// Empty groups yield [`Value::Null`] for the positional and quantile operations, `0` for
    /// `sum` and `count`, and `+inf`/`-inf` for `min`/`max`.
    pub fn apply(self, items: &[&Datum], field: &str) -> Value {
        match self {
            Self::First => items.first().map(|d| d.value(field).clone()).unwrap_or_default(),
            Self::Last => items.last().map(|d| d.value(field).clone()).unwrap_or_default(),
            Self::Min => Value::Number(fold_nan(items, field, f64::INFINITY, f64::min)),
            Self::Max => Value::Number(fold_nan(items, field, f64::NEG_INFINITY, f64::max)),
            Self::Q1 => sorted_quantile(0.25, items, field),
            Self::Q2 | Self::Median => sorted_quantile(0.5, items, field),
            Self::Q3 => sorted_quantile(0.75, items, field),
            Self::Mean => Value::Number(average(items, |d| d.value(field).as_f64())),
            Self::Sum => Value::Number(items.iter().map(|d| d.value(field).to_number()).sum()),
            Self::Count => Value::Number(items.len() as f64),
        }
    }
}

fn fold_nan(items: &[&Datum], field: &str, init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    let mut acc = init;
    for d in items {
        let v = d.value(field).to_number();
        if v.is_nan() {
            return f64::NAN;
        }
        acc = pick(acc, v);
    }
    acc
}

fn sorted_quantile(q: f64, items: &[&Datum], field: &str) -> Value {
    let mut values: Vec<f64> = items.iter().map(|d| d.value(field).to_number()).collect();
    values.sort_by(f64::total_cmp);
    quantile(q, &values, |v| *v).into()
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateOp {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec;

    use super::*;

    fn rows(values: &[f64]) -> Vec<Datum> {
        values.iter().map(|v| Datum::new().with("v", *v)).collect()
    }

    fn apply(op: AggregateOp, data: &[Datum]) -> Value {
        let items: Vec<&Datum> = data.iter().collect();
        op.apply(&items, "v")
    }

    #[test]
    fn names_round_trip_through_registry() {
        for op in AggregateOp::ALL {
            assert_eq!(AggregateOp::from_name(op.name()), Ok(op));
            assert_eq!(op.to_string().parse::<AggregateOp>(), Ok(op));
        }
        assert_eq!(
            AggregateOp::from_name("mode"),
            Err(TransformError::UnknownOperation(String::from("mode")))
        );
    }

    #[test]
    fn positional_operations() {
        let data = rows(&[4.0, 1.0, 9.0]);
        assert_eq!(apply(AggregateOp::First, &data), Value::Number(4.0));
        assert_eq!(apply(AggregateOp::Last, &data), Value::Number(9.0));
        assert_eq!(apply(AggregateOp::First, &[]), Value::Null);
    }

    #[test]
    fn extrema_propagate_nan() {
        let data = rows(&[4.0, 1.0, 9.0]);
        assert_eq!(apply(AggregateOp::Min, &data), Value::Number(1.0));
        assert_eq!(apply(AggregateOp::Max, &data), Value::Number(9.0));

        let mut with_text = rows(&[4.0]);
        with_text.push(Datum::new().with("v", "x"));
        assert!(apply(AggregateOp::Min, &with_text).as_f64().is_some_and(f64::is_nan));
    }

    #[test]
    fn quartiles_sort_before_estimating() {
        let data = rows(&[40.0, 0.0, 30.0, 10.0, 20.0]);
        assert_eq!(apply(AggregateOp::Q1, &data), Value::Number(10.0));
        assert_eq!(apply(AggregateOp::Median, &data), Value::Number(20.0));
        assert_eq!(apply(AggregateOp::Q2, &data), Value::Number(20.0));
        assert_eq!(apply(AggregateOp::Q3, &data), Value::Number(30.0));
        assert_eq!(apply(AggregateOp::Median, &[]), Value::Null);
    }

    #[test]
    fn mean_sum_and_count() {
        let data = rows(&[1.0, 2.0, 6.0]);
        assert_eq!(apply(AggregateOp::Mean, &data), Value::Number(3.0));
        assert_eq!(apply(AggregateOp::Sum, &data), Value::Number(9.0));
        assert_eq!(apply(AggregateOp::Count, &data), Value::Number(3.0));

        let mixed = vec![Datum::new().with("v", 1), Datum::new().with("v", "a")];
        assert!(apply(AggregateOp::Sum, &mixed).as_f64().is_some_and(f64::is_nan));
        assert_eq!(apply(AggregateOp::Mean, &mixed), Value::Number(1.0));
    }
}
