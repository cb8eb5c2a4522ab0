// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform IR types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use vizjar_core::Datum;

use crate::pivot::PivotSpec;
use crate::stack::StackSpec;
use crate::summarize::SummarizeSpec;

/// A row transform: a pure function from a dataset to a new dataset.
///
/// Transforms never mutate their input and are reusable across datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Keep only the first row.
    SelectFirst,
    /// Keep only the last row.
    SelectLast,
    /// Keep only the row with the smallest `field` value.
    ///
    /// Ties, and values that do not compare (mixed kinds, null), keep the earlier row.
    SelectMin {
        /// Compared field.
        field: String,
    },
    /// Keep only the row with the largest `field` value.
    ///
    /// Ties, and values that do not compare (mixed kinds, null), keep the earlier row.
    SelectMax {
        /// Compared field.
        field: String,
    },
    /// Assign stack extents per row.
    Stack(StackSpec),
    /// Summarize groups.
    Summarize(SummarizeSpec),
    /// Pivot distinct values into columns.
    Pivot(PivotSpec),
}

impl Transform {
    /// Creates a [`Transform::SelectMin`].
    pub fn select_min(field: impl Into<String>) -> Self {
        Self::SelectMin {
            field: field.into(),
        }
    }

    /// Creates a [`Transform::SelectMax`].
    pub fn select_max(field: impl Into<String>) -> Self {
        Self::SelectMax {
            field: field.into(),
        }
    }

    /// Registry name of this transform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectFirst => "selectFirst",
            Self::SelectLast => "selectLast",
            Self::SelectMin { .. } => "selectMin",
            Self::SelectMax { .. } => "selectMax",
            Self::Stack(_) => "stack",
            Self::Summarize(_) => "summarize",
            Self::Pivot(_) => "pivot",
        }
    }

    /// Applies this transform to `data`.
    ///
    /// The select transforms return an empty dataset for empty input.
    pub fn apply(&self, data: &[Datum]) -> Vec<Datum> {
        match self {
            Self::SelectFirst => data.first().cloned().into_iter().collect(),
            Self::SelectLast => data.last().cloned().into_iter().collect(),
            Self::SelectMin { field } => select_by(data, field, Ordering::Less),
            Self::SelectMax { field } => select_by(data, field, Ordering::Greater),
            Self::Stack(spec) => spec.apply(data),
            Self::Summarize(spec) => spec.apply(data),
            Self::Pivot(spec) => spec.apply(data),
        }
    }
}

/// Keeps the row whose `field` compares `wanted` against every other row.
fn select_by(data: &[Datum], field: &str, wanted: Ordering) -> Vec<Datum> {
    let mut winner: Option<&Datum> = None;
    for datum in data {
        winner = match winner {
            Some(best) if datum.value(field).partial_cmp(best.value(field)) != Some(wanted) => {
                Some(best)
            }
            _ => Some(datum),
        };
    }
    winner.cloned().into_iter().collect()
}

impl From<StackSpec> for Transform {
    fn from(value: StackSpec) -> Self {
        Self::Stack(value)
    }
}

impl From<SummarizeSpec> for Transform {
    fn from(value: SummarizeSpec) -> Self {
        Self::Summarize(value)
    }
}

impl From<PivotSpec> for Transform {
    fn from(value: PivotSpec) -> Self {
        Self::Pivot(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizjar_core::Value;

    use super::*;

    fn rows() -> Vec<Datum> {
        vec![
            Datum::new().with("id", "a").with("v", 3),
            Datum::new().with("id", "b").with("v", 1),
            Datum::new().with("id", "c").with("v", 7),
            Datum::new().with("id", "d").with("v", 1),
            Datum::new().with("id", "e").with("v", 7),
        ]
    }

    fn ids(out: &[Datum]) -> Vec<&Value> {
        out.iter().map(|d| d.value("id")).collect()
    }

    #[test]
    fn select_first_and_last() {
        let data = rows();
        assert_eq!(ids(&Transform::SelectFirst.apply(&data)), [&Value::from("a")]);
        assert_eq!(ids(&Transform::SelectLast.apply(&data)), [&Value::from("e")]);
        assert!(Transform::SelectFirst.apply(&[]).is_empty());
        assert!(Transform::SelectLast.apply(&[]).is_empty());
    }

    #[test]
    fn select_extrema_keep_the_earlier_row_on_ties() {
        let data = rows();
        assert_eq!(
            ids(&Transform::select_min("v").apply(&data)),
            [&Value::from("b")]
        );
        assert_eq!(
            ids(&Transform::select_max("v").apply(&data)),
            [&Value::from("c")]
        );
        assert!(Transform::select_min("v").apply(&[]).is_empty());
    }

    #[test]
    fn unordered_values_keep_the_running_winner() {
        let data = vec![
            Datum::new().with("id", "a").with("v", 5),
            Datum::new().with("id", "b").with("v", "1"),
            Datum::new().with("id", "c"),
        ];
        assert_eq!(
            ids(&Transform::select_min("v").apply(&data)),
            [&Value::from("a")]
        );
    }

    #[test]
    fn transforms_do_not_mutate_input() {
        let data = rows();
        let before = data.clone();
        let _ = Transform::from(StackSpec::new("v")).apply(&data);
        assert_eq!(data, before);
    }

    #[test]
    fn names() {
        assert_eq!(Transform::SelectFirst.name(), "selectFirst");
        assert_eq!(Transform::from(SummarizeSpec::new()).name(), "summarize");
    }
}
