// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pivot transform: turns distinct values of one field into columns.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use vizjar_core::Datum;

use crate::TransformError;
use crate::ops::AggregateOp;
use crate::partition::{GroupBy, partition};

/// How a pivot lays out its output rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PivotEmission {
    /// One row per group, holding the group key columns and every pivot column.
    #[default]
    Merged,
    /// One row per (group, pivot value) bucket, holding the group key columns and that
    /// bucket's single pivot column.
    PerBucket,
}

/// Configuration of a pivot transform.
///
/// Each group (see [`PivotSpec::groupby`]) becomes one output row holding the group key
/// columns plus one column per distinct value of [`PivotSpec::field`], valued by aggregating
/// [`PivotSpec::value`] with [`PivotSpec::op`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSpec {
    /// Field whose distinct values become output columns.
    pub field: String,
    /// Field aggregated into each pivot column.
    pub value: String,
    /// Aggregation operation (default `sum`).
    pub op: AggregateOp,
    /// Grouping specification.
    pub groupby: GroupBy,
    /// Output row layout (default [`PivotEmission::Merged`]).
    pub emission: PivotEmission,
}

impl PivotSpec {
    /// Creates a pivot of `value` by the distinct values of `field`.
    ///
    /// Both options are mandatory: a blank name is a [`TransformError::MissingOption`].
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Result<Self, TransformError> {
        let field = field.into();
        let value = value.into();
        if field.trim().is_empty() {
            return Err(missing("field"));
        }
        if value.trim().is_empty() {
            return Err(missing("value"));
        }
        Ok(Self {
            field,
            value,
            op: AggregateOp::Sum,
            groupby: GroupBy::None,
            emission: PivotEmission::Merged,
        })
    }

    /// Sets the aggregation operation.
    #[must_use]
    pub fn with_op(mut self, op: AggregateOp) -> Self {
        self.op = op;
        self
    }

    /// Sets the grouping specification.
    #[must_use]
    pub fn with_groupby(mut self, groupby: impl Into<GroupBy>) -> Self {
        self.groupby = groupby.into();
        self
    }

    /// Sets the output row layout.
    #[must_use]
    pub fn with_emission(mut self, emission: PivotEmission) -> Self {
        self.emission = emission;
        self
    }

    pub(crate) fn apply(&self, data: &[Datum]) -> Vec<Datum> {
        let partition = partition(data, &self.groupby);
        let mut out = Vec::with_capacity(partition.groups.len());
        for group in &partition.groups {
            let Some(first) = group.first() else {
                continue;
            };
            // Columns are named by the display form, so `1` and `"1"` share a bucket.
            let mut buckets: Vec<(String, Vec<&Datum>)> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            for datum in group {
                let name = datum.value(&self.field).to_string();
                let i = match index.get(&name) {
                    Some(&i) => i,
                    None => {
                        index.insert(name.clone(), buckets.len());
                        buckets.push((name, Vec::new()));
                        buckets.len() - 1
                    }
                };
                buckets[i].1.push(*datum);
            }

            match self.emission {
                PivotEmission::Merged => {
                    let mut row = key_row(&partition.groupby, first);
                    for (name, items) in &buckets {
                        row.insert(name.as_str(), self.op.apply(items, &self.value));
                    }
                    out.push(row);
                }
                PivotEmission::PerBucket => {
                    for (name, items) in &buckets {
                        let mut row = key_row(&partition.groupby, items[0]);
                        row.insert(name.as_str(), self.op.apply(items, &self.value));
                        out.push(row);
                    }
                }
            }
        }
        out
    }
}

fn key_row(groupby: &[String], source: &Datum) -> Datum {
    let mut row = Datum::new();
    for key in groupby {
        row.insert(key.as_str(), source.value(key).clone());
    }
    row
}

fn missing(option: &'static str) -> TransformError {
    TransformError::MissingOption {
        transform: "pivot",
        option,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn quarters() -> Vec<Datum> {
        vec![
            Datum::new().with("year", 2023).with("q", "Q1").with("v", 1),
            Datum::new().with("year", 2023).with("q", "Q2").with("v", 2),
            Datum::new().with("year", 2024).with("q", "Q1").with("v", 3),
            Datum::new().with("year", 2023).with("q", "Q1").with("v", 4),
        ]
    }

    #[test]
    fn emits_one_row_per_group() {
        let spec = PivotSpec::new("q", "v").unwrap().with_groupby("year");
        let out = spec.apply(&quarters());
        assert_eq!(
            out,
            vec![
                Datum::new().with("year", 2023).with("Q1", 5).with("Q2", 2),
                Datum::new().with("year", 2024).with("Q1", 3),
            ]
        );
    }

    #[test]
    fn ungrouped_pivot_uses_the_operation() {
        let spec = PivotSpec::new("q", "v").unwrap().with_op(AggregateOp::Max);
        let out = spec.apply(&quarters());
        assert_eq!(out, vec![Datum::new().with("Q1", 4).with("Q2", 2)]);
    }

    #[test]
    fn numeric_and_text_pivot_values_share_a_column() {
        let data = vec![
            Datum::new().with("q", 1).with("v", 10),
            Datum::new().with("q", "1").with("v", 5),
        ];
        let spec = PivotSpec::new("q", "v").unwrap();
        assert_eq!(spec.apply(&data), vec![Datum::new().with("1", 15)]);
    }

    #[test]
    fn per_bucket_emission_splits_each_group() {
        let spec = PivotSpec::new("q", "v")
            .unwrap()
            .with_groupby("year")
            .with_emission(PivotEmission::PerBucket);
        let out = spec.apply(&quarters());
        assert_eq!(
            out,
            vec![
                Datum::new().with("year", 2023).with("Q1", 5),
                Datum::new().with("year", 2023).with("Q2", 2),
                Datum::new().with("year", 2024).with("Q1", 3),
            ]
        );
    }

    #[test]
    fn merged_emission_is_the_default() {
        let spec = PivotSpec::new("q", "v").unwrap();
        assert_eq!(spec.emission, PivotEmission::Merged);
        assert_eq!(spec.apply(&quarters()).len(), 1);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let spec = PivotSpec::new("q", "v").unwrap();
        assert!(spec.apply(&[]).is_empty());
    }

    #[test]
    fn field_and_value_are_mandatory() {
        assert_eq!(
            PivotSpec::new("", "v"),
            Err(TransformError::MissingOption {
                transform: "pivot",
                option: "field",
            })
        );
        assert_eq!(
            PivotSpec::new("q", "  "),
            Err(TransformError::MissingOption {
                transform: "pivot",
                option: "value",
            })
        );
    }
}
