// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summarize transform: per-group aggregates, optionally joined back onto the rows.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use vizjar_core::Datum;

use crate::TransformError;
use crate::ops::AggregateOp;
use crate::partition::{MAIN_GROUP, aggregate};

/// One summarized output: `op` over `field`, written to `output` (defaults to `field`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    /// Input field.
    pub field: String,
    /// Aggregation operation.
    pub op: AggregateOp,
    /// Output field name; `None` writes back to `field`.
    pub output: Option<String>,
}

impl SummaryField {
    /// Creates a summary of `field` with `op`, written under the same name.
    pub fn new(field: impl Into<String>, op: AggregateOp) -> Self {
        Self {
            field: field.into(),
            op,
            output: None,
        }
    }

    /// Name of the output field.
    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.field)
    }
}

/// Configuration of a summarize transform.
///
/// Without fields, each group summary is `{count}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeSpec {
    /// Single grouping field; all rows form one group when unset.
    pub groupby: Option<String>,
    /// Summarized fields; `None` summarizes the row count only.
    pub fields: Option<Vec<SummaryField>>,
    /// Augment every input row with its group summary instead of emitting one row per group.
    pub join: bool,
}

impl SummarizeSpec {
    /// Creates a summarize transform counting all rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grouping field.
    #[must_use]
    pub fn with_groupby(mut self, field: impl Into<String>) -> Self {
        self.groupby = Some(field.into());
        self
    }

    /// Adds a summarized field written under its own name.
    #[must_use]
    pub fn with_field(self, field: impl Into<String>, op: AggregateOp) -> Self {
        self.with_summary(SummaryField::new(field, op))
    }

    /// Adds a summarized field written under `output`.
    #[must_use]
    pub fn with_field_as(
        self,
        field: impl Into<String>,
        op: AggregateOp,
        output: impl Into<String>,
    ) -> Self {
        let mut summary = SummaryField::new(field, op);
        summary.output = Some(output.into());
        self.with_summary(summary)
    }

    /// Adds a summarized field.
    #[must_use]
    pub fn with_summary(mut self, summary: SummaryField) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(summary);
        self
    }

    /// Configures summarized fields from parallel lists of field names, operation names and
    /// output names.
    ///
    /// `ops[i]` is required for every field; `outputs[i]` is optional and defaults to the field
    /// name.
    pub fn with_fields<S: AsRef<str>>(
        mut self,
        fields: &[S],
        ops: &[S],
        outputs: &[S],
    ) -> Result<Self, TransformError> {
        let mut summaries = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let field = field.as_ref();
            let op = ops
                .get(index)
                .ok_or_else(|| TransformError::MissingOperation {
                    field: field.into(),
                    index,
                })?;
            summaries.push(SummaryField {
                field: field.into(),
                op: AggregateOp::from_name(op.as_ref())?,
                output: outputs.get(index).map(|o| o.as_ref().into()),
            });
        }
        self.fields = Some(summaries);
        Ok(self)
    }

    /// Sets the join flag.
    #[must_use]
    pub fn with_join(mut self, join: bool) -> Self {
        self.join = join;
        self
    }

    pub(crate) fn apply(&self, data: &[Datum]) -> Vec<Datum> {
        let mut groups = aggregate(data, self.groupby.as_deref());
        for group in groups.entries_mut() {
            group.summary = match &self.fields {
                None => Datum::new().with("count", group.items.len() as f64),
                Some(fields) => fields
                    .iter()
                    .map(|s| (s.output_name(), s.op.apply(&group.items, &s.field)))
                    .collect(),
            };
        }

        if self.join {
            return data
                .iter()
                .map(|datum| {
                    let mut row = datum.clone();
                    if let Some(group) = groups.group_of(datum) {
                        row.merge(&group.summary);
                    }
                    row
                })
                .collect();
        }

        let key_field = self.groupby.as_deref().unwrap_or(MAIN_GROUP);
        groups
            .entries()
            .iter()
            .map(|group| {
                let mut row = group.summary.clone();
                row.insert(key_field, group.key.to_value());
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizjar_core::Value;

    use super::*;

    fn sales() -> Vec<Datum> {
        vec![
            Datum::new().with("region", "north").with("amount", 10),
            Datum::new().with("region", "south").with("amount", 5),
            Datum::new().with("region", "north").with("amount", 30),
        ]
    }

    #[test]
    fn counts_rows_per_group_by_default() {
        let out = SummarizeSpec::new().with_groupby("region").apply(&sales());
        assert_eq!(
            out,
            vec![
                Datum::new().with("count", 2).with("region", "north"),
                Datum::new().with("count", 1).with("region", "south"),
            ]
        );
    }

    #[test]
    fn without_groupby_uses_main_group() {
        let out = SummarizeSpec::new().apply(&sales());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value("count"), &Value::Number(3.0));
        assert_eq!(out[0].value(MAIN_GROUP), &Value::from(MAIN_GROUP));
    }

    #[test]
    fn fields_and_outputs_are_parallel() {
        let spec = SummarizeSpec::new()
            .with_groupby("region")
            .with_fields(&["amount", "amount"], &["sum", "max"], &["total"])
            .unwrap();
        let out = spec.apply(&sales());
        assert_eq!(out[0].value("total"), &Value::Number(40.0));
        assert_eq!(out[0].value("amount"), &Value::Number(30.0));
        assert_eq!(out[1].value("total"), &Value::Number(5.0));
    }

    #[test]
    fn missing_or_unknown_operations_fail_at_construction() {
        let missing = SummarizeSpec::new().with_fields(&["a", "b"], &["sum"], &[]);
        assert_eq!(
            missing,
            Err(TransformError::MissingOperation {
                field: String::from("b"),
                index: 1,
            })
        );
        let unknown = SummarizeSpec::new().with_fields(&["a"], &["mode"], &[]);
        assert_eq!(
            unknown,
            Err(TransformError::UnknownOperation(String::from("mode")))
        );
    }

    #[test]
    fn join_preserves_row_count_and_overrides() {
        let out = SummarizeSpec::new()
            .with_groupby("region")
            .with_field("amount", AggregateOp::Mean)
            .with_join(true)
            .apply(&sales());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].value("amount"), &Value::Number(20.0));
        assert_eq!(out[1].value("amount"), &Value::Number(5.0));
        assert_eq!(out[2].value("region"), &Value::from("north"));
    }

    #[test]
    fn keys_keep_their_type() {
        let data = vec![
            Datum::new().with("k", 1),
            Datum::new().with("k", "1"),
        ];
        let out = SummarizeSpec::new().with_groupby("k").apply(&data);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].value("k"), &Value::Number(1.0));
        assert_eq!(out[1].value("k"), &Value::from("1"));
    }
}
