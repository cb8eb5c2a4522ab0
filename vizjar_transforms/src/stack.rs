// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack layout: assigns `[start, end]` extents to each row within its group.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use vizjar_core::Datum;

use crate::partition::{GroupBy, partition};

/// Stack baseline alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackAlign {
    /// Stack positive values upward from 0 and negative values downward from 0.
    #[default]
    Default,
    /// Center each group relative to the largest group.
    ///
    /// A group starts at `(max_sum - group_sum) / 2`, where sums are sums of absolute values,
    /// and rows are stacked one after another from there.
    Center,
}

impl StackAlign {
    /// Looks up an alignment by name; anything but `"center"` is [`StackAlign::Default`].
    pub fn from_name(name: &str) -> Self {
        if name == "center" {
            Self::Center
        } else {
            Self::Default
        }
    }
}

/// Configuration of a stack transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
    /// Field holding the stacked value; each row counts `1` when unset.
    pub field: Option<String>,
    /// Fields defining independent stacks.
    pub groupby: GroupBy,
    /// Baseline alignment.
    pub align: StackAlign,
    /// Output field receiving the stack start.
    pub output_start: String,
    /// Output field receiving the stack end.
    pub output_end: String,
}

impl Default for StackSpec {
    fn default() -> Self {
        Self {
            field: None,
            groupby: GroupBy::None,
            align: StackAlign::Default,
            output_start: String::from("yStart"),
            output_end: String::from("yEnd"),
        }
    }
}

impl StackSpec {
    /// Creates a stack over `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Sets the grouping specification.
    #[must_use]
    pub fn with_groupby(mut self, groupby: impl Into<GroupBy>) -> Self {
        self.groupby = groupby.into();
        self
    }

    /// Sets the baseline alignment.
    #[must_use]
    pub fn with_align(mut self, align: StackAlign) -> Self {
        self.align = align;
        self
    }

    /// Sets the output field names (`start`, `end`).
    #[must_use]
    pub fn with_output(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.output_start = start.into();
        self.output_end = end.into();
        self
    }

    fn value_of(&self, datum: &Datum) -> f64 {
        match &self.field {
            Some(f) => datum.value(f).to_number(),
            None => 1.0,
        }
    }

    pub(crate) fn apply(&self, data: &[Datum]) -> Vec<Datum> {
        let partition = partition(data, &self.groupby);
        let sums: Vec<f64> = partition
            .groups
            .iter()
            .map(|group| group.iter().map(|d| self.value_of(d).abs()).sum())
            .collect();
        let max_sum = sums.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut out = Vec::with_capacity(data.len());
        for (group, sum) in partition.groups.iter().zip(&sums) {
            match self.align {
                StackAlign::Default => {
                    let mut positive = 0.0;
                    let mut negative = 0.0;
                    for datum in group {
                        let value = self.value_of(datum);
                        let last = if value < 0.0 {
                            &mut negative
                        } else {
                            &mut positive
                        };
                        out.push(self.extent(datum, *last, *last + value));
                        *last += value;
                    }
                }
                StackAlign::Center => {
                    let mut last = (max_sum - sum) / 2.0;
                    for datum in group {
                        let value = self.value_of(datum);
                        out.push(self.extent(datum, last, last + value));
                        last += value;
                    }
                }
            }
        }
        out
    }

    fn extent(&self, datum: &Datum, start: f64, end: f64) -> Datum {
        datum
            .clone()
            .with(self.output_start.as_str(), start)
            .with(self.output_end.as_str(), end)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizjar_core::Value;

    use super::*;

    fn extents(rows: &[Datum]) -> Vec<(f64, f64)> {
        rows.iter()
            .map(|d| {
                (
                    d.value("yStart").to_number(),
                    d.value("yEnd").to_number(),
                )
            })
            .collect()
    }

    #[test]
    fn default_stack_separates_signs() {
        let data: Vec<Datum> = [3.0, -2.0, 5.0]
            .iter()
            .map(|v| Datum::new().with("v", *v))
            .collect();
        let out = StackSpec::new("v").apply(&data);
        assert_eq!(extents(&out), vec![(0.0, 3.0), (0.0, -2.0), (3.0, 8.0)]);
        assert_eq!(out[2].value("v"), &Value::Number(5.0));
    }

    #[test]
    fn stack_without_field_counts_rows() {
        let data = vec![Datum::new(), Datum::new()];
        let out = StackSpec::default().apply(&data);
        assert_eq!(extents(&out), vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn groups_stack_independently_and_emit_in_group_order() {
        let data = vec![
            Datum::new().with("g", "a").with("v", 1),
            Datum::new().with("g", "b").with("v", 2),
            Datum::new().with("g", "a").with("v", 3),
        ];
        let out = StackSpec::new("v").with_groupby("g").apply(&data);
        assert_eq!(extents(&out), vec![(0.0, 1.0), (1.0, 4.0), (0.0, 2.0)]);
        assert_eq!(out[2].value("g"), &Value::from("b"));
    }

    #[test]
    fn center_stack_offsets_smaller_groups() {
        let data = vec![
            Datum::new().with("g", "a").with("v", 4),
            Datum::new().with("g", "a").with("v", 6),
            Datum::new().with("g", "b").with("v", 2),
        ];
        let out = StackSpec::new("v")
            .with_groupby("g")
            .with_align(StackAlign::Center)
            .with_output("lo", "hi")
            .apply(&data);
        let spans: Vec<(f64, f64)> = out
            .iter()
            .map(|d| (d.value("lo").to_number(), d.value("hi").to_number()))
            .collect();
        assert_eq!(spans, vec![(0.0, 4.0), (4.0, 10.0), (4.0, 6.0)]);
    }

    #[test]
    fn align_names() {
        assert_eq!(StackAlign::from_name("center"), StackAlign::Center);
        assert_eq!(StackAlign::from_name("default"), StackAlign::Default);
        assert_eq!(StackAlign::from_name("wiggle"), StackAlign::Default);
    }
}
