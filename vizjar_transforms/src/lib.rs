// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row transforms for Vizjar.
//!
//! This crate provides:
//! - grouping helpers ([`partition`], [`aggregate`]) that keep first-seen group order,
//! - an aggregation operation registry ([`AggregateOp`]),
//! - the [`Transform`] IR (select, stack, summarize, pivot), and
//! - [`Program`], a left-to-right composition of transforms.
//!
//! Every transform is pure: it reads a `&[Datum]` and returns a new `Vec<Datum>`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
mod ops;
mod partition;
mod pivot;
mod program;
mod stack;
mod summarize;
mod transform;

pub use error::TransformError;
pub use ops::AggregateOp;
pub use partition::{
    Aggregation, AggregationKey, Aggregations, GroupBy, MAIN_GROUP, Partition, aggregate,
    partition,
};
pub use pivot::{PivotEmission, PivotSpec};
pub use program::Program;
pub use stack::{StackAlign, StackSpec};
pub use summarize::{SummarizeSpec, SummaryField};
pub use transform::Transform;
