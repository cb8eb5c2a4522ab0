// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::vec::Vec;

use vizjar_core::Datum;

use crate::Transform;

/// An ordered list of transforms, executed as a left-to-right reduction over a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    transforms: Vec<Transform>,
}

impl Program {
    /// Creates an empty program (the identity over datasets).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, transform: impl Into<Transform>) {
        self.transforms.push(transform.into());
    }

    /// Builder form of [`Program::push`].
    #[must_use]
    pub fn with(mut self, transform: impl Into<Transform>) -> Self {
        self.push(transform);
        self
    }

    /// Returns the transforms in execution order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Returns `true` if the program has no transforms.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Runs every transform in order, feeding each one the previous output.
    pub fn execute(&self, data: &[Datum]) -> Vec<Datum> {
        let mut current = data.to_vec();
        for (step, transform) in self.transforms.iter().enumerate() {
            let next = transform.apply(&current);
            tracing::trace!(
                step,
                transform = transform.name(),
                rows_in = current.len(),
                rows_out = next.len(),
                "transform applied"
            );
            current = next;
        }
        current
    }
}

impl From<Transform> for Program {
    fn from(value: Transform) -> Self {
        Self {
            transforms: alloc::vec![value],
        }
    }
}

impl From<Vec<Transform>> for Program {
    fn from(value: Vec<Transform>) -> Self {
        Self { transforms: value }
    }
}

impl FromIterator<Transform> for Program {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}
