// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

use crate::scale::ScaleKind;

/// Errors raised while configuring a scale.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    /// The scale name is not in the scale registry.
    #[error("unknown scale '{0}'")]
    UnknownScale(String),
    /// The domain shape does not fit the scale kind.
    #[error("a {kind} scale requires a {expected} domain")]
    DomainMismatch {
        /// The scale being instantiated.
        kind: ScaleKind,
        /// The domain shape the scale expects.
        expected: &'static str,
    },
}

/// A color string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}'")]
pub struct ColorError(pub String);
