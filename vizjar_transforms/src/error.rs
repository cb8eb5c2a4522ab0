// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform configuration errors.

extern crate alloc;

use alloc::string::String;

/// Errors raised while configuring a transform.
///
/// These are configuration mistakes: callers are expected to fix the configuration rather
/// than retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A mandatory option is missing or blank.
    #[error("[{transform}] '{option}' is a mandatory option")]
    MissingOption {
        /// Name of the transform being configured.
        transform: &'static str,
        /// Name of the missing option.
        option: &'static str,
    },
    /// An operation name is not in the operation registry.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    /// A summarized field has no operation at the same index.
    #[error("[summarize] no operation configured for field '{field}' (index {index})")]
    MissingOperation {
        /// The summarized field.
        field: String,
        /// Index of the field in the configured field list.
        index: usize,
    },
}
