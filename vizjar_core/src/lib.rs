// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model and chart math for Vizjar.
//!
//! This crate provides:
//! - [`Value`] and [`Datum`], the dynamically-typed row model every transform and geom reads,
//! - the small math toolkit charts need: [`average`], [`quantile`], Heckbert's
//!   [`nice_number`] and [`ticks`].
//!
//! Everything here is pure and `no_std`-friendly (it uses `alloc`).

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod math;
mod value;

pub use math::{
    AsNumber, AverageMode, average, average_with, clamp, extent, nice_number, quantile, ticks,
};
pub use value::{Datum, Value};
