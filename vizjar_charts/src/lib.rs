// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales, geoms and SVG plots for Vizjar.
//!
//! This crate sits on top of `vizjar_core` (rows and math) and `vizjar_transforms`
//! (row programs):
//! - **Scales** map data values into drawing-area coordinates.
//! - **Geoms** turn rows into SVG elements through per-channel encodings.
//! - **Axes** and **plots** compose scales and geoms into a single `<svg>` element tree.
//!
//! Output is a plain [`Element`] tree; serializing it with [`Element::to_svg_string`] is the
//! only I/O-shaped step, and it writes into a `String`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod color;
mod curve;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geom;
mod path;
mod plot;
mod scale;
mod svg;

pub use axis::{AxisPosition, AxisSpec, TickFormatter};
pub use color::{HslColor, format_hsl, format_rgb, interpolate_hsl, parse_color, to_hsl};
pub use curve::{Curve, CurveKind};
pub use error::{ColorError, ScaleError};
pub use geom::{Channel, ComputeFn, Encoding, GeomKind, GeomSpec, PlotContext};
pub use path::{Path, PathCommand, circle, polyline, rectangle};
pub use plot::PlotSpec;
pub use scale::{
    Domain, Scale, ScaleDiscrete, ScaleInterval, ScaleKind, ScaleLinear, ScalePoint, ScaleSpec,
    axis_values,
};
pub use svg::{Element, Node, TextAnchor, TextBaseline, escape_xml, svg_paint};
