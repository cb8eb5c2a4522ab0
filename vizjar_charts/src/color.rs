// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color parsing, formatting and HSL interpolation.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use peniko::Color;
use peniko::color::Srgb;
use vizjar_core::clamp;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt as _;
use crate::ColorError;

/// Parses a CSS color string (`#rgb`, `#rrggbb`, `rgb()`, `hsl()`, named colors).
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    peniko::color::parse_color(s)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ColorError(s.into()))
}

/// Formats the 8-bit RGB channels of `color` as `rgb(r,g,b)`, dropping alpha.
pub fn format_rgb(color: Color) -> String {
    let rgba = color.to_rgba8();
    alloc::format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b)
}

/// A color in HSL space: hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HslColor {
    /// Hue, in degrees.
    pub h: f64,
    /// Saturation, in percent.
    pub s: f64,
    /// Lightness, in percent.
    pub l: f64,
}

impl HslColor {
    /// Creates an HSL color.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl From<Color> for HslColor {
    fn from(color: Color) -> Self {
        to_hsl(color)
    }
}

/// Formats an HSL color as `hsl(h, s%, l%)`.
pub fn format_hsl(color: HslColor) -> String {
    alloc::format!("{color}")
}

/// Converts the 8-bit RGB channels of `color` to HSL. Achromatic colors get hue and
/// saturation 0.
pub fn to_hsl(color: Color) -> HslColor {
    let rgba = color.to_rgba8();
    let r = f64::from(rgba.r) / 255.0;
    let g = f64::from(rgba.g) / 255.0;
    let b = f64::from(rgba.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;
    let l = (max + min) / 2.0;
    if chroma == 0.0 {
        return HslColor::new(0.0, 0.0, 100.0 * l);
    }
    let sector = if max == r {
        (g - b) / chroma
    } else if max == g {
        2.0 + (b - r) / chroma
    } else {
        4.0 + (r - g) / chroma
    };
    let h = if sector < 0.0 {
        60.0 * sector + 360.0
    } else {
        60.0 * sector
    };
    let s = chroma / (1.0 - (2.0 * l - 1.0).abs());
    HslColor::new(h, 100.0 * s, 100.0 * l)
}

fn interpolate_linear(a: f64, b: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| a + clamp(t, 0.0, 1.0) * (b - a)
}

/// Hue interpolator taking the shorter way around the color wheel.
fn interpolate_hue(a: f64, b: f64) -> impl Fn(f64) -> f64 + Copy {
    let mut d = b - a;
    if d.abs() > 180.0 {
        d -= 360.0 * (d / 360.0).round();
    }
    interpolate_linear(a, a + d)
}

/// Returns an interpolator between `start` and `end` in HSL space.
///
/// `t` is clamped to `[0, 1]`; hue travels the shorter arc, so the result may leave
/// `[0, 360)`.
pub fn interpolate_hsl(start: Color, end: Color) -> impl Fn(f64) -> HslColor {
    let (a, b) = (to_hsl(start), to_hsl(end));
    let h = interpolate_hue(a.h, b.h);
    let s = interpolate_linear(a.s, b.s);
    let l = interpolate_linear(a.l, b.l);
    move |t| HslColor::new(h(t), s(t), l(t))
}
