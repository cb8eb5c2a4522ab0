// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot composition: scales, axes and geoms in one `<svg>`.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::ScaleError;
use crate::axis::{AxisPosition, AxisSpec};
use crate::geom::{GeomSpec, PlotContext};
use crate::svg::Element;

/// A plot: canvas size, margin, x/y axes and the geoms drawn over them.
///
/// The drawing area is the canvas minus `margin` on every side. The x scale spans
/// `[0, width]` and the y scale `[height, 0]` of the drawing area, so larger values are
/// drawn higher up.
#[derive(Clone, Debug)]
pub struct PlotSpec {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Margin on every side of the drawing area.
    pub margin: f64,
    /// Horizontal axis (drawn at the bottom).
    pub x: AxisSpec,
    /// Vertical axis (drawn on the left).
    pub y: AxisSpec,
    /// Grid flag for axes that do not set their own.
    pub grid: bool,
    /// Geoms, drawn in order.
    pub geoms: Vec<GeomSpec>,
}

impl PlotSpec {
    /// Creates a 500x500 plot with no margin over the given axes.
    pub fn new(x: impl Into<AxisSpec>, y: impl Into<AxisSpec>) -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            margin: 0.0,
            x: x.into(),
            y: y.into(),
            grid: false,
            geoms: Vec::new(),
        }
    }

    /// Sets the canvas size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the plot-level grid flag.
    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Appends a geom.
    #[must_use]
    pub fn with_geom(mut self, geom: GeomSpec) -> Self {
        self.geoms.push(geom);
        self
    }

    /// Width and height of the drawing area.
    pub fn drawing_size(&self) -> (f64, f64) {
        (
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }

    /// Renders the plot into an `<svg>` element tree.
    pub fn render(&self) -> Result<Element, ScaleError> {
        let (width, height) = self.drawing_size();
        let x = self.x.scale.instantiate((0.0, width))?;
        let y = self.y.scale.instantiate((height, 0.0))?;
        let ctx = PlotContext {
            width,
            height,
            x: &x,
            y: &y,
        };
        tracing::debug!(
            width,
            height,
            x_scale = %x.kind(),
            y_scale = %y.kind(),
            geoms = self.geoms.len(),
            "rendering plot"
        );

        let mut target = Element::new("g").attr(
            "transform",
            alloc::format!("translate({},{})", self.margin, self.margin),
        );
        target.push(self.x.render(AxisPosition::Bottom, &x, &ctx, self.grid));
        target.push(self.y.render(AxisPosition::Left, &y, &ctx, self.grid));
        for geom in &self.geoms {
            target.push(geom.render(&ctx));
        }

        Ok(Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", self.width)
            .attr("height", self.height)
            .attr("style", "user-select:none")
            .child(target))
    }

    /// Renders the plot and serializes it as SVG markup.
    pub fn to_svg_string(&self) -> Result<String, ScaleError> {
        Ok(self.render()?.to_svg_string())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::{ScaleKind, ScaleSpec};

    #[test]
    fn root_carries_size_and_translated_group() {
        let plot = PlotSpec::new(
            ScaleSpec::linear((0.0, 10.0)),
            ScaleSpec::linear((0.0, 10.0)),
        )
        .with_size(200.0, 100.0)
        .with_margin(10.0);
        let svg = plot.render().unwrap();
        assert_eq!(svg.tag(), "svg");
        assert_eq!(svg.attribute("width"), Some("200"));
        assert_eq!(svg.attribute("height"), Some("100"));
        assert_eq!(svg.attribute("style"), Some("user-select:none"));
        let target = svg.elements().next().unwrap();
        assert_eq!(target.attribute("transform"), Some("translate(10,10)"));
        assert_eq!(plot.drawing_size(), (180.0, 80.0));
        // Two axis groups and no geoms.
        assert_eq!(target.elements().count(), 2);
    }

    #[test]
    fn mismatched_axis_domain_is_an_error() {
        let plot = PlotSpec::new(
            ScaleSpec::interval((0.0, 1.0)),
            ScaleSpec::linear((0.0, 10.0)),
        );
        assert_eq!(
            plot.render().unwrap_err(),
            ScaleError::DomainMismatch {
                kind: ScaleKind::Interval,
                expected: "discrete",
            }
        );
    }
}
