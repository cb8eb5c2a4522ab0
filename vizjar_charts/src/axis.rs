// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axes: tick labels, tick lines and grid lines for a plot scale.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use kurbo::Point;
use peniko::Color;
use peniko::color::palette::css;
use vizjar_core::Value;

use crate::geom::PlotContext;
use crate::path::polyline;
use crate::scale::{Scale, ScaleKind, ScaleSpec, axis_values};
use crate::svg::{Element, TextAnchor, TextBaseline};

/// Distance between the axis line and the tick labels; tick lines are half as long.
const TICK_OFFSET: f64 = 5.0;

/// Formats a tick value into label text.
pub type TickFormatter = Arc<dyn Fn(&Value) -> String>;

/// Which side of the drawing area an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisPosition {
    /// Above the drawing area.
    Top,
    /// Below the drawing area.
    Bottom,
    /// Left of the drawing area.
    Left,
    /// Right of the drawing area.
    Right,
}

impl AxisPosition {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `-1` for top/left (ticks grow away from the drawing area), `+1` otherwise.
    fn direction(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }
}

/// An axis: the scale it labels plus tick and grid styling.
#[derive(Clone)]
pub struct AxisSpec {
    /// Scale of the axis; the plot instantiates it over the drawing area.
    pub scale: ScaleSpec,
    /// Requested number of ticks on continuous scales.
    pub tick_count: usize,
    /// Show grid lines. `None` defers to the plot-level flag.
    pub grid: Option<bool>,
    /// Grid line color.
    pub grid_color: Color,
    /// Grid line opacity when the grid is shown.
    pub grid_opacity: f64,
    /// Tick label and tick line color.
    pub tick_color: Color,
    /// Tick label `font-weight`.
    pub tick_weight: String,
    /// Tick label `font-size`.
    pub tick_size: String,
    /// Overrides the tick label anchor.
    pub tick_align: Option<TextAnchor>,
    /// Overrides the tick label baseline.
    pub tick_baseline: Option<TextBaseline>,
    /// Tick label formatter. Labels default to the value's display form.
    pub formatter: Option<TickFormatter>,
}

impl fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisSpec")
            .field("scale", &self.scale)
            .field("tick_count", &self.tick_count)
            .field("grid", &self.grid)
            .field("grid_color", &self.grid_color)
            .field("grid_opacity", &self.grid_opacity)
            .field("tick_color", &self.tick_color)
            .field("tick_weight", &self.tick_weight)
            .field("tick_size", &self.tick_size)
            .field("tick_align", &self.tick_align)
            .field("tick_baseline", &self.tick_baseline)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis over `scale` with default styling.
    pub fn new(scale: ScaleSpec) -> Self {
        Self {
            scale,
            tick_count: 5,
            grid: None,
            grid_color: css::BLACK,
            grid_opacity: 0.2,
            tick_color: css::BLACK,
            tick_weight: "normal".into(),
            tick_size: "10px".into(),
            tick_align: None,
            tick_baseline: None,
            formatter: None,
        }
    }

    /// Sets the requested tick count.
    #[must_use]
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Shows or hides grid lines, overriding the plot-level flag.
    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Sets the grid line color and opacity.
    #[must_use]
    pub fn with_grid_style(mut self, color: Color, opacity: f64) -> Self {
        self.grid_color = color;
        self.grid_opacity = opacity;
        self
    }

    /// Sets the tick color.
    #[must_use]
    pub fn with_tick_color(mut self, color: Color) -> Self {
        self.tick_color = color;
        self
    }

    /// Sets the tick label font weight and size (CSS values).
    #[must_use]
    pub fn with_tick_font(mut self, weight: impl Into<String>, size: impl Into<String>) -> Self {
        self.tick_weight = weight.into();
        self.tick_size = size.into();
        self
    }

    /// Overrides the tick label alignment.
    #[must_use]
    pub fn with_tick_alignment(
        mut self,
        align: Option<TextAnchor>,
        baseline: Option<TextBaseline>,
    ) -> Self {
        self.tick_align = align;
        self.tick_baseline = baseline;
        self
    }

    /// Sets the tick label formatter.
    #[must_use]
    pub fn with_formatter(mut self, f: impl Fn(&Value) -> String + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    fn label(&self, value: &Value) -> String {
        match &self.formatter {
            Some(f) => f(value),
            None => value.to_string(),
        }
    }

    /// Renders the axis for an instantiated `scale` into a `<g>`.
    ///
    /// `grid` is the plot-level grid flag, used when this axis does not set its own.
    pub fn render(
        &self,
        position: AxisPosition,
        scale: &Scale,
        ctx: &PlotContext<'_>,
        grid: bool,
    ) -> Element {
        let grid = self.grid.unwrap_or(grid);
        let dir = position.direction();
        // The axis line: `x` for vertical axes, `y` for horizontal ones.
        let axis_at = match position {
            AxisPosition::Top | AxisPosition::Left => 0.0,
            AxisPosition::Bottom => ctx.height,
            AxisPosition::Right => ctx.width,
        };
        let shift = match (scale.kind(), scale.step()) {
            (ScaleKind::Interval, Some(step)) => step * 0.5,
            _ => 0.0,
        };

        let mut group = Element::new("g");
        for value in axis_values(scale, self.tick_count) {
            let Some(at) = scale.position(&value) else {
                continue;
            };
            let at = at + shift;
            let (label_at, anchor, baseline, tick, grid_line) = if position.is_horizontal() {
                (
                    Point::new(at, axis_at + dir * TICK_OFFSET),
                    TextAnchor::Middle,
                    if position == AxisPosition::Bottom {
                        TextBaseline::Hanging
                    } else {
                        TextBaseline::Baseline
                    },
                    [
                        Point::new(at, axis_at),
                        Point::new(at, axis_at + dir * TICK_OFFSET / 2.0),
                    ],
                    [Point::new(at, 0.0), Point::new(at, ctx.height)],
                )
            } else {
                (
                    Point::new(axis_at + dir * TICK_OFFSET, at),
                    if position == AxisPosition::Left {
                        TextAnchor::End
                    } else {
                        TextAnchor::Start
                    },
                    TextBaseline::Middle,
                    [
                        Point::new(axis_at, at),
                        Point::new(axis_at + dir * TICK_OFFSET / 2.0, at),
                    ],
                    [Point::new(0.0, at), Point::new(ctx.width, at)],
                )
            };

            group.push(
                Element::new("text")
                    .attr("x", label_at.x)
                    .attr("y", label_at.y)
                    .attr("text-anchor", self.tick_align.unwrap_or(anchor).as_str())
                    .attr(
                        "alignment-baseline",
                        self.tick_baseline.unwrap_or(baseline).as_str(),
                    )
                    .paint("fill", self.tick_color)
                    .attr(
                        "style",
                        alloc::format!(
                            "font-weight:{};font-size:{}",
                            self.tick_weight,
                            self.tick_size
                        ),
                    )
                    .text(self.label(&value)),
            );
            group.push(
                Element::new("path")
                    .attr("d", polyline(&tick, false))
                    .attr("fill", "none")
                    .attr("stroke-width", "1px")
                    .paint("stroke", self.tick_color),
            );
            group.push(
                Element::new("path")
                    .attr("d", polyline(&grid_line, false))
                    .attr("fill", "none")
                    .attr("stroke-width", "1px")
                    .paint("stroke", self.grid_color)
                    .attr("opacity", if grid { self.grid_opacity } else { 0.0 }),
            );
        }
        group
    }
}

impl From<ScaleSpec> for AxisSpec {
    fn from(scale: ScaleSpec) -> Self {
        Self::new(scale)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn ctx<'a>(x: &'a Scale, y: &'a Scale) -> PlotContext<'a> {
        PlotContext {
            width: 100.0,
            height: 100.0,
            x,
            y,
        }
    }

    fn interval() -> Scale {
        ScaleSpec::interval(["a", "b"])
            .instantiate((0.0, 100.0))
            .unwrap()
    }

    fn linear() -> Scale {
        ScaleSpec::linear((0.0, 10.0))
            .instantiate((100.0, 0.0))
            .unwrap()
    }

    #[test]
    fn bottom_interval_labels_sit_mid_band() {
        let (x, y) = (interval(), linear());
        let axis = AxisSpec::new(ScaleSpec::interval(["a", "b"]));
        let g = axis.render(AxisPosition::Bottom, &x, &ctx(&x, &y), false);
        let children: Vec<&Element> = g.elements().collect();
        // Label, tick and grid line per value.
        assert_eq!(children.len(), 6);
        let label = children[0];
        assert_eq!(
            label.to_svg_string(),
            r##"<text x="25" y="105" text-anchor="middle" alignment-baseline="hanging" fill="#000000" style="font-weight:normal;font-size:10px">a</text>"##
        );
        assert_eq!(children[1].attribute("d"), Some("M25,100 L25,102.5"));
        assert_eq!(children[1].attribute("stroke-width"), Some("1px"));
        assert_eq!(children[2].attribute("d"), Some("M25,0 L25,100"));
        assert_eq!(children[3].attribute("x"), Some("75"));
    }

    #[test]
    fn left_axis_anchors_labels_at_the_end() {
        let (x, y) = (interval(), linear());
        let axis = AxisSpec::new(ScaleSpec::linear((0.0, 10.0))).with_tick_count(2);
        let g = axis.render(AxisPosition::Left, &y, &ctx(&x, &y), false);
        let label = g.elements().next().unwrap();
        assert_eq!(label.attribute("x"), Some("-5"));
        assert_eq!(label.attribute("y"), Some("100"));
        assert_eq!(label.attribute("text-anchor"), Some("end"));
        assert_eq!(label.attribute("alignment-baseline"), Some("middle"));
        let tick = g.elements().nth(1).unwrap();
        assert_eq!(tick.attribute("d"), Some("M0,100 L-2.5,100"));
    }

    #[test]
    fn grid_opacity_follows_the_grid_flag() {
        let (x, y) = (interval(), linear());
        let axis = AxisSpec::new(ScaleSpec::interval(["a", "b"]));
        let hidden = axis.render(AxisPosition::Bottom, &x, &ctx(&x, &y), false);
        assert_eq!(hidden.elements().nth(2).unwrap().attribute("opacity"), Some("0"));
        let shown = axis.render(AxisPosition::Bottom, &x, &ctx(&x, &y), true);
        assert_eq!(shown.elements().nth(2).unwrap().attribute("opacity"), Some("0.2"));
        // An axis-level flag wins over the plot-level one.
        let off = axis.clone().with_grid(false);
        let g = off.render(AxisPosition::Bottom, &x, &ctx(&x, &y), true);
        assert_eq!(g.elements().nth(2).unwrap().attribute("opacity"), Some("0"));
    }

    #[test]
    fn formatter_and_overrides_apply() {
        let (x, y) = (interval(), linear());
        let axis = AxisSpec::new(ScaleSpec::interval(["a", "b"]))
            .with_formatter(|v| alloc::format!("<{v}>"))
            .with_tick_alignment(Some(TextAnchor::Start), Some(TextBaseline::Alphabetic));
        let g = axis.render(AxisPosition::Top, &x, &ctx(&x, &y), false);
        let label = g.elements().next().unwrap();
        assert_eq!(label.attribute("y"), Some("-5"));
        assert_eq!(label.attribute("text-anchor"), Some("start"));
        assert_eq!(label.attribute("alignment-baseline"), Some("alphabetic"));
        assert!(label.to_svg_string().contains(">&lt;a&gt;</text>"));
    }
}
