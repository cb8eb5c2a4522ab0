// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geoms: turn rows into SVG elements through channel encodings and the plot scales.
//!
//! Every geom carries its own rows and a [`Program`] that runs before rendering. Each visual
//! channel ([`Channel`]) reads its value through an [`Encoding`]; positional channels
//! (`x*`, `y*`) then pass through the plot's x or y scale. A row whose position cannot be
//! resolved is skipped.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use vizjar_core::{Datum, Value};
use vizjar_transforms::{Program, Transform};

use crate::curve::{Curve, CurveKind};
use crate::path::{Path, circle, polyline, rectangle};
use crate::scale::Scale;
use crate::svg::Element;

/// Computes a channel value from a row and its index.
pub type ComputeFn = Arc<dyn Fn(&Datum, usize) -> Value>;

/// Where a channel reads its value from.
#[derive(Clone)]
pub enum Encoding {
    /// A row field. When the row has no such field (or it is null), the field name itself
    /// is used as a literal, so `"red"` works both as a field and as a constant.
    Field(String),
    /// A constant.
    Value(Value),
    /// A closure over the row and its index.
    Compute(ComputeFn),
}

impl Encoding {
    /// Creates a computed encoding.
    pub fn compute(f: impl Fn(&Datum, usize) -> Value + 'static) -> Self {
        Self::Compute(Arc::new(f))
    }

    /// Resolves this encoding for one row; `None` when it yields null.
    pub fn resolve(&self, datum: &Datum, index: usize) -> Option<Value> {
        let value = match self {
            Self::Field(field) => match datum.get(field) {
                Some(v) if !v.is_null() => v.clone(),
                _ => Value::Text(field.clone()),
            },
            Self::Value(v) => v.clone(),
            Self::Compute(f) => f(datum, index),
        };
        (!value.is_null()).then_some(value)
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}

impl From<&str> for Encoding {
    fn from(field: &str) -> Self {
        Self::Field(field.into())
    }
}

impl From<String> for Encoding {
    fn from(field: String) -> Self {
        Self::Field(field)
    }
}

impl From<Value> for Encoding {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<f64> for Encoding {
    fn from(value: f64) -> Self {
        Self::Value(Value::Number(value))
    }
}

/// Visual channels a geom can encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Start horizontal position.
    X1,
    /// End horizontal position.
    X2,
    /// Start vertical position.
    Y1,
    /// End vertical position.
    Y2,
    /// Fill paint.
    Fill,
    /// Point/circle radius, or rectangle corner radius.
    Radius,
    /// Stroke paint.
    StrokeColor,
    /// Stroke width.
    StrokeWidth,
    /// Text content.
    Text,
    /// Text rotation, in degrees.
    Rotation,
    /// Text anchor.
    TextAnchor,
    /// Text baseline.
    Baseline,
    /// Font size.
    Size,
    /// Curve interpolation name (`linear`, `catmull`).
    Curve,
}

impl Channel {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::X | Self::X1 | Self::X2)
    }
}

/// Geom kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeomKind {
    /// One `<circle>` per row.
    Point,
    /// One rectangle path per row, spanning `x1..x2` and `y1..y2`.
    Rectangle,
    /// One circle path per row.
    Circle,
    /// One `<text>` per row.
    Text,
    /// One two-point line per row.
    Line,
    /// A full-height vertical line per row.
    XRule,
    /// A full-width horizontal line per row.
    YRule,
    /// A single path through all rows.
    Curve,
    /// A single closed path: forward along `x1/y1`, back along `x2/y2`.
    Area,
}

impl GeomKind {
    /// The geom name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Line => "line",
            Self::XRule => "xRule",
            Self::YRule => "yRule",
            Self::Curve => "curve",
            Self::Area => "area",
        }
    }
}

/// The drawing area and scales a geom renders against.
#[derive(Clone, Copy, Debug)]
pub struct PlotContext<'a> {
    /// Drawing area width.
    pub width: f64,
    /// Drawing area height.
    pub height: f64,
    /// Horizontal scale.
    pub x: &'a Scale,
    /// Vertical scale.
    pub y: &'a Scale,
}

/// A geom: kind, rows, pre-render program and channel encodings.
#[derive(Clone, Debug)]
pub struct GeomSpec {
    /// Geom kind.
    pub kind: GeomKind,
    /// Rows to render. Defaults to a single empty row, so a geom of constants draws once.
    pub data: Vec<Datum>,
    /// Transforms applied to `data` before rendering.
    pub program: Program,
    encodings: HashMap<Channel, Encoding>,
}

impl GeomSpec {
    /// Creates a geom of `kind` over a single empty row.
    pub fn new(kind: GeomKind) -> Self {
        Self {
            kind,
            data: vec![Datum::new()],
            program: Program::new(),
            encodings: HashMap::new(),
        }
    }

    /// Point geom.
    pub fn point() -> Self {
        Self::new(GeomKind::Point)
    }

    /// Rectangle geom.
    pub fn rectangle() -> Self {
        Self::new(GeomKind::Rectangle)
    }

    /// Circle geom.
    pub fn circle() -> Self {
        Self::new(GeomKind::Circle)
    }

    /// Text geom.
    pub fn text() -> Self {
        Self::new(GeomKind::Text)
    }

    /// Line geom.
    pub fn line() -> Self {
        Self::new(GeomKind::Line)
    }

    /// Vertical rule geom.
    pub fn x_rule() -> Self {
        Self::new(GeomKind::XRule)
    }

    /// Horizontal rule geom.
    pub fn y_rule() -> Self {
        Self::new(GeomKind::YRule)
    }

    /// Curve geom.
    pub fn curve() -> Self {
        Self::new(GeomKind::Curve)
    }

    /// Area geom.
    pub fn area() -> Self {
        Self::new(GeomKind::Area)
    }

    /// Sets the rows.
    #[must_use]
    pub fn with_data(mut self, data: Vec<Datum>) -> Self {
        self.data = data;
        self
    }

    /// Appends a transform to the pre-render program.
    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Self {
        self.program.push(transform);
        self
    }

    /// Replaces the pre-render program.
    #[must_use]
    pub fn with_program(mut self, program: Program) -> Self {
        self.program = program;
        self
    }

    /// Sets the encoding of a channel.
    #[must_use]
    pub fn encode(mut self, channel: Channel, encoding: impl Into<Encoding>) -> Self {
        self.encodings.insert(channel, encoding.into());
        self
    }

    /// Returns the encoding of a channel, if set.
    pub fn encoding(&self, channel: Channel) -> Option<&Encoding> {
        self.encodings.get(&channel)
    }

    /// Resolves a channel for one row, falling back to `default`.
    fn value(&self, channel: Channel, datum: &Datum, index: usize, default: Value) -> Value {
        self.encodings
            .get(&channel)
            .and_then(|e| e.resolve(datum, index))
            .unwrap_or(default)
    }

    /// Resolves a positional channel through the matching plot scale. Unset channels read 0.
    fn position(
        &self,
        channel: Channel,
        datum: &Datum,
        index: usize,
        ctx: &PlotContext<'_>,
    ) -> Option<f64> {
        let scale = if channel.is_horizontal() {
            ctx.x
        } else {
            ctx.y
        };
        scale.position(&self.value(channel, datum, index, Value::Number(0.0)))
    }

    fn point_of(
        &self,
        (cx, cy): (Channel, Channel),
        datum: &Datum,
        index: usize,
        ctx: &PlotContext<'_>,
    ) -> Option<Point> {
        Some(Point::new(
            self.position(cx, datum, index, ctx)?,
            self.position(cy, datum, index, ctx)?,
        ))
    }

    fn stroke(&self, element: Element, datum: &Datum, index: usize) -> Element {
        element
            .attr(
                "stroke",
                self.value(Channel::StrokeColor, datum, index, "#000".into()),
            )
            .attr(
                "stroke-width",
                self.value(Channel::StrokeWidth, datum, index, 1.0.into()),
            )
    }

    /// Runs the program over the rows and renders them into a `<g>`.
    pub fn render(&self, ctx: &PlotContext<'_>) -> Element {
        let rows = self.program.execute(&self.data);
        let mut group = Element::new("g");
        match self.kind {
            GeomKind::Curve | GeomKind::Area => group.push(self.render_path(&rows, ctx)),
            _ => {
                for (index, datum) in rows.iter().enumerate() {
                    match self.render_row(datum, index, ctx) {
                        Some(element) => group.push(element),
                        None => tracing::trace!(
                            geom = self.kind.name(),
                            index,
                            "skipping row without a position"
                        ),
                    }
                }
            }
        }
        group
    }

    fn render_row(&self, datum: &Datum, index: usize, ctx: &PlotContext<'_>) -> Option<Element> {
        use Channel::{Baseline, Fill, Radius, Rotation, Size, Text, TextAnchor, X, X1, X2, Y, Y1, Y2};

        let element = match self.kind {
            GeomKind::Point => {
                let p = self.point_of((X, Y), datum, index, ctx)?;
                Element::new("circle")
                    .attr("cx", p.x)
                    .attr("cy", p.y)
                    .attr("fill", self.value(Fill, datum, index, "#000".into()))
                    .attr("r", self.value(Radius, datum, index, 2.0.into()))
            }
            GeomKind::Rectangle => {
                let p1 = self.point_of((X1, Y1), datum, index, ctx)?;
                let p2 = self.point_of((X2, Y2), datum, index, ctx)?;
                let radius = self.value(Radius, datum, index, 0.0.into()).to_number();
                let d = rectangle(Rect::from_points(p1, p2), radius);
                let element = Element::new("path")
                    .attr("d", d)
                    .attr("fill", self.value(Fill, datum, index, "transparent".into()));
                self.stroke(element, datum, index)
            }
            GeomKind::Circle => {
                let center = self.point_of((X, Y), datum, index, ctx)?;
                let radius = self.value(Radius, datum, index, 0.0.into()).to_number();
                let element = Element::new("path")
                    .attr("d", circle(center, radius))
                    .attr("fill", self.value(Fill, datum, index, "transparent".into()));
                self.stroke(element, datum, index)
            }
            GeomKind::Text => {
                let p = self.point_of((X, Y), datum, index, ctx)?;
                let mut element = Element::new("text").attr("x", p.x).attr("y", p.y);
                if self.encodings.contains_key(&Rotation) {
                    let angle = self.value(Rotation, datum, index, 0.0.into());
                    let transform = alloc::format!("rotate({angle}, {}, {})", p.x, p.y);
                    element.set_attr("transform", transform);
                }
                element
                    .attr(
                        "text-anchor",
                        self.value(TextAnchor, datum, index, "middle".into()),
                    )
                    .attr(
                        "dominant-baseline",
                        self.value(Baseline, datum, index, "middle".into()),
                    )
                    .attr("fill", self.value(Fill, datum, index, "#000".into()))
                    .attr("font-size", self.value(Size, datum, index, 16.0.into()))
                    .text(self.value(Text, datum, index, "".into()).to_string())
            }
            GeomKind::Line => {
                let start = self.point_of((X1, Y1), datum, index, ctx)?;
                let end = self.point_of((X2, Y2), datum, index, ctx)?;
                self.line_element(&[start, end], datum, index)
            }
            GeomKind::XRule => {
                let x = self.position(X, datum, index, ctx)?;
                let points = [Point::new(x, 0.0), Point::new(x, ctx.height)];
                self.line_element(&points, datum, index)
            }
            GeomKind::YRule => {
                let y = self.position(Y, datum, index, ctx)?;
                let points = [Point::new(0.0, y), Point::new(ctx.width, y)];
                self.line_element(&points, datum, index)
            }
            GeomKind::Curve | GeomKind::Area => return None,
        };
        Some(element)
    }

    fn line_element(&self, points: &[Point], datum: &Datum, index: usize) -> Element {
        let element = Element::new("path")
            .attr("d", polyline(points, false))
            .attr("fill", "none");
        self.stroke(element, datum, index)
    }

    /// Curve and area geoms: one path over all rows, styled from the first row.
    fn render_path(&self, rows: &[Datum], ctx: &PlotContext<'_>) -> Element {
        let empty = Datum::new();
        let first = rows.first().unwrap_or(&empty);
        let mut element = Element::new("path");
        element = if self.kind == GeomKind::Area {
            element.attr("fill", self.value(Channel::Fill, first, 0, "#000".into()))
        } else {
            element.attr("fill", "none")
        };
        element = self.stroke(element, first, 0);

        let mut path = Path::new();
        if rows.len() >= 2 {
            let kind = match self.value(Channel::Curve, first, 0, Value::Null) {
                Value::Text(name) => CurveKind::from_name(&name),
                _ => CurveKind::Linear,
            };
            let mut curve = Curve::new(kind, &mut path);
            let (forward, backward) = match self.kind {
                GeomKind::Area => ((Channel::X1, Channel::Y1), Some((Channel::X2, Channel::Y2))),
                _ => ((Channel::X, Channel::Y), None),
            };
            for (index, datum) in rows.iter().enumerate() {
                self.feed(&mut curve, forward, datum, index, ctx);
            }
            curve.end();
            if let Some(channels) = backward {
                for (index, datum) in rows.iter().enumerate().rev() {
                    self.feed(&mut curve, channels, datum, index, ctx);
                }
                curve.end();
                path.close();
            }
        }
        element.attr("d", path)
    }

    fn feed(
        &self,
        curve: &mut Curve<'_>,
        channels: (Channel, Channel),
        datum: &Datum,
        index: usize,
        ctx: &PlotContext<'_>,
    ) {
        match self.point_of(channels, datum, index, ctx) {
            Some(p) => curve.point(p),
            None => tracing::trace!(
                geom = self.kind.name(),
                index,
                "skipping row without a position"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::ScaleSpec;
    use vizjar_transforms::Transform;

    fn scales() -> (Scale, Scale) {
        let x = ScaleSpec::linear((0.0, 10.0))
            .instantiate((0.0, 100.0))
            .unwrap();
        let y = ScaleSpec::linear((0.0, 10.0))
            .instantiate((100.0, 0.0))
            .unwrap();
        (x, y)
    }

    fn render(geom: &GeomSpec) -> Element {
        let (x, y) = scales();
        let ctx = PlotContext {
            width: 100.0,
            height: 100.0,
            x: &x,
            y: &y,
        };
        geom.render(&ctx)
    }

    fn rows() -> Vec<Datum> {
        vec![
            Datum::from([("a", 1), ("b", 2)]),
            Datum::from([("a", 3), ("b", 8)]),
        ]
    }

    #[test]
    fn field_encoding_falls_back_to_its_name() {
        let d = Datum::new().with("color", "red");
        assert_eq!(
            Encoding::from("color").resolve(&d, 0),
            Some(Value::from("red"))
        );
        assert_eq!(
            Encoding::from("blue").resolve(&d, 0),
            Some(Value::from("blue"))
        );
        assert_eq!(Encoding::Value(Value::Null).resolve(&d, 0), None);
        let index = Encoding::compute(|_, i| Value::from(i as f64));
        assert_eq!(index.resolve(&d, 4), Some(Value::Number(4.0)));
    }

    #[test]
    fn points_use_scales_and_defaults() {
        let geom = GeomSpec::point()
            .with_data(rows())
            .encode(Channel::X, "a")
            .encode(Channel::Y, "b");
        let g = render(&geom);
        let circles: Vec<&Element> = g.elements().collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].attribute("cx"), Some("10"));
        assert_eq!(circles[0].attribute("cy"), Some("80"));
        assert_eq!(circles[0].attribute("fill"), Some("#000"));
        assert_eq!(circles[0].attribute("r"), Some("2"));
    }

    #[test]
    fn constant_geom_draws_once() {
        let geom = GeomSpec::text()
            .encode(Channel::X, 5.0)
            .encode(Channel::Y, 5.0)
            .encode(Channel::Text, "hello")
            .encode(Channel::Rotation, 90.0);
        let g = render(&geom);
        let text = g.elements().next().unwrap();
        assert_eq!(
            text.to_svg_string(),
            r##"<text x="50" y="50" transform="rotate(90, 50, 50)" text-anchor="middle" dominant-baseline="middle" fill="#000" font-size="16">hello</text>"##
        );
    }

    #[test]
    fn rows_without_a_position_are_skipped() {
        let mut data = rows();
        data.push(Datum::new().with("b", 4));
        let geom = GeomSpec::point()
            .with_data(data)
            .encode(Channel::X, "a")
            .encode(Channel::Y, "b");
        // The third row has no `a`, so `x` reads the literal "a", which is not a number.
        assert_eq!(render(&geom).elements().count(), 2);
    }

    #[test]
    fn rectangle_width_is_the_x_span() {
        let geom = GeomSpec::rectangle()
            .encode(Channel::X1, 6.0)
            .encode(Channel::X2, 2.0)
            .encode(Channel::Y1, 0.0)
            .encode(Channel::Y2, 5.0);
        let g = render(&geom);
        let rect = g.elements().next().unwrap();
        assert_eq!(rect.attribute("d"), Some("M20,50 L60,50 L60,100 L20,100 Z"));
        assert_eq!(rect.attribute("fill"), Some("transparent"));
        assert_eq!(rect.attribute("stroke"), Some("#000"));
        assert_eq!(rect.attribute("stroke-width"), Some("1"));
    }

    #[test]
    fn rules_span_the_drawing_area() {
        let g = render(&GeomSpec::x_rule().encode(Channel::X, 5.0));
        let rule = g.elements().next().unwrap();
        assert_eq!(rule.attribute("d"), Some("M50,0 L50,100"));
        assert_eq!(rule.attribute("fill"), Some("none"));

        let g = render(&GeomSpec::y_rule().encode(Channel::Y, 5.0));
        assert_eq!(g.elements().next().unwrap().attribute("d"), Some("M0,50 L100,50"));
    }

    #[test]
    fn curve_needs_two_rows() {
        let one = GeomSpec::curve()
            .with_data(vec![Datum::from([("a", 1), ("b", 2)])])
            .encode(Channel::X, "a")
            .encode(Channel::Y, "b");
        let g = render(&one);
        assert_eq!(g.elements().next().unwrap().attribute("d"), Some(""));

        let two = one.with_data(rows());
        let g = render(&two);
        let path = g.elements().next().unwrap();
        assert_eq!(path.attribute("d"), Some("M10,80 L30,20"));
        assert_eq!(path.attribute("fill"), Some("none"));
    }

    #[test]
    fn catmull_curve_is_cubic() {
        let geom = GeomSpec::curve()
            .with_data(rows())
            .encode(Channel::X, "a")
            .encode(Channel::Y, "b")
            .encode(Channel::Curve, "catmull");
        let g = render(&geom);
        let d = g.elements().next().unwrap().attribute("d").unwrap();
        assert!(d.starts_with("M10,80 C"), "{d}");
    }

    #[test]
    fn area_goes_forward_then_back() {
        let data = vec![
            Datum::from([("x", 0), ("lo", 0), ("hi", 5)]),
            Datum::from([("x", 10), ("lo", 0), ("hi", 10)]),
        ];
        let geom = GeomSpec::area()
            .with_data(data)
            .encode(Channel::X1, "x")
            .encode(Channel::X2, "x")
            .encode(Channel::Y1, "hi")
            .encode(Channel::Y2, "lo");
        let g = render(&geom);
        let path = g.elements().next().unwrap();
        assert_eq!(path.attribute("d"), Some("M0,50 L100,0 L100,100 L0,100 Z"));
        assert_eq!(path.attribute("fill"), Some("#000"));
    }

    #[test]
    fn program_runs_before_rendering() {
        let geom = GeomSpec::point()
            .with_data(rows())
            .with_transform(Transform::SelectLast)
            .encode(Channel::X, "a")
            .encode(Channel::Y, "b");
        let g = render(&geom);
        assert_eq!(g.elements().count(), 1);
        assert_eq!(g.elements().next().unwrap().attribute("cx"), Some("30"));
    }
}
