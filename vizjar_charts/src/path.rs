// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data builder.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Vec2};

/// One SVG path command (absolute coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// `M x,y`
    MoveTo(Point),
    /// `L x,y`
    LineTo(Point),
    /// `H x`
    HorizontalTo(f64),
    /// `V y`
    VerticalTo(f64),
    /// `A rx,ry,angle,large_arc,sweep,x,y`
    ArcTo {
        /// Ellipse radii.
        radii: Vec2,
        /// Rotation of the ellipse relative to the x-axis, in degrees.
        x_rotation: f64,
        /// Pick the large arc.
        large_arc: bool,
        /// Pick the clockwise arc.
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// `Q x1,y1,x,y`
    QuadTo(Point, Point),
    /// `C x1,y1,x2,y2,x,y`
    CurveTo(Point, Point, Point),
    /// `Z`
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M{},{}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L{},{}", p.x, p.y),
            Self::HorizontalTo(x) => write!(f, "H{x}"),
            Self::VerticalTo(y) => write!(f, "V{y}"),
            Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A{},{},{},{},{},{},{}",
                radii.x,
                radii.y,
                x_rotation,
                u8::from(*large_arc),
                u8::from(*sweep),
                to.x,
                to.y
            ),
            Self::QuadTo(c, p) => write!(f, "Q{},{},{},{}", c.x, c.y, p.x, p.y),
            Self::CurveTo(c1, c2, p) => {
                write!(f, "C{},{},{},{},{},{}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
            Self::Close => f.write_str("Z"),
        }
    }
}

/// An append-only sequence of path commands.
///
/// Serializes (via `Display`) to SVG path data with commands separated by a single space:
/// `M0,0 L10,0 Z`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the current point.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.commands.push(PathCommand::MoveTo(p.into()));
    }

    /// Draws a line to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.commands.push(PathCommand::LineTo(p.into()));
    }

    /// Draws a horizontal line to `x`.
    pub fn h_line_to(&mut self, x: f64) {
        self.commands.push(PathCommand::HorizontalTo(x));
    }

    /// Draws a vertical line to `y`.
    pub fn v_line_to(&mut self, y: f64) {
        self.commands.push(PathCommand::VerticalTo(y));
    }

    /// Draws an elliptical arc to `to`.
    pub fn arc_to(
        &mut self,
        radii: impl Into<Vec2>,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: impl Into<Point>,
    ) {
        self.commands.push(PathCommand::ArcTo {
            radii: radii.into(),
            x_rotation,
            large_arc,
            sweep,
            to: to.into(),
        });
    }

    /// Draws a quadratic Bézier curve with control point `c` to `p`.
    pub fn quad_to(&mut self, c: impl Into<Point>, p: impl Into<Point>) {
        self.commands.push(PathCommand::QuadTo(c.into(), p.into()));
    }

    /// Draws a cubic Bézier curve with control points `c1`, `c2` to `p`.
    pub fn curve_to(&mut self, c1: impl Into<Point>, c2: impl Into<Point>, p: impl Into<Point>) {
        self.commands
            .push(PathCommand::CurveTo(c1.into(), c2.into(), p.into()));
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Returns the commands in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns `true` if no command has been added.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Path data for a polyline through `points`, optionally closed.
pub fn polyline(points: &[Point], closed: bool) -> String {
    let mut path = Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        if closed {
            path.close();
        }
    }
    alloc::format!("{path}")
}

/// Path data for a rectangle, with rounded corners when `radius > 0` and the rectangle is at
/// least `2 * radius` wide and tall.
pub fn rectangle(rect: Rect, radius: f64) -> String {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    if radius.is_nan() || radius <= 0.0 || w < 2.0 * radius || h < 2.0 * radius {
        let corners = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ];
        return polyline(&corners, true);
    }
    let r = Vec2::new(radius, radius);
    let mut path = Path::new();
    path.move_to((x + radius, y));
    path.h_line_to(x + w - radius);
    path.arc_to(r, 0.0, false, true, (x + w, y + radius));
    path.v_line_to(y + h - radius);
    path.arc_to(r, 0.0, false, true, (x + w - radius, y + h));
    path.h_line_to(x + radius);
    path.arc_to(r, 0.0, false, true, (x, y + h - radius));
    path.v_line_to(y + radius);
    path.arc_to(r, 0.0, false, true, (x + radius, y));
    path.close();
    alloc::format!("{path}")
}

/// Path data for a circle of radius `radius` around `center`, drawn as two half arcs.
pub fn circle(center: Point, radius: f64) -> String {
    let r = Vec2::new(radius, radius);
    let mut path = Path::new();
    path.move_to((center.x - radius, center.y));
    path.arc_to(r, 0.0, true, true, (center.x + radius, center.y));
    path.arc_to(r, 0.0, true, true, (center.x - radius, center.y));
    path.close();
    alloc::format!("{path}")
}
