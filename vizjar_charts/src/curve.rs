// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve generators: feed points one at a time, get path commands out.

use kurbo::Point;

use crate::path::Path;

/// Interpolation used to connect consecutive points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight line segments.
    #[default]
    Linear,
    /// Catmull-Rom spline, emitted as cubic Bézier segments.
    CatmullRom,
}

impl CurveKind {
    /// Looks up a curve by name (`catmull` or `catmull-rom`); other names are linear.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catmull" | "catmull-rom" => Self::CatmullRom,
            _ => Self::Linear,
        }
    }
}

/// Catmull-Rom tension used by the curve geoms, before scaling.
const DEFAULT_TENSION: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// No point yet.
    Start,
    /// One point in the window.
    First,
    /// Two or more points: every new point emits a segment.
    Segment,
    /// A run was ended; the next point resumes with a line.
    Ended,
}

/// A point-feeding curve state machine writing into a [`Path`].
///
/// The first point moves the pen. For Catmull-Rom, the endpoints are duplicated so the curve
/// passes through every fed point; [`Curve::end`] flushes the last segment. Feeding points after
/// `end` continues the same subpath with a line to the next point.
#[derive(Debug)]
pub struct Curve<'a> {
    path: &'a mut Path,
    kind: CurveKind,
    tension: f64,
    state: State,
    p0: Point,
    p1: Point,
    p2: Point,
}

impl<'a> Curve<'a> {
    /// Creates a curve of `kind` writing into `path`.
    pub fn new(kind: CurveKind, path: &'a mut Path) -> Self {
        Self::with_tension(kind, path, DEFAULT_TENSION)
    }

    /// Creates a curve with an explicit Catmull-Rom tension in `[0, 1]` (scaled by 12).
    pub fn with_tension(kind: CurveKind, path: &'a mut Path, tension: f64) -> Self {
        Self {
            path,
            kind,
            tension: vizjar_core::clamp(tension, 0.0, 1.0) * 12.0,
            state: State::Start,
            p0: Point::ZERO,
            p1: Point::ZERO,
            p2: Point::ZERO,
        }
    }

    /// Feeds the next point.
    pub fn point(&mut self, p: Point) {
        match self.kind {
            CurveKind::Linear => {
                if self.state == State::Start {
                    self.path.move_to(p);
                } else {
                    self.path.line_to(p);
                }
                self.state = State::Segment;
            }
            CurveKind::CatmullRom => self.catmull_point(p),
        }
    }

    /// Ends the current run of points.
    pub fn end(&mut self) {
        if self.kind == CurveKind::CatmullRom {
            if self.state == State::Segment {
                self.catmull_point(self.p2);
            }
            self.state = State::Ended;
        }
    }

    fn catmull_point(&mut self, p: Point) {
        match self.state {
            State::Start | State::Ended => {
                if self.state == State::Start {
                    self.path.move_to(p);
                } else {
                    self.path.line_to(p);
                }
                self.p2 = p;
                self.state = State::First;
            }
            State::First => self.state = State::Segment,
            State::Segment => {
                let t = self.tension;
                let (p0, p1, p2) = (self.p0, self.p1, self.p2);
                let c1 = Point::new((-p0.x + t * p1.x + p2.x) / t, (-p0.y + t * p1.y + p2.y) / t);
                let c2 = Point::new((p1.x + t * p2.x - p.x) / t, (p1.y + t * p2.y - p.y) / t);
                self.path.curve_to(c1, c2, p2);
            }
        }
        self.p0 = self.p1;
        self.p1 = self.p2;
        self.p2 = p;
    }
}
