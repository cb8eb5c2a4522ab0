// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: mappings from data values into range space.
//!
//! Four kinds are provided, selectable by name through [`ScaleKind::from_name`]:
//! - **linear**: a clamped affine map over a continuous domain (with [`ScaleLinear::invert`]),
//! - **discrete** (alias **categorical**): a cyclic lookup from domain values into range values,
//! - **interval**: evenly sized bands over a discrete domain, and
//! - **point**: evenly spaced points over a discrete domain.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use vizjar_core::{Datum, Value, clamp, extent, ticks};

use crate::ScaleError;

/// Scale kinds, as named in the scale registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Continuous linear scale.
    Linear,
    /// Discrete (categorical) lookup scale.
    Discrete,
    /// Discrete band scale.
    Interval,
    /// Discrete point scale.
    Point,
}

impl ScaleKind {
    /// Looks up a scale kind by registry name.
    ///
    /// `categorical` is an alias of `discrete`.
    pub fn from_name(name: &str) -> Result<Self, ScaleError> {
        match name {
            "linear" => Ok(Self::Linear),
            "discrete" | "categorical" => Ok(Self::Discrete),
            "interval" => Ok(Self::Interval),
            "point" => Ok(Self::Point),
            _ => Err(ScaleError::UnknownScale(name.to_string())),
        }
    }

    /// Registry name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Discrete => "discrete",
            Self::Interval => "interval",
            Self::Point => "point",
        }
    }

    /// Returns `true` for kinds mapping a discrete domain.
    pub fn is_discrete(self) -> bool {
        !matches!(self, Self::Linear)
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scale domain.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// A continuous interval `(start, end)`, as authored.
    Continuous(f64, f64),
    /// An ordered list of distinct values.
    Discrete(Vec<Value>),
}

impl Domain {
    /// Infers a continuous domain from the finite numeric values of `field`.
    pub fn infer_continuous(data: &[Datum], field: &str) -> Option<Self> {
        extent(data, |d| d.value(field).as_f64()).map(|(min, max)| Self::Continuous(min, max))
    }

    /// Infers a discrete domain from the distinct values of `field`, in first-seen order.
    pub fn infer_discrete(data: &[Datum], field: &str) -> Self {
        let mut values: Vec<Value> = Vec::new();
        for datum in data {
            let v = datum.value(field);
            if !values.contains(v) {
                values.push(v.clone());
            }
        }
        Self::Discrete(values)
    }
}

impl From<(f64, f64)> for Domain {
    fn from(value: (f64, f64)) -> Self {
        Self::Continuous(value.0, value.1)
    }
}

impl From<Vec<Value>> for Domain {
    fn from(value: Vec<Value>) -> Self {
        Self::Discrete(value)
    }
}

impl<const N: usize> From<[&str; N]> for Domain {
    fn from(value: [&str; N]) -> Self {
        Self::Discrete(value.into_iter().map(Value::from).collect())
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A linear mapping from a continuous domain to a continuous range.
///
/// Inputs are clamped to the domain interval before mapping. A zero-span domain maps every
/// input to `NaN`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extends the domain so it includes zero.
    #[must_use]
    pub fn with_zero(mut self) -> Self {
        self.domain = (self.domain.0.min(0.0), self.domain.1.max(0.0));
        self
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let (lo, hi) = ordered(d0, d1);
        let v = clamp(x, lo, hi);
        r0 + (r1 - r0) * (v - d0) / (d1 - d0)
    }

    /// Maps a value from range space back into domain space.
    ///
    /// Inputs are clamped to the range interval, so reversed ranges (`[height, 0]`) invert
    /// correctly.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let (lo, hi) = ordered(r0, r1);
        let v = clamp(y, lo, hi);
        d0 + (v - r0) * (d1 - d0) / (r1 - r0)
    }

    /// Returns the domain (as authored, after `zero`).
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A cyclic lookup from domain values into range values.
///
/// Domain value `i` maps to `range[i % range.len()]`; values outside the domain map to `None`.
#[derive(Clone, Debug)]
pub struct ScaleDiscrete {
    domain: Vec<Value>,
    index: HashMap<Value, usize>,
    range: Vec<Value>,
}

impl ScaleDiscrete {
    /// Creates a new discrete scale.
    ///
    /// Repeated domain values keep their last position.
    pub fn new(domain: Vec<Value>, range: Vec<Value>) -> Self {
        let index = domain
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Self {
            domain,
            index,
            range,
        }
    }

    /// Maps a domain value to its range value.
    pub fn map(&self, value: &Value) -> Option<&Value> {
        let i = *self.index.get(value)?;
        self.range.get(i % self.range.len().max(1))
    }

    /// Returns the position of a value in the domain.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Returns the domain values in order.
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// Returns the range values in order.
    pub fn range(&self) -> &[Value] {
        &self.range
    }
}

/// Evenly sized bands over a discrete domain.
///
/// With `n` domain values, `step = length / (2 * margin + (n - 1) * spacing + n)` and band `i`
/// starts at `range.0 + step * (margin + i * spacing + i)`.
#[derive(Clone, Debug)]
pub struct ScaleInterval {
    lookup: ScaleDiscrete,
    range: (f64, f64),
    step: f64,
    margin: f64,
    spacing: f64,
}

impl ScaleInterval {
    /// Creates a new interval scale; `margin` and `spacing` are clamped to `[0, 1]`.
    pub fn new(domain: Vec<Value>, range: (f64, f64), margin: f64, spacing: f64) -> Self {
        let margin = clamp(margin, 0.0, 1.0);
        let spacing = clamp(spacing, 0.0, 1.0);
        let n = domain.len() as f64;
        let step = (range.1 - range.0) / (2.0 * margin + (n - 1.0) * spacing + n);
        let positions = (0..domain.len())
            .map(|i| {
                let i = i as f64;
                Value::Number(range.0 + step * (margin + i * spacing + i))
            })
            .collect();
        Self {
            lookup: ScaleDiscrete::new(domain, positions),
            range,
            step,
            margin,
            spacing,
        }
    }

    /// Returns the start of the band of `value`.
    pub fn map(&self, value: &Value) -> Option<f64> {
        self.lookup.map(value).and_then(Value::as_f64)
    }

    /// Returns the band width.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the clamped margin.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the clamped spacing.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Returns the domain values in order.
    pub fn domain(&self) -> &[Value] {
        self.lookup.domain()
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Evenly spaced points over a discrete domain.
///
/// With `n` domain values, `step = length / (2 * margin + n - 1)` and point `i` sits at
/// `range.0 + step * (margin + i)`.
#[derive(Clone, Debug)]
pub struct ScalePoint {
    lookup: ScaleDiscrete,
    range: (f64, f64),
    step: f64,
    margin: f64,
}

impl ScalePoint {
    /// Creates a new point scale; `margin` is clamped to `[0, 1]`.
    pub fn new(domain: Vec<Value>, range: (f64, f64), margin: f64) -> Self {
        let margin = clamp(margin, 0.0, 1.0);
        let n = domain.len() as f64;
        let step = (range.1 - range.0) / (2.0 * margin + n - 1.0);
        let positions = (0..domain.len())
            .map(|i| Value::Number(range.0 + step * (margin + i as f64)))
            .collect();
        Self {
            lookup: ScaleDiscrete::new(domain, positions),
            range,
            step,
            margin,
        }
    }

    /// Returns the position of `value`.
    pub fn map(&self, value: &Value) -> Option<f64> {
        self.lookup.map(value).and_then(Value::as_f64)
    }

    /// Returns the distance between two adjacent points.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the clamped margin.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the domain values in order.
    pub fn domain(&self) -> &[Value] {
        self.lookup.domain()
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A scale instance of any kind.
#[derive(Clone, Debug)]
pub enum Scale {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Discrete scale.
    Discrete(ScaleDiscrete),
    /// Interval scale.
    Interval(ScaleInterval),
    /// Point scale.
    Point(ScalePoint),
}

impl Scale {
    /// Returns the kind of this scale.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Discrete(_) => ScaleKind::Discrete,
            Self::Interval(_) => ScaleKind::Interval,
            Self::Point(_) => ScaleKind::Point,
        }
    }

    /// Returns `true` for scales over a discrete domain.
    pub fn is_discrete(&self) -> bool {
        self.kind().is_discrete()
    }

    /// Maps a data value into range space.
    ///
    /// Linear scales read the value as a number; the discrete kinds look it up in their
    /// domain and return `None` for unknown values.
    pub fn map(&self, value: &Value) -> Option<Value> {
        match self {
            Self::Linear(s) => Some(Value::Number(s.map(value.to_number()))),
            Self::Discrete(s) => s.map(value).cloned(),
            Self::Interval(s) => s.map(value).map(Value::Number),
            Self::Point(s) => s.map(value).map(Value::Number),
        }
    }

    /// Maps a data value to a numeric position, or `None` when it has none.
    pub fn position(&self, value: &Value) -> Option<f64> {
        self.map(value)
            .map(|v| v.to_number())
            .filter(|p| !p.is_nan())
    }

    /// Maps a range position back into the domain (linear scales only).
    pub fn invert(&self, position: f64) -> Option<f64> {
        match self {
            Self::Linear(s) => Some(s.invert(position)),
            _ => None,
        }
    }

    /// Returns the domain.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Linear(s) => Domain::Continuous(s.domain.0, s.domain.1),
            Self::Discrete(s) => Domain::Discrete(s.domain.clone()),
            Self::Interval(s) => Domain::Discrete(s.domain().to_vec()),
            Self::Point(s) => Domain::Discrete(s.domain().to_vec()),
        }
    }

    /// Returns the numeric range, if this scale has one.
    ///
    /// Discrete scales carry a list of range values instead; see [`ScaleDiscrete::range`].
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Linear(s) => Some(s.range),
            Self::Discrete(_) => None,
            Self::Interval(s) => Some(s.range),
            Self::Point(s) => Some(s.range),
        }
    }

    /// Returns the band/point step (interval and point scales).
    pub fn step(&self) -> Option<f64> {
        match self {
            Self::Interval(s) => Some(s.step),
            Self::Point(s) => Some(s.step),
            _ => None,
        }
    }

    /// Returns the margin (interval and point scales).
    pub fn margin(&self) -> Option<f64> {
        match self {
            Self::Interval(s) => Some(s.margin),
            Self::Point(s) => Some(s.margin),
            _ => None,
        }
    }

    /// Returns the spacing (interval scales).
    pub fn spacing(&self) -> Option<f64> {
        match self {
            Self::Interval(s) => Some(s.spacing),
            _ => None,
        }
    }
}

/// A scale specification (kind + domain + options, no range yet).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSpec {
    /// Scale kind.
    pub kind: ScaleKind,
    /// Scale domain.
    pub domain: Domain,
    /// Extend a linear domain to include zero.
    pub zero: bool,
    /// Outer margin of interval and point scales, in steps.
    pub margin: f64,
    /// Spacing between interval bands, in steps.
    pub spacing: f64,
}

impl ScaleSpec {
    /// Creates a new scale spec.
    pub fn new(kind: ScaleKind, domain: impl Into<Domain>) -> Self {
        Self {
            kind,
            domain: domain.into(),
            zero: false,
            margin: 0.0,
            spacing: 0.0,
        }
    }

    /// Creates a scale spec from a registry name.
    pub fn from_name(name: &str, domain: impl Into<Domain>) -> Result<Self, ScaleError> {
        Ok(Self::new(ScaleKind::from_name(name)?, domain))
    }

    /// Creates a linear scale spec.
    pub fn linear(domain: (f64, f64)) -> Self {
        Self::new(ScaleKind::Linear, domain)
    }

    /// Creates a discrete scale spec.
    pub fn discrete(domain: impl Into<Domain>) -> Self {
        Self::new(ScaleKind::Discrete, domain)
    }

    /// Creates an interval scale spec.
    pub fn interval(domain: impl Into<Domain>) -> Self {
        Self::new(ScaleKind::Interval, domain)
    }

    /// Creates a point scale spec.
    pub fn point(domain: impl Into<Domain>) -> Self {
        Self::new(ScaleKind::Point, domain)
    }

    /// Enables or disables extending a linear domain to include zero.
    #[must_use]
    pub fn with_zero(mut self, zero: bool) -> Self {
        self.zero = zero;
        self
    }

    /// Sets the outer margin (interval and point scales).
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the band spacing (interval scales).
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    ///
    /// Discrete scales use the range endpoints as their (cyclic) range values.
    pub fn instantiate(&self, range: (f64, f64)) -> Result<Scale, ScaleError> {
        match (&self.domain, self.kind) {
            (Domain::Continuous(d0, d1), ScaleKind::Linear) => {
                let scale = ScaleLinear::new((*d0, *d1), range);
                Ok(Scale::Linear(if self.zero {
                    scale.with_zero()
                } else {
                    scale
                }))
            }
            (Domain::Discrete(values), ScaleKind::Discrete) => Ok(Scale::Discrete(
                ScaleDiscrete::new(
                    values.clone(),
                    alloc::vec![Value::Number(range.0), Value::Number(range.1)],
                ),
            )),
            (Domain::Discrete(values), ScaleKind::Interval) => Ok(Scale::Interval(
                ScaleInterval::new(values.clone(), range, self.margin, self.spacing),
            )),
            (Domain::Discrete(values), ScaleKind::Point) => Ok(Scale::Point(ScalePoint::new(
                values.clone(),
                range,
                self.margin,
            ))),
            (_, kind) => Err(ScaleError::DomainMismatch {
                kind,
                expected: if kind.is_discrete() {
                    "discrete"
                } else {
                    "continuous"
                },
            }),
        }
    }
}

/// Returns the values an axis over `scale` labels.
///
/// Discrete kinds label every domain value. Linear scales label `ticks(min, max, count)`
/// restricted to the domain interval.
pub fn axis_values(scale: &Scale, count: usize) -> Vec<Value> {
    match scale.domain() {
        Domain::Discrete(values) => values,
        Domain::Continuous(d0, d1) => {
            let (start, end) = ordered(d0, d1);
            ticks(start, end, count, false)
                .into_iter()
                .filter(|v| start <= *v && *v <= end)
                .map(Value::Number)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use super::*;

    fn abc() -> Vec<Value> {
        ["a", "b", "c"].into_iter().map(Value::from).collect()
    }

    #[test]
    fn registry_names() {
        assert_eq!(ScaleKind::from_name("linear"), Ok(ScaleKind::Linear));
        assert_eq!(ScaleKind::from_name("categorical"), Ok(ScaleKind::Discrete));
        assert_eq!(ScaleKind::from_name("discrete"), Ok(ScaleKind::Discrete));
        assert_eq!(ScaleKind::from_name("interval"), Ok(ScaleKind::Interval));
        assert_eq!(ScaleKind::from_name("point"), Ok(ScaleKind::Point));
        assert_eq!(
            ScaleKind::from_name("log"),
            Err(ScaleError::UnknownScale(String::from("log")))
        );
    }

    #[test]
    fn linear_clamps_to_domain() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.map(-5.0), 0.0);
        assert_eq!(s.map(20.0), 100.0);
    }

    #[test]
    fn linear_inverts_reversed_ranges() {
        let s = ScaleLinear::new((0.0, 10.0), (200.0, 0.0));
        assert_eq!(s.map(0.0), 200.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.invert(50.0), 7.5);
        assert_eq!(s.invert(-10.0), 10.0);
    }

    #[test]
    fn linear_zero_extends_domain() {
        let s = ScaleLinear::new((5.0, 10.0), (0.0, 100.0)).with_zero();
        assert_eq!(s.domain(), (0.0, 10.0));
        let s = ScaleLinear::new((-10.0, -5.0), (0.0, 100.0)).with_zero();
        assert_eq!(s.domain(), (-10.0, 0.0));
    }

    #[test]
    fn degenerate_linear_domain_yields_nan() {
        let s = ScaleLinear::new((3.0, 3.0), (0.0, 100.0));
        assert!(s.map(3.0).is_nan());
        assert_eq!(Scale::Linear(s).position(&Value::Number(3.0)), None);
    }

    #[test]
    fn discrete_lookup_cycles_through_range() {
        let s = ScaleDiscrete::new(abc(), alloc::vec![Value::from("red"), Value::from("blue")]);
        assert_eq!(s.map(&Value::from("a")), Some(&Value::from("red")));
        assert_eq!(s.map(&Value::from("c")), Some(&Value::from("red")));
        assert_eq!(s.map(&Value::from("z")), None);
        let empty = ScaleDiscrete::new(abc(), Vec::new());
        assert_eq!(empty.map(&Value::from("a")), None);
    }

    #[test]
    fn interval_bands() {
        let s = ScaleInterval::new(abc(), (0.0, 300.0), 0.0, 0.0);
        assert_eq!(s.step(), 100.0);
        assert_eq!(s.map(&Value::from("b")), Some(100.0));

        let s = ScaleInterval::new(abc(), (0.0, 100.0), 0.5, 0.5);
        // 2 * 0.5 + 2 * 0.5 + 3 = 5 steps.
        assert_eq!(s.step(), 20.0);
        assert_eq!(s.map(&Value::from("a")), Some(10.0));
        assert_eq!(s.map(&Value::from("b")), Some(40.0));

        let s = ScaleInterval::new(abc(), (0.0, 100.0), 3.0, -1.0);
        assert_eq!(s.margin(), 1.0);
        assert_eq!(s.spacing(), 0.0);
    }

    #[test]
    fn point_positions() {
        let s = ScalePoint::new(abc(), (0.0, 100.0), 0.0);
        assert_eq!(s.step(), 50.0);
        assert_eq!(s.map(&Value::from("c")), Some(100.0));

        let s = ScalePoint::new(abc(), (0.0, 100.0), 1.0);
        assert_eq!(s.step(), 25.0);
        assert_eq!(s.map(&Value::from("a")), Some(25.0));
    }

    #[test]
    fn spec_checks_domain_shape() {
        assert!(ScaleSpec::linear((0.0, 1.0)).instantiate((0.0, 1.0)).is_ok());
        assert_eq!(
            ScaleSpec::new(ScaleKind::Linear, abc())
                .instantiate((0.0, 1.0))
                .unwrap_err(),
            ScaleError::DomainMismatch {
                kind: ScaleKind::Linear,
                expected: "continuous",
            }
        );
        assert!(matches!(
            ScaleSpec::point((0.0, 1.0)).instantiate((0.0, 1.0)),
            Err(ScaleError::DomainMismatch {
                kind: ScaleKind::Point,
                ..
            })
        ));
    }

    #[test]
    fn spec_from_name() {
        let spec = ScaleSpec::from_name("categorical", ["x", "y"]).unwrap();
        let scale = spec.instantiate((0.0, 10.0)).unwrap();
        assert!(scale.is_discrete());
        assert_eq!(scale.position(&Value::from("y")), Some(10.0));
        assert!(ScaleSpec::from_name("ordinal", ["x"]).is_err());
    }

    #[test]
    fn axis_values_per_kind() {
        let linear = ScaleSpec::linear((3.0, 97.0)).instantiate((0.0, 1.0)).unwrap();
        let values: Vec<f64> = axis_values(&linear, 5)
            .iter()
            .map(Value::to_number)
            .collect();
        assert_eq!(values, [20.0, 40.0, 60.0, 80.0]);

        let interval = ScaleSpec::interval(["a", "b"]).instantiate((0.0, 1.0)).unwrap();
        assert_eq!(axis_values(&interval, 5), [Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn infer_domains_from_rows() {
        let rows = [
            Datum::new().with("x", 4).with("k", "b"),
            Datum::new().with("x", -1).with("k", "a"),
            Datum::new().with("x", "n/a").with("k", "b"),
        ];
        assert_eq!(
            Domain::infer_continuous(&rows, "x"),
            Some(Domain::Continuous(-1.0, 4.0))
        );
        assert_eq!(
            Domain::infer_discrete(&rows, "k"),
            Domain::Discrete(alloc::vec![Value::from("b"), Value::from("a")])
        );
    }
}
