// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot demos for Vizjar.
//!
//! Writes `vizjar_charts_demo.html`, one section per plot. Set `RUST_LOG=vizjar_charts=debug`
//! (or `trace`) to see rendering and transform logs.

mod html;

use std::error::Error;

use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;
use vizjar_charts::{
    AxisSpec, Channel, Encoding, GeomSpec, PlotSpec, ScaleSpec, interpolate_hsl, parse_color,
};
use vizjar_core::{Datum, Value};
use vizjar_transforms::{AggregateOp, GroupBy, PivotSpec, StackSpec, SummarizeSpec, Transform};

const SALES: &str = r#"[
    {"quarter": 1, "product": "apples", "sales": 12},
    {"quarter": 1, "product": "pears", "sales": 7},
    {"quarter": 1, "product": "plums", "sales": 4},
    {"quarter": 2, "product": "apples", "sales": 15},
    {"quarter": 2, "product": "pears", "sales": 9},
    {"quarter": 2, "product": "plums", "sales": 6},
    {"quarter": 3, "product": "apples", "sales": 11},
    {"quarter": 3, "product": "pears", "sales": 13},
    {"quarter": 3, "product": "plums", "sales": 8},
    {"quarter": 4, "product": "apples", "sales": 18},
    {"quarter": 4, "product": "pears", "sales": 10},
    {"quarter": 4, "product": "plums", "sales": 5}
]"#;

const TEMPERATURES: &str = r#"[
    {"day": 1, "lo": 3, "hi": 9},
    {"day": 2, "lo": 4, "hi": 11},
    {"day": 3, "lo": 2, "hi": 8},
    {"day": 4, "lo": 5, "hi": 14},
    {"day": 5, "lo": 7, "hi": 16},
    {"day": 6, "lo": 6, "hi": 12},
    {"day": 7, "lo": 4, "hi": 10},
    {"day": 8, "lo": 8, "hi": 17},
    {"day": 9, "lo": 9, "hi": 19},
    {"day": 10, "lo": 7, "hi": 15}
]"#;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sales: Vec<Datum> = serde_json::from_str(SALES)?;
    let temperatures: Vec<Datum> = serde_json::from_str(TEMPERATURES)?;
    tracing::info!(
        sales = sales.len(),
        temperatures = temperatures.len(),
        "loaded demo rows"
    );

    let sections = vec![
        scatter_demo(&sales)?,
        stacked_bar_demo(&sales)?,
        summary_demo(&sales)?,
        pivot_demo(&sales)?,
        line_demo(&temperatures)?,
        area_demo(&temperatures)?,
        color_ramp_demo()?,
    ];

    let report = html::render_report("Vizjar plots", &sections);
    std::fs::write("vizjar_charts_demo.html", report)?;
    tracing::info!(sections = sections.len(), "wrote vizjar_charts_demo.html");
    Ok(())
}

fn product_color(product: &Value) -> Value {
    match product.as_str() {
        Some("apples") => "#4c78a8".into(),
        Some("pears") => "#f58518".into(),
        _ => "#54a24b".into(),
    }
}

fn quarter_label(v: &Value) -> String {
    format!("Q{v}")
}

fn scatter_demo(sales: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    let plot = PlotSpec::new(
        AxisSpec::new(ScaleSpec::linear((0.5, 4.5))).with_formatter(quarter_label),
        ScaleSpec::linear((0.0, 20.0)),
    )
    .with_size(360.0, 240.0)
    .with_margin(30.0)
    .with_grid(true)
    .with_geom(
        GeomSpec::point()
            .with_data(sales.to_vec())
            .encode(Channel::X, "quarter")
            .encode(Channel::Y, "sales")
            .encode(Channel::Radius, 4.0)
            .encode(
                Channel::Fill,
                Encoding::compute(|d, _| product_color(d.value("product"))),
            ),
    );
    Ok(html::HtmlSection {
        title: "Scatter",
        description: "Sales per quarter, one point per row, colored by product.",
        svg: plot.to_svg_string()?,
    })
}

fn stacked_bar_demo(sales: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    let bars = GeomSpec::rectangle()
        .with_data(sales.to_vec())
        .with_transform(StackSpec::new("sales").with_groupby(GroupBy::from("quarter")))
        .encode(
            Channel::X1,
            Encoding::compute(|d, _| Value::Number(d.value("quarter").to_number() - 0.35)),
        )
        .encode(
            Channel::X2,
            Encoding::compute(|d, _| Value::Number(d.value("quarter").to_number() + 0.35)),
        )
        .encode(Channel::Y1, "yStart")
        .encode(Channel::Y2, "yEnd")
        .encode(Channel::Radius, 2.0)
        .encode(
            Channel::Fill,
            Encoding::compute(|d, _| product_color(d.value("product"))),
        )
        .encode(Channel::StrokeColor, "#ffffff");
    let plot = PlotSpec::new(
        AxisSpec::new(ScaleSpec::linear((0.5, 4.5))).with_formatter(quarter_label),
        AxisSpec::new(ScaleSpec::linear((0.0, 35.0))).with_grid(true),
    )
    .with_size(360.0, 240.0)
    .with_margin(30.0)
    .with_geom(bars);
    Ok(html::HtmlSection {
        title: "Stacked bars",
        description: "stack(sales, groupby quarter) feeding rounded rectangles.",
        svg: plot.to_svg_string()?,
    })
}

fn summary_demo(sales: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    let summary = SummarizeSpec::new()
        .with_groupby("product")
        .with_field_as("sales", AggregateOp::Mean, "mean")
        .with_field_as("sales", AggregateOp::Max, "max");
    let products = ScaleSpec::point(["apples", "pears", "plums"]).with_margin(0.5);
    let plot = PlotSpec::new(products, ScaleSpec::linear((0.0, 20.0)))
        .with_size(360.0, 240.0)
        .with_margin(30.0)
        .with_grid(true)
        .with_geom(
            GeomSpec::line()
                .with_data(sales.to_vec())
                .with_transform(summary.clone())
                .encode(Channel::X1, "product")
                .encode(Channel::X2, "product")
                .encode(Channel::Y1, 0.0)
                .encode(Channel::Y2, "max")
                .encode(Channel::StrokeColor, "#999999"),
        )
        .with_geom(
            GeomSpec::point()
                .with_data(sales.to_vec())
                .with_transform(summary.clone())
                .encode(Channel::X, "product")
                .encode(Channel::Y, "mean")
                .encode(Channel::Radius, 5.0),
        )
        .with_geom(
            GeomSpec::text()
                .with_data(sales.to_vec())
                .with_transform(summary)
                .encode(Channel::X, "product")
                .encode(Channel::Y, "max")
                .encode(Channel::Text, "max")
                .encode(Channel::Baseline, "baseline")
                .encode(Channel::Size, 11.0),
        );
    Ok(html::HtmlSection {
        title: "Summaries",
        description: "summarize(mean, max) per product on a point scale: lines to the max, dots at the mean.",
        svg: plot.to_svg_string()?,
    })
}

fn pivot_demo(sales: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    // One row per quarter with a column per product, then the best quarter for apples.
    let pivot = PivotSpec::new("product", "sales")?.with_groupby("quarter");
    let plot = PlotSpec::new(
        AxisSpec::new(ScaleSpec::linear((0.5, 4.5))).with_formatter(quarter_label),
        ScaleSpec::linear((0.0, 20.0)),
    )
    .with_size(360.0, 240.0)
    .with_margin(30.0)
    .with_geom(
        GeomSpec::curve()
            .with_data(sales.to_vec())
            .with_transform(pivot.clone())
            .encode(Channel::X, "quarter")
            .encode(Channel::Y, "pears")
            .encode(Channel::StrokeColor, "#f58518"),
    )
    .with_geom(
        GeomSpec::curve()
            .with_data(sales.to_vec())
            .with_transform(pivot.clone())
            .encode(Channel::X, "quarter")
            .encode(Channel::Y, "plums")
            .encode(Channel::StrokeColor, "#54a24b"),
    )
    .with_geom(
        GeomSpec::x_rule()
            .with_data(sales.to_vec())
            .with_transform(pivot)
            .with_transform(Transform::select_max("apples"))
            .encode(Channel::X, "quarter")
            .encode(Channel::StrokeColor, "#4c78a8"),
    );
    Ok(html::HtmlSection {
        title: "Pivot",
        description: "pivot(product, sales) by quarter: pear and plum lines, a rule at the best apple quarter.",
        svg: plot.to_svg_string()?,
    })
}

fn line_demo(temperatures: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    let plot = PlotSpec::new(
        ScaleSpec::linear((1.0, 10.0)),
        ScaleSpec::linear((0.0, 20.0)),
    )
    .with_size(360.0, 240.0)
    .with_margin(30.0)
    .with_grid(true)
    .with_geom(
        GeomSpec::curve()
            .with_data(temperatures.to_vec())
            .encode(Channel::X, "day")
            .encode(Channel::Y, "hi")
            .encode(Channel::Curve, "catmull")
            .encode(Channel::StrokeColor, "#e45756")
            .encode(Channel::StrokeWidth, 2.0),
    )
    .with_geom(
        GeomSpec::y_rule()
            .with_data(temperatures.to_vec())
            .with_transform(
                SummarizeSpec::new().with_field_as("hi", AggregateOp::Median, "median"),
            )
            .encode(Channel::Y, "median")
            .encode(Channel::StrokeColor, "#999999"),
    );
    Ok(html::HtmlSection {
        title: "Catmull-Rom line",
        description: "Daily highs through a Catmull-Rom curve, with a rule at the median.",
        svg: plot.to_svg_string()?,
    })
}

fn area_demo(temperatures: &[Datum]) -> Result<html::HtmlSection, Box<dyn Error>> {
    let plot = PlotSpec::new(
        ScaleSpec::linear((1.0, 10.0)),
        ScaleSpec::linear((0.0, 20.0)),
    )
    .with_size(360.0, 240.0)
    .with_margin(30.0)
    .with_geom(
        GeomSpec::area()
            .with_data(temperatures.to_vec())
            .encode(Channel::X1, "day")
            .encode(Channel::X2, "day")
            .encode(Channel::Y1, "hi")
            .encode(Channel::Y2, "lo")
            .encode(Channel::Fill, "#c6dbef")
            .encode(Channel::StrokeColor, "#3182bd"),
    );
    Ok(html::HtmlSection {
        title: "Area",
        description: "Daily temperature band: forward along the highs, back along the lows.",
        svg: plot.to_svg_string()?,
    })
}

fn color_ramp_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let start = parse_color("steelblue")?;
    let end = parse_color("#fdae6b")?;
    let ramp = interpolate_hsl(start, end);
    let steps: Vec<Datum> = (0..10).map(|i| Datum::new().with("i", i)).collect();
    // Tick labels and lines in a transparent paint, so only the swatches show.
    let hidden = |scale| AxisSpec::new(scale).with_tick_color(css::TRANSPARENT);
    let plot = PlotSpec::new(
        hidden(ScaleSpec::linear((-0.5, 9.5))),
        hidden(ScaleSpec::linear((0.0, 1.0))),
    )
    .with_size(360.0, 80.0)
    .with_geom(
        GeomSpec::circle()
            .with_data(steps)
            .encode(Channel::X, "i")
            .encode(Channel::Y, 0.5)
            .encode(Channel::Radius, 15.0)
            .encode(
                Channel::Fill,
                Encoding::compute(move |d, _| {
                    Value::Text(ramp(d.value("i").to_number() / 9.0).to_string())
                }),
            )
            .encode(Channel::StrokeColor, "none"),
    );
    Ok(html::HtmlSection {
        title: "HSL ramp",
        description: "interpolate_hsl(steelblue, #fdae6b) sampled at ten steps.",
        svg: plot.to_svg_string()?,
    })
}
