//! Low-level SVG drawing helpers
//!
//! Hand-rolled SVG generation for time-series line charts: geometry,
//! axes and polylines. The chart-level API lives in `chart`.

use chrono::{Datelike, NaiveDate};

pub const WIDTH: i32 = 720;
pub const HEIGHT: i32 = 360;
pub const PADDING: f64 = 42.0;

/// Line colors assigned to ticker columns, cycled in order.
pub const PALETTE: [&str; 5] = ["#348dc1", "#ff9933", "#2ca02c", "#d62728", "#9467bd"];

/// Color for event guide lines.
pub const EVENT_COLOR: &str = "#d62728";

pub fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#
    )
}

pub fn svg_footer() -> &'static str {
    "</svg>"
}

/// Horizontal pixel positions for `len` evenly spaced rows.
pub fn x_positions(len: usize, width: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![width / 2.0];
    }

    let inner_width = width - 2.0 * PADDING;
    (0..len)
        .map(|i| PADDING + inner_width * (i as f64 / (len - 1) as f64))
        .collect()
}

/// Vertical pixel position of `value` within the [min, max] extent.
pub fn scale_value(value: f64, min_v: f64, max_v: f64, height: f64) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return height / 2.0;
    }

    let inner_height = height - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

/// Value extent across a set of optional-cell columns.
///
/// Flat extents are widened so a constant series still renders as a
/// visible line, and `include_zero` pins zero into the range (used by
/// drawdown charts so the peak line stays on screen).
pub fn value_extent(columns: &[&[Option<f64>]], include_zero: bool) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;

    for column in columns {
        for value in column.iter().flatten() {
            if value.is_finite() {
                min_v = min_v.min(*value);
                max_v = max_v.max(*value);
            }
        }
    }

    if include_zero {
        min_v = min_v.min(0.0);
        max_v = max_v.max(0.0);
    }

    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }

    if min_v == max_v {
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 };
        min_v -= adjust;
        max_v += adjust;
    }

    Some((min_v, max_v))
}

/// Draw one column as a polyline, breaking the line at missing cells.
pub fn push_series(
    svg: &mut String,
    cells: &[Option<f64>],
    xs: &[f64],
    extent: (f64, f64),
    height: f64,
    color: &str,
) {
    let (min_v, max_v) = extent;
    let mut run: Vec<(f64, f64)> = Vec::new();

    let mut flush = |run: &mut Vec<(f64, f64)>, svg: &mut String| {
        if run.len() >= 2 {
            let points = run
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points="{points}" />"#
            ));
        }
        run.clear();
    };

    for (i, cell) in cells.iter().enumerate() {
        match cell {
            Some(value) if value.is_finite() => {
                run.push((xs[i], scale_value(*value, min_v, max_v, height)));
            }
            _ => flush(&mut run, svg),
        }
    }
    flush(&mut run, svg);
}

/// Draw a dashed vertical guide at a date position with its label.
pub fn push_event_guide(svg: &mut String, x: f64, height: f64, label: &str) {
    svg.push_str(&format!(
        r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="4 3" />"#,
        y1 = PADDING,
        y2 = height - PADDING,
        color = EVENT_COLOR,
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="{color}" font-size="9">{label}</text>"#,
        y = PADDING - 6.0,
        color = EVENT_COLOR,
    ));
}

/// Draw the horizontal time axis with tick labels.
///
/// Labels one tick per month for short spans and one per year once
/// monthly labels would crowd each other.
pub fn push_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64], width: f64, height: f64) {
    if dates.is_empty() || xs.is_empty() {
        return;
    }

    let axis_y = height - PADDING + 5.0;
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = width - PADDING,
        y = axis_y
    ));

    let months_spanned = (dates[dates.len() - 1].year() - dates[0].year()) * 12
        + dates[dates.len() - 1].month() as i32
        - dates[0].month() as i32;
    let yearly = months_spanned > 18;

    let mut last_tick: Option<(i32, u32)> = None;
    for (idx, date) in dates.iter().enumerate() {
        let key = if yearly {
            (date.year(), 1)
        } else {
            (date.year(), date.month())
        };
        if last_tick == Some(key) {
            continue;
        }
        last_tick = Some(key);

        let x = xs[idx];
        let label = if yearly {
            date.format("%Y").to_string()
        } else {
            date.format("%Y-%m").to_string()
        };

        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
            y1 = PADDING,
            y2 = height - PADDING
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = axis_y + 14.0,
        ));
    }
}

/// Draw horizontal gridlines with value labels on the left edge.
pub fn push_value_axis(svg: &mut String, extent: (f64, f64), width: f64, height: f64) {
    const TICKS: usize = 5;
    let (min_v, max_v) = extent;

    for i in 0..TICKS {
        let value = min_v + (max_v - min_v) * (i as f64 / (TICKS - 1) as f64);
        let y = scale_value(value, min_v, max_v, height);

        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#eeeeee" stroke-width="0.5" />"##,
            x1 = PADDING,
            x2 = width - PADDING,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = PADDING - 4.0,
            y = y + 3.0,
            label = format_value(value),
        ));
    }
}

/// Draw a simple color legend in the upper-left plot corner.
pub fn push_legend(svg: &mut String, entries: &[(String, &str)]) {
    let mut y = PADDING + 14.0;
    let x = PADDING + 10.0;

    for (label, color) in entries {
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="1.5" />"##,
            x1 = x,
            x2 = x + 20.0,
            ly = y - 4.0,
        ));
        svg.push_str(&format!(
            r##"<text x="{tx:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            tx = x + 26.0,
        ));
        y += 16.0;
    }
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}
