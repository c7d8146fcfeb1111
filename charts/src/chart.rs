//! Chart objects and presets
//!
//! Every render call returns an explicit [`Chart`] value holding a
//! complete SVG document; there is no shared drawing surface mutated
//! across calls. Presets mirror the analysis views the front end
//! offers: cumulative growth, ticker comparison, rolling volatility
//! with event markers, and single-ticker drawdowns.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use chrono::NaiveDate;

use tq_analytics::TimeTable;

use crate::svg;

/// A rendered time-series chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    title: String,
    svg: String,
}

impl Chart {
    /// Chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The complete SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Write the SVG document to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        std::fs::write(path, &self.svg)
    }
}

/// Labeling and annotation options for a chart.
#[derive(Debug, Clone, Default)]
pub struct ChartSpec {
    /// Title drawn above the plot area
    pub title: String,

    /// Y-axis description drawn along the left edge
    pub y_label: String,

    /// Named event dates drawn as dashed vertical guides; events
    /// outside the table's date range are silently skipped
    pub events: BTreeMap<String, NaiveDate>,
}

impl ChartSpec {
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_y_label<S: Into<String>>(mut self, label: S) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_events(mut self, events: BTreeMap<String, NaiveDate>) -> Self {
        self.events = events;
        self
    }
}

/// Render every column of a table as a labeled time-series line chart.
///
/// An empty table renders an empty plot area rather than failing; the
/// presentation layer has no computational contract beyond drawing
/// what it is given.
pub fn line_chart(table: &TimeTable, spec: &ChartSpec) -> Chart {
    render(table, spec, false)
}

/// Cumulative growth index preset.
pub fn cumulative_chart(table: &TimeTable) -> Chart {
    let spec = ChartSpec::default()
        .with_title("Cumulative Returns (Indexed to 100)")
        .with_y_label("Cumulative Returns");
    render(table, &spec, false)
}

/// Cumulative growth comparison for a subset of tickers.
pub fn comparison_chart(table: &TimeTable, tickers: &[&str]) -> Chart {
    let spec = ChartSpec::default()
        .with_title("Stock Performance Comparison")
        .with_y_label("Cumulative Returns");
    render(&table.select_tickers(tickers), &spec, false)
}

/// Rolling volatility preset with named event markers.
pub fn volatility_chart(table: &TimeTable, events: &BTreeMap<String, NaiveDate>) -> Chart {
    let spec = ChartSpec::default()
        .with_title("21-Day Rolling Volatility with Major Events")
        .with_y_label("Annualised Volatility")
        .with_events(events.clone());
    render(table, &spec, false)
}

/// Single-ticker drawdown preset used by the front end.
pub fn drawdown_chart(table: &TimeTable, ticker: &str) -> Chart {
    let spec = ChartSpec::default()
        .with_title(format!("Drawdowns Over Time - {ticker}"))
        .with_y_label("Drawdown (fraction below peak)");
    // Zero is the running-peak line; keep it in frame
    render(&table.select_tickers(&[ticker]), &spec, true)
}

fn render(table: &TimeTable, spec: &ChartSpec, include_zero: bool) -> Chart {
    let width = f64::from(svg::WIDTH);
    let height = f64::from(svg::HEIGHT);

    let mut body = svg::svg_header(svg::WIDTH, svg::HEIGHT);
    body.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="12" fill="#333">{title}</text>"##,
        x = width / 2.0,
        y = svg::PADDING / 2.0,
        title = spec.title,
    ));

    let columns: Vec<&[Option<f64>]> = (0..table.num_columns())
        .map(|i| table.column(i))
        .collect();

    if let Some(extent) = svg::value_extent(&columns, include_zero) {
        let xs = svg::x_positions(table.num_rows(), width);

        svg::push_value_axis(&mut body, extent, width, height);
        svg::push_time_axis(&mut body, table.dates(), &xs, width, height);

        let mut legend = Vec::with_capacity(table.num_columns());
        for (idx, cells) in columns.iter().enumerate() {
            let color = svg::PALETTE[idx % svg::PALETTE.len()];
            svg::push_series(&mut body, cells, &xs, extent, height, color);
            legend.push((table.tickers()[idx].clone(), color));
        }

        for (name, date) in &spec.events {
            if let Some(x) = event_position(table.dates(), &xs, *date) {
                svg::push_event_guide(&mut body, x, height, name);
            }
        }

        if !spec.y_label.is_empty() {
            body.push_str(&format!(
                r##"<text x="10" y="{y:.2}" transform="rotate(-90 10 {y:.2})" text-anchor="middle" fill="#333">{label}</text>"##,
                y = height / 2.0,
                label = spec.y_label,
            ));
        }

        if table.num_columns() > 1 {
            svg::push_legend(&mut body, &legend);
        }
    }

    body.push_str(svg::svg_footer());

    Chart {
        title: spec.title.clone(),
        svg: body,
    }
}

/// Pixel position of an event date, or `None` when it falls outside
/// the table's date range. Events between trading days snap to the
/// first row on or after the event.
fn event_position(dates: &[NaiveDate], xs: &[f64], event: NaiveDate) -> Option<f64> {
    let first = *dates.first()?;
    let last = *dates.last()?;
    if event < first || event > last {
        return None;
    }

    dates
        .iter()
        .position(|d| *d >= event)
        .and_then(|idx| xs.get(idx).copied())
}
