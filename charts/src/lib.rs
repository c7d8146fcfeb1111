//! # tq-charts: Time-Series Chart Rendering
//!
//! Presentation layer of techquake: renders analytics tables as
//! labeled SVG line charts, optionally annotated with named event
//! dates. Each render call returns a self-contained [`Chart`] value;
//! nothing is drawn to shared global state, and rendering never feeds
//! data back into the pipeline.

mod chart;
mod svg;

pub use chart::{
    comparison_chart, cumulative_chart, drawdown_chart, line_chart, volatility_chart, Chart,
    ChartSpec,
};
