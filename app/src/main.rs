//! Drawdown explorer front end
//!
//! Lets a user pick a tech ticker and a date range, fetches daily
//! price history, runs the analytics pipeline and writes the chosen
//! chart (drawdowns by default) as an SVG file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing::info;

use tq_analytics::{
    cumulative_index, daily_returns, drawdowns, extract_price_table, rolling_volatility,
    CumulativeConfig, PriceField, VolatilityConfig,
};
use tq_charts::{cumulative_chart, drawdown_chart, volatility_chart, Chart};
use tq_data::{FetchRequest, PriceProvider, YahooProvider};

/// Tickers offered by the explorer.
const AVAILABLE_TICKERS: [&str; 5] = ["AAPL", "MSFT", "NVDA", "AMZN", "SPOT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    /// Decline from the running peak of the cumulative index
    Drawdown,
    /// Compounded growth index (base 100)
    Cumulative,
    /// Annualized 21-day rolling volatility with event markers
    Volatility,
}

#[derive(Parser, Debug)]
#[clap(name = "tq", about = "Drawdown explorer for a single tech stock")]
struct Args {
    /// Ticker to analyze
    #[clap(short, long, default_value = "AAPL", value_parser = AVAILABLE_TICKERS)]
    ticker: String,

    /// Analysis start date (YYYY-MM-DD)
    #[clap(long, default_value = "2018-01-01")]
    start: NaiveDate,

    /// Analysis end date (YYYY-MM-DD), defaults to today
    #[clap(long)]
    end: Option<NaiveDate>,

    /// Which chart to render
    #[clap(long, value_enum, default_value = "drawdown")]
    chart: ChartKind,

    /// Output path for the rendered SVG
    #[clap(short, long, default_value = "chart.svg")]
    output: PathBuf,
}

/// Major market events marked on volatility charts.
fn market_events() -> BTreeMap<String, NaiveDate> {
    [
        ("COVID-19 crash", (2020, 2, 20)),
        ("2022 rate-hike selloff", (2022, 1, 3)),
        ("SVB collapse", (2023, 3, 10)),
    ]
    .into_iter()
    .filter_map(|(name, (y, m, d))| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| (name.to_string(), date))
    })
    .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let end = args.end.unwrap_or_else(|| Local::now().date_naive());

    if args.start >= end {
        bail!("start date must be earlier than end date");
    }

    let request = FetchRequest::new(vec![args.ticker.clone()], args.start, end)?;
    let provider = YahooProvider::new()?;

    info!(ticker = %args.ticker, start = %args.start, end = %end, "fetching price data");
    let raw = provider.fetch(&request);

    if raw.is_empty() {
        bail!("no data was returned for this ticker and date range");
    }

    let chart = build_chart(&raw, &args.ticker, args.chart)?;
    chart
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Wrote '{}' to {}", chart.title(), args.output.display());
    Ok(())
}

fn build_chart(
    raw: &tq_analytics::RawPriceTable,
    ticker: &str,
    kind: ChartKind,
) -> Result<Chart> {
    let prices = extract_price_table(raw, PriceField::Close)?;
    let returns = daily_returns(&prices);

    let chart = match kind {
        ChartKind::Drawdown => {
            let index = cumulative_index(&returns, &CumulativeConfig::default());
            drawdown_chart(&drawdowns(&index), ticker)
        }
        ChartKind::Cumulative => {
            let index = cumulative_index(&returns, &CumulativeConfig::default());
            cumulative_chart(&index)
        }
        ChartKind::Volatility => {
            let vol = rolling_volatility(&returns, &VolatilityConfig::default());
            volatility_chart(&vol, &market_events())
        }
    };

    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tq_analytics::RawPriceTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_raw() -> RawPriceTable {
        RawPriceTable::single(
            "AAPL".to_string(),
            vec![
                date(2024, 1, 2),
                date(2024, 1, 3),
                date(2024, 1, 4),
                date(2024, 1, 5),
            ],
            vec![PriceField::Close],
            vec![vec![Some(100.0), Some(105.0), Some(95.0), Some(120.0)]],
        )
        .unwrap()
    }

    #[test]
    fn test_build_drawdown_chart() {
        let chart = build_chart(&sample_raw(), "AAPL", ChartKind::Drawdown).unwrap();
        assert!(chart.title().contains("AAPL"));
        assert!(chart.svg().contains("<polyline"));
    }

    #[test]
    fn test_build_cumulative_chart() {
        let chart = build_chart(&sample_raw(), "AAPL", ChartKind::Cumulative).unwrap();
        assert!(chart.title().contains("Cumulative"));
    }

    #[test]
    fn test_missing_field_propagates() {
        let raw = RawPriceTable::single(
            "AAPL".to_string(),
            vec![date(2024, 1, 2)],
            vec![PriceField::Open],
            vec![vec![Some(100.0)]],
        )
        .unwrap();

        assert!(build_chart(&raw, "AAPL", ChartKind::Drawdown).is_err());
    }

    #[test]
    fn test_market_events_in_range() {
        let events = market_events();
        assert!(events.values().all(|d| *d > date(2018, 1, 1)));
    }
}
