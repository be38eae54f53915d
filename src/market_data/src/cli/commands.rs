use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    config::{MarketDataConfig, load_config_path},
    constants::CONFIG_FILE_NAME,
    models::{bar::Bar, date_range::DateRange, timeframe::TimeFrame},
    providers::{BarsRequestParams, DataProvider, memory::InMemoryProvider},
    skips::Skips,
};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (market_data.toml); defaults to ./market_data.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report empty bars of a series and check it against the configured thresholds
    Skips {
        /// JSON file holding an array of bars for the symbol
        #[arg(long)]
        bars: PathBuf,

        /// Symbol the bars belong to (e.g. "BTCUSDT")
        #[arg(long)]
        symbol: String,

        /// Bar width: 5m, 1h, 1D, 1W
        #[arg(long, default_value = "1h")]
        timeframe: TimeFrame,

        /// First day of the range, YYYYMMDD
        #[arg(long)]
        from: u32,

        /// Last day of the range (inclusive), YYYYMMDD
        #[arg(long)]
        to: u32,
    },
}

#[derive(Debug, Serialize)]
pub struct SkipsReport {
    pub symbol: String,
    pub timeframe: String,
    pub bars: usize,
    #[serde(flatten)]
    pub skips: Skips,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

/// Loads the explicit config file, else `./market_data.toml` if present, else defaults.
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<MarketDataConfig> {
    let fallback = Path::new(CONFIG_FILE_NAME);
    let config = match path {
        Some(path) => load_config_path(path)?,
        None if fallback.exists() => load_config_path(fallback)?,
        None => {
            let mut config = MarketDataConfig::default();
            config.apply_env()?;
            config
        }
    };
    Ok(config)
}

pub async fn run_skips(
    config: &MarketDataConfig,
    bars_path: &Path,
    symbol: &str,
    timeframe: TimeFrame,
    range: DateRange,
) -> anyhow::Result<SkipsReport> {
    let gate = config.gate()?;
    let text = std::fs::read_to_string(bars_path)
        .with_context(|| format!("read bars file {}", bars_path.display()))?;
    let bars: Vec<Bar> = serde_json::from_str(&text)
        .with_context(|| format!("parse bars file {}", bars_path.display()))?;

    let provider = InMemoryProvider::new().with_bars(symbol, bars);
    let params = BarsRequestParams {
        symbol: symbol.to_string(),
        timeframe,
        range,
    };
    let series = provider.fetch_bars(&params).await?;
    let skips = series.get_skips();
    let verdict = gate.evaluate(symbol, &skips);

    Ok(SkipsReport {
        symbol: symbol.to_string(),
        timeframe: timeframe.to_string(),
        bars: series.len(),
        skips,
        accepted: verdict.is_ok(),
        rejection: verdict.err().map(|e| e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[tokio::test]
    async fn reports_and_rejects() {
        let start = Utc.with_ymd_and_hms(2022, 7, 1, 0, 0, 0).unwrap();
        // 24 hourly bars with hours 10..14 missing
        let bars: Vec<Bar> = (0..24)
            .filter(|h| !(10..14).contains(h))
            .map(|h| Bar {
                timestamp: start + Duration::hours(h),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 1.0,
            })
            .collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&bars).unwrap()).unwrap();

        let range = DateRange::from_yyyymmdd(20220701, 20220701).unwrap();
        let timeframe = TimeFrame::hours(1).unwrap();

        let strict = MarketDataConfig {
            max_empty_bars_fraction: 0.5,
            max_empty_bars_consecutive: 3.0,
        };
        let report = run_skips(&strict, file.path(), "BTCUSDT", timeframe, range)
            .await
            .unwrap();
        assert_eq!(report.bars, 24);
        assert_eq!(report.skips.empty_count, 4);
        assert_eq!(report.skips.max_consecutive_empty, 4);
        assert!(!report.accepted);
        let rejection = report.rejection.as_deref().unwrap();
        assert!(rejection.contains("max_empty_bars_consecutive"));

        let relaxed = MarketDataConfig {
            max_empty_bars_fraction: 1.0,
            max_empty_bars_consecutive: 1e12,
        };
        let report = run_skips(&relaxed, file.path(), "BTCUSDT", timeframe, range)
            .await
            .unwrap();
        assert!(report.accepted);
        assert_eq!(report.skips.empty_fraction, 4.0 / 24.0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["empty_count"], 4);
        assert!(json.get("rejection").is_none());
    }
}
