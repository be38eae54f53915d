//! Fixed-timeframe OHLCV bar series with empty-bar accounting.
//!
//! A [`BarSeries`](models::bar_series::BarSeries) holds five aligned columns
//! on a fixed time grid. [`BarSeries::get_skips`](models::bar_series::BarSeries::get_skips)
//! reports how many bars are empty, their fraction of the series, and the
//! longest run of consecutive empty bars. An [`OhlcvSource`](source::OhlcvSource)
//! fetches series through a [`DataProvider`](providers::DataProvider) and
//! rejects them with a [`CompletenessGate`](gate::CompletenessGate) when too
//! much data is missing.

pub mod config;
pub mod constants;
pub mod errors;
pub mod gate;
pub mod models;
pub mod providers;
pub mod skips;
pub mod source;

#[cfg(feature = "cli")]
pub mod cli;
