//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait: the interface of the fetch
//! layer that turns a (symbol, timeframe, date range) request into a
//! [`BarSeries`] laid out on the fixed grid of that range. Bars the provider
//! could not source are left with an unknown close.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data::models::bar_series::BarSeries;
//! use market_data::providers::{BarsRequestParams, DataProvider, ProviderError};
//!
//! struct NothingProvider;
//!
//! #[async_trait]
//! impl DataProvider for NothingProvider {
//!     async fn fetch_bars(
//!         &self,
//!         params: &BarsRequestParams,
//!     ) -> Result<BarSeries, ProviderError> {
//!         // every slot of the grid is empty
//!         Ok(BarSeries::from_bars(&params.symbol, params.timeframe, &params.range, []))
//!     }
//! }
//! ```

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, date_range::DateRange, timeframe::TimeFrame};

/// Parameters of a single-symbol bars request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// Symbol to request (e.g., `"BTCUSDT"`).
    pub symbol: String,

    /// Width of each bar.
    pub timeframe: TimeFrame,

    /// Calendar days to cover, both ends inclusive.
    pub range: DateRange,
}

/// Trait for fetching a bar series from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the bar series described by `params`.
    ///
    /// Implementations must return a series whose grid starts at
    /// `params.range.start_millis()` and holds
    /// `params.range.bar_count(params.timeframe)` bars.
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError>;
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The provider has no data source for this symbol.
    #[snafu(display("Unknown symbol: {symbol}"))]
    UnknownSymbol {
        symbol: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
