//! Acquisition of gated bar series.
//!
//! [`OhlcvSource`] ties a [`DataProvider`] to a date range and a
//! [`CompletenessGate`]. Every call to [`OhlcvSource::ohlcv`] fetches a fresh
//! series, checks that it sits on the expected grid, and runs the gate once
//! before handing the series to the caller. What the caller does with the
//! series afterwards is not re-checked.

use tracing::info;

use crate::{
    config::MarketDataConfig,
    errors::Error,
    gate::CompletenessGate,
    models::{bar_series::BarSeries, date_range::DateRange, timeframe::TimeFrame},
    providers::{BarsRequestParams, DataProvider, InternalSnafu},
};

pub struct OhlcvSource<P> {
    provider: P,
    range: DateRange,
    gate: CompletenessGate,
}

impl<P: DataProvider> OhlcvSource<P> {
    pub fn new(provider: P, range: DateRange, gate: CompletenessGate) -> Self {
        Self {
            provider,
            range,
            gate,
        }
    }

    /// Builds a source whose gate comes from `config`.
    pub fn from_config(
        provider: P,
        range: DateRange,
        config: &MarketDataConfig,
    ) -> Result<Self, Error> {
        Ok(Self::new(provider, range, config.gate()?))
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn gate(&self) -> CompletenessGate {
        self.gate
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches the series of `symbol` at `timeframe` over the configured range.
    ///
    /// Errors:
    /// - [`Error::Provider`] if the provider fails or returns a series off the
    ///   expected grid
    /// - [`Error::InsufficientData`] if the series violates a gate threshold
    pub async fn ohlcv(&self, symbol: &str, timeframe: TimeFrame) -> Result<BarSeries, Error> {
        let params = BarsRequestParams {
            symbol: symbol.to_string(),
            timeframe,
            range: self.range,
        };
        let series = self.provider.fetch_bars(&params).await?;
        self.check_grid(&params, &series)?;

        let skips = self.gate.check(&series)?;
        info!(
            symbol,
            %timeframe,
            bars = series.len(),
            empty = skips.empty_count,
            "series acquired"
        );
        Ok(series)
    }

    fn check_grid(&self, params: &BarsRequestParams, series: &BarSeries) -> Result<(), Error> {
        let expected_len = params.range.bar_count(params.timeframe);
        let expected_start = params.range.start_millis();
        if series.symbol() != params.symbol
            || series.timeframe() != params.timeframe
            || series.start() != expected_start
            || series.len() != expected_len
        {
            return InternalSnafu {
                message: format!(
                    "expected {} {} x{expected_len} from {expected_start}, got {} {} x{} from {}",
                    params.symbol,
                    params.timeframe,
                    series.symbol(),
                    series.timeframe(),
                    series.len(),
                    series.start(),
                ),
            }
            .fail()
            .map_err(Error::from);
        }
        Ok(())
    }
}
