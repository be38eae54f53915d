//! A provider serving bars held in memory.
//!
//! Useful for tests, replays and the CLI: raw bars are registered per symbol
//! and every request assembles them onto the requested grid with
//! [`BarSeries::from_bars`].

use async_trait::async_trait;
use indexmap::IndexMap;
use snafu::{OptionExt, ensure};

use crate::{
    models::{bar::Bar, bar_series::BarSeries},
    providers::{
        BarsRequestParams, DataProvider, ProviderError, UnknownSymbolSnafu, ValidationSnafu,
    },
};

#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    bars: IndexMap<String, Vec<Bar>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bars` for `symbol`, appending to any bars already held.
    pub fn insert(&mut self, symbol: impl Into<String>, bars: impl IntoIterator<Item = Bar>) {
        self.bars.entry(symbol.into()).or_default().extend(bars);
    }

    /// Builder-style variant of [`InMemoryProvider::insert`].
    pub fn with_bars(
        mut self,
        symbol: impl Into<String>,
        bars: impl IntoIterator<Item = Bar>,
    ) -> Self {
        self.insert(symbol, bars);
        self
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bars.keys().map(String::as_str)
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let bars = self.bars.get(&params.symbol).context(UnknownSymbolSnafu {
            symbol: params.symbol.clone(),
        })?;
        ensure!(
            params.range.bar_count(params.timeframe) > 0,
            ValidationSnafu {
                message: format!(
                    "timeframe {} is wider than the {}-day range",
                    params.timeframe,
                    params.range.days()
                ),
            }
        );

        Ok(BarSeries::from_bars(
            &params.symbol,
            params.timeframe,
            &params.range,
            bars.iter().cloned(),
        ))
    }
}
