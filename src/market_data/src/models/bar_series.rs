//! A fixed-grid, column-oriented OHLCV series for one symbol and timeframe.
//!
//! The five columns are stored separately and stay aligned by index: bar `i`
//! starts at `start + i * timeframe`. A bar that could not be sourced has an
//! [`Price::Unknown`] close; only the close column decides whether a bar is
//! empty (see [`crate::skips`]).

use std::ops::{Bound, Range, RangeBounds};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
    models::{
        bar::{Bar, normalize_volume},
        date_range::DateRange,
        price::Price,
        timeframe::TimeFrame,
    },
    skips::{Skips, compute_skips},
};

/// Raised when the columns handed to [`BarSeries::new`] disagree in length.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Column `{column}` has {actual} values, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// The five OHLCV columns before they are bound to a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OhlcvColumns {
    pub open: Vec<Price>,
    pub high: Vec<Price>,
    pub low: Vec<Price>,
    pub close: Vec<Price>,
    pub volume: Vec<f64>,
}

impl OhlcvColumns {
    /// `len` empty bars: unknown prices, zero volume.
    pub fn empty(len: usize) -> Self {
        Self {
            open: vec![Price::Unknown; len],
            high: vec![Price::Unknown; len],
            low: vec![Price::Unknown; len],
            close: vec![Price::Unknown; len],
            volume: vec![0.0; len],
        }
    }

    fn check_shape(&self) -> Result<usize, ShapeError> {
        let expected = self.close.len();
        let lengths = [
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("volume", self.volume.len()),
        ];
        for (column, actual) in lengths {
            if actual != expected {
                return Err(ShapeError::ColumnLength {
                    column,
                    expected,
                    actual,
                });
            }
        }
        Ok(expected)
    }
}

/// Represents the bar data of a single symbol over a fixed time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    timeframe: TimeFrame,
    /// Timestamp of bar 0, in milliseconds since the Unix epoch.
    start: i64,
    open: Vec<Price>,
    high: Vec<Price>,
    low: Vec<Price>,
    close: Vec<Price>,
    volume: Vec<f64>,
}

impl BarSeries {
    /// Binds `columns` to the grid starting at `start` (milliseconds).
    ///
    /// Errors:
    /// - [`ShapeError::ColumnLength`] if any column differs in length from `close`.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: TimeFrame,
        start: i64,
        columns: OhlcvColumns,
    ) -> Result<Self, ShapeError> {
        columns.check_shape()?;
        let OhlcvColumns {
            open,
            high,
            low,
            close,
            volume,
        } = columns;
        Ok(Self {
            symbol: symbol.into(),
            timeframe,
            start,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Places provider bars onto the grid of `range`.
    ///
    /// Slots without a bar stay empty. Bars before or after the range, or not
    /// aligned to a bar boundary, are dropped. When two bars share a slot the
    /// later one wins.
    pub fn from_bars<I>(
        symbol: impl Into<String>,
        timeframe: TimeFrame,
        range: &DateRange,
        bars: I,
    ) -> Self
    where
        I: IntoIterator<Item = Bar>,
    {
        let symbol = symbol.into();
        let start = range.start_millis();
        let step = timeframe.as_millis();
        let len = range.bar_count(timeframe);
        let mut columns = OhlcvColumns::empty(len);
        let mut dropped = 0usize;

        for bar in bars {
            let offset = bar.timestamp_millis() - start;
            if offset < 0 || offset % step != 0 || (offset / step) as usize >= len {
                dropped += 1;
                continue;
            }
            let i = (offset / step) as usize;
            columns.open[i] = Price::from(bar.open);
            columns.high[i] = Price::from(bar.high);
            columns.low[i] = Price::from(bar.low);
            columns.close[i] = Price::from(bar.close);
            columns.volume[i] = normalize_volume(bar.volume);
        }

        if dropped > 0 {
            debug!(%symbol, %timeframe, dropped, "dropped bars outside the range grid");
        }

        Self {
            symbol,
            timeframe,
            start,
            open: columns.open,
            high: columns.high,
            low: columns.low,
            close: columns.close,
            volume: columns.volume,
        }
    }

    /// Returns an independent copy: no column storage is shared with `self`.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> TimeFrame {
        self.timeframe
    }

    /// Timestamp of the first bar (milliseconds).
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive end of the grid: `start + len * timeframe` (milliseconds).
    pub fn end(&self) -> i64 {
        self.start + self.len() as i64 * self.timeframe.as_millis()
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Timestamp of bar `index` (milliseconds), if in range.
    pub fn timestamp(&self, index: usize) -> Option<i64> {
        (index < self.len()).then(|| self.start + index as i64 * self.timeframe.as_millis())
    }

    /// Timestamp of bar `index` as a UTC datetime, if in range.
    pub fn datetime(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamp(index)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        let step = self.timeframe.as_millis();
        (0..self.len()).map(move |i| self.start + i as i64 * step)
    }

    pub fn open(&self) -> &[Price] {
        &self.open
    }

    pub fn high(&self) -> &[Price] {
        &self.high
    }

    pub fn low(&self) -> &[Price] {
        &self.low
    }

    pub fn close(&self) -> &[Price] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn open_mut(&mut self) -> &mut [Price] {
        &mut self.open
    }

    pub fn high_mut(&mut self) -> &mut [Price] {
        &mut self.high
    }

    pub fn low_mut(&mut self) -> &mut [Price] {
        &mut self.low
    }

    pub fn close_mut(&mut self) -> &mut [Price] {
        &mut self.close
    }

    pub fn volume_mut(&mut self) -> &mut [f64] {
        &mut self.volume
    }

    /// Index range of the last `n` bars (the whole series if `n > len`).
    pub fn tail(&self, n: usize) -> Range<usize> {
        self.len().saturating_sub(n)..self.len()
    }

    /// Overwrites the close of every bar in `range` with `value`.
    ///
    /// # Panics
    /// If `range` is out of bounds, like slice indexing.
    pub fn fill_close<R: RangeBounds<usize>>(&mut self, range: R, value: Price) {
        self.close[bounds(&range)].fill(value);
    }

    /// Marks every bar in `range` as missing: unknown prices and zero volume.
    ///
    /// # Panics
    /// If `range` is out of bounds, like slice indexing.
    pub fn mark_missing<R: RangeBounds<usize>>(&mut self, range: R) {
        let range = bounds(&range);
        self.open[range].fill(Price::Unknown);
        self.high[range].fill(Price::Unknown);
        self.low[range].fill(Price::Unknown);
        self.close[range].fill(Price::Unknown);
        self.volume[range].fill(0.0);
    }

    /// Empty-bar statistics of the current close column.
    pub fn get_skips(&self) -> Skips {
        compute_skips(&self.close)
    }
}

fn bounds<R: RangeBounds<usize>>(range: &R) -> (Bound<usize>, Bound<usize>) {
    (range.start_bound().cloned(), range.end_bound().cloned())
}
