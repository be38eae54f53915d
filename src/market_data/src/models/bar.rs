//! Raw time-series bar (OHLCV) as delivered by a data provider.
//!
//! Provider bars are always sourced: a bar that does not exist upstream is
//! simply absent. Gaps only appear once bars are placed on the fixed grid of a
//! [`BarSeries`](crate::models::bar_series::BarSeries).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar interval (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

impl Bar {
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Rounds a volume to [`VOLUME_PRECISION`](crate::constants::VOLUME_PRECISION)
/// significant decimal digits.
///
/// Values whose rounding would leave the finite range (subnormal or near
/// `f64::MAX`) are returned unchanged. Negative volumes keep their sign; the
/// provider is responsible for never producing them.
pub fn normalize_volume(volume: f64) -> f64 {
    if volume == 0.0 || !volume.is_finite() {
        return volume;
    }
    let magnitude = volume.abs().log10().floor() as i32;
    let scale = 10f64.powi(crate::constants::VOLUME_PRECISION - 1 - magnitude);
    if !scale.is_finite() || scale == 0.0 {
        return volume;
    }
    let rounded = (volume * scale).round() / scale;
    if rounded.is_finite() { rounded } else { volume }
}
