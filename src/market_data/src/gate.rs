//! Completeness gate applied when a series is first handed to a caller.
//!
//! The gate is evaluated exactly once per acquisition. Mutating the series
//! afterwards and calling [`BarSeries::get_skips`] again is a caller-side
//! diagnostic; it never re-triggers the gate.

use shared_utils::config::ConfigError;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{models::bar_series::BarSeries, skips::Skips};

/// The gate rejected a series; carries the violated threshold.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InsufficientDataError {
    #[error("{symbol}: empty bars fraction {observed} exceeds max_empty_bars_fraction {limit}")]
    EmptyBarsFraction {
        symbol: String,
        observed: f64,
        limit: f64,
    },

    #[error(
        "{symbol}: {observed} consecutive empty bars exceed max_empty_bars_consecutive {limit}"
    )]
    EmptyBarsConsecutive {
        symbol: String,
        observed: usize,
        limit: f64,
    },
}

/// Thresholds a freshly assembled series must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletenessGate {
    max_empty_bars_fraction: f64,
    max_empty_bars_consecutive: f64,
}

impl CompletenessGate {
    /// Validates and builds a gate.
    ///
    /// `max_empty_bars_fraction` must lie in `[0, 1]`.
    /// `max_empty_bars_consecutive` must be `>= 0`; a very large value (or
    /// `f64::INFINITY`) disables the run-length check.
    pub fn new(
        max_empty_bars_fraction: f64,
        max_empty_bars_consecutive: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&max_empty_bars_fraction) {
            return Err(ConfigError::invalid(
                "max_empty_bars_fraction",
                format!("{max_empty_bars_fraction} is outside [0, 1]"),
            ));
        }
        if max_empty_bars_consecutive.is_nan() || max_empty_bars_consecutive < 0.0 {
            return Err(ConfigError::invalid(
                "max_empty_bars_consecutive",
                format!("{max_empty_bars_consecutive} must be >= 0"),
            ));
        }
        Ok(Self {
            max_empty_bars_fraction,
            max_empty_bars_consecutive,
        })
    }

    /// Accepts any series.
    pub const fn permissive() -> Self {
        Self {
            max_empty_bars_fraction: 1.0,
            max_empty_bars_consecutive: f64::INFINITY,
        }
    }

    pub fn max_empty_bars_fraction(&self) -> f64 {
        self.max_empty_bars_fraction
    }

    pub fn max_empty_bars_consecutive(&self) -> f64 {
        self.max_empty_bars_consecutive
    }

    /// Checks precomputed statistics. The fraction limit is checked first.
    pub fn evaluate(&self, symbol: &str, skips: &Skips) -> Result<(), InsufficientDataError> {
        if skips.empty_fraction > self.max_empty_bars_fraction {
            return Err(InsufficientDataError::EmptyBarsFraction {
                symbol: symbol.to_string(),
                observed: skips.empty_fraction,
                limit: self.max_empty_bars_fraction,
            });
        }
        if skips.max_consecutive_empty as f64 > self.max_empty_bars_consecutive {
            return Err(InsufficientDataError::EmptyBarsConsecutive {
                symbol: symbol.to_string(),
                observed: skips.max_consecutive_empty,
                limit: self.max_empty_bars_consecutive,
            });
        }
        Ok(())
    }

    /// Computes the skips of `series` once and checks them.
    pub fn check(&self, series: &BarSeries) -> Result<Skips, InsufficientDataError> {
        let skips = series.get_skips();
        match self.evaluate(series.symbol(), &skips) {
            Ok(()) => {
                debug!(
                    symbol = series.symbol(),
                    empty = skips.empty_count,
                    fraction = skips.empty_fraction,
                    consecutive = skips.max_consecutive_empty,
                    "series accepted"
                );
                Ok(skips)
            }
            Err(err) => {
                warn!(error = %err, "series rejected");
                Err(err)
            }
        }
    }
}

impl Default for CompletenessGate {
    fn default() -> Self {
        Self {
            max_empty_bars_fraction: 0.01,
            max_empty_bars_consecutive: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{bar_series::OhlcvColumns, price::Price, timeframe::TimeFrame};

    fn series_with_gaps(len: usize, gaps: &[std::ops::Range<usize>]) -> BarSeries {
        let columns = OhlcvColumns {
            open: vec![Price::Known(1.0); len],
            high: vec![Price::Known(1.0); len],
            low: vec![Price::Known(1.0); len],
            close: vec![Price::Known(1.0); len],
            volume: vec![1.0; len],
        };
        let mut series =
            BarSeries::new("SOLUSDT", TimeFrame::minutes(15).unwrap(), 0, columns).unwrap();
        for gap in gaps {
            series.fill_close(gap.clone(), Price::Unknown);
        }
        series
    }

    #[test]
    fn rejects_fraction_first() {
        let gate = CompletenessGate::new(0.1, 2.0).unwrap();
        let series = series_with_gaps(20, &[0..3]);
        let err = gate.check(&series).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError::EmptyBarsFraction {
                symbol: "SOLUSDT".into(),
                observed: 0.15,
                limit: 0.1,
            }
        );
        assert!(err.to_string().contains("max_empty_bars_fraction"));
    }

    #[test]
    fn rejects_long_runs() {
        let gate = CompletenessGate::new(0.5, 2.0).unwrap();
        let series = series_with_gaps(20, &[4..7]);
        match gate.check(&series) {
            Err(InsufficientDataError::EmptyBarsConsecutive { observed, limit, .. }) => {
                assert_eq!(observed, 3);
                assert_eq!(limit, 2.0);
            }
            other => panic!("expected a run-length rejection, got {other:?}"),
        }
    }

    #[test]
    fn limits_are_inclusive() {
        let gate = CompletenessGate::new(0.2, 2.0).unwrap();
        let series = series_with_gaps(20, &[0..2, 5..7]);
        let skips = gate.check(&series).unwrap();
        assert_eq!(skips.empty_count, 4);
        assert_eq!(skips.empty_fraction, 0.2);
    }

    #[test]
    fn permissive_accepts_everything() {
        let series = series_with_gaps(10, &[0..10]);
        assert!(CompletenessGate::permissive().check(&series).is_ok());
        assert!(CompletenessGate::new(1.0, 1e12).unwrap().check(&series).is_ok());
    }

    #[test]
    fn check_does_not_follow_later_mutation() {
        let gate = CompletenessGate::new(0.0, 0.0).unwrap();
        let mut series = series_with_gaps(10, &[]);
        assert!(gate.check(&series).is_ok());
        series.fill_close(0..5, Price::Unknown);
        // the caller sees the new state, the earlier verdict stands
        assert_eq!(series.get_skips().empty_count, 5);
    }

    #[test]
    fn invalid_thresholds() {
        assert!(CompletenessGate::new(1.5, 1.0).is_err());
        assert!(CompletenessGate::new(-0.1, 1.0).is_err());
        assert!(CompletenessGate::new(f64::NAN, 1.0).is_err());
        assert!(CompletenessGate::new(0.5, -1.0).is_err());
        assert!(CompletenessGate::new(0.5, f64::NAN).is_err());
        assert!(CompletenessGate::new(0.5, f64::INFINITY).is_ok());
    }
}
