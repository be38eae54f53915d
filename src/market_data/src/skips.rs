//! Empty-bar accounting over a close column.
//!
//! A bar is empty when its close is [`Price::Unknown`]. [`compute_skips`]
//! walks the column once and reports how many bars are empty, what fraction of
//! the series that is, and the longest unbroken run of empty bars. Nothing is
//! cached: callers recompute after every mutation.

use serde::{Deserialize, Serialize};

use crate::models::price::Price;

/// Completeness statistics of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Skips {
    /// Number of empty bars.
    pub empty_count: usize,
    /// `empty_count / N`, or 0 for an empty series.
    pub empty_fraction: f64,
    /// Length of the longest run of consecutive empty bars.
    pub max_consecutive_empty: usize,
}

impl Skips {
    pub fn is_complete(&self) -> bool {
        self.empty_count == 0
    }
}

impl From<Skips> for (usize, f64, usize) {
    fn from(skips: Skips) -> Self {
        (
            skips.empty_count,
            skips.empty_fraction,
            skips.max_consecutive_empty,
        )
    }
}

/// Computes [`Skips`] for `close` in a single pass.
pub fn compute_skips(close: &[Price]) -> Skips {
    let mut empty_count = 0usize;
    let mut run = 0usize;
    let mut max_run = 0usize;

    for price in close {
        if price.is_unknown() {
            empty_count += 1;
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 0;
        }
    }

    let empty_fraction = if close.is_empty() {
        0.0
    } else {
        empty_count as f64 / close.len() as f64
    };

    Skips {
        empty_count,
        empty_fraction,
        max_consecutive_empty: max_run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(pattern: &str) -> Vec<Price> {
        pattern
            .chars()
            .map(|c| if c == '.' { Price::Unknown } else { Price::Known(1.0) })
            .collect()
    }

    #[test]
    fn empty_series_has_no_skips() {
        assert_eq!(compute_skips(&[]), Skips::default());
    }

    #[test]
    fn complete_series() {
        let skips = compute_skips(&column("xxxxxxxx"));
        assert!(skips.is_complete());
        assert_eq!(<(usize, f64, usize)>::from(skips), (0, 0.0, 0));
    }

    #[test]
    fn longest_run_wins_over_total() {
        let skips = compute_skips(&column("..x...x.x"));
        assert_eq!(skips.empty_count, 6);
        assert_eq!(skips.max_consecutive_empty, 3);
        assert_eq!(skips.empty_fraction, 6.0 / 9.0);
    }

    #[test]
    fn runs_at_both_edges() {
        let skips = compute_skips(&column("....xx..."));
        assert_eq!(skips.empty_count, 7);
        assert_eq!(skips.max_consecutive_empty, 4);
    }

    #[test]
    fn all_empty() {
        let skips = compute_skips(&column("....."));
        assert_eq!(<(usize, f64, usize)>::from(skips), (5, 1.0, 5));
    }
}
