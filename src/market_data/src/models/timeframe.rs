//! Bar width expressed as amount × unit.
//!
//! Every unit has a fixed width in milliseconds, so a [`TimeFrame`] maps a
//! bar index to a timestamp with plain arithmetic:
//! `start + index * timeframe.as_millis()`.
//!
//! ```
//! use market_data::models::timeframe::{TimeFrame, TimeFrameUnit};
//!
//! let tf: TimeFrame = "4h".parse().unwrap();
//! assert_eq!(tf.unit(), TimeFrameUnit::Hour);
//! assert_eq!(tf.as_millis(), 4 * 60 * 60 * 1000);
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TIME_UNITS_IN_ONE_SECOND;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeFrameUnit {
    /// Width of one unit in milliseconds.
    pub const fn millis(self) -> i64 {
        let seconds = match self {
            TimeFrameUnit::Minute => 60,
            TimeFrameUnit::Hour => 60 * 60,
            TimeFrameUnit::Day => 24 * 60 * 60,
            TimeFrameUnit::Week => 7 * 24 * 60 * 60,
        };
        seconds * TIME_UNITS_IN_ONE_SECOND
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFrame {
    amount: NonZeroU32,
    unit: TimeFrameUnit,
}

impl TimeFrame {
    pub const fn new(amount: NonZeroU32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    /// Builds a timeframe from a raw amount, rejecting zero.
    pub fn try_new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        let amount = NonZeroU32::new(amount).ok_or_else(|| TimeFrameError::InvalidAmount {
            unit,
            message: "amount must be > 0".into(),
        })?;
        Ok(Self::new(amount, unit))
    }

    pub fn minutes(amount: u32) -> Result<Self, TimeFrameError> {
        Self::try_new(amount, TimeFrameUnit::Minute)
    }

    pub fn hours(amount: u32) -> Result<Self, TimeFrameError> {
        Self::try_new(amount, TimeFrameUnit::Hour)
    }

    pub fn days(amount: u32) -> Result<Self, TimeFrameError> {
        Self::try_new(amount, TimeFrameUnit::Day)
    }

    pub fn weeks(amount: u32) -> Result<Self, TimeFrameError> {
        Self::try_new(amount, TimeFrameUnit::Week)
    }

    pub const fn amount(&self) -> NonZeroU32 {
        self.amount
    }

    pub const fn unit(&self) -> TimeFrameUnit {
        self.unit
    }

    /// Duration of one bar in milliseconds (always > 0).
    pub const fn as_millis(&self) -> i64 {
        self.amount.get() as i64 * self.unit.millis()
    }
}

/// `"5m"`, `"1h"`, `"1D"`, `"1W"`
impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = match self.unit {
            TimeFrameUnit::Minute => "m",
            TimeFrameUnit::Hour => "h",
            TimeFrameUnit::Day => "D",
            TimeFrameUnit::Week => "W",
        };
        write!(f, "{}{u}", self.amount.get())
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(split) = s.find(|c: char| !c.is_ascii_digit()) else {
            return Err(TimeFrameError::InvalidInput {
                message: format!("missing unit in timeframe `{s}`"),
            });
        };
        let (digits, unit) = s.split_at(split);
        let amount: u32 = digits.parse().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("bad amount in timeframe `{s}`"),
        })?;
        let unit = match unit {
            "m" | "min" => TimeFrameUnit::Minute,
            "h" | "H" => TimeFrameUnit::Hour,
            "d" | "D" => TimeFrameUnit::Day,
            "w" | "W" => TimeFrameUnit::Week,
            _ => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("unknown timeframe unit `{unit}`"),
                });
            }
        };
        Self::try_new(amount, unit)
    }
}
