//! Per-bar price cell.
//!
//! A bar that could not be sourced carries [`Price::Unknown`] instead of a
//! numeric value. Missing data is a variant rather than a NaN marker, so it is
//! detected with [`Price::is_unknown`] and never by comparing values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price that is either known or marked as missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Price {
    /// A sourced price.
    Known(f64),
    /// No data for this bar.
    #[default]
    Unknown,
}

impl Price {
    /// Returns `true` if this cell marks missing data.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Price::Unknown)
    }

    /// Returns `true` if this cell carries a sourced price.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !self.is_unknown()
    }

    /// The numeric value, if known.
    #[inline]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Price::Known(v) => Some(*v),
            Price::Unknown => None,
        }
    }
}

/// NaN converts to [`Price::Unknown`]; every other float is a known price.
impl From<f64> for Price {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Price::Unknown
        } else {
            Price::Known(value)
        }
    }
}

impl From<Option<f64>> for Price {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Price::Unknown, Price::from)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Known(v) => write!(f, "{v}"),
            Price::Unknown => f.write_str("unknown"),
        }
    }
}
