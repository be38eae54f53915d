use shared_utils::config::ConfigError;
use thiserror::Error;

use crate::{
    gate::InsufficientDataError,
    models::{bar_series::ShapeError, date_range::DateRangeError, timeframe::TimeFrameError},
    providers::ProviderError,
};

/// The unified error type for the `market_data` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Columns of a bar series disagree in length.
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// The acquired series failed the completeness gate.
    #[error("Insufficient data: {0}")]
    InsufficientData(#[from] InsufficientDataError),

    /// An error originating from a data provider.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Date range error: {0}")]
    DateRange(#[from] DateRangeError),

    #[error("Timeframe error: {0}")]
    TimeFrame(#[from] TimeFrameError),
}
