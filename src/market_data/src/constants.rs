//! Units and precisions shared across the crate.

/// Timestamps are integer milliseconds since the Unix epoch (UTC).
pub const TIME_UNITS_IN_ONE_SECOND: i64 = 1000;
pub const TIME_UNITS_IN_ONE_DAY: i64 = 24 * 60 * 60 * TIME_UNITS_IN_ONE_SECOND;

/// Significant decimal digits kept for volumes.
pub const VOLUME_PRECISION: i32 = 15;

/// Default file name looked up by the CLI when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "market_data.toml";
