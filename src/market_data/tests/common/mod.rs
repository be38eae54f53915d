#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use market_data::{
    models::{bar::Bar, date_range::DateRange, timeframe::TimeFrame},
    providers::memory::InMemoryProvider,
};

pub const SYMBOL: &str = "BTCUSDT";

/// 2022-07-01 ..= 2022-08-09: 40 days.
pub fn forty_days() -> DateRange {
    DateRange::from_yyyymmdd(20220701, 20220809).expect("range")
}

pub fn big_timeframe() -> TimeFrame {
    TimeFrame::hours(4).expect("timeframe")
}

pub fn bar_at(timestamp: DateTime<Utc>, i: i64) -> Bar {
    let base = 20_000.0 + i as f64;
    Bar {
        timestamp,
        open: base,
        high: base + 5.0,
        low: base - 5.0,
        close: base + 1.0,
        volume: 1.5,
    }
}

/// One bar for every grid slot of `range`.
pub fn complete_bars(range: &DateRange, timeframe: TimeFrame) -> Vec<Bar> {
    let start = DateTime::<Utc>::from_timestamp_millis(range.start_millis()).expect("start");
    (0..range.bar_count(timeframe) as i64)
        .map(|i| bar_at(start + Duration::milliseconds(i * timeframe.as_millis()), i))
        .collect()
}

pub fn complete_provider() -> InMemoryProvider {
    InMemoryProvider::new().with_bars(SYMBOL, complete_bars(&forty_days(), big_timeframe()))
}
