//! Shared helpers for building and converting series.

use chrono::{DateTime, NaiveDate, Utc};
use quotient_types::{Point, Series};

/// Seconds in one UTC day.
pub const DAY_SECS: i64 = 86_400;

/// Convert a millisecond timestamp to whole seconds (floor division).
#[must_use]
pub const fn millis_to_secs(ms: i64) -> i64 {
    ms.div_euclid(1000)
}

/// Unix seconds of 00:00 UTC on `date`.
#[must_use]
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// A flat series of `days + 1` daily points ending exactly at `end`.
///
/// Used for a currency quoted against itself, where every observation is the
/// same constant.
///
/// ```
/// use chrono::DateTime;
/// use quotient_core::daily_flat_series;
///
/// let end = DateTime::from_timestamp(1_000_000, 0).unwrap();
/// let s = daily_flat_series(end, 2, 1.0);
/// let times: Vec<i64> = s.iter().map(|p| p.time).collect();
/// assert_eq!(times, vec![1_000_000 - 172_800, 1_000_000 - 86_400, 1_000_000]);
/// ```
#[must_use]
pub fn daily_flat_series(end: DateTime<Utc>, days: u32, value: f64) -> Series {
    let end = end.timestamp();
    let days = i64::from(days);
    Series::new(
        (0..=days)
            .map(|i| Point::new(end - (days - i) * DAY_SECS, value))
            .collect(),
    )
}
