//! Duration algebra.
//!
//! Every duration in this crate is a signed `i64` count of milliseconds. The
//! constructors below scale a count of some unit into milliseconds; the `to_*`
//! functions go the other way and return `f64` so fractional results survive.

use std::time::Duration;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Length of a tropical year in days.
pub const DAYS_PER_YEAR: f64 = 365.242190402;

const MS_PER_YEAR: f64 = DAYS_PER_YEAR * MS_PER_DAY as f64;

/// Truncates toward zero.
pub fn nanoseconds(n: i64) -> i64 {
    n / 1_000_000
}

/// Truncates toward zero.
pub fn microseconds(n: i64) -> i64 {
    n / 1_000
}

pub fn milliseconds(n: i64) -> i64 {
    n
}

pub fn seconds(n: i64) -> i64 {
    n * MS_PER_SECOND
}

pub fn minutes(n: i64) -> i64 {
    n * MS_PER_MINUTE
}

pub fn hours(n: i64) -> i64 {
    n * MS_PER_HOUR
}

pub fn days(n: i64) -> i64 {
    n * MS_PER_DAY
}

pub fn weeks(n: i64) -> i64 {
    n * MS_PER_WEEK
}

/// Tropical years, rounded to the nearest millisecond.
pub fn years(n: i64) -> i64 {
    (n as f64 * MS_PER_YEAR).round() as i64
}

pub fn to_nanoseconds(ms: i64) -> f64 {
    ms as f64 * 1_000_000.0
}

pub fn to_microseconds(ms: i64) -> f64 {
    ms as f64 * 1_000.0
}

pub fn to_milliseconds(ms: i64) -> f64 {
    ms as f64
}

pub fn to_seconds(ms: i64) -> f64 {
    ms as f64 / MS_PER_SECOND as f64
}

pub fn to_minutes(ms: i64) -> f64 {
    ms as f64 / MS_PER_MINUTE as f64
}

pub fn to_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}

pub fn to_days(ms: i64) -> f64 {
    ms as f64 / MS_PER_DAY as f64
}

pub fn to_weeks(ms: i64) -> f64 {
    ms as f64 / MS_PER_WEEK as f64
}

pub fn to_years(ms: i64) -> f64 {
    ms as f64 / MS_PER_YEAR
}

/// Blocks the calling thread for at least `ms` milliseconds.
/// Non-positive values return immediately.
pub fn sleep(ms: i64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// Sleeps for the shortest lapse the scheduler grants.
pub fn wink() {
    std::thread::sleep(Duration::from_micros(1));
}
