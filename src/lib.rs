//! Small time toolkit: millisecond Unix timestamps, UTC calendar conversion,
//! template formatting and parsing, "time ago" phrases, stopwatches, easing
//! curves and a frame-rate locker.
//!
//! ```
//! use sandtime::{date, humanize, time, Timestamp};
//! use sandtime::duration::days;
//!
//! let ts = date(2010, 12, 31) + time(23, 59, 59, 0);
//! assert_eq!(ts.to_string(), "2010-12-31 23:59:59.000");
//! assert_eq!(ts.format("d mmmm yyyy"), "31 December 2010");
//!
//! let parsed = Timestamp::parse_lossy("2010-12-31T23:59:59.003Z");
//! assert_eq!(parsed - ts, 3);
//!
//! assert_eq!(humanize::pretty(-days(14)), "2 weeks ago");
//! ```
//!
//! All values are UTC; durations are `i64` milliseconds.

pub mod calendar;
pub mod clock;
pub mod duration;
pub mod error;
pub mod fps;
pub mod humanize;
pub mod timer;
pub mod tween;

pub use calendar::{date, datetime, time, CalendarFields, Timestamp, CANONICAL_FORMAT};
pub use clock::ClockContext;
pub use duration::{sleep, wink};
pub use error::{Error, MalformedTimestamp, Result, UnknownEasing};
pub use fps::{FrameLocker, FrameLockerConfig};
pub use timer::{Chrono, Looper, Timer};
pub use tween::{Easing, EasingTable};

/// Current time on the process-wide clock.
pub fn now() -> Timestamp {
    clock::process_clock().now()
}

/// Milliseconds since the process-wide clock was first used.
pub fn uptime() -> i64 {
    clock::process_clock().uptime()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_after_2020() {
        assert!(now() > date(2020, 1, 1));
    }

    #[test]
    fn test_uptime_monotonic() {
        let first = uptime();
        let second = uptime();
        assert!(first >= 0);
        assert!(second >= first);
    }

    #[test]
    fn test_now_fields_in_range() {
        let f = now().fields();
        assert!(f.hour() <= 23);
        assert!(f.minute() <= 59);
        assert!(f.second() <= 59);
        assert!((1..=12).contains(&f.month()));
        assert!((1..=31).contains(&f.day()));
    }
}
