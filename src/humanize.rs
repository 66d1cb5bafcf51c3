//! Natural-language relative time: "5 days ago", "a minute from now".
//!
//! Buckets are computed from whole seconds of the absolute offset. Day-based
//! buckets use a floor of `secs / 86400`; week, month and year counts round up,
//! with a month taken as 31 days and a year as 365.

use std::fmt;

use crate::calendar::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Past,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    RightNow,
    ASecond,
    Seconds(u64),
    AMinute,
    Minutes(u64),
    AnHour,
    Hours(u64),
    AdjacentDay,
    Days(u64),
    Weeks(u64),
    AMonth,
    Months(u64),
    AYear,
    Years(u64),
}

impl Bucket {
    fn of(delta_ms: i64) -> Self {
        let secs = delta_ms.unsigned_abs() / 1_000;
        let day_diff = secs / 86_400;

        if day_diff == 0 {
            return match secs {
                0 => Bucket::RightNow,
                1 => Bucket::ASecond,
                2..=59 => Bucket::Seconds(secs),
                60..=119 => Bucket::AMinute,
                120..=3_599 => Bucket::Minutes(secs / 60),
                3_600..=7_199 => Bucket::AnHour,
                _ => Bucket::Hours(secs / 3_600),
            };
        }

        match day_diff {
            1 => Bucket::AdjacentDay,
            2..=13 => Bucket::Days(day_diff),
            14..=30 => Bucket::Weeks(day_diff.div_ceil(7)),
            31..=61 => Bucket::AMonth,
            62..=364 => Bucket::Months(day_diff.div_ceil(31)),
            365..=729 => Bucket::AYear,
            _ => Bucket::Years(day_diff.div_ceil(365)),
        }
    }

    fn phrase(self, direction: Direction) -> String {
        match (self, direction) {
            (Bucket::RightNow, _) => "right now".to_string(),
            (Bucket::AdjacentDay, Direction::Past) => "yesterday".to_string(),
            (Bucket::AdjacentDay, Direction::Future) => "tomorrow".to_string(),
            (_, Direction::Past) => format!("{} ago", Span(self)),
            (_, Direction::Future) => format!("{} from now", Span(self)),
        }
    }
}

/// The quantity part of a phrase, e.g. "3 weeks" or "an hour".
struct Span(Bucket);

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Bucket::ASecond => f.write_str("a second"),
            Bucket::Seconds(n) => write!(f, "{} seconds", n),
            Bucket::AMinute => f.write_str("a minute"),
            Bucket::Minutes(n) => write!(f, "{} minutes", n),
            Bucket::AnHour => f.write_str("an hour"),
            Bucket::Hours(n) => write!(f, "{} hours", n),
            Bucket::AdjacentDay => f.write_str("a day"),
            Bucket::Days(n) => write!(f, "{} days", n),
            Bucket::Weeks(n) => write!(f, "{} weeks", n),
            Bucket::AMonth => f.write_str("a month"),
            Bucket::Months(n) => write!(f, "{} months", n),
            Bucket::AYear => f.write_str("a year"),
            Bucket::Years(n) => write!(f, "{} years", n),
            Bucket::RightNow => f.write_str("0 seconds"),
        }
    }
}

/// Phrase for a signed offset in milliseconds: negative reads as past,
/// zero or positive as future.
pub fn pretty(delta_ms: i64) -> String {
    if delta_ms < 0 {
        ago(delta_ms)
    } else {
        from_now(delta_ms)
    }
}

/// Past-tense phrase for the magnitude of `ms`, whatever its sign.
pub fn ago(ms: i64) -> String {
    Bucket::of(ms).phrase(Direction::Past)
}

/// Future-tense phrase for the magnitude of `ms`, whatever its sign.
pub fn from_now(ms: i64) -> String {
    Bucket::of(ms).phrase(Direction::Future)
}

/// Phrase describing `target` as seen from `reference`.
pub fn relative_to(target: Timestamp, reference: Timestamp) -> String {
    pretty(target - reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::{days, hours, minutes, seconds, weeks};

    #[test]
    fn test_right_now() {
        assert_eq!(pretty(seconds(0)), "right now");
        assert_eq!(pretty(999), "right now");
        assert_eq!(pretty(-999), "right now");
        assert_eq!(ago(0), "right now");
    }

    #[test]
    fn test_pinned_phrases() {
        assert_eq!(pretty(seconds(-1)), "a second ago");
        assert_eq!(pretty(seconds(1)), "a second from now");
        assert_eq!(pretty(seconds(-60)), "a minute ago");
        assert_eq!(pretty(seconds(-61)), "a minute ago");
        assert_eq!(pretty(hours(-24)), "yesterday");
        assert_eq!(pretty(days(1)), "tomorrow");
        assert_eq!(pretty(days(-14)), "2 weeks ago");
        assert_eq!(pretty(days(-32)), "a month ago");
        assert_eq!(pretty(weeks(-53)), "a year ago");
    }

    #[test]
    fn test_ago_and_from_now_ignore_sign() {
        assert_eq!(ago(minutes(5)), "5 minutes ago");
        assert_eq!(ago(minutes(-5)), "5 minutes ago");
        assert_eq!(from_now(hours(-3)), "3 hours from now");
        assert_eq!(from_now(days(-1)), "tomorrow");
    }

    #[test]
    fn test_relative_to() {
        let reference = Timestamp::from_millis(days(100));
        assert_eq!(relative_to(reference - days(5), reference), "5 days ago");
        assert_eq!(relative_to(reference + hours(1), reference), "an hour from now");
        assert_eq!(relative_to(reference, reference), "right now");
    }
}
