//! Timestamps, calendar fields, formatting and parsing.
//!
//! All arithmetic is UTC; nothing here consults the local timezone. Dates are
//! converted with the Fliegel–van Flandern Julian Day Number formulas and are
//! only guaranteed to round-trip from 1901 onwards.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::duration::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use crate::error::MalformedTimestamp;
use crate::humanize;

/// Julian Day Number of 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

/// Template used by `Display` and [`Timestamp::format`] round-trips.
pub const CANONICAL_FORMAT: &str = "yyyy-mm-dd HH:MM:SS.MS";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DELIMITERS: [char; 8] = [' ', ':', '/', '.', 'T', 'Z', '+', '-'];

/// Largest span in milliseconds a single parsed field may stand for. Six
/// fields at this bound still sum inside `i64`.
const MAX_FIELD_SPAN_MS: i64 = 1_000_000_000_000_000_000;

/// Mandatory parse fields with the (mean Gregorian) length of one unit in ms.
const PARSE_FIELDS: [(&str, i64); 6] = [
    ("year", 31_556_952_000),
    ("month", 2_629_746_000),
    ("day", MS_PER_DAY),
    ("hour", MS_PER_HOUR),
    ("minute", MS_PER_MINUTE),
    ("second", MS_PER_SECOND),
];

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Fliegel–van Flandern: Gregorian date to Julian Day Number.
/// Relies on truncating division; out-of-range months and days carry.
fn julian_day(year: i64, month: i64, day: i64) -> i64 {
    let a = (month - 14) / 12;
    (1461 * (year + 4800 + a)) / 4 + (367 * (month - 2 - 12 * a)) / 12
        - (3 * ((year + 4900 + a) / 100)) / 4
        + day
        - 32075
}

/// Fliegel–van Flandern inverse: Julian Day Number to (year, month, day).
fn civil_from_julian_day(jdn: i64) -> (i64, i64, i64) {
    let mut l = jdn + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l = l - (1461 * i) / 4 + 31;
    let j = (80 * l) / 2447;
    let day = l - (2447 * j) / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;
    (year, month, day)
}

/// Milliseconds at midnight UTC of the given proleptic Gregorian date.
///
/// Fields are not validated: `date(2010, 13, 1)` is arithmetically carried
/// rather than rejected.
pub fn date(year: i64, month: i64, day: i64) -> Timestamp {
    Timestamp((julian_day(year, month, day) - UNIX_EPOCH_JDN) * MS_PER_DAY)
}

/// Time of day as a millisecond duration. Values are not range-checked, so
/// `second = 61` simply adds 61 seconds.
pub fn time(hour: i64, minute: i64, second: i64, millisecond: i64) -> i64 {
    hour * MS_PER_HOUR + minute * MS_PER_MINUTE + second * MS_PER_SECOND + millisecond
}

pub fn datetime(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> Timestamp {
    date(year, month, day) + time(hour, minute, second, millisecond)
}

fn epoch_to_fields(ms: i64) -> CalendarFields {
    let days = ms.div_euclid(MS_PER_DAY);
    let day_ms = ms.rem_euclid(MS_PER_DAY);
    let (year, month, day) = civil_from_julian_day(days + UNIX_EPOCH_JDN);

    // Far before 1900 the inverse stops producing real months; keep 1..=12.
    CalendarFields {
        year: year as i32,
        month: ((month - 1).rem_euclid(12) + 1) as u8,
        day: day as u8,
        hour: (day_ms / MS_PER_HOUR) as u8,
        minute: ((day_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
        second: ((day_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
        millisecond: (day_ms % MS_PER_SECOND) as u16,
    }
}

/// A broken-down UTC date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl CalendarFields {
    /// Validated constructor; `None` when any field is out of its calendar range.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    pub fn hour(&self) -> u8 {
        self.hour
    }
    pub fn minute(&self) -> u8 {
        self.minute
    }
    pub fn second(&self) -> u8 {
        self.second
    }
    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        month_table_entry(&MONTH_NAMES, self.month)
    }

    /// Three-letter English month abbreviation, e.g. "Mar".
    pub fn month_abbreviation(&self) -> &'static str {
        month_table_entry(&MONTH_ABBREVIATIONS, self.month)
    }

    pub fn to_timestamp(&self) -> Timestamp {
        datetime(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
            i64::from(self.hour),
            i64::from(self.minute),
            i64::from(self.second),
            i64::from(self.millisecond),
        )
    }
}

fn month_table_entry(table: &[&'static str; 12], month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or("")
}

/// Milliseconds since the Unix epoch, UTC.
///
/// The `+`/`-` operators saturate at the ends of the `i64` range; use
/// [`checked_add`](Self::checked_add) to detect that instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(i64);

impl Timestamp {
    /// 1970-01-01 00:00:00.000, also the sentinel returned by
    /// [`parse_lossy`](Self::parse_lossy) for malformed input.
    pub const EPOCH: Timestamp = Timestamp(0);

    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn from_fields(fields: &CalendarFields) -> Self {
        fields.to_timestamp()
    }

    pub fn checked_add(self, ms: i64) -> Option<Self> {
        self.0.checked_add(ms).map(Self)
    }

    pub fn checked_sub(self, ms: i64) -> Option<Self> {
        self.0.checked_sub(ms).map(Self)
    }

    pub fn fields(self) -> CalendarFields {
        epoch_to_fields(self.0)
    }

    pub fn year(self) -> i32 {
        self.fields().year
    }
    pub fn month(self) -> u8 {
        self.fields().month
    }
    pub fn day(self) -> u8 {
        self.fields().day
    }
    pub fn hour(self) -> u8 {
        self.fields().hour
    }
    pub fn minute(self) -> u8 {
        self.fields().minute
    }
    pub fn second(self) -> u8 {
        self.fields().second
    }
    pub fn millisecond(self) -> u16 {
        self.fields().millisecond
    }

    /// Renders the timestamp through a token template.
    ///
    /// Recognized tokens: `yyyy`, `yy`, `mmmm`, `mmm`, `mm`, `m`, `dd`, `d`,
    /// `HH`, `MM`, `SS`, `MS`. The template is scanned once, left to right,
    /// always taking the longest token at the current position; anything else
    /// is copied through unchanged.
    pub fn format(self, template: &str) -> String {
        let fields = self.fields();
        let mut out = String::with_capacity(template.len() + 8);
        let mut rest = template;

        'scan: while !rest.is_empty() {
            for (pattern, token) in TOKENS {
                if let Some(tail) = rest.strip_prefix(pattern) {
                    token.render(&fields, &mut out);
                    rest = tail;
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
        out
    }

    /// Best-effort parse: malformed input yields [`Timestamp::EPOCH`].
    pub fn parse_lossy(input: &str) -> Self {
        match input.parse() {
            Ok(ts) => ts,
            Err(err) => {
                tracing::debug!(input, %err, "malformed timestamp, using epoch sentinel");
                Self::EPOCH
            }
        }
    }

    /// Humanized phrase for `self` relative to `reference`,
    /// e.g. "3 days ago" or "an hour from now".
    pub fn relative_to(self, reference: Timestamp) -> String {
        humanize::relative_to(self, reference)
    }
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Year4,
    Year2,
    MonthName,
    MonthAbbrev,
    Month2,
    Month,
    Day2,
    Day,
    Hour2,
    Minute2,
    Second2,
    Millis3,
}

// Longer patterns precede their prefixes.
const TOKENS: [(&str, Token); 12] = [
    ("yyyy", Token::Year4),
    ("yy", Token::Year2),
    ("mmmm", Token::MonthName),
    ("mmm", Token::MonthAbbrev),
    ("mm", Token::Month2),
    ("m", Token::Month),
    ("dd", Token::Day2),
    ("d", Token::Day),
    ("HH", Token::Hour2),
    ("MM", Token::Minute2),
    ("SS", Token::Second2),
    ("MS", Token::Millis3),
];

impl Token {
    fn render(self, f: &CalendarFields, out: &mut String) {
        match self {
            Token::Year4 => out.push_str(&format!("{:04}", f.year)),
            Token::Year2 => out.push_str(&format!("{:02}", f.year.rem_euclid(100))),
            Token::MonthName => out.push_str(f.month_name()),
            Token::MonthAbbrev => out.push_str(f.month_abbreviation()),
            Token::Month2 => out.push_str(&format!("{:02}", f.month)),
            Token::Month => out.push_str(&f.month.to_string()),
            Token::Day2 => out.push_str(&format!("{:02}", f.day)),
            Token::Day => out.push_str(&f.day.to_string()),
            Token::Hour2 => out.push_str(&format!("{:02}", f.hour)),
            Token::Minute2 => out.push_str(&format!("{:02}", f.minute)),
            Token::Second2 => out.push_str(&format!("{:02}", f.second)),
            Token::Millis3 => out.push_str(&format!("{:03}", f.millisecond)),
        }
    }
}

/// A run of non-delimiter characters and the delimiter that preceded it.
struct Field<'a> {
    text: &'a str,
    after: Option<char>,
}

fn tokenize(input: &str) -> Vec<Field<'_>> {
    let mut fields = Vec::with_capacity(8);
    let mut start = None;
    let mut after = None;
    let mut last_delimiter = None;

    for (i, c) in input.char_indices() {
        if DELIMITERS.contains(&c) {
            if let Some(s) = start.take() {
                fields.push(Field {
                    text: &input[s..i],
                    after,
                });
            }
            last_delimiter = Some(c);
        } else if start.is_none() {
            start = Some(i);
            after = last_delimiter;
        }
    }
    if let Some(s) = start {
        fields.push(Field {
            text: &input[s..],
            after,
        });
    }
    fields
}

fn parse_number(field: &'static str, token: &str) -> Result<i64, MalformedTimestamp> {
    let invalid = || MalformedTimestamp::InvalidField {
        field,
        token: token.to_string(),
    };
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

/// Reads a fractional-second token as milliseconds: "5" is 500, "003" is 3,
/// digits past the third are dropped.
fn parse_fraction(token: &str) -> Result<i64, MalformedTimestamp> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedTimestamp::InvalidField {
            field: "millisecond",
            token: token.to_string(),
        });
    }
    let digits = &token[..token.len().min(3)];
    let scale = 10_i64.pow(3 - digits.len() as u32);
    Ok(parse_number("millisecond", digits)? * scale)
}

impl FromStr for Timestamp {
    type Err = MalformedTimestamp;

    /// Reads `year month day hour minute second [.fraction]` separated by any
    /// of space, `:`, `/`, `.`, `T`, `Z`, `+`, `-`. Trailing timezone
    /// designators are discarded, not applied, and so is a seventh number
    /// that does not follow a `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = tokenize(s);
        if fields.len() < PARSE_FIELDS.len() {
            return Err(MalformedTimestamp::TooFewFields {
                found: fields.len(),
            });
        }

        let mut values = [0_i64; 6];
        for (value, (&(name, unit_ms), field)) in
            values.iter_mut().zip(PARSE_FIELDS.iter().zip(&fields))
        {
            *value = parse_number(name, field.text)?;
            if *value > MAX_FIELD_SPAN_MS / unit_ms {
                return Err(MalformedTimestamp::OutOfRange {
                    field: name,
                    token: field.text.to_string(),
                });
            }
        }

        let millisecond = match fields.get(6) {
            Some(field) if field.after == Some('.') => parse_fraction(field.text)?,
            _ => 0,
        };

        let [year, month, day, hour, minute, second] = values;
        Ok(datetime(year, month, day, hour, minute, second, millisecond))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(CANONICAL_FORMAT))
    }
}

impl From<CalendarFields> for Timestamp {
    fn from(fields: CalendarFields) -> Self {
        fields.to_timestamp()
    }
}

impl Add<i64> for Timestamp {
    type Output = Timestamp;

    fn add(self, ms: i64) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }
}

impl AddAssign<i64> for Timestamp {
    fn add_assign(&mut self, ms: i64) {
        self.0 = self.0.saturating_add(ms);
    }
}

impl Sub<i64> for Timestamp {
    type Output = Timestamp;

    fn sub(self, ms: i64) -> Timestamp {
        Timestamp(self.0.saturating_sub(ms))
    }
}

impl SubAssign<i64> for Timestamp {
    fn sub_assign(&mut self, ms: i64) {
        self.0 = self.0.saturating_sub(ms);
    }
}

impl Sub for Timestamp {
    type Output = i64;

    fn sub(self, other: Timestamp) -> i64 {
        self.0.saturating_sub(other.0)
    }
}
