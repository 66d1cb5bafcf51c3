//! Clock source: wall-clock anchor plus monotonic ticks plus a test offset.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::calendar::Timestamp;
use crate::humanize;

const NANOS_PER_MS: i64 = 1_000_000;

#[derive(Debug)]
struct Inner {
    anchor: Timestamp,
    started: Instant,
    offset_ns: AtomicI64,
}

/// A source of "now" that can be shifted for deterministic tests.
///
/// `now()` is the wall-clock time captured at construction, advanced by a
/// monotonic tick count and by the shift offset. Clones share the offset, so
/// shifting one handle moves every [`Timer`](crate::Timer),
/// [`Chrono`](crate::Chrono) and [`Looper`](crate::Looper) built from it.
#[derive(Debug, Clone)]
pub struct ClockContext {
    inner: Arc<Inner>,
}

impl ClockContext {
    /// Anchored at the current system time.
    pub fn new() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let ms = i64::try_from(since_epoch.as_millis()).unwrap_or(i64::MAX);
        Self::starting_at(Timestamp::from_millis(ms))
    }

    /// A clock whose `now()` starts at `anchor` and then runs in real time.
    pub fn starting_at(anchor: Timestamp) -> Self {
        Self {
            inner: Arc::new(Inner {
                anchor,
                started: Instant::now(),
                offset_ns: AtomicI64::new(0),
            }),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.inner.anchor + self.uptime()
    }

    /// Milliseconds since this clock was created, including any shift.
    pub fn uptime(&self) -> i64 {
        self.uptime_nanos().div_euclid(NANOS_PER_MS)
    }

    pub fn uptime_nanos(&self) -> i64 {
        let ticks = i64::try_from(self.inner.started.elapsed().as_nanos()).unwrap_or(i64::MAX);
        ticks.saturating_add(self.inner.offset_ns.load(Ordering::Acquire))
    }

    /// Moves this clock (and all its clones) by `delta_ms`. Negative values
    /// travel backwards.
    pub fn shift(&self, delta_ms: i64) {
        let delta_ns = delta_ms.saturating_mul(NANOS_PER_MS);
        let before = self.inner.offset_ns.fetch_add(delta_ns, Ordering::AcqRel);
        tracing::trace!(
            delta_ms,
            offset_ms = before.saturating_add(delta_ns) / NANOS_PER_MS,
            "clock shifted"
        );
    }

    /// Total shift applied so far, in milliseconds.
    pub fn offset(&self) -> i64 {
        self.inner.offset_ns.load(Ordering::Acquire) / NANOS_PER_MS
    }

    /// Humanized phrase for `ts` relative to this clock's now.
    pub fn humanize(&self, ts: Timestamp) -> String {
        humanize::relative_to(ts, self.now())
    }
}

impl Default for ClockContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The clock behind [`crate::now`] and [`crate::uptime`], created on first use.
pub(crate) fn process_clock() -> &'static ClockContext {
    static CLOCK: OnceLock<ClockContext> = OnceLock::new();
    CLOCK.get_or_init(ClockContext::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::date;
    use crate::duration::{days, hours, seconds};

    #[test]
    fn test_starting_at_anchor() {
        let clock = ClockContext::starting_at(date(2010, 12, 31));
        let elapsed = clock.now() - date(2010, 12, 31);
        assert!((0..1_000).contains(&elapsed), "elapsed {}", elapsed);
    }

    #[test]
    fn test_shift_moves_now_and_uptime() {
        let clock = ClockContext::starting_at(date(2000, 1, 1));
        clock.shift(days(1));
        assert_eq!(clock.now().day(), 2);
        assert!(clock.uptime() >= days(1));
        assert_eq!(clock.offset(), days(1));
    }

    #[test]
    fn test_shift_backwards() {
        let clock = ClockContext::starting_at(date(2000, 1, 1));
        clock.shift(-hours(1));
        assert_eq!(clock.now().to_string().get(..13), Some("1999-12-31 23"));
        assert!(clock.uptime() < 0);
    }

    #[test]
    fn test_clones_share_offset() {
        let clock = ClockContext::starting_at(Timestamp::EPOCH);
        let other = clock.clone();
        other.shift(seconds(30));
        assert_eq!(clock.offset(), seconds(30));
        assert!(clock.uptime() >= seconds(30));
    }

    #[test]
    fn test_separate_contexts_are_independent() {
        let a = ClockContext::new();
        let b = ClockContext::new();
        a.shift(days(10));
        assert_eq!(b.offset(), 0);
    }

    #[test]
    fn test_new_is_after_2020() {
        assert!(ClockContext::new().now() > date(2020, 1, 1));
    }

    #[test]
    fn test_humanize_against_shifted_clock() {
        let clock = ClockContext::starting_at(date(2010, 6, 1));
        let past = clock.now();
        clock.shift(days(3));
        assert_eq!(clock.humanize(past), "3 days ago");
    }
}
