//! Stopwatches and normalized progress helpers.

use std::fmt;

use crate::clock::{self, ClockContext};

const NANOS_PER_MS: i64 = 1_000_000;

/// Elapsed-time stopwatch.
///
/// ```
/// let timer = sandtime::Timer::start();
/// // ... work ...
/// let taken = timer.s();
/// # assert!(taken >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Timer {
    clock: ClockContext,
    start_ns: i64,
}

impl Timer {
    /// Starts on the process-wide clock.
    pub fn start() -> Self {
        Self::with_clock(clock::process_clock())
    }

    /// Starts on `clock`; later shifts of that clock count as elapsed time.
    pub fn with_clock(clock: &ClockContext) -> Self {
        Self {
            start_ns: clock.uptime_nanos(),
            clock: clock.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.start_ns = self.clock.uptime_nanos();
    }

    /// Elapsed seconds.
    pub fn s(&self) -> f64 {
        self.ns() as f64 / 1e9
    }

    pub fn ms(&self) -> i64 {
        self.ns() / NANOS_PER_MS
    }

    pub fn us(&self) -> i64 {
        self.ns() / 1_000
    }

    pub fn ns(&self) -> i64 {
        self.clock.uptime_nanos() - self.start_ns
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.ms();
        if ms < 1000 {
            write!(f, "{}ms", ms)
        } else {
            write!(f, "{:.2}s", self.s())
        }
    }
}

/// Progress through a fixed span, clamped to `[0, 1]`.
///
/// Stays at 1.0 once the span has elapsed until reset.
#[derive(Debug, Clone)]
pub struct Chrono {
    timer: Timer,
    span_ms: i64,
}

impl Chrono {
    pub fn new(clock: &ClockContext, span_ms: i64) -> Self {
        Self {
            timer: Timer::with_clock(clock),
            span_ms,
        }
    }

    /// A non-positive span is complete from the start.
    pub fn progress(&self) -> f64 {
        if self.span_ms <= 0 {
            return 1.0;
        }
        let span_ns = self.span_ms as f64 * NANOS_PER_MS as f64;
        (self.timer.ns() as f64 / span_ns).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn span(&self) -> i64 {
        self.span_ms
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn reset_with(&mut self, span_ms: i64) {
        self.span_ms = span_ms;
        self.timer.reset();
    }
}

/// Repeating progress: a sawtooth in `[0, 1)` with the given period.
///
/// Each completed period restarts the cycle. Restarts are aligned to whole
/// periods so the phase does not drift with call frequency.
#[derive(Debug, Clone)]
pub struct Looper {
    timer: Timer,
    period_ms: i64,
    laps: u64,
}

impl Looper {
    pub fn new(clock: &ClockContext, period_ms: i64) -> Self {
        Self {
            timer: Timer::with_clock(clock),
            period_ms,
            laps: 0,
        }
    }

    /// A non-positive period never advances and reports 0.0.
    pub fn progress(&mut self) -> f64 {
        if self.period_ms <= 0 {
            return 0.0;
        }
        let period_ns = self.period_ms.saturating_mul(NANOS_PER_MS);
        let elapsed = self.timer.ns();
        if elapsed < 0 {
            // Clock shifted backwards past the cycle start.
            self.timer.reset();
            return 0.0;
        }

        let phase = elapsed % period_ns;
        let completed = elapsed / period_ns;
        if completed > 0 {
            self.timer.start_ns += elapsed - phase;
            self.laps += completed as u64;
        }
        phase as f64 / period_ns as f64
    }

    /// Completed cycles observed by [`progress`](Self::progress).
    pub fn laps(&self) -> u64 {
        self.laps
    }

    pub fn period(&self) -> i64 {
        self.period_ms
    }

    pub fn reset(&mut self, period_ms: i64) {
        self.period_ms = period_ms;
        self.laps = 0;
        self.timer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::{minutes, seconds};

    #[test]
    fn test_timer_ns_positive_after_sleep() {
        let timer = Timer::start();
        std::thread::sleep(std::time::Duration::from_micros(10));
        assert!(timer.ns() > 0);
    }

    #[test]
    fn test_timer_units_agree() {
        let clock = ClockContext::new();
        let timer = Timer::with_clock(&clock);
        clock.shift(seconds(2));
        assert!(timer.ms() >= 2_000);
        assert!(timer.us() >= 2_000_000);
        assert!(timer.ns() >= 2_000_000_000);
        assert!(timer.s() >= 2.0);
    }

    #[test]
    fn test_timer_reset() {
        let clock = ClockContext::new();
        let mut timer = Timer::with_clock(&clock);
        clock.shift(minutes(1));
        timer.reset();
        assert!(timer.ms() < 1_000);
    }

    #[test]
    fn test_timer_display() {
        let clock = ClockContext::new();
        let timer = Timer::with_clock(&clock);
        assert!(timer.to_string().ends_with("ms"));
        clock.shift(seconds(3));
        let shown = timer.to_string();
        assert!(shown.starts_with("3.0") && shown.ends_with('s'), "got {}", shown);
    }

    #[test]
    fn test_chrono_progress_clamps() {
        let clock = ClockContext::new();
        let chrono = Chrono::new(&clock, seconds(10));
        assert!(chrono.progress() < 0.1);
        clock.shift(seconds(5));
        let half = chrono.progress();
        assert!((0.5..0.6).contains(&half), "got {}", half);
        clock.shift(seconds(60));
        assert_eq!(chrono.progress(), 1.0);
        assert!(chrono.is_done());
    }

    #[test]
    fn test_chrono_clamps_below_zero() {
        let clock = ClockContext::new();
        let chrono = Chrono::new(&clock, seconds(10));
        clock.shift(-seconds(5));
        assert_eq!(chrono.progress(), 0.0);
    }

    #[test]
    fn test_chrono_zero_span_is_done() {
        let clock = ClockContext::new();
        assert_eq!(Chrono::new(&clock, 0).progress(), 1.0);
        assert_eq!(Chrono::new(&clock, -5).progress(), 1.0);
    }

    #[test]
    fn test_chrono_reset_with() {
        let clock = ClockContext::new();
        let mut chrono = Chrono::new(&clock, seconds(1));
        clock.shift(seconds(2));
        assert!(chrono.is_done());
        chrono.reset_with(seconds(100));
        assert_eq!(chrono.span(), seconds(100));
        assert!(chrono.progress() < 0.01);
    }

    #[test]
    fn test_looper_wraps() {
        let clock = ClockContext::new();
        let mut looper = Looper::new(&clock, seconds(4));
        clock.shift(seconds(1));
        let quarter = looper.progress();
        assert!((0.25..0.3).contains(&quarter), "got {}", quarter);

        clock.shift(seconds(4));
        let wrapped = looper.progress();
        assert!((0.25..0.3).contains(&wrapped), "got {}", wrapped);
        assert_eq!(looper.laps(), 1);

        clock.shift(seconds(8));
        let p = looper.progress();
        assert!(p < 1.0);
        assert_eq!(looper.laps(), 3);
    }

    #[test]
    fn test_looper_never_reaches_one() {
        let clock = ClockContext::new();
        let mut looper = Looper::new(&clock, 10);
        for _ in 0..50 {
            clock.shift(3);
            let p = looper.progress();
            assert!((0.0..1.0).contains(&p), "got {}", p);
        }
    }

    #[test]
    fn test_looper_reset_and_degenerate_period() {
        let clock = ClockContext::new();
        let mut looper = Looper::new(&clock, 0);
        clock.shift(seconds(1));
        assert_eq!(looper.progress(), 0.0);
        looper.reset(seconds(2));
        assert_eq!(looper.period(), seconds(2));
        assert_eq!(looper.laps(), 0);
        assert!(looper.progress() < 0.1);
    }
}
