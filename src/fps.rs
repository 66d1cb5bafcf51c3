//! Frame-rate locker.
//!
//! A background thread advances a tick counter at the target rate. The render
//! loop calls [`FrameLocker::lock`] once per logic update and renders only when
//! it returns `true`; when the loop is too slow, frames are skipped so logic
//! keeps pace with the ticks.
//!
//! ```no_run
//! use sandtime::{FrameLocker, FrameLockerConfig};
//!
//! let locker = FrameLocker::spawn(FrameLockerConfig::default())?;
//! loop {
//!     // update logic
//!     if locker.lock(60) {
//!         // render
//!     }
//! #   break;
//! }
//! # Ok::<(), sandtime::Error>(())
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLockerConfig {
    /// Target ticks per second.
    pub hz: u32,
    /// How far the tick counter may run ahead of the render loop before it is
    /// pulled back; bounds consecutive skipped frames.
    pub max_frameskip: u64,
    /// How often the fps reading is refreshed.
    pub fps_sample_interval: Duration,
}

impl Default for FrameLockerConfig {
    fn default() -> Self {
        Self {
            hz: 60,
            max_frameskip: 10,
            fps_sample_interval: Duration::from_millis(300),
        }
    }
}

impl FrameLockerConfig {
    pub fn with_hz(mut self, hz: u32) -> Self {
        self.hz = hz;
        self
    }

    pub fn with_max_frameskip(mut self, max_frameskip: u64) -> Self {
        self.max_frameskip = max_frameskip;
        self
    }

    pub fn with_fps_sample_interval(mut self, interval: Duration) -> Self {
        self.fps_sample_interval = interval;
        self
    }
}

#[derive(Debug)]
struct Shared {
    hz: AtomicU32,
    running: AtomicBool,
    ticks: AtomicU64,
    frames: AtomicU64,
    fps: AtomicU32,
}

#[derive(Debug)]
pub struct FrameLocker {
    shared: Arc<Shared>,
    max_frameskip: u64,
    handle: Option<JoinHandle<()>>,
}

impl FrameLocker {
    /// Starts the tick thread.
    pub fn spawn(config: FrameLockerConfig) -> Result<Self> {
        let shared = Arc::new(Shared {
            hz: AtomicU32::new(config.hz.max(1)),
            running: AtomicBool::new(true),
            ticks: AtomicU64::new(0),
            frames: AtomicU64::new(0),
            fps: AtomicU32::new(0),
        });

        let worker = Arc::clone(&shared);
        let sample_interval = config.fps_sample_interval;
        let handle = thread::Builder::new()
            .name("sandtime-fps".to_string())
            .spawn(move || tick_loop(&worker, sample_interval))?;

        tracing::debug!(
            hz = config.hz,
            max_frameskip = config.max_frameskip,
            "frame locker started"
        );

        Ok(Self {
            shared,
            max_frameskip: config.max_frameskip,
            handle: Some(handle),
        })
    }

    /// Paces the calling loop to `hz` (0 keeps the current rate).
    ///
    /// Yields while the loop is ahead of the tick counter. Returns `true` when
    /// this update should be rendered, `false` when the frame should be
    /// skipped to catch up.
    pub fn lock(&self, hz: u32) -> bool {
        let shared = &self.shared;
        if hz > 0 {
            shared.hz.store(hz, Ordering::Relaxed);
        }

        while shared.frames.load(Ordering::Acquire) > shared.ticks.load(Ordering::Acquire)
            && shared.running.load(Ordering::Acquire)
        {
            thread::yield_now();
        }

        let frames = shared.frames.load(Ordering::Acquire);
        let ticks = shared.ticks.load(Ordering::Acquire);
        if ticks > frames.saturating_add(self.max_frameskip) {
            shared.ticks.store(frames, Ordering::Release);
            tracing::trace!(ticks, frames, "frameskip limit reached, ticks pulled back");
        }

        let frames = shared.frames.fetch_add(1, Ordering::AcqRel) + 1;
        frames >= shared.ticks.load(Ordering::Acquire)
    }

    /// Rendered-or-skipped updates per second, refreshed every sample interval.
    pub fn fps(&self) -> u32 {
        self.shared.fps.load(Ordering::Relaxed)
    }

    pub fn hz(&self) -> u32 {
        self.shared.hz.load(Ordering::Relaxed)
    }
}

impl Drop for FrameLocker {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("frame locker thread panicked");
            }
        }
        tracing::debug!("frame locker stopped");
    }
}

fn tick_loop(shared: &Shared, sample_interval: Duration) {
    let mut window = Duration::ZERO;
    let mut frames_before = shared.frames.load(Ordering::Acquire);

    while shared.running.load(Ordering::Acquire) {
        shared.ticks.fetch_add(1, Ordering::AcqRel);

        let hz = shared.hz.load(Ordering::Relaxed).max(1);
        let period = Duration::from_micros(1_000_000 / u64::from(hz));
        let started = Instant::now();
        while shared.running.load(Ordering::Acquire) {
            let spent = started.elapsed();
            if spent >= period {
                break;
            }
            thread::park_timeout(period - spent);
        }
        window += started.elapsed();

        if window >= sample_interval {
            let frames = shared.frames.load(Ordering::Acquire);
            let per_second = frames.saturating_sub(frames_before) as f64 / window.as_secs_f64();
            let fps = per_second.round() as u32;
            shared.fps.store(fps, Ordering::Relaxed);
            tracing::trace!(fps, "fps sampled");
            frames_before = frames;
            window = Duration::ZERO;
        }
    }
}
