use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped. Zero on the first tick.
    pub dt: f32,

    /// Time since the clock was created.
    pub elapsed: Duration,

    /// Monotonic tick counter, starting at 0.
    pub frame_index: u64,

    /// Smoothed frames-per-second estimate. Zero until a non-zero `dt` is seen.
    pub fps: f32,
}

/// Per-loop frame clock.
///
/// Delta time is clamped to `max_dt` so that a stalled host (debugger pause,
/// hidden browser tab, minimized window) does not hand a huge step to the
/// simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin:      Instant,
    last:        Option<Instant>,
    frame_index: u64,
    max_dt:      Duration,
    fps:         f32,
}

/// Weight of the newest sample in the fps estimate.
const FPS_SMOOTHING: f32 = 0.1;

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self {
            origin: Instant::now(),
            last: None,
            frame_index: 0,
            max_dt,
            fps: 0.0,
        }
    }

    /// Forgets the previous tick; the next tick reports `dt = 0`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).min(self.max_dt),
            None => Duration::ZERO,
        };
        self.last = Some(now);

        let secs = dt.as_secs_f32();
        if secs > 0.0 {
            let sample = 1.0 / secs;
            self.fps = if self.fps == 0.0 {
                sample
            } else {
                self.fps + (sample - self.fps) * FPS_SMOOTHING
            };
        }

        let ft = FrameTime {
            dt: secs,
            elapsed: now.saturating_duration_since(self.origin),
            frame_index: self.frame_index,
            fps: self.fps,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
