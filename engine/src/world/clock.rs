//! Frame clock
//!
//! Turns wall-clock instants into the per-frame `dt` handed to the
//! simulation step. Long stalls (window drag, breakpoint) are clamped so a
//! single step never integrates an unbounded interval.

use std::time::Instant;

use crate::config::ClockConfig;

/// Clamp a raw frame time into `[min, max]`. NaN maps to `min`.
#[inline]
pub fn sanitize_dt(raw: f32, min: f32, max: f32) -> f32 {
    if raw.is_nan() {
        return min;
    }
    raw.max(min).min(max)
}

/// Wall-clock frame timer.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: f64,
    frames: u64,
    min_dt: f32,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

impl FrameClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            last: None,
            elapsed: 0.0,
            frames: 0,
            min_dt: config.min_dt,
            max_dt: config.max_dt,
        }
    }

    /// Advance to now.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now` and return the sanitized dt in seconds.
    ///
    /// The first tick returns `min_dt`; there is no previous frame.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => self.min_dt,
        };
        self.last = Some(now);
        self.advance(raw)
    }

    /// Feed a raw dt directly (headless drivers, tests).
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        let dt = sanitize_dt(raw_dt, self.min_dt, self.max_dt);
        if !raw_dt.is_finite() {
            log::warn!("non-finite frame time {raw_dt}, using {dt}s");
        } else if dt < raw_dt {
            log::trace!("frame time {raw_dt:.4}s clamped to {dt:.4}s");
        }
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    /// Simulated seconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
