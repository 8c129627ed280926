//! Time-sliced interpolation between two values.

use std::time::{Duration, Instant};

use super::easing::{Easing, lerp_eased};

/// Result of sampling a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenState {
    /// Not started or already finished and reported.
    Idle,
    /// Still running; `value` is the current interpolated value.
    Running { progress: f32, value: f32 },
    /// Reached its end on this sample.
    Finished { value: f32 },
}

/// Interpolates a value from `from` to `to` over a duration.
///
/// Time is always passed in, never read from the clock.
#[derive(Debug, Clone)]
pub struct Tween {
    easing: Easing,
    duration: Duration,
    start_time: Option<Instant>,
    from: f32,
    to: f32,
}

impl Tween {
    pub fn new(easing: Easing, duration: Duration) -> Self {
        Self {
            easing,
            duration,
            start_time: None,
            from: 0.0,
            to: 0.0,
        }
    }

    /// Start interpolating from `from` to `to` at `now`.
    ///
    /// Restarting a running tween re-bases it on the new endpoints.
    pub fn start(&mut self, from: f32, to: f32, now: Instant) {
        self.from = from;
        self.to = to;
        self.start_time = Some(now);
    }

    /// Advance to `now`.
    pub fn update(&mut self, now: Instant) -> TweenState {
        let Some(start_time) = self.start_time else {
            return TweenState::Idle;
        };

        let elapsed = now.saturating_duration_since(start_time);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if progress >= 1.0 {
            self.start_time = None;
            return TweenState::Finished { value: self.to };
        }

        TweenState::Running {
            progress,
            value: lerp_eased(self.easing, self.from, self.to, progress),
        }
    }
}
