//! Touch events as delivered by the host, and velocity tracking.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use glam::Vec2;
use swipelist_core::Point;

/// Samples older than this are ignored when estimating velocity.
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// The phase of a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// A single pointer event in list coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Pointer identifier; only the pointer that started a session drives it.
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Point,
    pub time: Instant,
}

impl TouchEvent {
    pub fn new(id: u64, phase: TouchPhase, position: Point, time: Instant) -> Self {
        Self {
            id,
            phase,
            position,
            time,
        }
    }

    pub fn down(position: impl Into<Point>, time: Instant) -> Self {
        Self::new(0, TouchPhase::Started, position.into(), time)
    }

    pub fn moved(position: impl Into<Point>, time: Instant) -> Self {
        Self::new(0, TouchPhase::Moved, position.into(), time)
    }

    pub fn up(position: impl Into<Point>, time: Instant) -> Self {
        Self::new(0, TouchPhase::Ended, position.into(), time)
    }

    pub fn cancel(position: impl Into<Point>, time: Instant) -> Self {
        Self::new(0, TouchPhase::Cancelled, position.into(), time)
    }

    /// Same event attributed to a different pointer.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }
}

/// Estimates pointer velocity from the most recent samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, Vec2)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time: Instant, position: Point) {
        self.samples.push_back((time, position.to_vec2()));
        while let Some(&(oldest, _)) = self.samples.front() {
            if time.saturating_duration_since(oldest) > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in pixels per second, or zero without enough samples.
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return Vec2::ZERO;
        };
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= 0.001 {
            return Vec2::ZERO;
        }
        (p1 - p0) / dt
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
