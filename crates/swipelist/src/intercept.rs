//! Deciding whether a touch stream is a row swipe or a list scroll.

use swipelist_core::Point;
use swipelist_core::logging::targets;

use crate::touch::{TouchEvent, TouchPhase};

/// Axis a touch stream has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionLock {
    #[default]
    Undetermined,
    Horizontal,
    Vertical,
}

/// What the host list should do with a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptDecision {
    /// The engine owns the stream; native scrolling must not see it.
    Claim,
    /// Native scrolling handles the event.
    PassThrough,
    /// The stream just locked horizontal; stop feeding native scrolling.
    ContinueHorizontal,
}

/// Two-axis slop race deciding who owns a touch stream.
///
/// Whichever of |dx| and |dy| first exceeds the slop wins, and the lock
/// holds until the pointer goes up or is cancelled.
#[derive(Debug, Clone, Default)]
pub struct InterceptGate {
    lock: DirectionLock,
    pointer: Option<u64>,
    down: Point,
}

impl InterceptGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn lock(&self) -> DirectionLock {
        self.lock
    }

    pub fn reset(&mut self) {
        self.lock = DirectionLock::Undetermined;
        self.pointer = None;
    }

    /// Classify one event. `slop` is the platform touch slop in pixels.
    pub fn decide(&mut self, event: &TouchEvent, slop: f32) -> InterceptDecision {
        if self.pointer.is_some_and(|id| id != event.id) {
            return InterceptDecision::PassThrough;
        }

        match event.phase {
            TouchPhase::Started => {
                self.pointer = Some(event.id);
                self.down = event.position;
                self.lock = DirectionLock::Undetermined;
                InterceptDecision::PassThrough
            }
            TouchPhase::Moved => match self.lock {
                DirectionLock::Horizontal => InterceptDecision::Claim,
                DirectionLock::Vertical => InterceptDecision::PassThrough,
                DirectionLock::Undetermined => {
                    if self.pointer.is_none() {
                        return InterceptDecision::PassThrough;
                    }
                    let dx = (event.position.x - self.down.x).abs();
                    let dy = (event.position.y - self.down.y).abs();
                    if dx > slop && dx >= dy {
                        self.lock = DirectionLock::Horizontal;
                        tracing::trace!(target: targets::INTERCEPT, dx, dy, "locked horizontal");
                        InterceptDecision::ContinueHorizontal
                    } else if dy > slop {
                        self.lock = DirectionLock::Vertical;
                        tracing::trace!(target: targets::INTERCEPT, dx, dy, "locked vertical");
                        InterceptDecision::PassThrough
                    } else {
                        InterceptDecision::PassThrough
                    }
                }
            },
            TouchPhase::Ended => {
                let decision = if self.lock == DirectionLock::Horizontal {
                    InterceptDecision::Claim
                } else {
                    InterceptDecision::PassThrough
                };
                self.reset();
                decision
            }
            TouchPhase::Cancelled => {
                self.reset();
                InterceptDecision::PassThrough
            }
        }
    }
}
