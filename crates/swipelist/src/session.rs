//! State of one pointer session, from pointer-down to release.

use std::time::Instant;

use swipelist_core::{Point, TimerId};

use crate::config::{Side, SwipeAction, SwipeMode};
use crate::mapper::RowViews;
use crate::row::OpenPhase;
use crate::touch::VelocityTracker;

/// Where the classifier is in the gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer is down and no released row is still animating.
    #[default]
    Rest,
    /// A pointer is down on a swipeable row.
    Dragging,
    /// The pointer was released and the row is animating to its final offset.
    Settling,
    /// The pointer is down but the gesture does not concern any row.
    Ignored,
}

/// Everything known about the row under an active pointer.
///
/// The views are captured at pointer-down and only valid for this session.
#[derive(Debug, Clone)]
pub struct GestureSession {
    pub pointer: u64,
    pub position: usize,
    pub views: RowViews,
    pub down_point: Point,
    pub down_time: Instant,
    /// Mode resolved for this row at pointer-down.
    pub mode: SwipeMode,
    /// Offset and phase to restore if the gesture is cancelled.
    pub origin_offset: f32,
    pub origin_phase: OpenPhase,
    /// Set once the stream locked horizontal and the row follows the finger.
    pub dragging: bool,
    pub side: Option<Side>,
    pub action: SwipeAction,
    pub beyond_slop: bool,
    pub long_press: Option<TimerId>,
    pub long_press_fired: bool,
    pub velocity: VelocityTracker,
}

impl GestureSession {
    pub fn new(
        pointer: u64,
        views: RowViews,
        down_point: Point,
        down_time: Instant,
        mode: SwipeMode,
        origin_offset: f32,
        origin_phase: OpenPhase,
    ) -> Self {
        let mut velocity = VelocityTracker::new();
        velocity.add(down_time, down_point);
        Self {
            pointer,
            position: views.position,
            views,
            down_point,
            down_time,
            mode,
            origin_offset,
            origin_phase,
            dragging: false,
            side: None,
            action: SwipeAction::None,
            beyond_slop: false,
            long_press: None,
            long_press_fired: false,
            velocity,
        }
    }

    /// Horizontal travel since pointer-down.
    #[inline]
    pub fn delta_x(&self, point: Point) -> f32 {
        point.x - self.down_point.x
    }

    /// Whether the pointer may still count as a tap or long press.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        !self.dragging && !self.beyond_slop
    }
}
