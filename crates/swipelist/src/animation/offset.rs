//! Horizontal offset animations, at most one per row.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use swipelist_core::PerfSpan;
use swipelist_core::logging::{span_names, targets};

use super::easing::Easing;
use super::tween::{Tween, TweenState};
use crate::config::Side;
use crate::row::rekey_after_removal;

/// Why a row is animating; decides what happens when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPurpose {
    /// Travel to the open extent of a side.
    Open(Side),
    /// Travel back to zero from a side.
    Close(Side),
    /// Return to the resting offset after an uncommitted drag.
    Settle,
    /// Leave the screen toward a side before the row is collapsed.
    SlideOut(Side),
}

/// One sampled frame of a row animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetFrame {
    pub position: usize,
    pub offset: f32,
    /// Set on the frame where the animation arrives.
    pub finished: Option<AnimationPurpose>,
}

#[derive(Debug, Clone)]
struct RowAnimation {
    tween: Tween,
    purpose: AnimationPurpose,
}

/// Running offset animations keyed by list position.
#[derive(Debug, Default)]
pub struct OffsetAnimator {
    running: BTreeMap<usize, RowAnimation>,
}

impl OffsetAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `position` and return the purpose of any animation it replaced.
    pub fn start(
        &mut self,
        position: usize,
        from: f32,
        to: f32,
        purpose: AnimationPurpose,
        now: Instant,
        duration: Duration,
    ) -> Option<AnimationPurpose> {
        let mut tween = Tween::new(Easing::default(), duration);
        tween.start(from, to, now);
        tracing::trace!(
            target: targets::ANIMATION,
            position,
            from,
            to,
            ?purpose,
            "offset animation started"
        );
        self.running
            .insert(position, RowAnimation { tween, purpose })
            .map(|previous| previous.purpose)
    }

    /// Stop the animation for `position`, returning its purpose.
    pub fn cancel(&mut self, position: usize) -> Option<AnimationPurpose> {
        self.running.remove(&position).map(|a| a.purpose)
    }

    pub fn is_running(&self, position: usize) -> bool {
        self.running.contains_key(&position)
    }

    pub fn purpose(&self, position: usize) -> Option<AnimationPurpose> {
        self.running.get(&position).map(|a| a.purpose)
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance every animation to `now`. Finished animations are removed.
    pub fn tick(&mut self, now: Instant) -> Vec<OffsetFrame> {
        if self.running.is_empty() {
            return Vec::new();
        }
        let _span = PerfSpan::new(span_names::FRAME);

        let mut frames = Vec::with_capacity(self.running.len());
        self.running.retain(|&position, animation| {
            match animation.tween.update(now) {
                TweenState::Running { value, .. } => {
                    frames.push(OffsetFrame {
                        position,
                        offset: value,
                        finished: None,
                    });
                    true
                }
                TweenState::Finished { value } => {
                    frames.push(OffsetFrame {
                        position,
                        offset: value,
                        finished: Some(animation.purpose),
                    });
                    false
                }
                TweenState::Idle => false,
            }
        });
        frames
    }

    pub fn remove_rows(&mut self, descending: &[usize]) {
        rekey_after_removal(&mut self.running, descending);
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}
