//! Batched row removal.
//!
//! Dismissed rows collapse to zero height before they are removed from the
//! adapter. Requests arriving while a batch is collapsing join that batch;
//! the batch completes when its last row has collapsed and is reported as
//! one descending, duplicate-free list of positions.
//!
//! Positions in a batch all refer to the collection as it was before any of
//! them is removed. The only removals that can land while a batch is
//! pending are immediate ones (rows with no measured height), and those are
//! folded in with [`DismissCoordinator::rebase_after_removal`].

use std::time::{Duration, Instant};

use swipelist_core::logging::{span_names, targets};
use swipelist_core::{PerfSpan, SwipeError};

use crate::animation::{Easing, Tween, TweenState};
use crate::row::shift_position;

/// A row scheduled for removal.
#[derive(Debug, Clone)]
pub struct PendingDismissal {
    pub position: usize,
    /// Height measured when the row was scheduled.
    pub height: f32,
    collapse: Tween,
    collapsed: bool,
}

/// What scheduling a dismissal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The row joined the collapsing batch.
    Queued,
    /// The row was already part of the batch.
    AlreadyPending,
    /// The row has no height; the caller removes it right away.
    Immediate,
}

/// Height of a collapsing row on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseFrame {
    pub position: usize,
    pub height: f32,
}

/// Output of one coordinator frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollapseTick {
    pub frames: Vec<CollapseFrame>,
    /// Positions to remove, highest first, once the whole batch collapsed.
    pub completed: Option<Vec<usize>>,
}

/// Collects dismissed rows and sequences their collapse.
#[derive(Debug, Default)]
pub struct DismissCoordinator {
    pending: Vec<PendingDismissal>,
}

impl DismissCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the batch.
    pub fn schedule(
        &mut self,
        position: usize,
        height: f32,
        now: Instant,
        duration: Duration,
    ) -> ScheduleOutcome {
        if self.is_pending(position) {
            tracing::debug!(target: targets::DISMISS, position, "already pending");
            return ScheduleOutcome::AlreadyPending;
        }
        if height <= 0.0 {
            return ScheduleOutcome::Immediate;
        }

        let mut collapse = Tween::new(Easing::EaseOut, duration);
        collapse.start(height, 0.0, now);
        self.pending.push(PendingDismissal {
            position,
            height,
            collapse,
            collapsed: false,
        });
        tracing::debug!(
            target: targets::DISMISS,
            position,
            height,
            batch = self.pending.len(),
            "queued"
        );
        ScheduleOutcome::Queued
    }

    pub fn is_pending(&self, position: usize) -> bool {
        self.pending.iter().any(|p| p.position == position)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[PendingDismissal] {
        &self.pending
    }

    /// Positions of the batch, ascending.
    pub fn positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.pending.iter().map(|p| p.position).collect();
        positions.sort_unstable();
        positions
    }

    /// Translate pending positions past rows that were just removed.
    ///
    /// A pending position above a removed row moves down by one for each
    /// such row; a pending position that was itself removed is dropped.
    pub fn rebase_after_removal(&mut self, removed: &[usize]) {
        self.pending.retain_mut(|pending| match shift_position(pending.position, removed) {
            Some(shifted) => {
                pending.position = shifted;
                true
            }
            None => {
                tracing::debug!(
                    target: targets::DISMISS,
                    position = pending.position,
                    "pending row already removed"
                );
                false
            }
        });
    }

    /// Advance every collapse to `now`.
    pub fn tick(&mut self, now: Instant) -> CollapseTick {
        if self.pending.is_empty() {
            return CollapseTick::default();
        }

        let mut frames = Vec::new();
        for pending in self.pending.iter_mut().filter(|p| !p.collapsed) {
            match pending.collapse.update(now) {
                TweenState::Running { value, .. } => frames.push(CollapseFrame {
                    position: pending.position,
                    height: value,
                }),
                TweenState::Finished { value } => {
                    pending.collapsed = true;
                    frames.push(CollapseFrame {
                        position: pending.position,
                        height: value,
                    });
                }
                TweenState::Idle => pending.collapsed = true,
            }
        }

        let completed = if self.pending.iter().all(|p| p.collapsed) {
            let _span = PerfSpan::new(span_names::DISMISS_BATCH);
            let mut positions: Vec<usize> = self.pending.drain(..).map(|p| p.position).collect();
            positions.sort_unstable_by(|a, b| b.cmp(a));
            positions.dedup();
            tracing::debug!(target: targets::DISMISS, ?positions, "batch collapsed");
            Some(positions)
        } else {
            None
        };

        CollapseTick { frames, completed }
    }

    /// Drop the batch after a data set change.
    ///
    /// Returns the error describing what was discarded, if anything was.
    pub fn discard(&mut self) -> Option<SwipeError> {
        if self.pending.is_empty() {
            return None;
        }
        let positions = self.positions();
        self.pending.clear();
        Some(SwipeError::inconsistent_batch(positions))
    }
}

static_assertions::assert_impl_all!(DismissCoordinator: Send, Sync);
