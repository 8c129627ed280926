//! The gesture state machine.
//!
//! [`GestureClassifier`] turns the pointer stream into row transitions. It
//! owns every [`RowState`], the running offset animations and the long-press
//! timer, and is the only component that mutates them.
//!
//! ```text
//! Rest --down on swipeable row--> Dragging --release--> Settling --arrived--> Rest
//!   \--down elsewhere / disabled--> Ignored --up/cancel--> Rest
//! ```

use std::time::{Duration, Instant};

use glam::Vec2;
use swipelist_core::logging::targets;
use swipelist_core::{Result, SwipeError, TimerManager};

use crate::adapter::SwipeAdapter;
use crate::animation::{AnimationPurpose, OffsetAnimator};
use crate::config::{Side, SwipeAction, SwipeConfig, SwipeMode};
use crate::dismiss::DismissCoordinator;
use crate::intercept::DirectionLock;
use crate::listener::ListenerBridge;
use crate::mapper::RowViewMapper;
use crate::row::{OpenPhase, RowHost, RowState, RowStates, shift_position};
use crate::session::{GestureSession, GestureState};
use crate::touch::{TouchEvent, TouchPhase};

/// Borrowed view of everything outside the classifier it needs for one call.
pub struct EngineContext<'a> {
    pub host: &'a mut dyn RowHost,
    pub adapter: &'a dyn SwipeAdapter,
    pub config: &'a SwipeConfig,
    pub mapper: &'a RowViewMapper,
    pub bridge: &'a ListenerBridge,
    pub dismissals: &'a DismissCoordinator,
}

impl EngineContext<'_> {
    fn check_position(&self, position: usize) -> Result<()> {
        let item_count = self.adapter.item_count();
        if position >= item_count {
            return Err(SwipeError::stale_state(position, item_count));
        }
        Ok(())
    }

    fn set_front_translation(&mut self, position: usize, offset: f32) {
        if let Some(views) = self.mapper.views_for_position(&*self.host, position) {
            self.host.set_translation_x(views.front, offset);
        }
    }

    fn set_indicator(&mut self, position: usize, checked: bool) {
        let indicator = if checked {
            self.config.checked_indicator
        } else {
            self.config.unchecked_indicator
        };
        if let Some(views) = self.mapper.views_for_position(&*self.host, position) {
            self.host.set_indicator(views.front, indicator);
        }
    }
}

/// Side effects of a frame the classifier cannot complete on its own.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Rows that finished sliding off screen and must be collapsed.
    pub slid_out: Vec<usize>,
}

/// Whether the release velocity is a fling in `direction` (+1 right, -1 left).
fn is_fling(velocity: Vec2, direction: f32, distance: f32, config: &SwipeConfig) -> bool {
    let vx = velocity.x.abs();
    vx >= config.min_fling_velocity
        && vx <= config.max_fling_velocity
        && velocity.y.abs() * 2.0 < vx
        && velocity.x.signum() == direction
        && distance >= config.min_fling_distance
}

fn default_open_side(mode: SwipeMode) -> Side {
    if mode == SwipeMode::Right {
        Side::Right
    } else {
        Side::Left
    }
}

/// Drives row transitions from pointer events, frame ticks and programmatic requests.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    rows: RowStates,
    animator: OffsetAnimator,
    timers: TimerManager,
    session: Option<GestureSession>,
    state: GestureState,
    settling: Option<usize>,
    choice_mode: bool,
    list_moving: bool,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.state == GestureState::Rest
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn rows(&self) -> &RowStates {
        &self.rows
    }

    /// Whether a checked row switched both sides to [`SwipeAction::Choice`].
    pub fn is_choice_mode(&self) -> bool {
        self.choice_mode
    }

    pub fn is_list_moving(&self) -> bool {
        self.list_moving
    }

    pub fn is_animating(&self, position: usize) -> bool {
        self.animator.is_running(position)
    }

    /// The state of `position`, or a fresh one if it was never touched.
    pub fn row_state(&self, position: usize, adapter: &dyn SwipeAdapter) -> RowState {
        self.rows
            .get(position)
            .cloned()
            .unwrap_or_else(|| RowState::new(adapter.is_position_swipeable(position)))
    }

    fn row_mut(&mut self, position: usize, adapter: &dyn SwipeAdapter) -> &mut RowState {
        let swipe_enabled = adapter.is_position_swipeable(position);
        self.rows.get_or_create(position, swipe_enabled)
    }

    /// The action a swipe toward `side` performs right now.
    pub fn effective_action(&self, side: Side, config: &SwipeConfig) -> SwipeAction {
        if self.choice_mode {
            SwipeAction::Choice
        } else {
            config.action(side)
        }
    }

    fn resolve_mode(&self, position: usize, ctx: &EngineContext<'_>) -> SwipeMode {
        match ctx.config.mode {
            SwipeMode::PerRow => match ctx.bridge.change_swipe_mode(Some(position)) {
                Some(SwipeMode::PerRow) | None => SwipeMode::Both,
                Some(mode) => mode,
            },
            mode => mode,
        }
    }

    fn long_press_action(&self, mode: SwipeMode, config: &SwipeConfig) -> Option<SwipeAction> {
        let actions: Vec<SwipeAction> = [Side::Left, Side::Right]
            .into_iter()
            .filter(|&side| mode.allows(side))
            .map(|side| self.effective_action(side, config))
            .collect();
        if actions.contains(&SwipeAction::Choice) {
            Some(SwipeAction::Choice)
        } else if actions.contains(&SwipeAction::Reveal) {
            Some(SwipeAction::Reveal)
        } else {
            None
        }
    }

    fn reveal_side(&self, mode: SwipeMode, config: &SwipeConfig) -> Side {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| {
                mode.allows(side) && self.effective_action(side, config) == SwipeAction::Reveal
            })
            .unwrap_or_else(|| default_open_side(mode))
    }

    fn is_dismissing(&self, position: usize, ctx: &EngineContext<'_>) -> bool {
        ctx.dismissals.is_pending(position)
            || matches!(
                self.animator.purpose(position),
                Some(AnimationPurpose::SlideOut(_))
            )
    }

    fn dragged_position(&self) -> Option<usize> {
        self.session
            .as_ref()
            .filter(|s| s.dragging)
            .map(|s| s.position)
    }

    fn stop_long_press(timers: &mut TimerManager, session: &mut GestureSession) {
        if let Some(timer) = session.long_press.take() {
            timers.stop(timer).ok();
        }
    }

    // =========================================================================
    // Pointer stream
    // =========================================================================

    /// Feed one pointer event. `lock` is the direction lock after the event.
    pub fn handle(&mut self, event: &TouchEvent, lock: DirectionLock, ctx: &mut EngineContext<'_>) {
        if self.session.as_ref().is_some_and(|s| s.pointer != event.id) {
            return;
        }
        match event.phase {
            TouchPhase::Started => self.on_down(event, ctx),
            TouchPhase::Moved => self.on_move(event, lock, ctx),
            TouchPhase::Ended => self.on_up(event, ctx),
            TouchPhase::Cancelled => self.cancel_session(ctx, GestureState::Rest),
        }
    }

    fn ignore(&mut self, reason: &'static str) {
        tracing::trace!(target: targets::GESTURE, reason, "gesture ignored");
        self.session = None;
        self.settling = None;
        self.state = GestureState::Ignored;
    }

    fn on_down(&mut self, event: &TouchEvent, ctx: &mut EngineContext<'_>) {
        if self.session.is_some() {
            self.cancel_session(ctx, GestureState::Rest);
        }
        if self.list_moving {
            return self.ignore("list is scrolling");
        }
        let Some(views) = ctx.mapper.locate(&*ctx.host, event.position) else {
            return self.ignore("no row under pointer");
        };
        let position = views.position;
        if position >= ctx.adapter.item_count() || !ctx.adapter.is_position_swipeable(position) {
            return self.ignore("row is not swipeable");
        }
        if self.is_dismissing(position, ctx) {
            return self.ignore("row is being dismissed");
        }
        let mode = self.resolve_mode(position, ctx);
        if mode == SwipeMode::None {
            return self.ignore("swiping disabled for row");
        }

        let row = self.row_mut(position, ctx.adapter);
        let mut session = GestureSession::new(
            event.id,
            views,
            event.position,
            event.time,
            mode,
            row.offset,
            row.phase,
        );
        if ctx.config.open_on_long_press && self.long_press_action(mode, ctx.config).is_some() {
            let timer = self
                .timers
                .start_one_shot(event.time, ctx.config.long_press_timeout);
            session.long_press = Some(timer);
        }

        tracing::trace!(target: targets::GESTURE, position, ?mode, "pointer down");
        self.session = Some(session);
        self.settling = None;
        self.state = GestureState::Dragging;
    }

    fn on_move(&mut self, event: &TouchEvent, lock: DirectionLock, ctx: &mut EngineContext<'_>) {
        let slop = ctx.config.touch_slop;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.velocity.add(event.time, event.position);
        if !session.beyond_slop && event.position.distance_to(session.down_point) > slop {
            session.beyond_slop = true;
            Self::stop_long_press(&mut self.timers, session);
        }
        let dx = session.delta_x(event.position);
        let dragging = session.dragging;

        match lock {
            DirectionLock::Vertical if !dragging => {
                tracing::trace!(target: targets::GESTURE, "vertical scroll took the gesture");
                self.cancel_session(ctx, GestureState::Ignored);
            }
            DirectionLock::Horizontal => {
                if !dragging {
                    self.begin_drag(dx, ctx);
                }
                self.drag_to(dx, ctx);
            }
            _ => {}
        }
    }

    fn begin_drag(&mut self, dx: f32, ctx: &mut EngineContext<'_>) {
        let Some(position) = self.session.as_ref().map(|s| s.position) else {
            return;
        };
        let superseded = self.animator.cancel(position);
        let row = self.row_mut(position, ctx.adapter);
        if let Some(purpose) = superseded {
            tracing::debug!(
                target: targets::ANIMATION,
                error = %SwipeError::animation_conflict(position),
                ?purpose,
                "drag took over running animation"
            );
            row.settle_interrupted();
        }
        let (offset, phase) = (row.offset, row.phase);
        let choice_mode = self.choice_mode;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.origin_offset = offset;
        session.origin_phase = phase;
        session.dragging = true;
        Self::stop_long_press(&mut self.timers, session);

        match phase.open_side() {
            Some(side) => {
                session.side = Some(side);
                session.action = SwipeAction::Reveal;
                ctx.bridge.start_close(Some(position), side.is_right());
            }
            None => {
                let side = Side::of(dx).unwrap_or(Side::Right);
                let action = if choice_mode {
                    SwipeAction::Choice
                } else {
                    ctx.config.action(side)
                };
                session.side = Some(side);
                session.action = action;
                if session.mode.allows(side) && action != SwipeAction::None {
                    ctx.bridge.start_open(Some(position), action, side.is_right());
                }
            }
        }
    }

    fn drag_range(&self, session: &GestureSession, ctx: &EngineContext<'_>) -> (f32, f32) {
        match session.origin_phase.open_side() {
            Some(Side::Right) => (0.0, session.origin_offset.max(0.0)),
            Some(Side::Left) => (session.origin_offset.min(0.0), 0.0),
            None => {
                let width = ctx.host.row_width();
                let reach = |side: Side| {
                    if session.mode.allows(side)
                        && self.effective_action(side, ctx.config) != SwipeAction::None
                    {
                        ctx.config.open_extent(side, width)
                    } else {
                        0.0
                    }
                };
                (-reach(Side::Left), reach(Side::Right))
            }
        }
    }

    fn drag_to(&mut self, dx: f32, ctx: &mut EngineContext<'_>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let (lo, hi) = self.drag_range(session, ctx);
        let offset = (session.origin_offset + dx).max(lo).min(hi);
        let position = session.position;
        let front = session.views.front;
        let closed_origin = session.origin_phase.open_side().is_none();

        self.row_mut(position, ctx.adapter).offset = offset;
        if closed_origin {
            if let (Some(session), Some(side)) = (self.session.as_mut(), Side::of(offset)) {
                session.side = Some(side);
            }
        }
        ctx.host.set_translation_x(front, offset);
        ctx.bridge.moved(Some(position), offset);
    }

    fn on_up(&mut self, event: &TouchEvent, ctx: &mut EngineContext<'_>) {
        let Some(mut session) = self.session.take() else {
            if self.state == GestureState::Ignored {
                self.state = GestureState::Rest;
            }
            return;
        };
        Self::stop_long_press(&mut self.timers, &mut session);
        session.velocity.add(event.time, event.position);
        let position = session.position;

        if session.dragging {
            self.release(&session, event.time, ctx);
        } else if !session.long_press_fired && !session.beyond_slop {
            let open = self.rows.get(position).is_some_and(|r| r.phase.is_open());
            if open {
                ctx.bridge.click_back_view(Some(position));
            } else {
                ctx.bridge.click_front_view(Some(position));
            }
        }
        self.finish_gesture(position);
    }

    fn release(&mut self, session: &GestureSession, now: Instant, ctx: &mut EngineContext<'_>) {
        let position = session.position;
        let width = ctx.host.row_width();
        let velocity = session.velocity.velocity();
        let offset = self
            .rows
            .get(position)
            .map_or(session.origin_offset, |r| r.offset);

        match session.origin_phase.open_side() {
            Some(side) => {
                let travel = (session.origin_offset - offset).abs();
                let fling = is_fling(velocity, -side.sign(), travel, ctx.config);
                if travel >= ctx.config.commit_distance(side, width) || fling {
                    tracing::debug!(target: targets::GESTURE, position, ?side, fling, "closing");
                    self.row_mut(position, ctx.adapter).pending_action = SwipeAction::Reveal;
                    self.start_animation(position, 0.0, AnimationPurpose::Close(side), now, ctx);
                } else {
                    self.settle(position, session.origin_offset, now, ctx);
                }
            }
            None => {
                let committed = Side::of(offset).filter(|&side| {
                    offset.abs() >= ctx.config.commit_distance(side, width)
                        || is_fling(velocity, side.sign(), offset.abs(), ctx.config)
                });
                match committed {
                    Some(side) => self.commit(position, side, now, ctx),
                    None => self.settle(position, 0.0, now, ctx),
                }
            }
        }
    }

    fn commit(&mut self, position: usize, side: Side, now: Instant, ctx: &mut EngineContext<'_>) {
        let action = self.effective_action(side, ctx.config);
        self.row_mut(position, ctx.adapter).pending_action = action;
        tracing::debug!(target: targets::GESTURE, position, ?side, ?action, "swipe committed");

        match action {
            SwipeAction::Reveal => self.open_row(position, side, now, ctx),
            SwipeAction::Dismiss => {
                let target = side.sign() * ctx.host.row_width();
                self.start_animation(position, target, AnimationPurpose::SlideOut(side), now, ctx);
            }
            SwipeAction::Choice => {
                self.toggle_choice(position, now, ctx);
                self.settle(position, 0.0, now, ctx);
            }
            SwipeAction::None => self.settle(position, 0.0, now, ctx),
        }
    }

    fn finish_gesture(&mut self, position: usize) {
        if self.animator.is_running(position) {
            self.state = GestureState::Settling;
            self.settling = Some(position);
        } else {
            self.state = GestureState::Rest;
            self.settling = None;
        }
    }

    /// Abandon the current gesture as if the pointer had been cancelled.
    pub fn cancel(&mut self, ctx: &mut EngineContext<'_>) {
        self.cancel_session(ctx, GestureState::Rest);
    }

    /// Drop the session, putting a dragged row back where it started.
    fn cancel_session(&mut self, ctx: &mut EngineContext<'_>, next: GestureState) {
        if let Some(mut session) = self.session.take() {
            Self::stop_long_press(&mut self.timers, &mut session);
            if session.dragging {
                if let Some(row) = self.rows.get_mut(session.position) {
                    row.offset = session.origin_offset;
                    row.phase = session.origin_phase;
                }
                ctx.host
                    .set_translation_x(session.views.front, session.origin_offset);
            }
            tracing::trace!(
                target: targets::GESTURE,
                position = session.position,
                "session cancelled"
            );
        }
        self.settling = None;
        self.state = next;
    }

    // =========================================================================
    // Row transitions
    // =========================================================================

    fn start_animation(
        &mut self,
        position: usize,
        target: f32,
        purpose: AnimationPurpose,
        now: Instant,
        ctx: &mut EngineContext<'_>,
    ) {
        let duration = ctx.config.effective_animation_duration();
        let superseded = self.animator.cancel(position);
        let row = self.row_mut(position, ctx.adapter);
        if let Some(previous) = superseded {
            tracing::debug!(
                target: targets::ANIMATION,
                error = %SwipeError::animation_conflict(position),
                ?previous,
                ?purpose,
                "animation superseded"
            );
            row.settle_interrupted();
        }
        match purpose {
            AnimationPurpose::Open(_) | AnimationPurpose::SlideOut(_) => {
                row.phase = OpenPhase::Opening;
            }
            AnimationPurpose::Close(_) => row.phase = OpenPhase::Closing,
            AnimationPurpose::Settle => {}
        }
        let from = row.offset;
        self.animator
            .start(position, from, target, purpose, now, duration);
    }

    fn settle(&mut self, position: usize, target: f32, now: Instant, ctx: &mut EngineContext<'_>) {
        let offset = self.row_mut(position, ctx.adapter).offset;
        if (offset - target).abs() <= f32::EPSILON {
            self.animator.cancel(position);
            let row = self.row_mut(position, ctx.adapter);
            row.offset = target;
            row.pending_action = SwipeAction::None;
            ctx.set_front_translation(position, target);
            return;
        }
        self.start_animation(position, target, AnimationPurpose::Settle, now, ctx);
    }

    fn open_row(&mut self, position: usize, side: Side, now: Instant, ctx: &mut EngineContext<'_>) {
        let already_open = self
            .rows
            .get(position)
            .is_some_and(|r| r.phase == OpenPhase::open(side))
            && !self.animator.is_running(position);
        if already_open || self.animator.purpose(position) == Some(AnimationPurpose::Open(side)) {
            tracing::trace!(target: targets::GESTURE, position, ?side, "already open");
            if let Some(row) = self.rows.get_mut(position) {
                row.pending_action = SwipeAction::None;
            }
            return;
        }

        self.close_all_opened_except(Some(position), now, ctx);
        let target = side.sign() * ctx.config.open_extent(side, ctx.host.row_width());
        self.start_animation(position, target, AnimationPurpose::Open(side), now, ctx);
    }

    fn close_row(&mut self, position: usize, now: Instant, ctx: &mut EngineContext<'_>) {
        if matches!(
            self.animator.purpose(position),
            Some(AnimationPurpose::SlideOut(_) | AnimationPurpose::Close(_))
        ) {
            return;
        }
        let Some((phase, offset)) = self.rows.get(position).map(|r| (r.phase, r.offset)) else {
            return;
        };
        let side = match phase {
            OpenPhase::OpenLeft | OpenPhase::OpenRight => phase.open_side(),
            OpenPhase::Opening => Side::of(offset),
            OpenPhase::Closed | OpenPhase::Closing => None,
        };
        match side {
            Some(side) => {
                self.start_animation(position, 0.0, AnimationPurpose::Close(side), now, ctx);
            }
            None if phase == OpenPhase::Opening => {
                self.animator.cancel(position);
                if let Some(row) = self.rows.get_mut(position) {
                    row.phase = OpenPhase::Closed;
                    row.pending_action = SwipeAction::None;
                }
            }
            None => {}
        }
    }

    fn close_all_opened_except(
        &mut self,
        except: Option<usize>,
        now: Instant,
        ctx: &mut EngineContext<'_>,
    ) {
        let dragged = self.dragged_position();
        for position in self.rows.opened_positions() {
            if Some(position) != except && Some(position) != dragged {
                self.close_row(position, now, ctx);
            }
        }
    }

    fn toggle_choice(&mut self, position: usize, now: Instant, ctx: &mut EngineContext<'_>) {
        let before = self.rows.checked_count();
        let row = self.row_mut(position, ctx.adapter);
        row.checked = !row.checked;
        let checked = row.checked;
        let after = if checked {
            before + 1
        } else {
            before.saturating_sub(1)
        };
        ctx.set_indicator(position, checked);

        if before == 0 && after == 1 {
            self.choice_mode = true;
            ctx.bridge.choice_started();
            self.close_all_opened_except(None, now, ctx);
        }
        if before == 1 && after == 0 {
            self.choice_mode = false;
            ctx.bridge.choice_ended();
        }
        ctx.bridge.choice_changed(Some(position), checked);
    }

    fn fire_long_press(&mut self, now: Instant, ctx: &mut EngineContext<'_>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.long_press = None;
        if !session.is_stationary() {
            return;
        }
        session.long_press_fired = true;
        let (position, mode) = (session.position, session.mode);
        tracing::debug!(target: targets::GESTURE, position, "long press");

        match self.long_press_action(mode, ctx.config) {
            Some(SwipeAction::Choice) => self.toggle_choice(position, now, ctx),
            Some(SwipeAction::Reveal) => {
                let closed = self
                    .rows
                    .get(position)
                    .is_none_or(|r| r.phase == OpenPhase::Closed);
                if closed {
                    let side = self.reveal_side(mode, ctx.config);
                    self.open_row(position, side, now, ctx);
                }
            }
            _ => {}
        }
    }

    /// Advance animations and timers to `now`.
    pub fn tick(&mut self, now: Instant, ctx: &mut EngineContext<'_>) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for frame in self.animator.tick(now) {
            let position = frame.position;
            let row = self.row_mut(position, ctx.adapter);
            row.offset = frame.offset;
            match frame.finished {
                Some(AnimationPurpose::Open(side)) => {
                    row.phase = OpenPhase::open(side);
                    row.pending_action = SwipeAction::None;
                }
                Some(AnimationPurpose::Close(_)) => {
                    row.phase = OpenPhase::Closed;
                    row.offset = 0.0;
                    row.pending_action = SwipeAction::None;
                }
                Some(AnimationPurpose::Settle) => row.pending_action = SwipeAction::None,
                Some(AnimationPurpose::SlideOut(_)) | None => {}
            }
            let offset = row.offset;
            ctx.set_front_translation(position, offset);

            match frame.finished {
                Some(AnimationPurpose::Open(side)) => {
                    ctx.bridge.opened(Some(position), side.is_right());
                }
                Some(AnimationPurpose::Close(side)) => {
                    ctx.bridge.closed(Some(position), side.is_right());
                }
                Some(AnimationPurpose::SlideOut(_)) => outcome.slid_out.push(position),
                _ => {}
            }
        }

        for timer in self.timers.process_expired(now) {
            if self.session.as_ref().and_then(|s| s.long_press) == Some(timer) {
                self.fire_long_press(now, ctx);
            }
        }

        if self.state == GestureState::Settling
            && self.settling.is_none_or(|p| !self.animator.is_running(p))
        {
            self.state = GestureState::Rest;
            self.settling = None;
        }
        outcome
    }

    /// Time from `now` until the next pending timer (the long press) fires.
    pub fn time_until_next_timer(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    // =========================================================================
    // Programmatic requests
    // =========================================================================

    /// Animate `position` open toward `side`, or the mode's default side.
    pub fn open(
        &mut self,
        position: usize,
        side: Option<Side>,
        now: Instant,
        ctx: &mut EngineContext<'_>,
    ) -> Result<()> {
        ctx.check_position(position)?;
        if self.is_dismissing(position, ctx) || self.dragged_position() == Some(position) {
            tracing::debug!(
                target: targets::GESTURE,
                position,
                "open request ignored while row is busy"
            );
            return Ok(());
        }
        let side = side.unwrap_or_else(|| default_open_side(ctx.config.mode));
        self.open_row(position, side, now, ctx);
        Ok(())
    }

    /// Animate `position` closed.
    pub fn close(
        &mut self,
        position: usize,
        now: Instant,
        ctx: &mut EngineContext<'_>,
    ) -> Result<()> {
        ctx.check_position(position)?;
        if self.is_dismissing(position, ctx) || self.dragged_position() == Some(position) {
            tracing::debug!(
                target: targets::GESTURE,
                position,
                "close request ignored while row is busy"
            );
            return Ok(());
        }
        self.close_row(position, now, ctx);
        Ok(())
    }

    pub fn close_all_opened(&mut self, now: Instant, ctx: &mut EngineContext<'_>) {
        self.close_all_opened_except(None, now, ctx);
    }

    pub fn set_checked(
        &mut self,
        position: usize,
        checked: bool,
        now: Instant,
        ctx: &mut EngineContext<'_>,
    ) -> Result<()> {
        ctx.check_position(position)?;
        if self.is_checked(position) != checked {
            self.toggle_choice(position, now, ctx);
        }
        Ok(())
    }

    pub fn is_checked(&self, position: usize) -> bool {
        self.rows.get(position).is_some_and(|r| r.checked)
    }

    pub fn selected_positions(&self) -> Vec<usize> {
        self.rows.checked_positions()
    }

    pub fn selected_count(&self) -> usize {
        self.rows.checked_count()
    }

    /// Uncheck every row, ending choice mode if it was active.
    pub fn clear_selection(&mut self, ctx: &mut EngineContext<'_>) {
        let checked = self.rows.checked_positions();
        for &position in &checked {
            if let Some(row) = self.rows.get_mut(position) {
                row.checked = false;
            }
            ctx.set_indicator(position, false);
        }
        if !checked.is_empty() {
            self.choice_mode = false;
            ctx.bridge.choice_ended();
        }
    }

    /// Clear the selection and return what was selected.
    pub fn take_selection(&mut self, ctx: &mut EngineContext<'_>) -> Vec<usize> {
        let positions = self.rows.checked_positions();
        self.clear_selection(ctx);
        positions
    }

    /// Re-apply a row's offset and indicator to whatever view now shows it.
    pub fn reset_row_state(&self, position: usize, ctx: &mut EngineContext<'_>) -> Result<()> {
        ctx.check_position(position)?;
        let row = self.row_state(position, ctx.adapter);
        ctx.set_front_translation(position, row.offset);
        ctx.set_indicator(position, row.checked);
        Ok(())
    }

    /// Follow rows the engine itself removed.
    pub fn on_rows_removed(&mut self, descending: &[usize], bridge: &ListenerBridge) {
        let was_selecting = self.choice_mode;
        self.rows.remove_rows(descending);
        self.animator.remove_rows(descending);

        let shifted = self
            .session
            .as_ref()
            .map(|s| shift_position(s.position, descending));
        match shifted {
            Some(Some(position)) => {
                if let Some(session) = self.session.as_mut() {
                    session.position = position;
                    session.views.position = position;
                }
            }
            Some(None) => {
                if let Some(mut session) = self.session.take() {
                    Self::stop_long_press(&mut self.timers, &mut session);
                }
                self.state = GestureState::Ignored;
            }
            None => {}
        }
        self.settling = self.settling.and_then(|p| shift_position(p, descending));

        if was_selecting && self.rows.checked_count() == 0 {
            self.choice_mode = false;
            bridge.choice_ended();
        }
    }

    /// Forget every row after the data set changed under the engine.
    pub fn on_data_set_changed(&mut self, ctx: &mut EngineContext<'_>) {
        for views in ctx.mapper.visible_rows(&*ctx.host) {
            ctx.host.set_translation_x(views.front, 0.0);
            ctx.host.set_indicator(views.front, ctx.config.unchecked_indicator);
        }

        let pointer_down = self.session.is_some() || self.state == GestureState::Ignored;
        self.rows.clear();
        self.animator.clear();
        self.timers.clear();
        self.session = None;
        self.settling = None;
        self.choice_mode = false;
        self.state = if pointer_down {
            GestureState::Ignored
        } else {
            GestureState::Rest
        };
    }

    /// Track list scrolling; a moving list pauses swiping.
    pub fn set_list_moving(&mut self, moving: bool, now: Instant, ctx: &mut EngineContext<'_>) {
        self.list_moving = moving;
        if !moving {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if session.long_press.is_some() {
                tracing::debug!(target: targets::GESTURE, "long press cancelled by list scroll");
            }
            Self::stop_long_press(&mut self.timers, session);
        }
        if self.session.as_ref().is_some_and(|s| !s.dragging) {
            self.cancel_session(ctx, GestureState::Ignored);
        }
        if ctx.config.close_on_list_move {
            self.close_all_opened(now, ctx);
        }
    }
}

static_assertions::assert_impl_all!(GestureClassifier: Send, Sync);
