//! The widget-facing facade.

use std::time::{Duration, Instant};

use swipelist_core::logging::{span_names, targets};
use swipelist_core::{PerfSpan, Result, SwipeError, swipe_debug};

use crate::adapter::SwipeAdapter;
use crate::classifier::{EngineContext, GestureClassifier};
use crate::config::{ConfigCell, ResourceId, Side, SwipeAction, SwipeConfig, SwipeMode};
use crate::dismiss::{DismissCoordinator, ScheduleOutcome};
use crate::intercept::{InterceptDecision, InterceptGate};
use crate::listener::{ListenerBridge, SharedListener};
use crate::mapper::RowViewMapper;
use crate::row::{RowHost, RowState, shift_position};
use crate::scroll::{ListEdge, ListScrollState, ScrollEdgeTracker};
use crate::session::GestureState;
use crate::touch::{TouchEvent, TouchPhase};

/// A list whose rows can be swiped open, checked or dismissed.
///
/// Owns the adapter and the host view hierarchy, and wires touch events,
/// frame ticks and programmatic requests through the engine components.
///
/// # Example
///
/// ```ignore
/// let mut list = SwipeListView::new(adapter, host, SwipeConfig::default())?;
/// let decision = list.on_touch_event(TouchEvent::down((20.0, 75.0), now));
/// list.tick(now + Duration::from_millis(16));
/// ```
#[derive(Debug)]
pub struct SwipeListView<A, H> {
    adapter: A,
    host: H,
    config: ConfigCell,
    mapper: RowViewMapper,
    bridge: ListenerBridge,
    gate: InterceptGate,
    classifier: GestureClassifier,
    dismiss: DismissCoordinator,
    edges: ScrollEdgeTracker,
    enabled: bool,
}

impl<A: SwipeAdapter, H: RowHost> SwipeListView<A, H> {
    /// Create the list, failing if the host's row layout lacks the front or back view.
    pub fn new(adapter: A, host: H, config: SwipeConfig) -> Result<Self> {
        let mapper = RowViewMapper::new(config.front_view.clone(), config.back_view.clone());
        mapper.validate(&host)?;
        tracing::debug!(
            target: targets::CONFIG,
            mode = ?config.mode,
            action_left = ?config.action_left,
            action_right = ?config.action_right,
            "swipe list created"
        );

        Ok(Self {
            adapter,
            host,
            config: ConfigCell::new(config),
            mapper,
            bridge: ListenerBridge::new(),
            gate: InterceptGate::new(),
            classifier: GestureClassifier::new(),
            dismiss: DismissCoordinator::new(),
            edges: ScrollEdgeTracker::new(),
            enabled: true,
        })
    }

    fn split(&mut self) -> (&mut GestureClassifier, EngineContext<'_>) {
        let ctx = EngineContext {
            host: &mut self.host,
            adapter: &self.adapter,
            config: self.config.current(),
            mapper: &self.mapper,
            bridge: &self.bridge,
            dismissals: &self.dismiss,
        };
        (&mut self.classifier, ctx)
    }

    fn apply_pending_config(&mut self) {
        if self.classifier.is_at_rest() {
            self.config.apply_pending();
        }
    }

    fn update_config(&mut self, change: impl FnOnce(&mut SwipeConfig)) {
        let defer = !self.classifier.is_at_rest();
        self.config.update(defer, change);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the data.
    ///
    /// Call [`notify_data_set_changed`](Self::notify_data_set_changed) after editing it.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// The configuration gestures currently run against.
    pub fn config(&self) -> &SwipeConfig {
        self.config.current()
    }

    pub fn row_state(&self, position: usize) -> RowState {
        self.classifier.row_state(position, &self.adapter)
    }

    pub fn gesture_state(&self) -> GestureState {
        self.classifier.state()
    }

    pub fn is_open(&self, position: usize) -> bool {
        self.row_state(position).phase.is_open()
    }

    /// How long the host may wait before the next timed event (a long press)
    /// needs a [`tick`](Self::tick). Running animations still need every frame.
    pub fn time_until_next_timer(&mut self, now: Instant) -> Option<Duration> {
        self.classifier.time_until_next_timer(now)
    }

    pub fn has_pending_dismissals(&self) -> bool {
        !self.dismiss.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn swiping on or off. Disabling drops any gesture in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.gate.reset();
            let (classifier, mut ctx) = self.split();
            classifier.cancel(&mut ctx);
        }
    }

    // =========================================================================
    // Listener
    // =========================================================================

    pub fn set_listener(&mut self, listener: SharedListener) {
        self.bridge.set(listener);
    }

    pub fn clear_listener(&mut self) {
        self.bridge.clear();
    }

    // =========================================================================
    // Event entry points
    // =========================================================================

    /// Feed one pointer event and report who should handle it.
    pub fn on_touch_event(&mut self, event: TouchEvent) -> InterceptDecision {
        if !self.enabled || self.config.current().mode == SwipeMode::None {
            return InterceptDecision::PassThrough;
        }
        let _span = PerfSpan::new(span_names::TOUCH);

        // The up or cancel ending an ignored stream resets the classifier, so
        // the ignored state has to be read before handling it.
        let ignored_stream = event.phase != TouchPhase::Started
            && self.classifier.state() == GestureState::Ignored;

        let decision = self.gate.decide(&event, self.config.current().touch_slop);
        let lock = self.gate.lock();
        let (classifier, mut ctx) = self.split();
        classifier.handle(&event, lock, &mut ctx);

        let decision = if ignored_stream || self.classifier.state() == GestureState::Ignored {
            InterceptDecision::PassThrough
        } else {
            decision
        };
        self.apply_pending_config();
        decision
    }

    /// Advance animations, timers and collapsing rows to `now`.
    pub fn tick(&mut self, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let outcome = classifier.tick(now, &mut ctx);
        self.dismiss_each(outcome.slid_out, now);

        let collapse = self.dismiss.tick(now);
        for frame in collapse.frames {
            if let Some(child) = self.host.child_for_position(frame.position) {
                self.host.set_height(child, Some(frame.height));
            }
        }
        if let Some(positions) = collapse.completed {
            self.finish_removal(&positions);
        }
        self.apply_pending_config();
    }

    /// The host's data changed behind the engine's back.
    ///
    /// Every row returns to closed and unchecked without close events, and a
    /// collapsing dismiss batch is dropped without `on_dismiss`.
    pub fn notify_data_set_changed(&mut self) {
        for position in self.dismiss.positions() {
            if let Some(child) = self.host.child_for_position(position) {
                self.host.set_height(child, None);
            }
        }
        if let Some(error) = self.dismiss.discard() {
            tracing::warn!(target: targets::DISMISS, %error, "dismiss batch discarded");
        }

        let (classifier, mut ctx) = self.split();
        classifier.on_data_set_changed(&mut ctx);
        self.bridge.list_changed();
    }

    /// The host list started or stopped scrolling.
    pub fn on_list_scroll_state_changed(&mut self, state: ListScrollState, now: Instant) {
        tracing::trace!(target: targets::GESTURE, ?state, "list scroll state");
        let (classifier, mut ctx) = self.split();
        classifier.set_list_moving(state.is_moving(), now, &mut ctx);
    }

    /// The host list scrolled; reports reaching the first or last item.
    pub fn on_list_scrolled(&mut self, first_visible: usize, visible_count: usize) {
        let total = self.adapter.item_count();
        for edge in self.edges.on_scroll(first_visible, visible_count, total) {
            match edge {
                ListEdge::First => self.bridge.first_list_item(),
                ListEdge::Last => self.bridge.last_list_item(),
            }
        }
    }

    /// Forget the direction lock of the current touch stream.
    pub fn reset_scrolling(&mut self) {
        self.gate.reset();
    }

    // =========================================================================
    // Programmatic row control
    // =========================================================================

    /// Open `position` toward the mode's default side.
    pub fn open(&mut self, position: usize, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let result = classifier.open(position, None, now, &mut ctx);
        absorb(result, "open");
    }

    pub fn open_to(&mut self, position: usize, side: Side, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let result = classifier.open(position, Some(side), now, &mut ctx);
        absorb(result, "open");
    }

    pub fn close(&mut self, position: usize, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let result = classifier.close(position, now, &mut ctx);
        absorb(result, "close");
    }

    pub fn close_all_opened(&mut self, now: Instant) {
        let (classifier, mut ctx) = self.split();
        classifier.close_all_opened(now, &mut ctx);
    }

    /// Re-apply a position's state to the view now showing it, after recycling.
    pub fn reset_row_state(&mut self, position: usize) {
        let (classifier, mut ctx) = self.split();
        let result = classifier.reset_row_state(position, &mut ctx);
        absorb(result, "reset row state");
    }

    /// Collapse and remove `position`.
    pub fn dismiss(&mut self, position: usize, now: Instant) {
        self.request_dismiss(position, now);
    }

    /// Collapse and remove every checked row, clearing the selection.
    pub fn dismiss_selected(&mut self, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let positions = classifier.take_selection(&mut ctx);
        tracing::debug!(target: targets::DISMISS, ?positions, "dismissing selection");
        self.dismiss_each(positions, now);
    }

    /// Dismiss several rows named by their positions before any of them is
    /// removed. Rows removed immediately shift the ones that follow.
    fn dismiss_each(&mut self, positions: Vec<usize>, now: Instant) {
        let mut removed = Vec::new();
        for original in positions {
            let Some(position) = shift_position(original, &removed) else {
                continue;
            };
            if self.request_dismiss(position, now) {
                removed.push(original);
            }
        }
    }

    /// Returns `true` when the row was removed right away.
    fn request_dismiss(&mut self, position: usize, now: Instant) -> bool {
        let item_count = self.adapter.item_count();
        if position >= item_count {
            absorb(Err(SwipeError::stale_state(position, item_count)), "dismiss");
            return false;
        }
        self.schedule_dismiss(position, now)
    }

    fn schedule_dismiss(&mut self, position: usize, now: Instant) -> bool {
        let height = self
            .host
            .child_for_position(position)
            .map_or(0.0, |child| self.host.view_height(child));
        let duration = self.config.current().effective_animation_duration();

        if self.dismiss.schedule(position, height, now, duration) != ScheduleOutcome::Immediate {
            return false;
        }
        self.finish_removal(&[position]);
        self.dismiss.rebase_after_removal(&[position]);
        true
    }

    /// Remove collapsed rows from the adapter and report them.
    fn finish_removal(&mut self, descending: &[usize]) {
        let item_count = self.adapter.item_count();
        let valid: Vec<usize> = descending
            .iter()
            .copied()
            .filter(|&position| position < item_count)
            .collect();
        if valid.len() != descending.len() {
            let error = SwipeError::inconsistent_batch(descending.to_vec());
            tracing::warn!(target: targets::DISMISS, %error, "stale positions dropped from batch");
        }
        if valid.is_empty() {
            return;
        }

        for &position in &valid {
            if let Some(views) = self.mapper.views_for_position(&self.host, position) {
                self.host.set_height(views.child, None);
                self.host.set_translation_x(views.front, 0.0);
            }
        }
        self.classifier.on_rows_removed(&valid, &self.bridge);
        self.adapter.remove_positions(&valid);
        tracing::debug!(target: targets::DISMISS, positions = ?valid, "rows removed");
        self.bridge.dismiss(&valid);
    }

    // =========================================================================
    // Choice
    // =========================================================================

    pub fn set_item_checked(&mut self, position: usize, checked: bool, now: Instant) {
        let (classifier, mut ctx) = self.split();
        let result = classifier.set_checked(position, checked, now, &mut ctx);
        absorb(result, "set checked");
    }

    pub fn is_checked(&self, position: usize) -> bool {
        self.classifier.is_checked(position)
    }

    /// Checked positions in ascending order.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.classifier.selected_positions()
    }

    pub fn selected_count(&self) -> usize {
        self.classifier.selected_count()
    }

    pub fn clear_selection(&mut self) {
        let (classifier, mut ctx) = self.split();
        classifier.clear_selection(&mut ctx);
    }

    // =========================================================================
    // Configuration setters
    //
    // Changes made while a gesture is in progress wait until the engine rests.
    // =========================================================================

    pub fn set_mode(&mut self, mode: SwipeMode) {
        self.update_config(|c| c.mode = mode);
    }

    pub fn set_action_left(&mut self, action: SwipeAction) {
        self.update_config(|c| c.action_left = action);
    }

    pub fn set_action_right(&mut self, action: SwipeAction) {
        self.update_config(|c| c.action_right = action);
    }

    pub fn set_offset_left(&mut self, offset: f32) {
        self.update_config(|c| c.offset_left = offset.max(0.0));
    }

    pub fn set_offset_right(&mut self, offset: f32) {
        self.update_config(|c| c.offset_right = offset.max(0.0));
    }

    /// Zero restores the default duration.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.update_config(|c| c.animation_duration = duration);
    }

    pub fn set_open_on_long_press(&mut self, enabled: bool) {
        self.update_config(|c| c.open_on_long_press = enabled);
    }

    pub fn set_close_on_list_move(&mut self, enabled: bool) {
        self.update_config(|c| c.close_on_list_move = enabled);
    }

    pub fn set_indicators(&mut self, checked: Option<ResourceId>, unchecked: Option<ResourceId>) {
        self.update_config(|c| {
            c.checked_indicator = checked;
            c.unchecked_indicator = unchecked;
        });
    }
}

/// Log a recovered error instead of surfacing it to the host.
fn absorb(result: Result<()>, operation: &'static str) {
    if let Err(error) = result {
        swipe_debug!(%error, recoverable = error.is_recoverable(), operation, "request ignored");
    }
}
