//! Lifecycle notifications for the hosting application.

use std::sync::Arc;

use parking_lot::Mutex;
use swipelist_core::logging::targets;

use crate::config::{SwipeAction, SwipeMode};

/// Observer of row lifecycle events.
///
/// Every method has an empty default so implementors only override what
/// they care about.
pub trait SwipeListener {
    /// A row finished opening.
    fn on_opened(&mut self, _position: usize, _to_right: bool) {}

    /// A row finished closing.
    fn on_closed(&mut self, _position: usize, _from_right: bool) {}

    /// The data set changed and all row state was discarded.
    fn on_list_changed(&mut self) {}

    /// A row is being dragged; `offset` is the front view's translation.
    fn on_move(&mut self, _position: usize, _offset: f32) {}

    /// A closed row started moving under the user's finger.
    fn on_start_open(&mut self, _position: usize, _action: SwipeAction, _to_right: bool) {}

    /// An open row started moving back under the user's finger.
    fn on_start_close(&mut self, _position: usize, _from_right: bool) {}

    /// The front view of a closed row was tapped.
    fn on_click_front_view(&mut self, _position: usize) {}

    /// The back view of an open row was tapped.
    fn on_click_back_view(&mut self, _position: usize) {}

    /// Rows were removed; positions are sorted highest first.
    fn on_dismiss(&mut self, _reverse_sorted_positions: &[usize]) {}

    /// Asked in [`SwipeMode::PerRow`] for the mode of one row.
    fn on_change_swipe_mode(&mut self, _position: usize) -> Option<SwipeMode> {
        None
    }

    /// A row's checked state changed.
    fn on_choice_changed(&mut self, _position: usize, _selected: bool) {}

    /// The first row was checked.
    fn on_choice_started(&mut self) {}

    /// The last checked row was unchecked.
    fn on_choice_ended(&mut self) {}

    /// The list scrolled back to its first item.
    fn on_first_list_item(&mut self) {}

    /// The list scrolled to its last item.
    fn on_last_list_item(&mut self) {}
}

type DynListener = dyn SwipeListener + Send;

/// Shared handle to a listener.
pub type SharedListener = Arc<Mutex<DynListener>>;

/// Forwards events to the registered listener, if there is one.
///
/// Position-carrying events take `Option<usize>`; `None` marks a gesture that
/// never resolved to a row and is dropped here.
#[derive(Default)]
pub struct ListenerBridge {
    listener: Option<SharedListener>,
}

impl std::fmt::Debug for ListenerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerBridge")
            .field("registered", &self.listener.is_some())
            .finish()
    }
}

impl ListenerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, listener: SharedListener) {
        self.listener = Some(listener);
    }

    pub fn clear(&mut self) {
        self.listener = None;
    }

    pub fn is_registered(&self) -> bool {
        self.listener.is_some()
    }

    fn with<R>(&self, f: impl FnOnce(&mut DynListener) -> R) -> Option<R> {
        let listener = self.listener.as_ref()?;
        let mut guard = listener.lock();
        Some(f(&mut *guard))
    }

    fn with_position(&self, position: Option<usize>, f: impl FnOnce(&mut DynListener, usize)) {
        match position {
            Some(position) => {
                self.with(|l| f(l, position));
            }
            None => {
                tracing::trace!(target: targets::LISTENER, "event without position dropped");
            }
        }
    }

    pub fn opened(&self, position: Option<usize>, to_right: bool) {
        self.with_position(position, |l, p| l.on_opened(p, to_right));
    }

    pub fn closed(&self, position: Option<usize>, from_right: bool) {
        self.with_position(position, |l, p| l.on_closed(p, from_right));
    }

    pub fn list_changed(&self) {
        self.with(|l| l.on_list_changed());
    }

    pub fn moved(&self, position: Option<usize>, offset: f32) {
        self.with_position(position, |l, p| l.on_move(p, offset));
    }

    pub fn start_open(&self, position: Option<usize>, action: SwipeAction, to_right: bool) {
        self.with_position(position, |l, p| l.on_start_open(p, action, to_right));
    }

    pub fn start_close(&self, position: Option<usize>, from_right: bool) {
        self.with_position(position, |l, p| l.on_start_close(p, from_right));
    }

    pub fn click_front_view(&self, position: Option<usize>) {
        self.with_position(position, |l, p| l.on_click_front_view(p));
    }

    pub fn click_back_view(&self, position: Option<usize>) {
        self.with_position(position, |l, p| l.on_click_back_view(p));
    }

    pub fn dismiss(&self, reverse_sorted_positions: &[usize]) {
        if reverse_sorted_positions.is_empty() {
            return;
        }
        self.with(|l| l.on_dismiss(reverse_sorted_positions));
    }

    /// Ask the listener for a row's mode; `None` when unregistered or undecided.
    pub fn change_swipe_mode(&self, position: Option<usize>) -> Option<SwipeMode> {
        let position = position?;
        self.with(|l| l.on_change_swipe_mode(position)).flatten()
    }

    pub fn choice_changed(&self, position: Option<usize>, selected: bool) {
        self.with_position(position, |l, p| l.on_choice_changed(p, selected));
    }

    pub fn choice_started(&self) {
        self.with(|l| l.on_choice_started());
    }

    pub fn choice_ended(&self) {
        self.with(|l| l.on_choice_ended());
    }

    pub fn first_list_item(&self) {
        self.with(|l| l.on_first_list_item());
    }

    pub fn last_list_item(&self) {
        self.with(|l| l.on_last_list_item());
    }
}

static_assertions::assert_impl_all!(ListenerBridge: Send, Sync);
