//! End-to-end tests driving a swipe list through a fake view hierarchy.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use swipelist::config::{DEFAULT_BACK_VIEW, DEFAULT_FRONT_VIEW};
use swipelist::{
    GestureState, Group, GroupedAdapter, InterceptDecision, ListAdapter, ListScrollState,
    OpenPhase, Rect, ResourceId, RowFlags, RowHost, RowState, Side, SwipeAction, SwipeConfig,
    SwipeError, SwipeListView, SwipeListener, SwipeMode, TouchEvent, ViewId, ViewKey,
};

const ROW_WIDTH: f32 = 300.0;
const ROW_HEIGHT: f32 = 50.0;
const CHECKED: ResourceId = ResourceId(1);
const UNCHECKED: ResourceId = ResourceId(2);

/// Rows are stacked children; row `p` has view ids `p*10+1` (row),
/// `p*10+2` (front) and `p*10+3` (back).
#[derive(Debug, Default)]
struct FakeHost {
    rows: usize,
    keys: Vec<ViewKey>,
    zero_height: Vec<usize>,
    translations: HashMap<ViewId, f32>,
    heights: HashMap<ViewId, Option<f32>>,
    indicators: HashMap<ViewId, Option<ResourceId>>,
}

impl FakeHost {
    fn new(rows: usize) -> Self {
        Self {
            rows,
            keys: vec![ViewKey::new(DEFAULT_FRONT_VIEW), ViewKey::new(DEFAULT_BACK_VIEW)],
            ..Self::default()
        }
    }

    fn front(position: usize) -> ViewId {
        ViewId(position as u64 * 10 + 2)
    }

    fn translation(&self, position: usize) -> f32 {
        self.translations
            .get(&Self::front(position))
            .copied()
            .unwrap_or(0.0)
    }

    fn indicator(&self, position: usize) -> Option<ResourceId> {
        self.indicators
            .get(&Self::front(position))
            .copied()
            .flatten()
    }
}

impl RowHost for FakeHost {
    fn row_width(&self) -> f32 {
        ROW_WIDTH
    }

    fn child_count(&self) -> usize {
        self.rows
    }

    fn child_at(&self, index: usize) -> Option<ViewId> {
        (index < self.rows).then(|| ViewId(index as u64 * 10 + 1))
    }

    fn child_bounds(&self, child: ViewId) -> Rect {
        let position = (child.0 / 10) as f32;
        Rect::new(0.0, position * ROW_HEIGHT, ROW_WIDTH, ROW_HEIGHT)
    }

    fn position_of_child(&self, child: ViewId) -> Option<usize> {
        let position = (child.0 / 10) as usize;
        (child.0 % 10 == 1 && position < self.rows).then_some(position)
    }

    fn child_for_position(&self, position: usize) -> Option<ViewId> {
        self.child_at(position)
    }

    fn find_view(&self, child: ViewId, key: &ViewKey) -> Option<ViewId> {
        match key.as_str() {
            DEFAULT_FRONT_VIEW if self.keys.contains(key) => Some(ViewId(child.0 + 1)),
            DEFAULT_BACK_VIEW if self.keys.contains(key) => Some(ViewId(child.0 + 2)),
            _ => None,
        }
    }

    fn has_view_key(&self, key: &ViewKey) -> bool {
        self.keys.contains(key)
    }

    fn view_height(&self, view: ViewId) -> f32 {
        if self.zero_height.contains(&((view.0 / 10) as usize)) {
            0.0
        } else {
            ROW_HEIGHT
        }
    }

    fn set_translation_x(&mut self, view: ViewId, x: f32) {
        self.translations.insert(view, x);
    }

    fn set_height(&mut self, view: ViewId, height: Option<f32>) {
        self.heights.insert(view, height);
    }

    fn set_indicator(&mut self, view: ViewId, indicator: Option<ResourceId>) {
        self.indicators.insert(view, indicator);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Opened(usize, bool),
    Closed(usize, bool),
    ListChanged,
    StartOpen(usize, SwipeAction, bool),
    StartClose(usize, bool),
    ClickFront(usize),
    ClickBack(usize),
    Dismiss(Vec<usize>),
    ChoiceChanged(usize, bool),
    ChoiceStarted,
    ChoiceEnded,
    FirstItem,
    LastItem,
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
    modes: HashMap<usize, SwipeMode>,
}

impl Recorder {
    fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl SwipeListener for Recorder {
    fn on_opened(&mut self, position: usize, to_right: bool) {
        self.events.push(Event::Opened(position, to_right));
    }

    fn on_closed(&mut self, position: usize, from_right: bool) {
        self.events.push(Event::Closed(position, from_right));
    }

    fn on_list_changed(&mut self) {
        self.events.push(Event::ListChanged);
    }

    fn on_start_open(&mut self, position: usize, action: SwipeAction, to_right: bool) {
        self.events.push(Event::StartOpen(position, action, to_right));
    }

    fn on_start_close(&mut self, position: usize, from_right: bool) {
        self.events.push(Event::StartClose(position, from_right));
    }

    fn on_click_front_view(&mut self, position: usize) {
        self.events.push(Event::ClickFront(position));
    }

    fn on_click_back_view(&mut self, position: usize) {
        self.events.push(Event::ClickBack(position));
    }

    fn on_dismiss(&mut self, reverse_sorted_positions: &[usize]) {
        self.events.push(Event::Dismiss(reverse_sorted_positions.to_vec()));
    }

    fn on_change_swipe_mode(&mut self, position: usize) -> Option<SwipeMode> {
        self.modes.get(&position).copied()
    }

    fn on_choice_changed(&mut self, position: usize, selected: bool) {
        self.events.push(Event::ChoiceChanged(position, selected));
    }

    fn on_choice_started(&mut self) {
        self.events.push(Event::ChoiceStarted);
    }

    fn on_choice_ended(&mut self) {
        self.events.push(Event::ChoiceEnded);
    }

    fn on_first_list_item(&mut self) {
        self.events.push(Event::FirstItem);
    }

    fn on_last_list_item(&mut self) {
        self.events.push(Event::LastItem);
    }
}

type List = SwipeListView<ListAdapter<u32>, FakeHost>;

static_assertions::assert_impl_all!(List: Send, Sync);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn list_with(config: SwipeConfig, adapter: ListAdapter<u32>) -> (List, Arc<Mutex<Recorder>>) {
    init_tracing();
    let rows = adapter.len();
    let mut list = SwipeListView::new(adapter, FakeHost::new(rows), config)
        .expect("fake host declares both views");
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    list.set_listener(recorder.clone());
    (list, recorder)
}

fn list(config: SwipeConfig) -> (List, Arc<Mutex<Recorder>>) {
    list_with(config, ListAdapter::from_items(0..10))
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

/// Vertical centre of a row.
fn row_y(position: usize) -> f32 {
    position as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

fn items(list: &List) -> Vec<u32> {
    list.adapter().iter().copied().collect()
}

/// Drag a row horizontally from `from_x` to `to_x`, releasing slowly enough
/// that no fling is detected.
fn slow_drag(list: &mut List, position: usize, from_x: f32, to_x: f32, t0: Instant) -> Instant {
    let y = row_y(position);
    let step = if to_x > from_x { 20.0 } else { -20.0 };
    list.on_touch_event(TouchEvent::down((from_x, y), t0));
    list.on_touch_event(TouchEvent::moved((from_x + step, y), at(t0, 100)));
    list.on_touch_event(TouchEvent::moved((to_x, y), at(t0, 200)));
    list.on_touch_event(TouchEvent::up((to_x, y), at(t0, 400)));
    at(t0, 400)
}

#[test]
fn test_missing_view_key_fails_construction() {
    let mut host = FakeHost::new(3);
    host.keys.retain(|k| k.as_str() != DEFAULT_BACK_VIEW);

    let result = SwipeListView::new(ListAdapter::from_items(0..3u32), host, SwipeConfig::default());
    assert!(matches!(result, Err(SwipeError::Configuration { .. })));
}

#[test]
fn test_disabled_row_never_opens() {
    let mut adapter = ListAdapter::from_items(0..10u32);
    adapter.set_flags(2, RowFlags::disabled());
    let (mut list, recorder) = list_with(SwipeConfig::default(), adapter);
    let t0 = Instant::now();

    let y = row_y(2);
    list.on_touch_event(TouchEvent::down((20.0, y), t0));
    let decision = list.on_touch_event(TouchEvent::moved((280.0, y), at(t0, 50)));
    assert_eq!(decision, InterceptDecision::PassThrough);
    let decision = list.on_touch_event(TouchEvent::up((280.0, y), at(t0, 60)));
    assert_eq!(decision, InterceptDecision::PassThrough);
    list.tick(at(t0, 1000));

    let state = list.row_state(2);
    assert_eq!(state.phase, OpenPhase::Closed);
    assert_eq!(state.offset, 0.0);
    assert!(!state.swipe_enabled);
    assert!(recorder.lock().events.is_empty());
    assert_eq!(list.gesture_state(), GestureState::Rest);
}

#[test]
fn test_row_without_swipe_mode_passes_whole_stream_through() {
    let config = SwipeConfig::builder().mode(SwipeMode::PerRow).build();
    let (mut list, recorder) = list(config);
    recorder.lock().modes.insert(4, SwipeMode::None);
    let t0 = Instant::now();
    let y = row_y(4);

    let decisions = [
        list.on_touch_event(TouchEvent::down((20.0, y), t0)),
        list.on_touch_event(TouchEvent::moved((150.0, y), at(t0, 30))),
        list.on_touch_event(TouchEvent::moved((260.0, y), at(t0, 60))),
        list.on_touch_event(TouchEvent::up((260.0, y), at(t0, 80))),
    ];
    assert!(decisions.iter().all(|&d| d == InterceptDecision::PassThrough));
    assert_eq!(list.gesture_state(), GestureState::Rest);

    // The next stream on a swipeable row is handled normally.
    let released = slow_drag(&mut list, 2, 20.0, 250.0, at(t0, 200));
    list.tick(released + Duration::from_millis(300));
    assert!(list.is_open(2));
}

#[test]
fn test_short_drag_settles_back() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    let y = row_y(1);
    list.on_touch_event(TouchEvent::down((20.0, y), t0));
    let decision = list.on_touch_event(TouchEvent::moved((40.0, y), at(t0, 200)));
    assert_eq!(decision, InterceptDecision::ContinueHorizontal);
    assert_eq!(list.host().translation(1), 20.0);

    list.on_touch_event(TouchEvent::moved((80.0, y), at(t0, 400)));
    assert_eq!(list.row_state(1).offset, 60.0);
    list.on_touch_event(TouchEvent::up((80.0, y), at(t0, 600)));
    assert_eq!(list.gesture_state(), GestureState::Settling);

    list.tick(at(t0, 900));
    assert_eq!(list.row_state(1), RowState::new(true));
    assert_eq!(list.host().translation(1), 0.0);
    assert_eq!(list.gesture_state(), GestureState::Rest);
    assert_eq!(
        recorder.lock().events,
        vec![Event::StartOpen(1, SwipeAction::Reveal, true)]
    );
}

#[test]
fn test_reveal_commit_is_idempotent() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    let released = slow_drag(&mut list, 1, 20.0, 200.0, t0);
    list.tick(released + Duration::from_millis(300));
    assert_eq!(list.row_state(1).phase, OpenPhase::OpenRight);
    assert_eq!(list.host().translation(1), ROW_WIDTH);

    list.open_to(1, Side::Right, at(t0, 800));
    list.tick(at(t0, 1200));

    assert!(list.is_open(1));
    let opened = recorder.lock().count(|e| matches!(e, Event::Opened(1, true)));
    assert_eq!(opened, 1);
}

#[test]
fn test_dragging_open_row_closes_it() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.open_to(4, Side::Right, t0);
    list.tick(at(t0, 300));
    assert!(list.is_open(4));

    let released = slow_drag(&mut list, 4, 280.0, 60.0, at(t0, 400));
    list.tick(released + Duration::from_millis(300));

    assert_eq!(list.row_state(4).phase, OpenPhase::Closed);
    let events = recorder.lock().events.clone();
    assert!(events.contains(&Event::StartClose(4, true)));
    assert_eq!(events.last(), Some(&Event::Closed(4, true)));
}

#[test]
fn test_opening_a_row_closes_others() {
    let (mut list, _recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.open_to(0, Side::Left, t0);
    list.tick(at(t0, 300));
    list.open_to(5, Side::Right, at(t0, 300));
    list.tick(at(t0, 600));

    assert_eq!(list.row_state(0).phase, OpenPhase::Closed);
    assert_eq!(list.row_state(5).phase, OpenPhase::OpenRight);
}

#[test]
fn test_joined_dismiss_batch_removes_right_items() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    for position in [5, 2, 7] {
        list.dismiss(position, t0);
    }
    list.tick(at(t0, 100));
    let collapsing = list.host().heights.get(&ViewId(51)).copied().flatten();
    assert!(collapsing.is_some_and(|h| h > 0.0 && h < ROW_HEIGHT));
    list.dismiss(3, at(t0, 100));

    list.tick(at(t0, 250));
    assert!(list.has_pending_dismissals());
    assert_eq!(list.adapter().len(), 10);

    list.tick(at(t0, 350));
    assert!(!list.has_pending_dismissals());
    assert_eq!(items(&list), vec![0, 1, 4, 6, 8, 9]);
    assert_eq!(recorder.lock().events, vec![Event::Dismiss(vec![7, 5, 3, 2])]);
}

#[test]
fn test_swipe_dismiss_slides_then_collapses() {
    let config = SwipeConfig::builder()
        .action_left(SwipeAction::Dismiss)
        .action_right(SwipeAction::Dismiss)
        .build();
    let (mut list, recorder) = list(config);
    let t0 = Instant::now();

    let released = slow_drag(&mut list, 3, 20.0, 200.0, t0);
    list.tick(released + Duration::from_millis(300));
    assert_eq!(list.host().translation(3), ROW_WIDTH);
    assert!(list.has_pending_dismissals());

    list.tick(released + Duration::from_millis(600));
    assert_eq!(items(&list), vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
    let events = recorder.lock().events.clone();
    assert_eq!(events.first(), Some(&Event::StartOpen(3, SwipeAction::Dismiss, true)));
    assert_eq!(events.last(), Some(&Event::Dismiss(vec![3])));
}

#[test]
fn test_dismiss_selected_with_duplicate() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.set_item_checked(1, true, t0);
    list.set_item_checked(4, true, t0);
    list.set_item_checked(4, true, t0);
    assert_eq!(list.selected_positions(), vec![1, 4]);

    list.dismiss_selected(t0);
    assert_eq!(list.selected_count(), 0);
    list.tick(at(t0, 300));

    assert_eq!(items(&list), vec![0, 2, 3, 5, 6, 7, 8, 9]);
    assert_eq!(list.selected_count(), 0);
    assert_eq!(
        recorder.lock().events,
        vec![
            Event::ChoiceStarted,
            Event::ChoiceChanged(1, true),
            Event::ChoiceChanged(4, true),
            Event::ChoiceEnded,
            Event::Dismiss(vec![4, 1]),
        ]
    );
}

#[test]
fn test_data_change_resets_open_row_silently() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.open_to(2, Side::Left, t0);
    list.tick(at(t0, 300));
    assert_eq!(list.row_state(2).phase, OpenPhase::OpenLeft);
    assert_eq!(list.host().translation(2), -ROW_WIDTH);

    list.notify_data_set_changed();

    assert_eq!(list.row_state(2).phase, OpenPhase::Closed);
    assert_eq!(list.host().translation(2), 0.0);
    let events = recorder.lock().events.clone();
    assert_eq!(events, vec![Event::Opened(2, false), Event::ListChanged]);
}

#[test]
fn test_open_close_round_trip() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();
    let before = list.row_state(3);

    list.open(3, t0);
    list.tick(at(t0, 300));
    assert_eq!(list.row_state(3).phase, OpenPhase::OpenLeft);

    list.close(3, at(t0, 300));
    list.tick(at(t0, 600));

    assert_eq!(list.row_state(3), before);
    assert_eq!(
        recorder.lock().events,
        vec![Event::Opened(3, false), Event::Closed(3, false)]
    );
}

#[test]
fn test_stale_position_is_noop() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.open(42, t0);
    list.close(42, t0);
    list.dismiss(42, t0);
    list.tick(at(t0, 500));

    assert_eq!(list.adapter().len(), 10);
    assert!(recorder.lock().events.is_empty());
}

#[test]
fn test_vertical_lock_never_commits() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    let y = row_y(2);
    list.on_touch_event(TouchEvent::down((100.0, y), t0));
    let decision = list.on_touch_event(TouchEvent::moved((102.0, y + 20.0), at(t0, 50)));
    assert_eq!(decision, InterceptDecision::PassThrough);
    assert_eq!(list.gesture_state(), GestureState::Ignored);

    let decision = list.on_touch_event(TouchEvent::moved((300.0, y + 20.0), at(t0, 100)));
    assert_eq!(decision, InterceptDecision::PassThrough);
    list.on_touch_event(TouchEvent::up((300.0, y + 20.0), at(t0, 150)));
    list.tick(at(t0, 1000));

    assert_eq!(list.row_state(2), RowState::new(true));
    assert_eq!(list.gesture_state(), GestureState::Rest);
    assert!(recorder.lock().events.is_empty());
}

#[test]
fn test_long_press_toggles_choice() {
    let config = SwipeConfig::builder()
        .action_left(SwipeAction::Choice)
        .indicators(CHECKED, UNCHECKED)
        .build();
    let (mut list, recorder) = list(config);
    let t0 = Instant::now();

    list.on_touch_event(TouchEvent::down((20.0, row_y(1)), t0));
    list.tick(at(t0, 499));
    assert!(!list.is_checked(1));

    list.tick(at(t0, 500));
    assert!(list.is_checked(1));
    assert_eq!(list.host().indicator(1), Some(CHECKED));

    list.on_touch_event(TouchEvent::up((20.0, row_y(1)), at(t0, 600)));
    assert_eq!(
        recorder.lock().events,
        vec![Event::ChoiceStarted, Event::ChoiceChanged(1, true)]
    );
}

#[test]
fn test_long_press_reveals_row() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.on_touch_event(TouchEvent::down((20.0, row_y(6)), t0));
    list.tick(at(t0, 500));
    list.tick(at(t0, 800));
    list.on_touch_event(TouchEvent::up((20.0, row_y(6)), at(t0, 850)));

    assert_eq!(list.row_state(6).phase, OpenPhase::OpenLeft);
    assert_eq!(recorder.lock().events, vec![Event::Opened(6, false)]);
}

#[test]
fn test_choice_mode_turns_swipes_into_checks() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.set_item_checked(0, true, t0);
    let released = slow_drag(&mut list, 2, 20.0, 200.0, at(t0, 10));
    list.tick(released + Duration::from_millis(300));

    assert!(list.is_checked(2));
    assert!(!list.is_open(2));
    assert_eq!(list.row_state(2).offset, 0.0);
    assert_eq!(list.selected_positions(), vec![0, 2]);

    list.set_item_checked(0, false, at(t0, 800));
    list.set_item_checked(2, false, at(t0, 800));
    let events = recorder.lock().events.clone();
    assert_eq!(events.first(), Some(&Event::ChoiceStarted));
    assert!(events.contains(&Event::StartOpen(2, SwipeAction::Choice, true)));
    assert_eq!(events.iter().filter(|e| **e == Event::ChoiceEnded).count(), 1);
    assert_eq!(events.last(), Some(&Event::ChoiceChanged(2, false)));
}

#[test]
fn test_clear_selection_ends_choice() {
    let config = SwipeConfig::builder().indicators(CHECKED, UNCHECKED).build();
    let (mut list, recorder) = list(config);
    let t0 = Instant::now();

    list.set_item_checked(3, true, t0);
    list.set_item_checked(8, true, t0);
    list.clear_selection();

    assert_eq!(list.selected_count(), 0);
    assert_eq!(list.host().indicator(3), Some(UNCHECKED));
    assert_eq!(recorder.lock().events.last(), Some(&Event::ChoiceEnded));
}

#[test]
fn test_tap_reports_front_and_back_clicks() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.on_touch_event(TouchEvent::down((20.0, row_y(1)), t0));
    list.on_touch_event(TouchEvent::up((22.0, row_y(1)), at(t0, 100)));

    list.open_to(1, Side::Right, at(t0, 200));
    list.tick(at(t0, 600));
    list.on_touch_event(TouchEvent::down((20.0, row_y(1)), at(t0, 700)));
    list.on_touch_event(TouchEvent::up((20.0, row_y(1)), at(t0, 750)));

    assert_eq!(
        recorder.lock().events,
        vec![Event::ClickFront(1), Event::Opened(1, true), Event::ClickBack(1)]
    );
}

#[test]
fn test_immediate_removal_rebases_pending_batch() {
    let (mut list, recorder) = list(SwipeConfig::default());
    list.host_mut().zero_height.push(1);
    let t0 = Instant::now();

    list.dismiss(5, t0);
    list.dismiss(2, t0);
    list.dismiss(1, t0);
    assert_eq!(items(&list), vec![0, 2, 3, 4, 5, 6, 7, 8, 9]);

    list.tick(at(t0, 300));
    assert_eq!(items(&list), vec![0, 3, 4, 6, 7, 8, 9]);
    assert_eq!(
        recorder.lock().events,
        vec![Event::Dismiss(vec![1]), Event::Dismiss(vec![4, 1])]
    );
}

#[test]
fn test_slid_out_rows_rebase_after_immediate_removal() {
    let config = SwipeConfig::builder()
        .action_left(SwipeAction::Dismiss)
        .action_right(SwipeAction::Dismiss)
        .build();
    let (mut list, recorder) = list(config);
    list.host_mut().zero_height.push(1);
    let t0 = Instant::now();

    // Both slide-outs finish on the same tick.
    let released = slow_drag(&mut list, 5, 20.0, 200.0, t0);
    let released = slow_drag(&mut list, 1, 20.0, 200.0, released);
    list.tick(released + Duration::from_millis(300));
    assert_eq!(items(&list), vec![0, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert!(list.has_pending_dismissals());

    list.tick(released + Duration::from_millis(600));
    assert!(!list.has_pending_dismissals());
    assert_eq!(items(&list), vec![0, 2, 3, 4, 6, 7, 8, 9]);
    let recorder = recorder.lock();
    assert_eq!(recorder.count(|e| *e == Event::Dismiss(vec![1])), 1);
    assert_eq!(recorder.count(|e| *e == Event::Dismiss(vec![4])), 1);
}

#[test]
fn test_dismiss_selected_rebases_after_immediate_removal() {
    let (mut list, recorder) = list(SwipeConfig::default());
    list.host_mut().zero_height.push(1);
    let t0 = Instant::now();

    list.set_item_checked(1, true, t0);
    list.set_item_checked(4, true, t0);
    list.dismiss_selected(t0);
    assert_eq!(items(&list), vec![0, 2, 3, 4, 5, 6, 7, 8, 9]);

    list.tick(at(t0, 300));
    assert_eq!(items(&list), vec![0, 2, 3, 5, 6, 7, 8, 9]);
    let events = recorder.lock().events.clone();
    assert_eq!(
        events[events.len() - 2..],
        [Event::Dismiss(vec![1]), Event::Dismiss(vec![3])]
    );
}

#[test]
fn test_collapsed_group_children_are_stale() {
    init_tracing();
    let adapter = GroupedAdapter::new(vec![
        Group::new("g0", vec!["a", "b"]),
        Group::new("g1", vec!["c"]),
    ]);
    let mut list = SwipeListView::new(adapter, FakeHost::new(5), SwipeConfig::default())
        .expect("fake host declares both views");
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    list.set_listener(recorder.clone());
    let t0 = Instant::now();

    list.adapter_mut().set_expanded(0, false);
    list.notify_data_set_changed();
    list.dismiss(4, t0);
    list.dismiss(3, t0);
    list.tick(at(t0, 500));

    assert!(!list.has_pending_dismissals());
    assert_eq!(list.adapter().groups()[0].children, vec!["a", "b"]);
    assert_eq!(list.adapter().groups()[1].children, vec!["c"]);
    assert_eq!(recorder.lock().events, vec![Event::ListChanged]);
}

#[test]
fn test_time_until_next_timer_tracks_long_press() {
    let (mut list, _recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();
    assert_eq!(list.time_until_next_timer(t0), None);

    list.on_touch_event(TouchEvent::down((20.0, row_y(3)), t0));
    assert_eq!(
        list.time_until_next_timer(at(t0, 200)),
        Some(Duration::from_millis(300))
    );

    list.on_touch_event(TouchEvent::up((20.0, row_y(3)), at(t0, 250)));
    assert_eq!(list.time_until_next_timer(at(t0, 250)), None);
}

#[test]
fn test_data_change_discards_pending_batch() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.dismiss(3, t0);
    list.tick(at(t0, 100));
    list.notify_data_set_changed();
    list.tick(at(t0, 500));

    assert!(!list.has_pending_dismissals());
    assert_eq!(list.adapter().len(), 10);
    assert_eq!(recorder.lock().events, vec![Event::ListChanged]);
}

#[test]
fn test_scroll_edges_fire_once() {
    let (mut list, recorder) = list(SwipeConfig::default());

    list.on_list_scrolled(0, 5);
    list.on_list_scrolled(0, 5);
    list.on_list_scrolled(2, 5);
    list.on_list_scrolled(5, 5);
    list.on_list_scrolled(5, 5);
    list.on_list_scrolled(0, 5);

    assert_eq!(
        recorder.lock().events,
        vec![Event::FirstItem, Event::LastItem, Event::FirstItem]
    );
}

#[test]
fn test_list_scroll_closes_open_rows_and_blocks_swipes() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.open_to(1, Side::Right, t0);
    list.tick(at(t0, 300));
    list.on_list_scroll_state_changed(ListScrollState::TouchScroll, at(t0, 400));
    list.tick(at(t0, 700));
    assert_eq!(list.row_state(1).phase, OpenPhase::Closed);

    list.on_touch_event(TouchEvent::down((20.0, row_y(2)), at(t0, 800)));
    assert_eq!(list.gesture_state(), GestureState::Ignored);
    list.on_touch_event(TouchEvent::up((20.0, row_y(2)), at(t0, 850)));

    list.on_list_scroll_state_changed(ListScrollState::Idle, at(t0, 900));
    list.on_touch_event(TouchEvent::down((20.0, row_y(2)), at(t0, 1000)));
    assert_eq!(list.gesture_state(), GestureState::Dragging);

    let events = recorder.lock().events.clone();
    assert_eq!(events, vec![Event::Opened(1, true), Event::Closed(1, true)]);
}

#[test]
fn test_list_scroll_cancels_long_press() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.on_touch_event(TouchEvent::down((20.0, row_y(1)), t0));
    list.on_list_scroll_state_changed(ListScrollState::Fling, at(t0, 100));
    list.tick(at(t0, 600));
    list.tick(at(t0, 900));

    assert!(!list.is_open(1));
    assert!(recorder.lock().events.is_empty());
}

#[test]
fn test_config_change_waits_for_rest() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();

    list.on_touch_event(TouchEvent::down((20.0, row_y(1)), t0));
    list.set_mode(SwipeMode::None);
    assert_eq!(list.config().mode, SwipeMode::Both);

    list.on_touch_event(TouchEvent::up((20.0, row_y(1)), at(t0, 50)));
    assert_eq!(list.config().mode, SwipeMode::None);

    let decision = list.on_touch_event(TouchEvent::down((20.0, row_y(2)), at(t0, 100)));
    assert_eq!(decision, InterceptDecision::PassThrough);
    assert_eq!(list.gesture_state(), GestureState::Rest);
    assert_eq!(recorder.lock().events, vec![Event::ClickFront(1)]);

    list.set_offset_left(120.0);
    assert_eq!(list.config().offset_left, 120.0);
}

#[test]
fn test_secondary_pointer_is_ignored() {
    let (mut list, _recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();
    let y = row_y(1);

    list.on_touch_event(TouchEvent::down((20.0, y), t0));
    list.on_touch_event(TouchEvent::moved((40.0, y), at(t0, 100)));
    assert_eq!(list.row_state(1).offset, 20.0);

    let decision = list.on_touch_event(TouchEvent::moved((250.0, y), at(t0, 150)).with_id(7));
    assert_eq!(decision, InterceptDecision::PassThrough);
    assert_eq!(list.row_state(1).offset, 20.0);

    list.on_touch_event(TouchEvent::up((40.0, y), at(t0, 400)));
    list.tick(at(t0, 700));
    assert_eq!(list.row_state(1), RowState::new(true));
}

#[test]
fn test_per_row_mode_restricts_sides() {
    let config = SwipeConfig::builder().mode(SwipeMode::PerRow).build();
    let (mut list, recorder) = list(config);
    recorder.lock().modes.insert(1, SwipeMode::Left);
    let t0 = Instant::now();

    let released = slow_drag(&mut list, 1, 20.0, 250.0, t0);
    assert_eq!(list.row_state(1).offset, 0.0);
    list.tick(released + Duration::from_millis(300));
    assert!(!list.is_open(1));

    let released = slow_drag(&mut list, 1, 250.0, 60.0, at(t0, 500));
    list.tick(released + Duration::from_millis(300));
    assert_eq!(list.row_state(1).phase, OpenPhase::OpenLeft);

    let events = recorder.lock().events.clone();
    assert!(!events.iter().any(|e| matches!(e, Event::StartOpen(_, _, true))));
    assert_eq!(events.last(), Some(&Event::Opened(1, false)));
}

#[test]
fn test_cancel_restores_row() {
    let (mut list, _recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();
    let y = row_y(2);

    list.on_touch_event(TouchEvent::down((20.0, y), t0));
    list.on_touch_event(TouchEvent::moved((120.0, y), at(t0, 100)));
    assert_eq!(list.host().translation(2), 100.0);

    list.on_touch_event(TouchEvent::cancel((120.0, y), at(t0, 150)));
    assert_eq!(list.row_state(2), RowState::new(true));
    assert_eq!(list.host().translation(2), 0.0);
    assert_eq!(list.gesture_state(), GestureState::Rest);
}

#[test]
fn test_disabled_list_passes_everything_through() {
    let (mut list, recorder) = list(SwipeConfig::default());
    let t0 = Instant::now();
    list.set_enabled(false);

    let y = row_y(1);
    assert_eq!(
        list.on_touch_event(TouchEvent::down((20.0, y), t0)),
        InterceptDecision::PassThrough
    );
    assert_eq!(
        list.on_touch_event(TouchEvent::moved((200.0, y), at(t0, 100))),
        InterceptDecision::PassThrough
    );
    list.on_touch_event(TouchEvent::up((200.0, y), at(t0, 300)));
    list.tick(at(t0, 700));

    assert!(!list.is_open(1));
    assert!(recorder.lock().events.is_empty());
}
