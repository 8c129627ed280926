//! Swipe configuration.
//!
//! [`SwipeConfig`] is built once when the list is created. Later changes go
//! through [`ConfigCell`], which holds them back while a gesture is in flight
//! so that thresholds never shift under the user's finger.

use std::time::Duration;

use swipelist_core::logging::targets;

/// Default animation duration in milliseconds, used when the configured
/// duration is zero.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 250;

/// Default touch slop in pixels.
///
/// Movement below this threshold is neither a swipe nor a scroll.
pub const DEFAULT_TOUCH_SLOP: f32 = 10.0;

/// Default long-press timeout in milliseconds.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Default minimum fling velocity in pixels per second.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 300.0;

/// Default maximum fling velocity in pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8000.0;

/// Default minimum travel for a fling to count, in pixels.
pub const DEFAULT_MIN_FLING_DISTANCE: f32 = 50.0;

/// Default identifier of the front sub-view of a row.
pub const DEFAULT_FRONT_VIEW: &str = "swipelist_frontview";

/// Default identifier of the back sub-view of a row.
pub const DEFAULT_BACK_VIEW: &str = "swipelist_backview";

/// Which directions a row may be swiped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeMode {
    /// Swiping is disabled.
    None,
    /// Rows may be swiped in both directions.
    #[default]
    Both,
    /// Rows may only be swiped to the left.
    Left,
    /// Rows may only be swiped to the right.
    Right,
    /// The listener decides per row; falls back to [`SwipeMode::Both`].
    PerRow,
}

impl SwipeMode {
    /// Whether a closed row may travel toward `side` under this mode.
    pub fn allows(self, side: Side) -> bool {
        match self {
            SwipeMode::Both | SwipeMode::PerRow => true,
            SwipeMode::Left => side == Side::Left,
            SwipeMode::Right => side == Side::Right,
            SwipeMode::None => false,
        }
    }
}

/// What a committed swipe does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeAction {
    /// Slide the front view away to show the back view.
    #[default]
    Reveal,
    /// Slide the row off screen and remove it.
    Dismiss,
    /// Toggle the row's checked state.
    Choice,
    /// Nothing; the side does not move.
    None,
}

/// Direction of horizontal travel.
///
/// `Right` means the front view slides right (positive offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The side a signed offset or displacement points to.
    pub fn of(value: f32) -> Option<Side> {
        if value > 0.0 {
            Some(Side::Right)
        } else if value < 0.0 {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// `+1.0` for right, `-1.0` for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    #[inline]
    pub fn is_right(self) -> bool {
        self == Side::Right
    }
}

/// Identifier of a sub-view inside a row layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a host drawable used as checked/unchecked indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// Parameters of the swipe engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    pub mode: SwipeMode,
    pub action_left: SwipeAction,
    pub action_right: SwipeAction,
    /// Travel of a left swipe before its action commits. Zero means half the row width.
    pub offset_left: f32,
    /// Travel of a right swipe before its action commits. Zero means half the row width.
    pub offset_right: f32,
    /// Zero selects [`DEFAULT_ANIMATION_DURATION_MS`].
    pub animation_duration: Duration,
    pub open_on_long_press: bool,
    pub close_on_list_move: bool,
    pub checked_indicator: Option<ResourceId>,
    pub unchecked_indicator: Option<ResourceId>,
    pub touch_slop: f32,
    pub long_press_timeout: Duration,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub min_fling_distance: f32,
    pub front_view: ViewKey,
    pub back_view: ViewKey,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            mode: SwipeMode::Both,
            action_left: SwipeAction::Reveal,
            action_right: SwipeAction::Reveal,
            offset_left: 0.0,
            offset_right: 0.0,
            animation_duration: Duration::ZERO,
            open_on_long_press: true,
            close_on_list_move: true,
            checked_indicator: None,
            unchecked_indicator: None,
            touch_slop: DEFAULT_TOUCH_SLOP,
            long_press_timeout: Duration::from_millis(DEFAULT_LONG_PRESS_TIMEOUT_MS),
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            min_fling_distance: DEFAULT_MIN_FLING_DISTANCE,
            front_view: ViewKey::new(DEFAULT_FRONT_VIEW),
            back_view: ViewKey::new(DEFAULT_BACK_VIEW),
        }
    }
}

impl SwipeConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> SwipeConfigBuilder {
        SwipeConfigBuilder::default()
    }

    /// The configured action for a side.
    pub fn action(&self, side: Side) -> SwipeAction {
        match side {
            Side::Left => self.action_left,
            Side::Right => self.action_right,
        }
    }

    /// The configured offset for a side (zero when unset).
    pub fn offset(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.offset_left,
            Side::Right => self.offset_right,
        }
    }

    /// How far a row opened toward `side` travels.
    pub fn open_extent(&self, side: Side, row_width: f32) -> f32 {
        let offset = self.offset(side);
        if offset > 0.0 { offset } else { row_width }
    }

    /// How far a drag toward `side` must travel before the action commits.
    pub fn commit_distance(&self, side: Side, row_width: f32) -> f32 {
        let offset = self.offset(side);
        if offset > 0.0 { offset } else { row_width / 2.0 }
    }

    /// The effective animation duration.
    pub fn effective_animation_duration(&self) -> Duration {
        if self.animation_duration.is_zero() {
            Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS)
        } else {
            self.animation_duration
        }
    }
}

/// Builder for [`SwipeConfig`].
#[derive(Debug, Clone, Default)]
pub struct SwipeConfigBuilder {
    config: SwipeConfig,
}

impl SwipeConfigBuilder {
    pub fn mode(mut self, mode: SwipeMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn action_left(mut self, action: SwipeAction) -> Self {
        self.config.action_left = action;
        self
    }

    pub fn action_right(mut self, action: SwipeAction) -> Self {
        self.config.action_right = action;
        self
    }

    pub fn offset_left(mut self, offset: f32) -> Self {
        self.config.offset_left = offset.max(0.0);
        self
    }

    pub fn offset_right(mut self, offset: f32) -> Self {
        self.config.offset_right = offset.max(0.0);
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.config.animation_duration = duration;
        self
    }

    pub fn open_on_long_press(mut self, enabled: bool) -> Self {
        self.config.open_on_long_press = enabled;
        self
    }

    pub fn close_on_list_move(mut self, enabled: bool) -> Self {
        self.config.close_on_list_move = enabled;
        self
    }

    pub fn indicators(mut self, checked: ResourceId, unchecked: ResourceId) -> Self {
        self.config.checked_indicator = Some(checked);
        self.config.unchecked_indicator = Some(unchecked);
        self
    }

    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.config.touch_slop = slop;
        self
    }

    pub fn long_press_timeout(mut self, timeout: Duration) -> Self {
        self.config.long_press_timeout = timeout;
        self
    }

    pub fn fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.config.min_fling_velocity = min;
        self.config.max_fling_velocity = max;
        self
    }

    pub fn min_fling_distance(mut self, distance: f32) -> Self {
        self.config.min_fling_distance = distance;
        self
    }

    pub fn front_view(mut self, key: impl Into<ViewKey>) -> Self {
        self.config.front_view = key.into();
        self
    }

    pub fn back_view(mut self, key: impl Into<ViewKey>) -> Self {
        self.config.back_view = key.into();
        self
    }

    pub fn build(self) -> SwipeConfig {
        self.config
    }
}

/// Holds the live configuration plus changes deferred until the engine rests.
#[derive(Debug, Clone)]
pub struct ConfigCell {
    current: SwipeConfig,
    pending: Option<SwipeConfig>,
}

impl ConfigCell {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            current: config,
            pending: None,
        }
    }

    /// The configuration gestures currently run against.
    #[inline]
    pub fn current(&self) -> &SwipeConfig {
        &self.current
    }

    /// Whether a change is waiting for the engine to rest.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a change now, or buffer it when `defer` is set.
    ///
    /// Buffered changes stack: a second deferred update sees the first one.
    pub fn update(&mut self, defer: bool, change: impl FnOnce(&mut SwipeConfig)) {
        if defer {
            let mut next = self.pending.take().unwrap_or_else(|| self.current.clone());
            change(&mut next);
            tracing::debug!(target: targets::CONFIG, "configuration change deferred until rest");
            self.pending = Some(next);
        } else {
            match self.pending.as_mut() {
                Some(pending) => {
                    change(pending);
                    self.apply_pending();
                }
                None => change(&mut self.current),
            }
        }
    }

    /// Promote the buffered configuration, if any. Returns whether anything changed.
    pub fn apply_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(next) => {
                tracing::debug!(target: targets::CONFIG, "deferred configuration applied");
                self.current = next;
                true
            }
            None => false,
        }
    }
}
