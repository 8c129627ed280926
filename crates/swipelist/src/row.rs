//! Per-row state and the view-hierarchy boundary.

use std::collections::BTreeMap;

use swipelist_core::Rect;

use crate::config::{ResourceId, Side, SwipeAction, ViewKey};

/// Opaque handle to a view owned by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// The view hierarchy the engine drives.
///
/// Children are the row views currently laid out by the host list. Because
/// the host recycles them, a child's position must be asked for on every
/// lookup and never cached across gestures.
pub trait RowHost {
    /// Width of a row in pixels.
    fn row_width(&self) -> f32;

    /// Number of row views currently laid out.
    fn child_count(&self) -> usize;

    /// The `index`-th laid-out row view.
    fn child_at(&self, index: usize) -> Option<ViewId>;

    /// Hit rectangle of a row view in list coordinates.
    fn child_bounds(&self, child: ViewId) -> Rect;

    /// The list position a row view currently displays.
    fn position_of_child(&self, child: ViewId) -> Option<usize>;

    /// The row view currently displaying `position`, if it is laid out.
    fn child_for_position(&self, position: usize) -> Option<ViewId>;

    /// Find a sub-view by identifier inside a row view.
    fn find_view(&self, child: ViewId, key: &ViewKey) -> Option<ViewId>;

    /// Whether the row layout declares a sub-view with this identifier.
    fn has_view_key(&self, key: &ViewKey) -> bool;

    /// Measured height of a view.
    fn view_height(&self, view: ViewId) -> f32;

    /// Move a view horizontally.
    fn set_translation_x(&mut self, view: ViewId, x: f32);

    /// Override a view's height; `None` restores the natural height.
    fn set_height(&mut self, view: ViewId, height: Option<f32>);

    /// Show a checked/unchecked indicator on a view.
    fn set_indicator(&mut self, view: ViewId, indicator: Option<ResourceId>);
}

/// Open phase of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenPhase {
    #[default]
    Closed,
    Opening,
    OpenLeft,
    OpenRight,
    Closing,
}

impl OpenPhase {
    /// The settled open phase for a side.
    pub fn open(side: Side) -> Self {
        match side {
            Side::Left => OpenPhase::OpenLeft,
            Side::Right => OpenPhase::OpenRight,
        }
    }

    /// The side the row is settled open on.
    pub fn open_side(self) -> Option<Side> {
        match self {
            OpenPhase::OpenLeft => Some(Side::Left),
            OpenPhase::OpenRight => Some(Side::Right),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self.open_side().is_some()
    }
}

/// State of one logical list position.
#[derive(Debug, Clone, PartialEq)]
pub struct RowState {
    /// Horizontal offset of the front view; positive is toward the right.
    pub offset: f32,
    pub phase: OpenPhase,
    pub checked: bool,
    pub swipe_enabled: bool,
    /// Action resolved at the last release, until the row settles.
    pub pending_action: SwipeAction,
}

impl RowState {
    pub fn new(swipe_enabled: bool) -> Self {
        Self {
            offset: 0.0,
            phase: OpenPhase::Closed,
            checked: false,
            swipe_enabled,
            pending_action: SwipeAction::None,
        }
    }

    /// Fall back to the phase implied by the offset after an animation was cut short.
    pub(crate) fn settle_interrupted(&mut self) {
        self.phase = match self.phase {
            OpenPhase::Opening => OpenPhase::Closed,
            OpenPhase::Closing => match Side::of(self.offset) {
                Some(side) => OpenPhase::open(side),
                None => OpenPhase::Closed,
            },
            settled => settled,
        };
    }
}

/// Where `position` ends up after the rows in `removed` are deleted.
///
/// Returns `None` when the position itself was removed.
pub fn shift_position(position: usize, removed: &[usize]) -> Option<usize> {
    if removed.contains(&position) {
        return None;
    }
    Some(position - removed.iter().filter(|&&r| r < position).count())
}

/// Re-key a position-keyed map after rows were removed.
pub(crate) fn rekey_after_removal<V>(map: &mut BTreeMap<usize, V>, removed: &[usize]) {
    let old = std::mem::take(map);
    for (position, value) in old {
        if let Some(shifted) = shift_position(position, removed) {
            map.insert(shifted, value);
        }
    }
}

/// Row states keyed by logical position, created lazily.
#[derive(Debug, Default)]
pub struct RowStates {
    rows: BTreeMap<usize, RowState>,
}

impl RowStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: usize) -> Option<&RowState> {
        self.rows.get(&position)
    }

    pub fn get_or_create(&mut self, position: usize, swipe_enabled: bool) -> &mut RowState {
        self.rows
            .entry(position)
            .or_insert_with(|| RowState::new(swipe_enabled))
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut RowState> {
        self.rows.get_mut(&position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &RowState)> {
        self.rows.iter().map(|(&p, r)| (p, r))
    }

    /// Positions whose row is open or opening.
    pub fn opened_positions(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|(_, r)| r.phase.is_open() || r.phase == OpenPhase::Opening)
            .map(|(&p, _)| p)
            .collect()
    }

    /// Checked positions in ascending order.
    pub fn checked_positions(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|(_, r)| r.checked)
            .map(|(&p, _)| p)
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.rows.values().filter(|r| r.checked).count()
    }

    pub fn remove_rows(&mut self, descending: &[usize]) {
        rekey_after_removal(&mut self.rows, descending);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
