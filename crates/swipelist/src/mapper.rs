//! Resolving touch points and positions to row views.

use swipelist_core::{Point, Result, SwipeError};

use crate::config::ViewKey;
use crate::row::{RowHost, ViewId};

/// The views making up one laid-out row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowViews {
    pub position: usize,
    /// The whole row view.
    pub child: ViewId,
    pub front: ViewId,
    pub back: ViewId,
}

/// Maps screen points and list positions onto row views.
///
/// Every lookup goes back to the host; nothing is cached, since a recycled
/// view may show a different position after the next scroll.
#[derive(Debug, Clone)]
pub struct RowViewMapper {
    front: ViewKey,
    back: ViewKey,
}

impl RowViewMapper {
    pub fn new(front: ViewKey, back: ViewKey) -> Self {
        Self { front, back }
    }

    /// Check that the host's row layout declares both sub-views.
    pub fn validate(&self, host: &dyn RowHost) -> Result<()> {
        for key in [&self.front, &self.back] {
            if !host.has_view_key(key) {
                return Err(SwipeError::configuration(format!(
                    "row layout has no view with identifier '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Find the row under `point`.
    pub fn locate(&self, host: &dyn RowHost, point: Point) -> Option<RowViews> {
        let child = (0..host.child_count())
            .filter_map(|index| host.child_at(index))
            .find(|&child| host.child_bounds(child).contains(point))?;
        let position = host.position_of_child(child)?;
        self.resolve(host, position, child)
    }

    /// Find the views currently showing `position`.
    pub fn views_for_position(&self, host: &dyn RowHost, position: usize) -> Option<RowViews> {
        let child = host.child_for_position(position)?;
        self.resolve(host, position, child)
    }

    /// Every laid-out row whose sub-views resolve.
    pub fn visible_rows(&self, host: &dyn RowHost) -> Vec<RowViews> {
        (0..host.child_count())
            .filter_map(|index| host.child_at(index))
            .filter_map(|child| {
                let position = host.position_of_child(child)?;
                self.resolve(host, position, child)
            })
            .collect()
    }

    fn resolve(&self, host: &dyn RowHost, position: usize, child: ViewId) -> Option<RowViews> {
        Some(RowViews {
            position,
            child,
            front: host.find_view(child, &self.front)?,
            back: host.find_view(child, &self.back)?,
        })
    }
}
