//! List scroll reports: motion state and first/last item edges.

/// Scroll state reported by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScrollState {
    #[default]
    Idle,
    /// The user is dragging the list.
    TouchScroll,
    /// The list is coasting after a fling.
    Fling,
}

impl ListScrollState {
    pub fn is_moving(self) -> bool {
        self != ListScrollState::Idle
    }
}

/// Edge reached by a scroll report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEdge {
    First,
    Last,
}

/// Edge-triggered detection of the list reaching its first or last item.
///
/// Each edge fires once when reached and re-arms after the list moves
/// away from it.
#[derive(Debug, Clone, Default)]
pub struct ScrollEdgeTracker {
    at_first: bool,
    at_last: bool,
}

impl ScrollEdgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a scroll report; returns the edges newly reached.
    pub fn on_scroll(
        &mut self,
        first_visible: usize,
        visible_count: usize,
        total: usize,
    ) -> Vec<ListEdge> {
        let mut reached = Vec::new();
        if total == 0 {
            return reached;
        }

        if first_visible == 0 {
            if !self.at_first {
                self.at_first = true;
                reached.push(ListEdge::First);
            }
        } else {
            self.at_first = false;
        }

        if first_visible + visible_count >= total {
            if !self.at_last {
                self.at_last = true;
                reached.push(ListEdge::Last);
            }
        } else {
            self.at_last = false;
        }

        reached
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
