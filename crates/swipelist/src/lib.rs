//! Swipeable list rows.
//!
//! Each row of a list has a *front* view that follows a horizontal drag and a
//! *back* view revealed underneath. A release past the commit threshold (or a
//! fling) performs the side's [`SwipeAction`]: reveal the back view, check the
//! row, or dismiss it with a collapse animation.
//!
//! The engine is headless. The host feeds it [`TouchEvent`]s, calls
//! [`SwipeListView::tick`] every frame, and exposes its view hierarchy
//! through [`RowHost`]; the data lives behind [`SwipeAdapter`].
//!
//! # Components
//!
//! - [`InterceptGate`]: decides whether a touch stream is a row swipe or a list scroll
//! - [`GestureClassifier`]: the per-gesture state machine and row bookkeeping
//! - [`DismissCoordinator`]: batches dismissed rows and sequences their removal
//! - [`RowViewMapper`]: resolves points and positions to row views
//! - [`ListenerBridge`]: forwards engine events to a [`SwipeListener`]
//! - [`SwipeConfig`]: modes, actions, thresholds and animation timing

pub mod adapter;
pub mod animation;
pub mod classifier;
pub mod config;
pub mod dismiss;
pub mod intercept;
mod list_view;
pub mod listener;
pub mod mapper;
pub mod row;
pub mod scroll;
pub mod session;
pub mod touch;

pub use adapter::{Group, GroupedAdapter, GroupedPosition, ListAdapter, RowFlags, SwipeAdapter};
pub use classifier::{EngineContext, GestureClassifier, TickOutcome};
pub use config::{
    ConfigCell, ResourceId, Side, SwipeAction, SwipeConfig, SwipeConfigBuilder, SwipeMode, ViewKey,
};
pub use dismiss::{DismissCoordinator, ScheduleOutcome};
pub use intercept::{DirectionLock, InterceptDecision, InterceptGate};
pub use list_view::SwipeListView;
pub use listener::{ListenerBridge, SharedListener, SwipeListener};
pub use mapper::{RowViewMapper, RowViews};
pub use row::{OpenPhase, RowHost, RowState, ViewId};
pub use scroll::{ListEdge, ListScrollState, ScrollEdgeTracker};
pub use session::GestureState;
pub use touch::{TouchEvent, TouchPhase};

pub use swipelist_core::{Point, Rect, Result, Size, SwipeError};
