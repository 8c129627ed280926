//! Logging facilities for swipelist.
//!
//! swipelist uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("swipelist::gesture=trace,swipelist::dismiss=debug")
//!     .init();
//! ```

/// Span names used throughout swipelist for tracing.
pub mod span_names {
    /// Touch event dispatch span.
    pub const TOUCH: &str = "swipelist::touch";
    /// Animation frame span.
    pub const FRAME: &str = "swipelist::frame";
    /// Dismiss batch completion span.
    pub const DISMISS_BATCH: &str = "swipelist::dismiss_batch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core target.
    pub const CORE: &str = "swipelist_core";
    /// Timer system target.
    pub const TIMER: &str = "swipelist_core::timer";
    /// Gesture classification target.
    pub const GESTURE: &str = "swipelist::gesture";
    /// Direction lock target.
    pub const INTERCEPT: &str = "swipelist::intercept";
    /// Dismiss coordination target.
    pub const DISMISS: &str = "swipelist::dismiss";
    /// Row animation target.
    pub const ANIMATION: &str = "swipelist::animation";
    /// Configuration target.
    pub const CONFIG: &str = "swipelist::config";
    /// Listener forwarding target.
    pub const LISTENER: &str = "swipelist::listener";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of a frame or a batch.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "swipelist::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Wrappers around the `tracing` macros with the core target.
#[macro_export]
macro_rules! swipe_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "swipelist_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! swipe_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "swipelist_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! swipe_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "swipelist_core", $($arg)*)
    };
}
