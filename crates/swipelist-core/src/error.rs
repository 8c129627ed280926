//! Error types for swipelist.

/// A specialized Result type for swipelist operations.
pub type Result<T> = std::result::Result<T, SwipeError>;

/// Errors produced by the swipe engine.
///
/// Only [`SwipeError::Configuration`] ever reaches the host; the others are
/// recovered inside the engine and logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwipeError {
    /// A required row sub-view could not be resolved at initialization.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A request targeted a position that is no longer valid.
    #[error("Position {position} is stale (list has {item_count} items)")]
    StaleState { position: usize, item_count: usize },

    /// A new animation was requested while another one was running for the row.
    #[error("Animation already running for position {position}")]
    AnimationConflict { position: usize },

    /// A pending dismiss batch was invalidated by a data set change.
    #[error("Dismiss batch {positions:?} discarded after data set change")]
    InconsistentBatch { positions: Vec<usize> },

    /// The timer ID is invalid or has already been removed.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

impl SwipeError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a stale state error.
    pub fn stale_state(position: usize, item_count: usize) -> Self {
        Self::StaleState {
            position,
            item_count,
        }
    }

    /// Create an animation conflict error.
    pub fn animation_conflict(position: usize) -> Self {
        Self::AnimationConflict { position }
    }

    /// Create an inconsistent batch error.
    pub fn inconsistent_batch(positions: impl Into<Vec<usize>>) -> Self {
        Self::InconsistentBatch {
            positions: positions.into(),
        }
    }

    /// Whether the engine recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }
}
