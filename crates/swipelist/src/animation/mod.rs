//! Row animations.
//!
//! Two kinds of animation run on rows: horizontal offset animations (open,
//! close, settle, slide out) and the vertical collapse run by the dismiss
//! coordinator. Both are built on [`Tween`] and advanced by explicit frame
//! ticks carrying the current time.

mod easing;
mod offset;
mod tween;

pub use easing::{Easing, ease, lerp_eased};
pub use offset::{AnimationPurpose, OffsetAnimator, OffsetFrame};
pub use tween::{Tween, TweenState};
