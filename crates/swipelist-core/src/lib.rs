//! Core systems for swipelist.
//!
//! This crate provides the foundation the swipe engine is built on:
//!
//! - **Errors**: the [`SwipeError`] taxonomy and [`Result`] alias
//! - **Logging**: `tracing` targets, span names and convenience macros
//! - **Timers**: one-shot timers driven by an injected clock
//! - **Geometry**: points and rectangles for hit testing
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use swipelist_core::TimerManager;
//!
//! let now = Instant::now();
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(now, Duration::from_millis(500));
//!
//! assert!(timers.process_expired(now).is_empty());
//! assert_eq!(timers.process_expired(now + Duration::from_millis(500)), vec![id]);
//! ```

mod error;
pub mod geometry;
pub mod logging;
mod timer;

pub use error::{Result, SwipeError};
pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use timer::{TimerId, TimerManager};
