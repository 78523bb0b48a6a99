//! Discrete section navigation over a continuously scrolled container.
//!
//! Noisy wheel, touch and resize input is reduced to whole-section moves.
//! Scroll input is debounced before snapping, snaps arm a cool-down so their
//! own scroll events cannot re-trigger them, and touch swipes move exactly one
//! section per gesture.

/// Single-slot delayed task keyed on logical time.
pub mod scheduled_task;

/// Virtual scroll container and the surface trait the navigator drives.
pub mod scroll_container;

/// Section index state machine arbitrating scroll, resize and touch input.
pub mod section_navigator;

/// Seek requests and scroll notifications exchanged between systems.
pub mod events;
