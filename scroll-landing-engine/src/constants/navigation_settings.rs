/// Quiet period after the last scroll event before snapping (ms).
pub const SCROLL_DEBOUNCE_MS: u64 = 100;

/// Window after a seek during which scroll-driven snaps are ignored (ms).
pub const SNAP_COOLDOWN_MS: u64 = 1000;

/// Exponential approach rate of the smooth scroll, per second.
pub const SMOOTH_SCROLL_RATE: f32 = 12.0;

/// Distance (px) at which a smooth scroll snaps onto its target.
pub const SMOOTH_SCROLL_SNAP_EPSILON: f32 = 0.5;

/// Pixels scrolled per wheel "line" unit.
pub const WHEEL_LINE_HEIGHT_PX: f32 = 40.0;
