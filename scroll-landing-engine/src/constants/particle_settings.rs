/// Morph field population.
pub const MORPH_PARTICLE_COUNT: usize = 3500;

/// Extra radius the morph starts with, covering the whole screen.
pub const MORPH_INITIAL_SPREAD: f32 = 600.0;

/// Radius of the settled spherical shell.
pub const MORPH_FINAL_RADIUS: f32 = 100.0;

pub const MORPH_DURATION_MS: u64 = 4000;

pub const MORPH_POINT_SIZE: f32 = 0.75;

/// Whole-cloud spin per rendered frame (radians).
pub const MORPH_SPIN_Y_PER_FRAME: f32 = 0.0015;
pub const MORPH_SPIN_X_PER_FRAME: f32 = 0.0003;

/// Horizontal drift per rendered frame (world units).
pub const DRIFT_STEP_PER_FRAME: f32 = 0.025;

/// Drift strip height as a fraction of the viewport.
pub const WIDE_STRIP_FRACTION: f32 = 0.45;
pub const MOBILE_STRIP_FRACTION: f32 = 0.40;

/// Windows at or below this width (logical px) use the mobile strip.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Fraction of the viewport height the first scroll must pass to start the morph.
pub const TRIGGER_VIEWPORT_FRACTION: f32 = 0.5;
