//! Compile-time defaults. Anything tunable per deployment can be overridden
//! from the landing manifest; these values are used when a field is absent.

/// Scroll snapping and smooth-scroll timings.
pub mod navigation_settings;

/// Star counts, sizes and motion constants for the particle field.
pub mod particle_settings;

/// Camera, window and shell layout settings.
pub mod render_settings;
