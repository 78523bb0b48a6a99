//! Frame-loop systems wiring the navigation and particle engines into Bevy.
//!
//! Input systems translate wheel, touch, keyboard and button input into
//! navigator calls; starfield systems step the particle controllers and push
//! their buffers into the star meshes.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native overlay.
pub mod fps_tracking;

/// Wheel, touch, resize and keyboard handling plus seek resolution.
pub mod navigation_input;

/// Drift band and morph field controllers.
pub mod starfield;
