//! Host-independent animation math shared by the particle controllers.
//!
//! Everything here is a pure function of its inputs so the controllers can be
//! stepped by the Bevy frame loop, a timer, or a unit test alike.

/// Time-to-progress mapping and the symmetric sine ease.
pub mod easing;

/// Uniform sampling of points on a sphere surface.
pub mod spherical;
