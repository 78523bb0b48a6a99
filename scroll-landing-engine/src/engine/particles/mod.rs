//! Particle field engine: procedural star buffers and their controllers.
//!
//! Three independent clouds are maintained. A one-shot morph field condenses
//! from a wide scatter into a spherical shell once the trigger gate fires, and
//! two ambient drift bands slide horizontally for the whole session.

/// Flat position buffers, world-space viewport metrics and strip placement.
pub mod buffer;

/// Ambient star bands with toroidal horizontal drift.
pub mod drift_layer;

/// Timed scatter-to-shell transition with per-step regeneration.
pub mod morph_field;

/// One-way latch that starts the morph on the first deep scroll.
pub mod trigger_gate;
