//! Mesh generation for star point rendering.
//!
//! Stars are drawn as GPU-expanded quads: the mesh repeats each particle centre
//! six times and the vertex shader spreads the copies into a camera-facing quad.

/// Star quad mesh construction and per-frame position rewrites.
pub mod star_mesh;
