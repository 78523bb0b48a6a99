//! Landing page content and tunables.
//!
//! The manifest is a JSON asset describing the sections and every tunable of
//! the navigator and particle controllers. Missing fields take the built-in
//! defaults.

/// Landing manifest asset, its defaults and validation.
pub mod landing_manifest;

/// Section content and the immutable section list resource.
pub mod sections;
