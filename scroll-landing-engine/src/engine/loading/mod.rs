//! Landing manifest loading.
//!
//! Loads the JSON page description, validates it, and installs the section
//! list, navigator, scroll container and trigger gate before switching the app
//! to `Running`.

/// Manifest loading, validation and resource installation.
pub mod manifest_loader;
