use bevy::prelude::*;

/// Vertical field of view of the backdrop camera (degrees).
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Distance from the camera to the `z = 0` drift plane.
pub const CAMERA_DISTANCE: f32 = 10.0;

pub const CLEAR_COLOUR: Color = Color::BLACK;

/// Fixed header bar height (px).
pub const HEADER_HEIGHT: f32 = 60.0;

/// Alpha applied to section backgrounds so the starfield shows through.
pub const SECTION_BACKGROUND_ALPHA: f32 = 0.35;

/// Inset of the section copy from the panel edges (px).
pub const SECTION_PADDING: f32 = 40.0;

/// Distance of the counter and skip button from the screen corners (px).
pub const OVERLAY_MARGIN: f32 = 20.0;

pub const CANVAS_SELECTOR: &str = "#landing";

pub const MANIFEST_PATH: &str = "landing_manifest.json";

pub const STAR_SHADER_PATH: &str = "shaders/star_point.wgsl";
