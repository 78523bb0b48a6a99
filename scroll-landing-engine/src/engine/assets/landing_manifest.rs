use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::particle_settings::DRIFT_STEP_PER_FRAME;
use crate::engine::assets::sections::Section;
use crate::engine::navigation::section_navigator::NavigatorSettings;
use crate::engine::particles::buffer::BandAnchor;
use crate::engine::particles::drift_layer::DriftLayerConfig;
use crate::engine::particles::morph_field::MorphSettings;

/// Accepted snap cool-down, long enough to cover a smooth scroll.
const SNAP_COOLDOWN_RANGE_MS: std::ops::RangeInclusive<u64> = 800..=1000;

/// Error types for landing manifest validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestError {
    EmptySectionList,
    InvalidDriftLayer { index: usize, reason: &'static str },
    InvalidMorph(&'static str),
    InvalidNavigation(&'static str),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::EmptySectionList => write!(f, "Manifest declares no sections"),
            ManifestError::InvalidDriftLayer { index, reason } => {
                write!(f, "Drift layer {}: {}", index, reason)
            }
            ManifestError::InvalidMorph(reason) => write!(f, "Morph settings: {}", reason),
            ManifestError::InvalidNavigation(reason) => {
                write!(f, "Navigation settings: {}", reason)
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// Ambient band configuration: which edges carry bands and the layer stack
/// rendered in each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSettings {
    pub bands: Vec<BandAnchor>,
    pub layers: Vec<DriftLayerConfig>,
    pub step_per_frame: f32,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            bands: vec![BandAnchor::Top, BandAnchor::Bottom],
            layers: vec![
                DriftLayerConfig {
                    count: 100,
                    size: 0.09,
                    opacity: 0.65,
                },
                DriftLayerConfig {
                    count: 25,
                    size: 0.2,
                    opacity: 1.0,
                },
            ],
            step_per_frame: DRIFT_STEP_PER_FRAME,
        }
    }
}

/// Landing page description loaded from JSON. Every field falls back to the
/// built-in page when absent.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingManifest {
    pub header_title: String,
    pub sections: Vec<Section>,
    pub navigation: NavigatorSettings,
    pub morph: MorphSettings,
    pub drift: DriftSettings,
}

impl Default for LandingManifest {
    fn default() -> Self {
        Self {
            header_title: "My Fixed Header".to_string(),
            sections: vec![
                Section::new("Welcome", "This is the welcome section.", "lightcoral"),
                Section::new(
                    "About Us",
                    "Learn more about our mission and values.",
                    "lightblue",
                ),
                Section::new("Services", "Explore the services we offer.", "lightgreen"),
                Section::new("Portfolio", "Take a look at some of our past work.", "khaki"),
                Section::new(
                    "Contact",
                    "Get in touch with us for more information.",
                    "plum",
                ),
                Section::new("Footer", "Thanks for visiting!", "green"),
            ],
            navigation: NavigatorSettings::default(),
            morph: MorphSettings::default(),
            drift: DriftSettings::default(),
        }
    }
}

impl LandingManifest {
    /// Check the manifest describes a page the engine can run.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.sections.is_empty() {
            return Err(ManifestError::EmptySectionList);
        }

        for (index, layer) in self.drift.layers.iter().enumerate() {
            if layer.count == 0 {
                return Err(ManifestError::InvalidDriftLayer {
                    index,
                    reason: "star count must be positive",
                });
            }
            if !(layer.size > 0.0) {
                return Err(ManifestError::InvalidDriftLayer {
                    index,
                    reason: "point size must be positive",
                });
            }
            if !(0.0..=1.0).contains(&layer.opacity) {
                return Err(ManifestError::InvalidDriftLayer {
                    index,
                    reason: "opacity must lie in [0, 1]",
                });
            }
        }

        if self.morph.particle_count == 0 {
            return Err(ManifestError::InvalidMorph("particle count must be positive"));
        }
        if !(self.morph.final_radius > 0.0) || self.morph.initial_spread < 0.0 {
            return Err(ManifestError::InvalidMorph(
                "radii must be positive and the spread non-negative",
            ));
        }

        if self.navigation.debounce_ms == 0 {
            return Err(ManifestError::InvalidNavigation("debounce must be non-zero"));
        }
        if !SNAP_COOLDOWN_RANGE_MS.contains(&self.navigation.snap_cooldown_ms) {
            return Err(ManifestError::InvalidNavigation(
                "snap cool-down must lie in 800..=1000 ms",
            ));
        }
        if self.navigation.snap_cooldown_ms < self.navigation.debounce_ms {
            return Err(ManifestError::InvalidNavigation(
                "snap cool-down must outlast the scroll debounce",
            ));
        }

        Ok(())
    }
}
