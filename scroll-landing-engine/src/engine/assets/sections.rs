use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::landing_manifest::ManifestError;

/// One full-viewport content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    /// CSS colour keyword for the panel background.
    #[serde(rename = "color")]
    pub colour_token: String,
}

impl Section {
    pub fn new(title: &str, description: &str, colour_token: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            colour_token: colour_token.to_string(),
        }
    }
}

/// Ordered, non-empty, immutable list of sections fixed at startup.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    pub fn new(sections: Vec<Section>) -> Result<Self, ManifestError> {
        if sections.is_empty() {
            return Err(ManifestError::EmptySectionList);
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}
