use bevy::prelude::*;

use crate::constants::particle_settings::TRIGGER_VIEWPORT_FRACTION;

/// One-way latch flipped by the first scroll past a fraction of the viewport.
/// Once fired it stays fired for the session.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TriggerGate {
    fired: bool,
    viewport_fraction: f32,
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self::new(TRIGGER_VIEWPORT_FRACTION)
    }
}

impl TriggerGate {
    pub fn new(viewport_fraction: f32) -> Self {
        Self {
            fired: false,
            viewport_fraction,
        }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Feed the current scroll offset. Returns `true` only on the observation
    /// that flips the latch.
    pub fn observe(&mut self, scroll_top: f32, viewport_height: f32) -> bool {
        if self.fired || viewport_height <= 0.0 {
            return false;
        }

        if scroll_top > viewport_height * self.viewport_fraction {
            self.fired = true;
            info!(
                "Animation trigger fired at scroll offset {:.0} (viewport {:.0})",
                scroll_top, viewport_height
            );
            return true;
        }
        false
    }
}
