use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::particle_settings::{
    DRIFT_STEP_PER_FRAME, MOBILE_BREAKPOINT_PX, MOBILE_STRIP_FRACTION, WIDE_STRIP_FRACTION,
};
use crate::engine::particles::buffer::{BandAnchor, ParticleBuffer, WorldViewport, generate_strip};

/// Appearance and population of one star layer inside a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftLayerConfig {
    pub count: usize,
    pub size: f32,
    pub opacity: f32,
}

/// Strip height as a fraction of the viewport for a given window width.
pub fn strip_fraction_for_width(window_width: f32) -> f32 {
    if window_width <= MOBILE_BREAKPOINT_PX {
        MOBILE_STRIP_FRACTION
    } else {
        WIDE_STRIP_FRACTION
    }
}

/// Inputs the position buffer depends on. The buffer is only rebuilt when one
/// of these changes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutKey {
    viewport: WorldViewport,
    height_fraction: f32,
    config: DriftLayerConfig,
}

/// One ambient star layer pinned to a screen edge, drifting right and
/// wrapping back to the left edge.
#[derive(Component, Debug, Clone)]
pub struct DriftLayer {
    anchor: BandAnchor,
    config: DriftLayerConfig,
    step: f32,
    layout: Option<LayoutKey>,
    buffer: ParticleBuffer,
}

impl DriftLayer {
    pub fn new(anchor: BandAnchor, config: DriftLayerConfig) -> Self {
        Self {
            anchor,
            config,
            step: DRIFT_STEP_PER_FRAME,
            layout: None,
            buffer: ParticleBuffer::zeroed(config.count),
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn anchor(&self) -> BandAnchor {
        self.anchor
    }

    pub fn config(&self) -> &DriftLayerConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> Option<WorldViewport> {
        self.layout.map(|layout| layout.viewport)
    }

    /// Rebuild positions if the viewport or strip fraction changed since the
    /// last layout. Degenerate viewports are skipped and keep the old layout.
    /// Returns whether the buffer was regenerated.
    pub fn sync_layout<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: WorldViewport,
        height_fraction: f32,
    ) -> bool {
        if viewport.is_degenerate() {
            return false;
        }

        let key = LayoutKey {
            viewport,
            height_fraction,
            config: self.config,
        };
        if self.layout == Some(key) {
            return false;
        }

        let next = generate_strip(
            rng,
            self.config.count,
            &viewport,
            self.anchor,
            height_fraction,
        );
        self.buffer.replace_with(next);
        self.layout = Some(key);
        debug!(
            "Drift layer ({}, {} stars) laid out for {:.2}x{:.2} viewport",
            self.anchor.as_str(),
            self.config.count,
            viewport.width,
            viewport.height
        );
        true
    }

    /// Advance every particle one frame to the right, wrapping past the right
    /// edge to the left edge. Only `x` is touched. No-op before the first
    /// layout.
    pub fn tick(&mut self) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };

        let half_width = layout.viewport.half_width();
        for position in self.buffer.positions_mut() {
            position[0] += self.step;
            if position[0] > half_width {
                position[0] = -half_width;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layer(count: usize) -> DriftLayer {
        DriftLayer::new(
            BandAnchor::Bottom,
            DriftLayerConfig {
                count,
                size: 0.09,
                opacity: 0.65,
            },
        )
    }

    #[test]
    fn particle_at_right_edge_wraps_to_left_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let viewport = WorldViewport::new(16.0, 9.0);
        let mut layer = layer(1);
        layer.sync_layout(&mut rng, viewport, 0.45);

        layer.buffer.positions_mut()[0][0] = 8.0 - 0.01;
        layer.tick();
        assert_eq!(layer.buffer().positions()[0][0], -8.0);

        layer.tick();
        assert!((layer.buffer().positions()[0][0] - (-8.0 + DRIFT_STEP_PER_FRAME)).abs() < 1e-6);
    }

    #[test]
    fn drift_never_exceeds_right_edge() {
        let mut rng = StdRng::seed_from_u64(2);
        let viewport = WorldViewport::new(4.0, 3.0);
        let mut layer = layer(50);
        layer.sync_layout(&mut rng, viewport, 0.4);

        for _ in 0..1000 {
            layer.tick();
            for [x, _, _] in layer.buffer().positions() {
                assert!(*x <= 2.0);
                assert!(*x >= -2.0);
            }
        }
    }

    #[test]
    fn tick_only_moves_horizontal_component() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layer = layer(20);
        layer.sync_layout(&mut rng, WorldViewport::new(30.0, 10.0), 0.45);
        let before = layer.buffer().clone();

        layer.tick();
        for (old, new) in before.positions().iter().zip(layer.buffer().positions()) {
            assert_eq!(old[1], new[1]);
            assert_eq!(old[2], new[2]);
        }
    }

    #[test]
    fn layout_is_memoized_until_viewport_changes() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut layer = layer(10);
        let viewport = WorldViewport::new(30.0, 10.0);

        assert!(layer.sync_layout(&mut rng, viewport, 0.45));
        layer.tick();
        let drifted = layer.buffer().clone();

        assert!(!layer.sync_layout(&mut rng, viewport, 0.45));
        assert_eq!(layer.buffer(), &drifted);

        assert!(layer.sync_layout(&mut rng, WorldViewport::new(40.0, 10.0), 0.45));
        assert_eq!(layer.buffer().particle_count(), 10);
    }

    #[test]
    fn degenerate_viewport_skips_layout_and_drift() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut layer = layer(10);
        assert!(!layer.sync_layout(&mut rng, WorldViewport::new(0.0, 10.0), 0.45));
        assert!(!layer.tick());
        assert!(layer.viewport().is_none());
    }

    #[test]
    fn narrow_windows_use_the_thinner_strip() {
        assert_eq!(strip_fraction_for_width(768.0), MOBILE_STRIP_FRACTION);
        assert_eq!(strip_fraction_for_width(1280.0), WIDE_STRIP_FRACTION);
    }
}
