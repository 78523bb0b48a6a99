use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered particle positions. The particle count is fixed at construction;
/// replacements must keep it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleBuffer {
    positions: Vec<[f32; 3]>,
}

impl ParticleBuffer {
    pub fn from_positions(positions: Vec<[f32; 3]>) -> Self {
        Self { positions }
    }

    /// Buffer of `count` particles parked at the origin.
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; count],
        }
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-component access for in-place updates. A slice, so the length
    /// cannot change.
    pub fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.positions
    }

    /// Flat `x, y, z, x, y, z, ...` view, `3 * particle_count` long.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Swap in a freshly generated buffer of the same size.
    /// Returns `false` and keeps the current contents on a count mismatch.
    pub fn replace_with(&mut self, next: ParticleBuffer) -> bool {
        if next.particle_count() != self.particle_count() {
            return false;
        }
        self.positions = next.positions;
        true
    }
}

/// Visible world extent of the camera at the `z = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldViewport {
    pub width: f32,
    pub height: f32,
}

impl WorldViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Derive the world extent from window size and a perspective camera
    /// looking down `-Z` from `distance`.
    pub fn from_perspective(
        window_width: f32,
        window_height: f32,
        fov_y_radians: f32,
        distance: f32,
    ) -> Self {
        if window_height <= 0.0 {
            return Self::new(0.0, 0.0);
        }
        let height = 2.0 * distance * (fov_y_radians * 0.5).tan();
        let width = height * (window_width / window_height);
        Self::new(width, height)
    }

    /// Zero, negative or non-finite extents cannot host any geometry.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}

/// Screen edge a drift band hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandAnchor {
    Top,
    Bottom,
}

impl BandAnchor {
    /// Vertical centre of a strip of `strip_height` pinned to this edge.
    pub fn strip_center_y(&self, viewport: &WorldViewport, strip_height: f32) -> f32 {
        match self {
            Self::Top => viewport.height / 2.0 - strip_height / 2.0,
            Self::Bottom => -viewport.height / 2.0 + strip_height / 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Scatter `count` particles across a horizontal strip of the viewport.
///
/// `x` spans the full width, `y` the strip around its anchored centre, and `z`
/// a shallow `[-1, 1)` depth slab.
pub fn generate_strip<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    viewport: &WorldViewport,
    anchor: BandAnchor,
    height_fraction: f32,
) -> ParticleBuffer {
    let strip_height = viewport.height * height_fraction;
    let y_mid = anchor.strip_center_y(viewport, strip_height);
    let left = -viewport.half_width();

    let positions = (0..count)
        .map(|_| {
            let x = left + rng.r#gen::<f32>() * viewport.width;
            let y = y_mid + (rng.r#gen::<f32>() - 0.5) * strip_height;
            let z = rng.r#gen::<f32>() * 2.0 - 1.0;
            [x, y, z]
        })
        .collect();

    ParticleBuffer::from_positions(positions)
}

/// Place `count` particles uniformly on a sphere of `radius`.
pub fn generate_shell<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: f32) -> ParticleBuffer {
    let positions = (0..count)
        .map(|_| crate::engine::animation::spherical::sample_sphere_surface(rng, radius))
        .collect();
    ParticleBuffer::from_positions(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn flat_view_is_three_floats_per_particle() {
        let buffer = ParticleBuffer::from_positions(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(buffer.as_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(buffer.as_flat().len(), 3 * buffer.particle_count());
    }

    #[test]
    fn replacement_keeps_particle_count() {
        let mut buffer = ParticleBuffer::zeroed(3);
        assert!(!buffer.replace_with(ParticleBuffer::zeroed(4)));
        assert_eq!(buffer.particle_count(), 3);

        let next = ParticleBuffer::from_positions(vec![[1.0; 3]; 3]);
        assert!(buffer.replace_with(next));
        assert_eq!(buffer.positions()[2], [1.0; 3]);
    }

    #[test]
    fn top_strip_stays_inside_its_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let viewport = WorldViewport::new(20.0, 10.0);
        let buffer = generate_strip(&mut rng, 500, &viewport, BandAnchor::Top, 0.4);

        // Strip is 4 units tall, centred 3 units above the middle.
        for [x, y, z] in buffer.positions() {
            assert!((-10.0..10.0).contains(x));
            assert!(*y >= 1.0 && *y <= 5.0, "y = {y}");
            assert!((-1.0..1.0).contains(z));
        }
    }

    #[test]
    fn bottom_strip_mirrors_the_top() {
        let viewport = WorldViewport::new(20.0, 10.0);
        let top = BandAnchor::Top.strip_center_y(&viewport, 4.0);
        let bottom = BandAnchor::Bottom.strip_center_y(&viewport, 4.0);
        assert_eq!(top, 3.0);
        assert_eq!(bottom, -3.0);
    }

    #[test]
    fn perspective_viewport_matches_camera_frustum() {
        let viewport = WorldViewport::from_perspective(1600.0, 800.0, 90f32.to_radians(), 10.0);
        assert!((viewport.height - 20.0).abs() < 1e-3);
        assert!((viewport.width - 40.0).abs() < 1e-3);
        assert!(WorldViewport::from_perspective(1600.0, 0.0, 1.0, 10.0).is_degenerate());
    }
}
