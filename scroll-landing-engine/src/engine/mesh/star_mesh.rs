use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::particles::buffer::ParticleBuffer;

/// Vertices emitted per star: two triangles forming a camera-facing quad.
pub const VERTICES_PER_STAR: usize = 6;

/// Quad corners in `[-1, 1]^2`, counter-clockwise, two triangles.
const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_STAR] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// Repeat each particle centre once per quad corner. The vertex shader offsets
/// each copy by its corner in view space.
pub fn expand_star_vertices(buffer: &ParticleBuffer) -> Vec<[f32; 3]> {
    buffer
        .positions()
        .iter()
        .flat_map(|position| std::iter::repeat_n(*position, VERTICES_PER_STAR))
        .collect()
}

/// Build a star mesh for `buffer`. Kept in the main world as well so the
/// controllers can rewrite positions every frame.
pub fn create_star_mesh(buffer: &ParticleBuffer) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, expand_star_vertices(buffer));
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, quad_corners(buffer.particle_count()));
    mesh
}

/// Corner attribute for `star_count` quads. Constant for a given count.
pub fn quad_corners(star_count: usize) -> Vec<[f32; 2]> {
    QUAD_CORNERS.iter().copied().cycle().take(star_count * VERTICES_PER_STAR).collect()
}

/// Replace the mesh positions wholesale with the contents of `buffer`. The
/// particle count is fixed per controller, so the corner attribute stays valid.
pub fn write_star_positions(mesh: &mut Mesh, buffer: &ParticleBuffer) {
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, expand_star_vertices(buffer));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_star_expands_to_six_vertices() {
        let buffer = ParticleBuffer::from_positions(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let vertices = expand_star_vertices(&buffer);
        assert_eq!(vertices.len(), 12);
        assert!(vertices[..6].iter().all(|v| *v == [1.0, 2.0, 3.0]));
        assert!(vertices[6..].iter().all(|v| *v == [4.0, 5.0, 6.0]));
    }

    #[test]
    fn corners_repeat_per_star() {
        let corners = quad_corners(2);
        assert_eq!(corners.len(), 12);
        assert_eq!(corners[0], corners[6]);
        assert_eq!(corners[5], [-1.0, 1.0]);
    }

    #[test]
    fn mesh_vertex_count_tracks_buffer() {
        let mesh = create_star_mesh(&ParticleBuffer::zeroed(25));
        assert_eq!(mesh.count_vertices(), 25 * VERTICES_PER_STAR);
    }
}
