//! Cube blocker mesh generation

use glam::Vec3;

use crate::mesh::{Mesh, MeshBuilder};

/// Generate a square box hanging below the anchor point
///
/// # Arguments
/// * `size` - Edge length of the square cross-section (X and Z)
/// * `height` - Distance from the anchor point down to the base
/// * `top_overshoot` - Extension of the top face above the anchor point
///
/// # Returns
/// 24 vertices (4 per face), 12 triangles, outward-facing normals
pub fn generate_cube_blocker(size: f32, height: f32, top_overshoot: f32) -> Mesh {
    let s = size / 2.0;
    let top = top_overshoot;
    let bottom = -height;
    let v = Vec3::new;

    let mut builder = MeshBuilder::with_capacity(24, 12);

    // +Z face
    builder.add_quad([v(-s, bottom, s), v(-s, top, s), v(s, top, s), v(s, bottom, s)]);
    // -Z face
    builder.add_quad([v(-s, top, -s), v(-s, bottom, -s), v(s, bottom, -s), v(s, top, -s)]);
    // Bottom
    builder.add_quad([
        v(s, bottom, -s),
        v(-s, bottom, -s),
        v(-s, bottom, s),
        v(s, bottom, s),
    ]);
    // Top
    builder.add_quad([v(-s, top, -s), v(s, top, -s), v(s, top, s), v(-s, top, s)]);
    // -X face
    builder.add_quad([
        v(-s, bottom, s),
        v(-s, bottom, -s),
        v(-s, top, -s),
        v(-s, top, s),
    ]);
    // +X face
    builder.add_quad([v(s, bottom, -s), v(s, bottom, s), v(s, top, s), v(s, top, -s)]);

    builder.build()
}
