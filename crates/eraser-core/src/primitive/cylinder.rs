//! Cylinder blocker mesh generation (faceted, with end caps)

use glam::Vec3;

use crate::config::AngleStep;
use crate::mesh::{Mesh, MeshBuilder};

/// Generate a faceted cylinder hanging below the anchor point
///
/// Each radial segment emits a top cap triangle, two side triangles and a
/// bottom cap triangle, each with its own three vertices. Top and bottom share
/// the same radius.
///
/// # Arguments
/// * `diameter` - Cylinder diameter
/// * `step` - Angular increment between segments
/// * `height` - Distance from the anchor point down to the base
/// * `top_overshoot` - Extension of the top cap above the anchor point
///
/// # Returns
/// `4 * segments` triangles and `12 * segments` vertices
pub fn generate_cylinder_blocker(
    diameter: f32,
    step: AngleStep,
    height: f32,
    top_overshoot: f32,
) -> Mesh {
    let radius = diameter / 2.0;
    let top = top_overshoot;
    let bottom = -height;
    let segments = step.segments();
    let angle = step.radians();

    let rim = |theta: f32, y: f32| Vec3::new(radius * theta.cos(), y, radius * theta.sin());
    let top_center = Vec3::new(0.0, top, 0.0);
    let bottom_center = Vec3::new(0.0, bottom, 0.0);

    let mut builder =
        MeshBuilder::with_capacity(segments as usize * 12, segments as usize * 4);

    for i in 0..segments {
        let a0 = i as f32 * angle;
        let a1 = (i + 1) as f32 * angle;

        builder.add_triangle([top_center, rim(a1, top), rim(a0, top)]);
        builder.add_triangle([rim(a0, top), rim(a1, top), rim(a1, bottom)]);
        builder.add_triangle([rim(a1, bottom), rim(a0, bottom), rim(a0, top)]);
        builder.add_triangle([bottom_center, rim(a0, bottom), rim(a1, bottom)]);
    }

    builder.build()
}
