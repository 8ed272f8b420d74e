//! Normal calculation utilities for mesh data

use glam::Vec3;

/// Calculate normal for a single triangle (counter-clockwise winding)
pub fn calculate_triangle_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let (v0, v1, v2) = (Vec3::from(v0), Vec3::from(v1), Vec3::from(v2));
    (v1 - v0)
        .cross(v2 - v0)
        .try_normalize()
        .unwrap_or(Vec3::Y)
        .into()
}

/// Calculate face normals from vertices and indices (one per triangle)
pub fn calculate_face_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    indices
        .chunks_exact(3)
        .map(|chunk| {
            calculate_triangle_normal(
                vertices[chunk[0] as usize],
                vertices[chunk[1] as usize],
                vertices[chunk[2] as usize],
            )
        })
        .collect()
}

/// Calculate per-vertex normals from the triangles referencing each vertex
///
/// Face normals are accumulated area-weighted and normalized. With vertices
/// duplicated per face this yields exactly the face normal at every corner.
pub fn calculate_vertex_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for chunk in indices.chunks_exact(3) {
        let v0 = Vec3::from(vertices[chunk[0] as usize]);
        let v1 = Vec3::from(vertices[chunk[1] as usize]);
        let v2 = Vec3::from(vertices[chunk[2] as usize]);
        let weighted = (v1 - v0).cross(v2 - v0);
        for &index in chunk {
            accumulated[index as usize] += weighted;
        }
    }

    accumulated
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).into())
        .collect()
}
