//! Flat-shaded mesh construction

use glam::Vec3;

use super::{Mesh, calculate_vertex_normals};

/// Builds a [`Mesh`] whose faces never share vertices
///
/// Every triangle or quad gets freshly allocated vertices, so a corner position
/// touched by three faces is stored three times. This keeps each face's normal
/// separate at the edges (flat shading); merging vertices would smooth them.
/// Normals are computed from the triangles in [`MeshBuilder::build`].
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with preallocated buffers
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Add a triangle, corners in counter-clockwise order seen from outside
    pub fn add_triangle(&mut self, corners: [Vec3; 3]) {
        let base = self.push_corners(&corners);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Add a quad as two triangles `(0, 2, 1)` and `(0, 3, 2)`
    ///
    /// Corners go clockwise seen from outside.
    pub fn add_quad(&mut self, corners: [Vec3; 4]) {
        let base = self.push_corners(&corners);
        self.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    /// Number of vertices emitted so far
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Finish the mesh and compute its normals
    pub fn build(self) -> Mesh {
        let normals = calculate_vertex_normals(&self.vertices, &self.indices);
        Mesh {
            vertices: self.vertices,
            normals,
            indices: self.indices,
        }
    }

    fn push_corners(&mut self, corners: &[Vec3]) -> u32 {
        let base = self.vertices.len() as u32;
        self.vertices.extend(corners.iter().map(|c| c.to_array()));
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quads_do_not_share_vertices() {
        let mut builder = MeshBuilder::new();
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        builder.add_quad(corners);
        builder.add_quad(corners);
        assert_eq!(builder.vertex_count(), 8);

        let mesh = builder.build();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.normals.len(), 8);
        assert_eq!(mesh.indices[6..9], [4, 6, 5]);
    }

    #[test]
    fn test_quad_winding_is_clockwise_input() {
        let mut builder = MeshBuilder::new();
        // Clockwise seen from +Z
        builder.add_quad([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]);
        let mesh = builder.build();
        for n in &mesh.normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }
}
