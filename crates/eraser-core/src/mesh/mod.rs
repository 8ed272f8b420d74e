//! Triangle meshes for generated blockers

mod builder;
mod normals;
mod stl;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use builder::MeshBuilder;
pub use normals::{calculate_face_normals, calculate_triangle_normal, calculate_vertex_normals};
pub use stl::{StlError, save_stl, write_stl};

/// Cosine tolerance used when checking that a vertex belongs to a single face plane
const COPLANAR_TOLERANCE: f32 = 1e-3;

/// Indexed triangle mesh with one normal per vertex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex normals (same length as `vertices`)
    pub normals: Vec<[f32; 3]>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Positions of the three corners of a triangle
    pub fn triangle_positions(&self, triangle: [u32; 3]) -> [Vec3; 3] {
        triangle.map(|i| Vec3::from(self.vertices[i as usize]))
    }

    /// Axis-aligned bounding box, `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let v = Vec3::from(*v);
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Average of all vertex positions
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.vertices.iter().map(|v| Vec3::from(*v)).sum();
        sum / self.vertices.len() as f32
    }

    /// Check the buffer invariants required for flat shading
    ///
    /// Verifies that the index list holds whole triangles, that every index is
    /// in range, that no triangle repeats a vertex, that there is one normal
    /// per vertex, and that no vertex is shared between non-coplanar faces.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        if self.normals.len() != self.vertices.len() {
            return Err(MeshError::NormalCountMismatch {
                vertices: self.vertices.len(),
                normals: self.normals.len(),
            });
        }

        let vertex_count = self.vertices.len();
        let mut owner: Vec<Option<Vec3>> = vec![None; vertex_count];

        for (t, triangle) in self.triangles().enumerate() {
            for &index in &triangle {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
            }
            let [a, b, c] = triangle;
            if a == b || b == c || a == c {
                return Err(MeshError::RepeatedIndex(t));
            }

            let [v0, v1, v2] = self.triangle_positions(triangle);
            let face_normal = Vec3::from(calculate_triangle_normal(
                v0.into(),
                v1.into(),
                v2.into(),
            ));
            for index in triangle {
                match owner[index as usize] {
                    Some(existing) if existing.dot(face_normal) < 1.0 - COPLANAR_TOLERANCE => {
                        return Err(MeshError::SharedAcrossFaces(index));
                    }
                    Some(_) => {}
                    None => owner[index as usize] = Some(face_normal),
                }
            }
        }

        Ok(())
    }
}

/// Mesh-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Index buffer length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    #[error("Normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch { vertices: usize, normals: usize },
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Triangle {0} references the same vertex twice")]
    RepeatedIndex(usize),
    #[error("Vertex {0} is shared between faces with different normals")]
    SharedAcrossFaces(u32),
}
