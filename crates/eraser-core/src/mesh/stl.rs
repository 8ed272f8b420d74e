//! STL export for generated meshes

use std::io::Write;
use std::path::Path;

use glam::{Mat4, Vec3};

use super::{Mesh, calculate_triangle_normal};

/// Save a mesh as a binary STL file, transformed into world space
pub fn save_stl(mesh: &Mesh, transform: Mat4, path: impl AsRef<Path>) -> Result<(), StlError> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| StlError::Io(e.to_string()))?;
    write_stl(mesh, transform, &mut file)?;
    tracing::debug!(
        "Wrote {} triangles to {}",
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Write a mesh as binary STL to any writer
pub fn write_stl<W: Write>(mesh: &Mesh, transform: Mat4, writer: &mut W) -> Result<(), StlError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(StlError::Write(format!(
            "index buffer length {} is not a multiple of 3",
            mesh.indices.len()
        )));
    }

    let transformed: Vec<[f32; 3]> = mesh
        .vertices
        .iter()
        .map(|v| transform.transform_point3(Vec3::from(*v)).to_array())
        .collect();

    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for [a, b, c] in mesh.triangles() {
        let (Some(&v0), Some(&v1), Some(&v2)) = (
            transformed.get(a as usize),
            transformed.get(b as usize),
            transformed.get(c as usize),
        ) else {
            return Err(StlError::Write(format!(
                "triangle ({a}, {b}, {c}) references a missing vertex"
            )));
        };

        triangles.push(stl_io::Triangle {
            normal: stl_io::Normal::new(calculate_triangle_normal(v0, v1, v2)),
            vertices: [
                stl_io::Vertex::new(v0),
                stl_io::Vertex::new(v1),
                stl_io::Vertex::new(v2),
            ],
        });
    }

    stl_io::write_stl(writer, triangles.iter()).map_err(|e| StlError::Write(e.to_string()))?;
    Ok(())
}

/// STL-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Write error: {0}")]
    Write(String),
}
