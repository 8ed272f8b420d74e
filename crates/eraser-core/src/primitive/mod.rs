//! Blocker mesh generation
//!
//! Generates flat-shaded meshes for the three blocker shapes:
//! - Cube (square box below the anchor point)
//! - Cylinder (faceted, with end caps)
//! - Custom prism (oriented box spanning two picked points)

mod cube;
mod cylinder;
mod prism;

pub use cube::generate_cube_blocker;
pub use cylinder::generate_cylinder_blocker;
pub use prism::{GeometryError, PrismSpan, generate_prism_blocker};

use crate::config::{AngleStep, ShapeKind};
use crate::mesh::Mesh;

/// Fully resolved parameters of one blocker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockerShape {
    Cube {
        size: f32,
        height: f32,
        top_overshoot: f32,
    },
    Cylinder {
        diameter: f32,
        step: AngleStep,
        height: f32,
        top_overshoot: f32,
    },
    Prism {
        span: PrismSpan,
        size: f32,
        top_overshoot: f32,
    },
}

impl BlockerShape {
    /// Build the mesh for these parameters
    pub fn generate(&self) -> Mesh {
        let mesh = match *self {
            BlockerShape::Cube {
                size,
                height,
                top_overshoot,
            } => generate_cube_blocker(size, height, top_overshoot),
            BlockerShape::Cylinder {
                diameter,
                step,
                height,
                top_overshoot,
            } => generate_cylinder_blocker(diameter, step, height, top_overshoot),
            BlockerShape::Prism {
                span,
                size,
                top_overshoot,
            } => generate_prism_blocker(&span, size, top_overshoot),
        };
        tracing::debug!(
            "Generated {} blocker: {} vertices, {} triangles",
            self.kind(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            BlockerShape::Cube { .. } => ShapeKind::Cube,
            BlockerShape::Cylinder { .. } => ShapeKind::Cylinder,
            BlockerShape::Prism { .. } => ShapeKind::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Every triangle's normal points away from the mesh centroid
    fn assert_outward(mesh: &Mesh) {
        let center = mesh.centroid();
        for triangle in mesh.triangles() {
            let [a, b, c] = mesh.triangle_positions(triangle);
            let normal = (b - a).cross(c - a);
            let face_center = (a + b + c) / 3.0;
            assert!(
                normal.dot(face_center - center) > 0.0,
                "triangle {:?} faces inward",
                triangle
            );
        }
    }

    fn assert_distinct_corners(mesh: &Mesh) {
        for triangle in mesh.triangles() {
            let [a, b, c] = mesh.triangle_positions(triangle);
            assert!(a != b && b != c && a != c, "triangle {:?} is degenerate", triangle);
        }
    }

    #[test]
    fn test_cube_counts() {
        for size in [0.1, 1.0, 5.0, 42.0] {
            let mesh = generate_cube_blocker(size, size, size * 0.05);
            assert_eq!(mesh.vertices.len(), 24);
            assert_eq!(mesh.normals.len(), 24);
            assert_eq!(mesh.triangle_count(), 12);
            assert_distinct_corners(&mesh);
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_cube_dimensions() {
        let mesh = generate_cube_blocker(4.0, 3.0, 0.2);
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min - Vec3::new(-2.0, -3.0, -2.0)).length() < 0.001);
        assert!((max - Vec3::new(2.0, 0.2, 2.0)).length() < 0.001);
    }

    #[test]
    fn test_cube_flat_normals() {
        let mesh = generate_cube_blocker(2.0, 2.0, 0.1);
        assert_outward(&mesh);
        // The four corners of each face share one axis-aligned normal
        for face in mesh.normals.chunks(4) {
            let n = Vec3::from(face[0]);
            assert!(face.iter().all(|m| (Vec3::from(*m) - n).length() < 1e-5));
            assert!((n.abs().max_element() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cube_is_deterministic() {
        let a = generate_cube_blocker(5.0, 5.0, 0.25);
        let b = generate_cube_blocker(5.0, 5.0, 0.25);
        assert_eq!(a, b);
        for (x, y) in a.vertices.iter().zip(&b.vertices) {
            for i in 0..3 {
                assert_eq!(x[i].to_bits(), y[i].to_bits());
            }
        }
    }

    #[test]
    fn test_cylinder_counts() {
        for degrees in [10, 15, 30, 45, 90, 120] {
            let step = AngleStep::new(degrees).unwrap();
            let n = (360 / degrees) as usize;
            let mesh = generate_cylinder_blocker(6.0, step, 3.0, 0.06);
            assert_eq!(mesh.triangle_count(), 4 * n);
            assert_eq!(mesh.vertices.len(), 12 * n);
            assert_eq!(mesh.normals.len(), 12 * n);
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_cylinder_shape() {
        let mesh = generate_cylinder_blocker(6.0, AngleStep::default(), 3.0, 0.06);
        assert_outward(&mesh);
        assert_distinct_corners(&mesh);

        // Same radius at top and bottom
        for v in &mesh.vertices {
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(r < 3.0 + 0.001);
            assert!(v[1] <= 0.06 + 0.001 && v[1] >= -3.0 - 0.001);
        }
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((max.y - 0.06).abs() < 0.001);
        assert!((min.y + 3.0).abs() < 0.001);
        assert!((max.x - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_prism_counts_and_winding() {
        let cases = [
            (Vec3::new(0.0, 2.0, 0.0), Vec3::new(10.0, 4.0, 0.0)),
            (Vec3::new(0.0, 2.0, 0.0), Vec3::new(10.0, 4.0, 3.0)),
            (Vec3::new(0.0, 2.0, 0.0), Vec3::new(-5.0, 1.0, -7.0)),
            (Vec3::new(1.0, 5.0, 1.0), Vec3::new(1.0, 5.0, 6.0)),
        ];
        for (p1, p2) in cases {
            let span = PrismSpan::new(p1, p2).unwrap();
            let mesh = generate_prism_blocker(&span, 4.0, 0.04);
            assert_eq!(mesh.vertices.len(), 24);
            assert_eq!(mesh.normals.len(), 24);
            assert_eq!(mesh.triangle_count(), 12);
            assert_outward(&mesh);
            assert_distinct_corners(&mesh);
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_prism_cross_section_width() {
        let p1 = Vec3::new(0.0, 2.0, 0.0);
        let p2 = Vec3::new(10.0, 4.0, 3.0);
        let span = PrismSpan::new(p1, p2).unwrap();
        let size = 2.5;
        let mesh = generate_prism_blocker(&span, size, 0.025);

        // Project onto the horizontal perpendicular of the span
        let lateral = span.lateral();
        let widths: Vec<f32> = mesh.vertices.iter().map(|v| Vec3::from(*v).dot(lateral)).collect();
        let min = widths.iter().copied().fold(f32::MAX, f32::min);
        let max = widths.iter().copied().fold(f32::MIN, f32::max);
        assert!((max - min - size).abs() < 0.001);

        // Top face (first quad): corners at either end differ by exactly `size`
        let top = &mesh.vertices[..4];
        let end_a = Vec3::from(top[0]).distance(Vec3::from(top[1]));
        let start_a = Vec3::from(top[2]).distance(Vec3::from(top[3]));
        assert!((end_a - size).abs() < 0.001);
        assert!((start_a - size).abs() < 0.001);
    }

    #[test]
    fn test_prism_reaches_build_plate_at_both_ends() {
        let p1 = Vec3::new(0.0, 2.0, 0.0);
        let p2 = Vec3::new(10.0, 4.0, 0.0);
        let span = PrismSpan::new(p1, p2).unwrap();
        let mesh = generate_prism_blocker(&span, 2.0, 0.02);

        // Local coordinates are relative to p1: world y = local y + 2
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min.y + p1.y).abs() < 0.001);
        assert!((max.y - (p2.y - p1.y + 0.02)).abs() < 0.001);
        assert!((max.x - 10.0).abs() < 0.001);
        assert!(min.x.abs() < 0.001);
    }

    #[test]
    fn test_prism_span_rejects_degenerate() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(PrismSpan::new(p, p), Err(GeometryError::DegenerateSpan(p)));
        assert!(matches!(
            PrismSpan::new(p, p + Vec3::Y),
            Err(GeometryError::VerticalSpan { .. })
        ));
    }

    #[test]
    fn test_blocker_shape_dispatch() {
        let cube = BlockerShape::Cube {
            size: 5.0,
            height: 5.0,
            top_overshoot: 0.25,
        };
        assert_eq!(cube.kind(), ShapeKind::Cube);
        assert_eq!(cube.generate(), generate_cube_blocker(5.0, 5.0, 0.25));

        let cylinder = BlockerShape::Cylinder {
            diameter: 6.0,
            step: AngleStep::default(),
            height: 3.0,
            top_overshoot: 0.06,
        };
        assert_eq!(cylinder.kind(), ShapeKind::Cylinder);
        assert_eq!(cylinder.generate().triangle_count(), 144);

        let span = PrismSpan::new(Vec3::ZERO, Vec3::X).unwrap();
        let prism = BlockerShape::Prism {
            span,
            size: 1.0,
            top_overshoot: 0.01,
        };
        assert_eq!(prism.kind(), ShapeKind::Custom);
        assert_eq!(prism.generate().vertex_count(), 24);
    }
}
