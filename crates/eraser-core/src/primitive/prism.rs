//! Custom prism blocker spanning two picked points

use glam::{Vec2, Vec3};

use crate::constants::DEGENERATE_EPSILON;
use crate::mesh::{Mesh, MeshBuilder};

/// Validated long axis of a custom prism, in world space (Y up)
///
/// The horizontal part of the span must be non-zero: the prism's width is
/// measured perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrismSpan {
    start: Vec3,
    end: Vec3,
}

impl PrismSpan {
    pub fn new(start: Vec3, end: Vec3) -> Result<Self, GeometryError> {
        if start.distance(end) <= DEGENERATE_EPSILON {
            return Err(GeometryError::DegenerateSpan(start));
        }
        let horizontal = Vec2::new(end.x - start.x, end.z - start.z);
        if horizontal.length() <= DEGENERATE_EPSILON {
            return Err(GeometryError::VerticalSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// First picked point; the generated mesh is local to it
    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Horizontal unit vector across the span (world X/Z plane)
    pub fn lateral(&self) -> Vec3 {
        let d = self.end - self.start;
        Vec3::new(d.z, 0.0, -d.x).normalize()
    }
}

/// Exchange Y and Z; maps world space to the working frame and back
fn swap_yz(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.z, p.y)
}

/// Generate an oriented prism along a picked span
///
/// The cross-section is `size` wide, perpendicular to the span. Each end's
/// top sits `top_overshoot` above that end's pick point and each end's base
/// reaches down to world elevation 0, so the prism shears when the two ends
/// are at different heights. Vertices are relative to `span.start()`.
///
/// # Returns
/// 24 vertices (4 per face), 12 triangles, outward-facing normals
pub fn generate_prism_blocker(span: &PrismSpan, size: f32, top_overshoot: f32) -> Mesh {
    // Working frame: Z is vertical
    let dir = swap_yz(span.end) - swap_yz(span.start);
    let half = size / 2.0;
    let offset = dir.cross(Vec3::new(0.0, 0.0, half)).normalize() * half;

    let lift = Vec3::new(0.0, 0.0, top_overshoot);
    let start_floor = Vec3::new(0.0, 0.0, -span.start.y);
    let end_floor = Vec3::new(0.0, 0.0, -span.end.y);

    // t = top, b = base; 1/3 on the +offset side, 2/4 on the -offset side
    let p1t = lift + offset;
    let p2t = lift - offset;
    let p3t = dir + lift + offset;
    let p4t = dir + lift - offset;
    let p1b = start_floor + offset;
    let p2b = start_floor - offset;
    let p3b = end_floor + dir + offset;
    let p4b = end_floor + dir - offset;

    // Swapping back to world space mirrors the frame, so corner order is
    // chosen in world space to keep every face clockwise seen from outside
    let faces = [
        [p3t, p4t, p2t, p1t], // top
        [p1b, p3b, p3t, p1t], // front
        [p2b, p1b, p1t, p2t], // left
        [p3b, p4b, p4t, p3t], // right
        [p4b, p2b, p2t, p4t], // back
        [p1b, p2b, p4b, p3b], // bottom
    ];

    let mut builder = MeshBuilder::with_capacity(24, 12);
    for face in faces {
        builder.add_quad(face.map(swap_yz));
    }
    builder.build()
}

/// Geometry-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Degenerate span: both points are at {0}")]
    DegenerateSpan(Vec3),
    #[error("Vertical span from {start} to {end} has no horizontal direction")]
    VerticalSpan { start: Vec3, end: Vec3 },
}
