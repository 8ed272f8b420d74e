//! Height and overshoot rules for single-pick blockers

use glam::Vec3;

use crate::config::{BlockerConfig, ShapeKind};
use crate::constants::{CUBE_OVERSHOOT_RATIO, CYLINDER_OVERSHOOT_RATIO};
use crate::primitive::{BlockerShape, PrismSpan};

/// Distance from the anchor point down to the blocker base
///
/// Anchored blockers reach the build plate (`elevation`). Otherwise cubes are
/// `size` tall and cylinders `size / 2`; either is cut to `elevation` once it
/// reaches it.
pub fn resolve_height(config: &BlockerConfig, elevation: f32) -> f32 {
    let mut height = if config.anchor_to_build_plate {
        elevation
    } else {
        match config.shape_kind {
            ShapeKind::Cylinder => config.size / 2.0,
            ShapeKind::Cube | ShapeKind::Custom => config.size,
        }
    };
    if height >= elevation {
        height = elevation;
    }
    height
}

/// Extension of the top face above the anchor point
pub fn top_overshoot(kind: ShapeKind, size: f32) -> f32 {
    match kind {
        ShapeKind::Cube => size * CUBE_OVERSHOOT_RATIO,
        ShapeKind::Cylinder | ShapeKind::Custom => size * CYLINDER_OVERSHOOT_RATIO,
    }
}

/// Shape parameters for a single-pick blocker anchored at `anchor`
///
/// Custom prisms need two points and are built with [`plan_prism`].
pub fn plan_single(config: &BlockerConfig, anchor: Vec3) -> Option<BlockerShape> {
    let height = resolve_height(config, anchor.y);
    let top_overshoot = top_overshoot(config.shape_kind, config.size);
    match config.shape_kind {
        ShapeKind::Cube => Some(BlockerShape::Cube {
            size: config.size,
            height,
            top_overshoot,
        }),
        ShapeKind::Cylinder => Some(BlockerShape::Cylinder {
            diameter: config.size,
            step: config.cylinder_step,
            height,
            top_overshoot,
        }),
        ShapeKind::Custom => None,
    }
}

/// Shape parameters for a custom prism over a validated span
pub fn plan_prism(config: &BlockerConfig, span: PrismSpan) -> BlockerShape {
    BlockerShape::Prism {
        span,
        size: config.size,
        top_overshoot: top_overshoot(ShapeKind::Custom, config.size),
    }
}
