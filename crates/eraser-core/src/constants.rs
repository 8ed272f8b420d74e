//! Global constants for eraser-core

/// Default blocker size in millimeters
pub const DEFAULT_BLOCKER_SIZE: f32 = 5.0;

/// Cube top overshoot, as a fraction of the blocker size
pub const CUBE_OVERSHOOT_RATIO: f32 = 0.05;

/// Cylinder and custom prism top overshoot, as a fraction of the blocker size
pub const CYLINDER_OVERSHOOT_RATIO: f32 = 0.01;

/// Default angular increment for cylinder generation (36 segments)
pub const DEFAULT_CYLINDER_STEP_DEGREES: u32 = 10;

/// Minimum span length accepted for the custom prism axis
pub const DEGENERATE_EPSILON: f32 = 1e-5;

/// Node names given to generated blockers
pub const CUBE_NODE_NAME: &str = "EraserCube";
pub const CYLINDER_NODE_NAME: &str = "EraserCylinder";
pub const CUSTOM_NODE_NAME: &str = "EraserCustom";

/// Preference keys
pub const PREF_SHAPE: &str = "support_eraser/shape";
pub const PREF_SIZE: &str = "support_eraser/size";
pub const PREF_ON_BUILD_PLATE: &str = "support_eraser/on_build_plate";

/// Status messages shown next to the bulk removal action
pub const STATUS_REMOVE_ALL: &str = "Remove All";
pub const STATUS_REMOVE_LAST: &str = "Remove Last";
