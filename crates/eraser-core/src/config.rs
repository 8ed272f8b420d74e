//! Blocker configuration: shape kind, size and build plate anchoring

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CUBE_NODE_NAME, CUSTOM_NODE_NAME, CYLINDER_NODE_NAME, DEFAULT_BLOCKER_SIZE,
    DEFAULT_CYLINDER_STEP_DEGREES, PREF_ON_BUILD_PLATE, PREF_SHAPE, PREF_SIZE,
};
use crate::preferences::{PreferenceError, PreferenceStore, PreferenceValue};

/// Kind of blocker created on pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Cube,
    Cylinder,
    /// Oriented prism spanning two picked points
    Custom,
}

impl ShapeKind {
    pub const ALL: &'static [ShapeKind] = &[ShapeKind::Cube, ShapeKind::Cylinder, ShapeKind::Custom];

    /// Preference / UI string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Custom => "custom",
        }
    }

    /// Name given to scene nodes of this kind
    pub fn node_name(&self) -> &'static str {
        match self {
            ShapeKind::Cube => CUBE_NODE_NAME,
            ShapeKind::Cylinder => CYLINDER_NODE_NAME,
            ShapeKind::Custom => CUSTOM_NODE_NAME,
        }
    }

    /// Whether this kind needs two picks before a blocker is created
    pub fn requires_two_picks(&self) -> bool {
        matches!(self, ShapeKind::Custom)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cube" => Ok(ShapeKind::Cube),
            "cylinder" => Ok(ShapeKind::Cylinder),
            "custom" => Ok(ShapeKind::Custom),
            _ => Err(ConfigError::UnknownShape(s.to_string())),
        }
    }
}

/// Angular increment for cylinder generation, in whole degrees
///
/// Always a positive divisor of 360, so the segment count is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AngleStep(u32);

impl AngleStep {
    /// Create a step, rejecting zero and values that do not divide 360
    pub fn new(degrees: u32) -> Result<Self, ConfigError> {
        if degrees == 0 || 360 % degrees != 0 {
            return Err(ConfigError::InvalidAngleStep(degrees));
        }
        Ok(Self(degrees))
    }

    pub fn degrees(&self) -> u32 {
        self.0
    }

    /// Number of radial segments (`360 / degrees`)
    pub fn segments(&self) -> u32 {
        360 / self.0
    }

    pub fn radians(&self) -> f32 {
        (self.0 as f32).to_radians()
    }
}

impl Default for AngleStep {
    fn default() -> Self {
        Self(DEFAULT_CYLINDER_STEP_DEGREES)
    }
}

impl TryFrom<u32> for AngleStep {
    type Error = ConfigError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<AngleStep> for u32 {
    fn from(step: AngleStep) -> Self {
        step.0
    }
}

/// Check that a size is finite and strictly positive
pub fn validate_size(size: f32) -> Result<f32, ConfigError> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(ConfigError::InvalidSize(size.to_string()))
    }
}

/// Parse a size typed by the user
pub fn parse_size(input: &str) -> Result<f32, ConfigError> {
    let size: f32 = input
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSize(input.to_string()))?;
    validate_size(size)
}

/// User-controlled blocker parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockerConfig {
    pub shape_kind: ShapeKind,
    /// Edge length (cube, prism width) or diameter (cylinder), in mm
    pub size: f32,
    /// Extend blockers down to the build plate instead of using `size`
    pub anchor_to_build_plate: bool,
    /// Angular increment of generated cylinders
    #[serde(default)]
    pub cylinder_step: AngleStep,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self {
            shape_kind: ShapeKind::default(),
            size: DEFAULT_BLOCKER_SIZE,
            anchor_to_build_plate: false,
            cylinder_step: AngleStep::default(),
        }
    }
}

impl BlockerConfig {
    /// Read the configuration from a preference store
    ///
    /// Missing or malformed entries fall back to their defaults.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut config = Self::default();

        if let Some(value) = store.get(PREF_SHAPE) {
            match value.as_str().map(ShapeKind::from_str) {
                Some(Ok(kind)) => config.shape_kind = kind,
                _ => tracing::warn!("Ignoring stored shape preference {:?}", value),
            }
        }

        if let Some(value) = store.get(PREF_SIZE) {
            match value.as_f32().map(validate_size) {
                Some(Ok(size)) => config.size = size,
                _ => tracing::warn!("Ignoring stored size preference {:?}", value),
            }
        }

        if let Some(value) = store.get(PREF_ON_BUILD_PLATE) {
            match value.as_bool() {
                Some(flag) => config.anchor_to_build_plate = flag,
                None => tracing::warn!("Ignoring stored build plate preference {:?}", value),
            }
        }

        config
    }

    /// Write all persisted fields to a preference store
    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PreferenceError> {
        store.set(PREF_SHAPE, PreferenceValue::from(self.shape_kind.as_str()))?;
        store.set(PREF_SIZE, PreferenceValue::Float(self.size))?;
        store.set(
            PREF_ON_BUILD_PLATE,
            PreferenceValue::Bool(self.anchor_to_build_plate),
        )?;
        Ok(())
    }
}

/// Invalid configuration input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid size: {0} (expected a positive number)")]
    InvalidSize(String),
    #[error("Unknown shape: {0}")]
    UnknownShape(String),
    #[error("Invalid angle step: {0} degrees (must divide 360)")]
    InvalidAngleStep(u32),
}
