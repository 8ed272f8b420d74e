//! Support Eraser Core
//!
//! Generates and places support-blocker meshes on printable models:
//! - Mesh: flat-shaded triangle meshes with per-face vertices
//! - Primitive: cube, cylinder and custom prism blocker generators
//! - Scene: scene graph interface plus an in-memory scene with undo history
//! - Placement: pick handling state machine and bulk removal
//! - Config / Preferences: user settings and their persistence

pub mod config;
pub mod constants;
pub mod mesh;
pub mod placement;
pub mod preferences;
pub mod primitive;
pub mod scene;

pub use config::*;
pub use constants::*;
pub use mesh::*;
pub use placement::*;
pub use preferences::*;
pub use primitive::*;
pub use scene::*;
