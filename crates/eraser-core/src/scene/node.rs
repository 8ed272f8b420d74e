//! Scene node types

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MeshAttribute, MeshSettings, NodeId};
use crate::mesh::Mesh;

/// A generated blocker, ready to be attached to the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockerNode {
    pub name: String,
    /// Mesh in local coordinates around `position`
    pub mesh: Mesh,
    /// World-space anchor point
    pub position: Vec3,
}

impl BlockerNode {
    pub fn new(name: impl Into<String>, mesh: Mesh, position: Vec3) -> Self {
        Self {
            name: name.into(),
            mesh,
            position,
        }
    }
}

/// A node in the in-memory scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    /// Geometry, `None` for grouping nodes such as the root
    pub mesh: Option<Mesh>,
    /// World-space position
    pub position: Vec3,
    pub settings: MeshSettings,
    pub selectable: bool,
}

impl SceneNode {
    /// Create a node without geometry
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mesh: None,
            position: Vec3::ZERO,
            settings: MeshSettings::new(),
            selectable: true,
        }
    }

    /// Create a node holding a mesh at a world position
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh, position: Vec3) -> Self {
        Self {
            mesh: Some(mesh),
            position,
            ..Self::empty(name)
        }
    }

    /// Create a blocker-tagged node
    ///
    /// The tag is stored as a default value, not as a user override.
    pub fn from_blocker(blocker: BlockerNode) -> Self {
        let mut node = Self::with_mesh(blocker.name, blocker.mesh, blocker.position);
        node.settings.set_default(MeshAttribute::AntiOverhangMesh, true);
        node
    }

    pub fn is_blocker(&self) -> bool {
        self.settings.is_blocker()
    }

    /// Local-to-world transform
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_blocker_tags_node() {
        let blocker = BlockerNode::new("EraserCube", Mesh::default(), Vec3::new(1.0, 2.0, 3.0));
        let node = SceneNode::from_blocker(blocker);
        assert!(node.is_blocker());
        assert_eq!(node.settings.user_overrides().count(), 0);
        assert_eq!(node.name, "EraserCube");
        assert_eq!(
            node.transform().transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_empty_node_is_plain() {
        let node = SceneNode::empty("model");
        assert!(!node.is_blocker());
        assert!(node.mesh.is_none());
        assert!(node.selectable);
    }
}
