//! Scene graph boundary
//!
//! The host application owns the scene. Blocker placement only needs to pick
//! surface points, read per-mesh attributes, and add or remove blocker nodes as
//! grouped, undoable operations. [`Scene`] is an in-memory implementation used
//! by the command line front end and the tests.

mod history;
mod memory;
mod node;
mod settings;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use history::{GroupedOperation, History, SceneOperation};
pub use memory::Scene;
pub use node::{BlockerNode, SceneNode};
pub use settings::MeshSettings;

/// Identity of a node in the scene graph
pub type NodeId = Uuid;

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// World-space surface point under the cursor (Y up)
    pub position: Vec3,
    /// Node the point lies on
    pub node: NodeId,
}

/// Maps a cursor position to a surface point and the node under it
pub trait PickService {
    fn pick(&self, x: f32, y: f32) -> Option<PickHit>;
}

impl<F> PickService for F
where
    F: Fn(f32, f32) -> Option<PickHit>,
{
    fn pick(&self, x: f32, y: f32) -> Option<PickHit> {
        self(x, y)
    }
}

/// Per-mesh boolean attributes relevant to blocker placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshAttribute {
    /// Marks a node as a support blocker
    AntiOverhangMesh,
    SupportMesh,
    InfillMesh,
    CuttingMesh,
}

impl MeshAttribute {
    pub const ALL: &'static [MeshAttribute] = &[
        MeshAttribute::AntiOverhangMesh,
        MeshAttribute::SupportMesh,
        MeshAttribute::InfillMesh,
        MeshAttribute::CuttingMesh,
    ];

    /// Slicer-specific meshes that never receive blockers
    pub const SPECIAL: &'static [MeshAttribute] = &[
        MeshAttribute::SupportMesh,
        MeshAttribute::InfillMesh,
        MeshAttribute::CuttingMesh,
    ];

    /// Setting key used by the host application
    pub fn key(&self) -> &'static str {
        match self {
            MeshAttribute::AntiOverhangMesh => "anti_overhang_mesh",
            MeshAttribute::SupportMesh => "support_mesh",
            MeshAttribute::InfillMesh => "infill_mesh",
            MeshAttribute::CuttingMesh => "cutting_mesh",
        }
    }

    /// Look up an attribute by its setting key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.key() == key)
    }
}

/// Scene mutations and queries needed for blocker placement
pub trait SceneGraph {
    /// Whether the node currently exists
    fn contains(&self, node: NodeId) -> bool;

    /// Value of a boolean mesh attribute (`false` when unset or missing)
    fn attribute(&self, node: NodeId, attribute: MeshAttribute) -> bool;

    /// Attach a blocker as a child of `parent`, tagged as anti-overhang
    ///
    /// Insertion and reparenting form a single undo step.
    fn add_blocker(&mut self, parent: NodeId, blocker: BlockerNode) -> Result<NodeId, SceneError>;

    /// Remove a node (and its subtree) as a single undo step
    ///
    /// Returns the former parent, `None` when the node hung off the root.
    fn remove_node(&mut self, node: NodeId) -> Result<Option<NodeId>, SceneError>;

    /// All nodes below the root in depth-first order
    fn nodes_depth_first(&self) -> Vec<NodeId>;
}

/// Scene-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),
    #[error("Node already exists: {0}")]
    NodeExists(Uuid),
    #[error("The root node cannot be removed")]
    CannotRemoveRoot,
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { child: Uuid, parent: Uuid },
    #[error("Reparenting {0} would create a cycle")]
    WouldCreateCycle(Uuid),
}
