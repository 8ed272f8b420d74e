//! Pick handling state and results

use glam::Vec3;

use crate::config::ShapeKind;
use crate::scene::NodeId;

/// Progress of the two-click custom shape
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PickState {
    /// No custom shape in progress
    #[default]
    Idle,
    /// First corner recorded, waiting for the far end of the span
    AwaitingSecondPick {
        /// World position of the first pick
        first: Vec3,
        /// Node under the first pick
        target: NodeId,
    },
}

impl PickState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PickState::Idle)
    }

    /// Recorded first point, if any
    pub fn pending_point(&self) -> Option<Vec3> {
        match self {
            PickState::AwaitingSecondPick { first, .. } => Some(*first),
            PickState::Idle => None,
        }
    }
}

/// A primary-button pick in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickEvent {
    /// Cursor position
    pub x: f32,
    pub y: f32,
    /// Modifier held: never remove existing blockers
    pub bypass: bool,
}

impl PickEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            bypass: false,
        }
    }

    pub fn with_bypass(mut self) -> Self {
        self.bypass = true;
        self
    }
}

/// What a pick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// A blocker was generated and attached
    Created {
        node: NodeId,
        parent: NodeId,
        kind: ShapeKind,
    },
    /// An existing blocker was removed; `parent` is the node it hung from
    Removed {
        node: NodeId,
        parent: Option<NodeId>,
    },
    /// First custom corner recorded
    AwaitingSecondPick { first: Vec3 },
    /// Nothing changed
    Ignored(IgnoreReason),
}

/// Why a pick left the scene untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The pick did not hit any node
    NoTarget,
    /// The hit node is a support, infill or cutting mesh, or a blocker picked with bypass
    IneligibleTarget,
    /// Both custom corners project to the same horizontal position
    DegenerateGeometry,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IgnoreReason::NoTarget => "no target",
            IgnoreReason::IneligibleTarget => "ineligible target",
            IgnoreReason::DegenerateGeometry => "degenerate geometry",
        };
        f.write_str(text)
    }
}
