//! Placement of blockers from viewport picks
//!
//! [`PlacementController`] turns picks into blocker creation or removal,
//! owns the user configuration and remembers which blockers it created so
//! they can be removed in bulk.

mod sizing;
mod state;

pub use sizing::{plan_prism, plan_single, resolve_height, top_overshoot};
pub use state::{IgnoreReason, PickEvent, PickOutcome, PickState};

use glam::Vec3;

use crate::config::{AngleStep, BlockerConfig, ConfigError, ShapeKind, parse_size, validate_size};
use crate::constants::{STATUS_REMOVE_ALL, STATUS_REMOVE_LAST};
use crate::preferences::PreferenceStore;
use crate::primitive::PrismSpan;
use crate::scene::{BlockerNode, MeshAttribute, NodeId, PickHit, PickService, SceneError, SceneGraph};

/// Handles picks and bulk removal for the support eraser tool
pub struct PlacementController {
    config: BlockerConfig,
    preferences: Box<dyn PreferenceStore>,
    state: PickState,
    /// Blockers created here, oldest first; the scene stays authoritative
    tracked: Vec<NodeId>,
}

impl PlacementController {
    /// Create a controller with the configuration stored in `preferences`
    pub fn new(preferences: Box<dyn PreferenceStore>) -> Self {
        let config = BlockerConfig::load(preferences.as_ref());
        tracing::debug!("Loaded blocker configuration: {:?}", config);
        Self {
            config,
            preferences,
            state: PickState::Idle,
            tracked: Vec::new(),
        }
    }

    pub fn config(&self) -> &BlockerConfig {
        &self.config
    }

    pub fn state(&self) -> PickState {
        self.state
    }

    /// Blockers created by this controller that have not been removed through it
    pub fn tracked(&self) -> &[NodeId] {
        &self.tracked
    }

    /// Handle a primary-button pick
    ///
    /// Scene errors are returned as is; every other rejection is reported as
    /// [`PickOutcome::Ignored`] and leaves the scene untouched.
    pub fn handle_pick(
        &mut self,
        scene: &mut dyn SceneGraph,
        picker: &dyn PickService,
        event: PickEvent,
    ) -> Result<PickOutcome, SceneError> {
        let Some(hit) = picker.pick(event.x, event.y) else {
            return Ok(self.ignore(IgnoreReason::NoTarget));
        };
        if !scene.contains(hit.node) {
            return Ok(self.ignore(IgnoreReason::NoTarget));
        }

        if scene.attribute(hit.node, MeshAttribute::AntiOverhangMesh) {
            if event.bypass {
                return Ok(self.ignore(IgnoreReason::IneligibleTarget));
            }
            let parent = self.remove_blocker(scene, hit.node)?;
            return Ok(PickOutcome::Removed {
                node: hit.node,
                parent,
            });
        }

        if is_special(scene, hit.node) {
            return Ok(self.ignore(IgnoreReason::IneligibleTarget));
        }

        match self.config.shape_kind {
            ShapeKind::Custom => self.handle_custom_pick(scene, hit),
            _ => self.create_single(scene, hit),
        }
    }

    fn create_single(
        &mut self,
        scene: &mut dyn SceneGraph,
        hit: PickHit,
    ) -> Result<PickOutcome, SceneError> {
        let Some(shape) = plan_single(&self.config, hit.position) else {
            return Ok(self.ignore(IgnoreReason::IneligibleTarget));
        };
        let kind = shape.kind();
        let blocker = BlockerNode::new(kind.node_name(), shape.generate(), hit.position);
        let node = scene.add_blocker(hit.node, blocker)?;
        self.tracked.push(node);

        Ok(PickOutcome::Created {
            node,
            parent: hit.node,
            kind,
        })
    }

    fn handle_custom_pick(
        &mut self,
        scene: &mut dyn SceneGraph,
        hit: PickHit,
    ) -> Result<PickOutcome, SceneError> {
        let PickState::AwaitingSecondPick { first, target } = self.state else {
            self.state = PickState::AwaitingSecondPick {
                first: hit.position,
                target: hit.node,
            };
            tracing::debug!("Custom blocker: first point {}", hit.position);
            return Ok(PickOutcome::AwaitingSecondPick {
                first: hit.position,
            });
        };

        let span = match PrismSpan::new(first, hit.position) {
            Ok(span) => span,
            Err(e) => {
                tracing::warn!("Custom blocker skipped: {}", e);
                return Ok(PickOutcome::Ignored(IgnoreReason::DegenerateGeometry));
            }
        };

        // The first target may have been removed between the two picks
        let parent = if scene.contains(target) {
            target
        } else {
            hit.node
        };

        let shape = plan_prism(&self.config, span);
        let blocker = BlockerNode::new(ShapeKind::Custom.node_name(), shape.generate(), first);
        let node = scene.add_blocker(parent, blocker)?;
        self.tracked.push(node);
        self.state = PickState::Idle;

        Ok(PickOutcome::Created {
            node,
            parent,
            kind: ShapeKind::Custom,
        })
    }

    fn remove_blocker(
        &mut self,
        scene: &mut dyn SceneGraph,
        node: NodeId,
    ) -> Result<Option<NodeId>, SceneError> {
        let parent = scene.remove_node(node)?;
        self.tracked.retain(|id| *id != node);
        Ok(parent)
    }

    fn ignore(&self, reason: IgnoreReason) -> PickOutcome {
        tracing::debug!("Pick ignored: {}", reason);
        PickOutcome::Ignored(reason)
    }

    /// Remove every blocker
    ///
    /// Tracked blockers that still exist and are still tagged are removed
    /// directly. With nothing tracked, the whole scene is scanned depth-first
    /// instead. Returns the number of nodes removed.
    pub fn remove_all(&mut self, scene: &mut dyn SceneGraph) -> Result<usize, SceneError> {
        let candidates = if self.tracked.is_empty() {
            tracing::debug!("No tracked blockers, scanning scene");
            scene.nodes_depth_first()
        } else {
            std::mem::take(&mut self.tracked)
        };

        let mut removed = 0;
        for node in candidates {
            // Removing a blocker also removes anything nested under it
            if scene.contains(node) && scene.attribute(node, MeshAttribute::AntiOverhangMesh) {
                scene.remove_node(node)?;
                removed += 1;
            }
        }
        self.tracked.clear();

        tracing::info!("Removed {} blockers", removed);
        Ok(removed)
    }

    /// Label for the bulk removal action
    pub fn status_message(&self) -> &'static str {
        if self.tracked.is_empty() {
            STATUS_REMOVE_ALL
        } else {
            STATUS_REMOVE_LAST
        }
    }

    /// Size as shown in a text field
    pub fn size_text(&self) -> String {
        self.config.size.to_string()
    }

    /// Set the blocker size; rejected values keep the previous size
    pub fn set_size(&mut self, size: f32) -> Result<(), ConfigError> {
        let size = validate_size(size).inspect_err(|e| tracing::warn!("{}", e))?;
        self.config.size = size;
        self.persist();
        Ok(())
    }

    /// Set the blocker size from user text
    pub fn set_size_str(&mut self, input: &str) -> Result<(), ConfigError> {
        let size = parse_size(input).inspect_err(|e| tracing::warn!("{}", e))?;
        self.config.size = size;
        self.persist();
        Ok(())
    }

    /// Switch shape; any pending custom point is discarded
    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        if let Some(point) = self.state.pending_point() {
            tracing::debug!("Discarding pending custom point {}", point);
        }
        self.state = PickState::Idle;
        self.config.shape_kind = kind;
        self.persist();
    }

    /// Switch shape by name (`cube`, `cylinder` or `custom`)
    pub fn set_shape_kind_str(&mut self, input: &str) -> Result<(), ConfigError> {
        let kind = input
            .parse::<ShapeKind>()
            .inspect_err(|e| tracing::warn!("{}", e))?;
        self.set_shape_kind(kind);
        Ok(())
    }

    pub fn set_anchor_to_build_plate(&mut self, anchor: bool) {
        self.config.anchor_to_build_plate = anchor;
        self.persist();
    }

    /// Angular increment for generated cylinders
    pub fn set_cylinder_step(&mut self, step: AngleStep) {
        self.config.cylinder_step = step;
    }

    /// First corner of a custom blocker in progress
    pub fn pending_point(&self) -> Option<Vec3> {
        self.state.pending_point()
    }

    fn persist(&mut self) {
        if let Err(e) = self.config.save(self.preferences.as_mut()) {
            tracing::error!("Failed to save blocker preferences: {}", e);
        }
    }
}

fn is_special(scene: &dyn SceneGraph, node: NodeId) -> bool {
    MeshAttribute::SPECIAL
        .iter()
        .any(|attribute| scene.attribute(node, *attribute))
}
