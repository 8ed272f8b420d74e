//! In-memory scene graph with grouped undo

use std::collections::HashMap;

use super::{
    BlockerNode, GroupedOperation, History, MeshAttribute, NodeId, SceneError, SceneGraph,
    SceneNode, SceneOperation,
};

/// Scene graph owning all nodes
///
/// Every mutation goes through a [`GroupedOperation`]; a group either applies
/// completely or leaves the scene untouched.
#[derive(Debug, Clone)]
pub struct Scene {
    root: NodeId,
    nodes: HashMap<NodeId, SceneNode>,
    /// Children mapping: parent -> [child]
    children: HashMap<NodeId, Vec<NodeId>>,
    /// Parent mapping: child -> parent (every node except the root)
    parent: HashMap<NodeId, NodeId>,
    history: History,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only the root node
    pub fn new() -> Self {
        let mut root = SceneNode::empty("root");
        root.selectable = false;
        let root_id = root.id;

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);

        Self {
            root: root_id,
            nodes,
            children: HashMap::new(),
            parent: HashMap::new(),
            history: History::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(&id).copied()
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes, not counting the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All blocker-tagged nodes in depth-first order
    pub fn blockers(&self) -> Vec<NodeId> {
        self.nodes_depth_first()
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(SceneNode::is_blocker))
            .collect()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Add a model node directly under the root (one undo step)
    pub fn add_model(&mut self, node: SceneNode) -> Result<NodeId, SceneError> {
        let id = node.id;
        let group = GroupedOperation::new(format!("Add {}", node.name))
            .with(SceneOperation::add_node(node, self.root));
        self.push(group)?;
        Ok(id)
    }

    /// Apply a group and record it for undo
    pub fn push(&mut self, mut group: GroupedOperation) -> Result<(), SceneError> {
        self.apply_group(&mut group)?;
        tracing::debug!("Applied scene operation '{}'", group.name);
        self.history.record(group);
        Ok(())
    }

    /// Revert the last group; returns `false` when there is nothing to undo
    pub fn undo(&mut self) -> Result<bool, SceneError> {
        let Some(group) = self.history.take_undo() else {
            return Ok(false);
        };
        if let Err(e) = self.revert_group(&group) {
            self.history.push_undo(group);
            return Err(e);
        }
        tracing::debug!("Undid scene operation '{}'", group.name);
        self.history.push_redo(group);
        Ok(true)
    }

    /// Re-apply the last undone group; returns `false` when there is nothing to redo
    pub fn redo(&mut self) -> Result<bool, SceneError> {
        let Some(mut group) = self.history.take_redo() else {
            return Ok(false);
        };
        if let Err(e) = self.apply_group(&mut group) {
            self.history.push_redo(group);
            return Err(e);
        }
        tracing::debug!("Redid scene operation '{}'", group.name);
        self.history.push_undo(group);
        Ok(true)
    }

    fn apply_group(&mut self, group: &mut GroupedOperation) -> Result<(), SceneError> {
        let operations = group.operations_mut();
        for i in 0..operations.len() {
            if let Err(e) = self.apply(&mut operations[i]) {
                // Roll back what was already applied
                for done in operations[..i].iter().rev() {
                    if let Err(revert_err) = self.revert(done) {
                        tracing::error!("Failed to roll back scene operation: {}", revert_err);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn revert_group(&mut self, group: &GroupedOperation) -> Result<(), SceneError> {
        for operation in group.operations().iter().rev() {
            self.revert(operation)?;
        }
        Ok(())
    }

    fn apply(&mut self, operation: &mut SceneOperation) -> Result<(), SceneError> {
        match operation {
            SceneOperation::AddNode { node, parent } => self.attach(node.as_ref().clone(), *parent),
            SceneOperation::SetParent { node, from, to } => self.reparent(*node, *from, *to),
            SceneOperation::RemoveNode { node, removed } => {
                if *node == self.root {
                    return Err(SceneError::CannotRemoveRoot);
                }
                *removed = self.detach_subtree(*node)?;
                Ok(())
            }
        }
    }

    fn revert(&mut self, operation: &SceneOperation) -> Result<(), SceneError> {
        match operation {
            SceneOperation::AddNode { node, .. } => self.detach_subtree(node.id).map(|_| ()),
            SceneOperation::SetParent { node, from, to } => self.reparent(*node, *to, *from),
            SceneOperation::RemoveNode { removed, .. } => {
                for (node, parent) in removed {
                    self.attach(node.clone(), *parent)?;
                }
                Ok(())
            }
        }
    }

    fn attach(&mut self, node: SceneNode, parent: NodeId) -> Result<(), SceneError> {
        if self.nodes.contains_key(&node.id) {
            return Err(SceneError::NodeExists(node.id));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }

        let id = node.id;
        self.nodes.insert(id, node);
        self.children.entry(parent).or_default().push(id);
        self.parent.insert(id, parent);
        Ok(())
    }

    fn reparent(&mut self, node: NodeId, from: NodeId, to: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&node) {
            return Err(SceneError::NodeNotFound(node));
        }
        if !self.nodes.contains_key(&to) {
            return Err(SceneError::NodeNotFound(to));
        }
        if self.parent.get(&node) != Some(&from) {
            return Err(SceneError::NotAChild {
                child: node,
                parent: from,
            });
        }
        if self.would_create_cycle(node, to) {
            return Err(SceneError::WouldCreateCycle(node));
        }

        if let Some(siblings) = self.children.get_mut(&from) {
            siblings.retain(|c| *c != node);
        }
        self.children.entry(to).or_default().push(node);
        self.parent.insert(node, to);
        Ok(())
    }

    /// Check if moving `node` under `new_parent` would create a cycle
    fn would_create_cycle(&self, node: NodeId, new_parent: NodeId) -> bool {
        let mut current = Some(new_parent);
        while let Some(id) = current {
            if id == node {
                return true;
            }
            current = self.parent.get(&id).copied();
        }
        false
    }

    /// Remove a node and its descendants, returning them parents first
    fn detach_subtree(&mut self, id: NodeId) -> Result<Vec<(SceneNode, NodeId)>, SceneError> {
        if id == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let Some(&parent) = self.parent.get(&id) else {
            return Err(SceneError::NodeNotFound(id));
        };

        let mut order = vec![id];
        let mut i = 0;
        while i < order.len() {
            if let Some(children) = self.children.get(&order[i]) {
                order.extend(children.iter().copied());
            }
            i += 1;
        }

        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|c| *c != id);
        }

        let mut removed = Vec::with_capacity(order.len());
        for node_id in order {
            self.children.remove(&node_id);
            let node_parent = self.parent.remove(&node_id);
            if let (Some(node), Some(node_parent)) = (self.nodes.remove(&node_id), node_parent) {
                removed.push((node, node_parent));
            }
        }
        Ok(removed)
    }
}

impl SceneGraph for Scene {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn attribute(&self, node: NodeId, attribute: MeshAttribute) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.settings.get(attribute))
    }

    fn add_blocker(&mut self, parent: NodeId, blocker: BlockerNode) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }

        let node = SceneNode::from_blocker(blocker);
        let id = node.id;
        let name = node.name.clone();

        // Insert under the root first, then reparent, so the blocker keeps its
        // world position independent of the target's transform
        let group = GroupedOperation::new(format!("Add {name}"))
            .with(SceneOperation::add_node(node, self.root))
            .with(SceneOperation::set_parent(id, self.root, parent));
        self.push(group)?;

        tracing::info!("Attached {} ({}) to {}", name, id, parent);
        Ok(id)
    }

    fn remove_node(&mut self, node: NodeId) -> Result<Option<NodeId>, SceneError> {
        if node == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let parent = self
            .parent_of(node)
            .ok_or(SceneError::NodeNotFound(node))?;

        let name = self
            .nodes
            .get(&node)
            .map(|n| n.name.clone())
            .unwrap_or_default();
        self.push(GroupedOperation::new(format!("Remove {name}")).with(SceneOperation::remove_node(node)))?;

        tracing::info!("Removed {} ({})", name, node);
        Ok((parent != self.root).then_some(parent))
    }

    fn nodes_depth_first(&self) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(self.root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        result
    }
}
