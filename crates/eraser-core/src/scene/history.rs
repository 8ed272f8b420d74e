//! Undo history of grouped scene operations

use super::{NodeId, SceneNode};

/// A single reversible scene mutation
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOperation {
    /// Insert a node under a parent
    AddNode { node: Box<SceneNode>, parent: NodeId },
    /// Move a node to another parent, keeping its world position
    SetParent {
        node: NodeId,
        from: NodeId,
        to: NodeId,
    },
    /// Remove a node and its subtree
    ///
    /// `removed` is filled when the operation is applied and holds every
    /// removed node with its parent, parents before children.
    RemoveNode {
        node: NodeId,
        removed: Vec<(SceneNode, NodeId)>,
    },
}

impl SceneOperation {
    pub fn add_node(node: SceneNode, parent: NodeId) -> Self {
        SceneOperation::AddNode {
            node: Box::new(node),
            parent,
        }
    }

    pub fn set_parent(node: NodeId, from: NodeId, to: NodeId) -> Self {
        SceneOperation::SetParent { node, from, to }
    }

    pub fn remove_node(node: NodeId) -> Self {
        SceneOperation::RemoveNode {
            node,
            removed: Vec::new(),
        }
    }

    /// The node this operation acts on
    pub fn target(&self) -> NodeId {
        match self {
            SceneOperation::AddNode { node, .. } => node.id,
            SceneOperation::SetParent { node, .. } | SceneOperation::RemoveNode { node, .. } => {
                *node
            }
        }
    }
}

/// Operations applied, undone and redone as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedOperation {
    pub name: String,
    operations: Vec<SceneOperation>,
}

impl GroupedOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Append an operation (builder style)
    pub fn with(mut self, operation: SceneOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn push(&mut self, operation: SceneOperation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[SceneOperation] {
        &self.operations
    }

    pub(super) fn operations_mut(&mut self) -> &mut [SceneOperation] {
        &mut self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Undo and redo stacks
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<GroupedOperation>,
    redo: Vec<GroupedOperation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly applied group (discards the redo stack)
    pub fn record(&mut self, group: GroupedOperation) {
        self.undo.push(group);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Name of the group the next undo would revert
    pub fn undo_name(&self) -> Option<&str> {
        self.undo.last().map(|g| g.name.as_str())
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub(super) fn take_undo(&mut self) -> Option<GroupedOperation> {
        self.undo.pop()
    }

    pub(super) fn take_redo(&mut self) -> Option<GroupedOperation> {
        self.redo.pop()
    }

    pub(super) fn push_undo(&mut self, group: GroupedOperation) {
        self.undo.push(group);
    }

    pub(super) fn push_redo(&mut self, group: GroupedOperation) {
        self.redo.push(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(GroupedOperation::new("first"));
        let group = history.take_undo().unwrap();
        history.push_redo(group);
        assert!(history.can_redo());

        history.record(GroupedOperation::new("second"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_name(), Some("second"));
    }

    #[test]
    fn test_group_builder() {
        let node = SceneNode::empty("blocker");
        let id = node.id;
        let root = Uuid::new_v4();
        let parent = Uuid::new_v4();
        let group = GroupedOperation::new("Add blocker")
            .with(SceneOperation::add_node(node, root))
            .with(SceneOperation::set_parent(id, root, parent));
        assert_eq!(group.len(), 2);
        assert!(group.operations().iter().all(|op| op.target() == id));
    }
}
