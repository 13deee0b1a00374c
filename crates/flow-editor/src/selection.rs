//! Single-entity selection.

use flow_core::{EdgeId, NodeId, Selection};

/// Holds at most one selected node or edge.
///
/// Selecting one kind replaces the other, so node and edge selection are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    current: Option<Selection>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Selection> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.current.and_then(Selection::node)
    }

    pub fn selected_edge(&self) -> Option<EdgeId> {
        self.current.and_then(Selection::edge)
    }

    pub fn select_node(&mut self, id: NodeId) {
        self.current = Some(Selection::Node(id));
    }

    pub fn select_edge(&mut self, id: EdgeId) {
        self.current = Some(Selection::Edge(id));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the selection if it refers to `id`. Returns whether it did.
    pub fn forget_node(&mut self, id: NodeId) -> bool {
        if self.selected_node() == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop the selection if it refers to `id`. Returns whether it did.
    pub fn forget_edge(&mut self, id: EdgeId) -> bool {
        if self.selected_edge() == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
