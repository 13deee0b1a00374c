//! Core data model: nodes, edges, and the sides of a node box.
//!
//! A node is a fixed-size box placed by its top-left corner in canvas-local
//! coordinates (origin top-left, y-down). Edges are stored directed
//! (`source` → `target`) so they can be drawn with an arrowhead, but their
//! uniqueness is checked on the unordered endpoint pair.

use crate::id::{EdgeId, NodeId, NodeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A labeled box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner in canvas-local coordinates. Never includes the pan offset.
    pub position: Point,
    pub label: String,
    /// Creation order; the store lists nodes by it.
    #[serde(skip)]
    pub(crate) ordinal: u64,
}

/// A connection between two nodes, drawn with an arrowhead at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(skip)]
    pub(crate) ordinal: u64,
}

impl Edge {
    /// Whether `node` is one of this edge's endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// The single entity the user has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Node(NodeId),
    Edge(EdgeId),
}

impl Selection {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Selection::Node(id) => Some(id),
            Selection::Edge(_) => None,
        }
    }

    pub fn edge(self) -> Option<EdgeId> {
        match self {
            Selection::Edge(id) => Some(id),
            Selection::Node(_) => None,
        }
    }
}

/// One of the four sides of a node box; also names its connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::Horizontal,
            Side::Top | Side::Bottom => Axis::Vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    /// Parse a handle name as sent by hosts (`"left"`, `"right"`, ...).
    pub fn from_name(name: &str) -> Option<Side> {
        match name {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            "top" => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            _ => None,
        }
    }
}

/// Dominant direction of an edge route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_endpoints() {
        let a = NodeId::intern("node-1");
        let b = NodeId::intern("node-2");
        let c = NodeId::intern("node-3");
        let edge = Edge {
            id: EdgeId::intern("edge-1"),
            source: a,
            target: b,
            ordinal: 1,
        };
        assert!(edge.touches(a) && edge.touches(b));
        assert!(!edge.touches(c));
        assert_eq!(edge.other(a), Some(b));
        assert_eq!(edge.other(b), Some(a));
        assert_eq!(edge.other(c), None);
    }

    #[test]
    fn side_names_roundtrip() {
        for side in Side::ALL {
            assert_eq!(Side::from_name(side.as_str()), Some(side));
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.opposite().axis(), side.axis());
        }
        assert_eq!(Side::from_name("middle"), None);
    }
}
