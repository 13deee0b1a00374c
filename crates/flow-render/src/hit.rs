//! Hit testing: canvas point → what the pointer is over.
//!
//! Walks nodes from the most recently created (painted last, so topmost)
//! back to the oldest. Handles win over node bodies because they straddle
//! the node border and are drawn above it; edges sit below all nodes.

use flow_core::geometry::{edge_route, handle_anchor, node_contains};
use flow_core::{EdgeId, EditorConfig, GraphStore, NodeId, Side};
use kurbo::Point;
use serde::Serialize;

/// The entity under a canvas point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HitTarget {
    Background,
    Node { id: NodeId },
    Handle { node: NodeId, side: Side },
    Edge { id: EdgeId },
}

impl HitTarget {
    /// The node this target belongs to, for node bodies and handles.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            HitTarget::Node { id } | HitTarget::Handle { node: id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Find what is at `point` (canvas space).
pub fn hit_test(store: &GraphStore, point: Point, config: &EditorConfig) -> HitTarget {
    let nodes = store.nodes();

    // Handles (topmost node first)
    for node in nodes.iter().rev() {
        for side in Side::ALL {
            let anchor = handle_anchor(node.position, side, config);
            if anchor.distance(point) <= config.handle_radius {
                return HitTarget::Handle {
                    node: node.id,
                    side,
                };
            }
        }
    }

    // Node bodies
    if let Some(node) = nodes
        .iter()
        .rev()
        .find(|n| node_contains(n.position, point, config))
    {
        return HitTarget::Node { id: node.id };
    }

    // Edges, newest first
    for edge in store.edges().iter().rev() {
        let (Some(source), Some(target)) = (store.node(edge.source), store.node(edge.target))
        else {
            continue;
        };
        let route = edge_route(source.position, target.position, config);
        if route.hits(point, config.hit_tolerance) {
            return HitTarget::Edge { id: edge.id };
        }
    }

    HitTarget::Background
}
