//! Graph store → render-ready scene snapshot.
//!
//! The host paints whatever this produces and owns no graph truth. Edge
//! paths, arrowheads and the connection preview are in canvas space; the
//! host applies `pan` to the whole scene. Node views also carry their
//! screen position (canvas position + pan) for hosts that place nodes
//! individually.

use flow_core::geometry::{connection_preview, edge_midpoint, edge_route};
use flow_core::{
    EdgeId, EdgeRoute, EditorConfig, GraphStore, NodeId, NodeKind, PreviewCurve, Selection, Side,
};
use kurbo::{Point, Size, Vec2};
use serde::Serialize;

/// An in-flight connection drag, as tracked by the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingConnection {
    pub source: NodeId,
    pub side: Side,
    /// Handle anchor the drag started from (canvas space).
    pub start: Point,
    /// Current pointer position (canvas space).
    pub end: Point,
}

/// Transient interaction state the scene decorates the graph with.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneState {
    pub selection: Option<Selection>,
    pub hovered: Option<NodeId>,
    pub connection: Option<PendingConnection>,
    pub pan: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Registry style token for the node's kind.
    pub style: String,
    pub label: String,
    /// Stored canvas position.
    pub position: Point,
    /// `position + pan`.
    pub screen_position: Point,
    pub size: Size,
    pub is_selected: bool,
    /// Highlighted as the drop target of a connection drag.
    pub is_hovered: bool,
}

/// Filled triangle drawn at an edge's target end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl Arrowhead {
    /// Build an arrowhead whose tip sits on the route's end point.
    pub fn for_route(route: &EdgeRoute, config: &EditorConfig) -> Self {
        let dir = route.end_tangent();
        let normal = Vec2::new(-dir.y, dir.x);
        let tip = route.end;
        let base = tip - dir * config.arrow_length;
        Self {
            tip,
            left: base + normal * config.arrow_half_width,
            right: base - normal * config.arrow_half_width,
        }
    }

    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} L {} {} L {} {} Z",
            self.tip.x, self.tip.y, self.left.x, self.left.y, self.right.x, self.right.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// SVG path data of the routed cubic.
    pub path: String,
    pub route: EdgeRoute,
    /// Anchor for the delete affordance.
    pub midpoint: Point,
    pub arrow: Arrowhead,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionView {
    pub source: NodeId,
    pub source_side: Side,
    pub start: Point,
    pub end: Point,
    pub curve: PreviewCurve,
    pub path: String,
}

/// Everything the host needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub connection: Option<ConnectionView>,
    pub pan: Vec2,
}

impl Scene {
    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeView> {
        self.edges.iter().find(|e| e.id == id)
    }
}

/// Build the scene for the current store contents and interaction state.
pub fn build_scene(store: &GraphStore, config: &EditorConfig, state: &SceneState) -> Scene {
    let registry = store.registry();
    let selected_node = state.selection.and_then(Selection::node);
    let selected_edge = state.selection.and_then(Selection::edge);

    let nodes = store
        .nodes()
        .into_iter()
        .map(|node| NodeView {
            id: node.id,
            kind: node.kind,
            style: registry.style_for(node.kind).to_string(),
            label: node.label.clone(),
            position: node.position,
            screen_position: node.position + state.pan,
            size: config.node_size,
            is_selected: selected_node == Some(node.id),
            is_hovered: state.hovered == Some(node.id),
        })
        .collect();

    let edges = store
        .edges()
        .into_iter()
        .filter_map(|edge| {
            let (Some(source), Some(target)) = (store.node(edge.source), store.node(edge.target))
            else {
                log::trace!("skipping {} with a missing endpoint", edge.id);
                return None;
            };
            let route = edge_route(source.position, target.position, config);
            Some(EdgeView {
                id: edge.id,
                source: edge.source,
                target: edge.target,
                path: route.to_svg(),
                arrow: Arrowhead::for_route(&route, config),
                route,
                midpoint: edge_midpoint(source.position, target.position, config),
                is_selected: selected_edge == Some(edge.id),
            })
        })
        .collect();

    let connection = state.connection.map(|pending| {
        let curve = connection_preview(pending.start, pending.end);
        ConnectionView {
            source: pending.source,
            source_side: pending.side,
            start: pending.start,
            end: pending.end,
            path: curve.to_svg(),
            curve,
        }
    });

    Scene {
        nodes,
        edges,
        connection,
        pan: state.pan,
    }
}
