//! The graph store: sole owner of node and edge existence.
//!
//! Nodes and edges live in a `petgraph` stable graph so indices survive
//! removals, with id → index maps for O(1) lookup. Removing a node from the
//! stable graph drops its incident edges in the same call, which is what
//! makes the delete cascade atomic.
//!
//! Invariant violations are rejected silently: a self-loop, a duplicate pair,
//! or a stale id leaves the store unchanged. [`GraphStore::try_add_edge`]
//! reports *why* an edge was refused for callers that care.

use crate::id::{EdgeId, NodeId, NodeKind};
use crate::model::{Edge, Node};
use crate::registry::NodeTypeRegistry;
use kurbo::Point;
use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why an edge request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EdgeRejection {
    #[error("self-loop on {0}")]
    SelfLoop(NodeId),

    #[error("{from} and {to} are already connected")]
    Duplicate { from: NodeId, to: NodeId },

    #[error("endpoint {0} does not exist")]
    MissingEndpoint(NodeId),
}

/// Everything a node deletion took with it.
#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: Node,
    /// Edges cascaded away with the node.
    pub edges: SmallVec<[Edge; 4]>,
}

/// Authoritative node/edge collections for one editing session.
#[derive(Debug, Clone)]
pub struct GraphStore {
    graph: StableDiGraph<Node, Edge>,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
    registry: NodeTypeRegistry,
    /// Last allocated node number; ids are never reused.
    node_counter: u64,
    edge_counter: u64,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(NodeTypeRegistry::default())
    }
}

impl GraphStore {
    /// Create an empty store labeling new nodes from `registry`.
    #[must_use]
    pub fn new(registry: NodeTypeRegistry) -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            registry,
            node_counter: 0,
            edge_counter: 0,
        }
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Insert a node of `kind` at `position`, labeled `"<type label> <n>"`.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> NodeId {
        self.node_counter += 1;
        let n = self.node_counter;
        let id = NodeId::numbered(n);
        let label = format!("{} {n}", self.registry.label_for(kind));
        let idx = self.graph.add_node(Node {
            id,
            kind,
            position,
            label,
            ordinal: n,
        });
        self.node_index.insert(id, idx);
        log::debug!("added {id} ({kind}) at ({}, {})", position.x, position.y);
        id
    }

    /// Remove a node and, in the same step, every edge touching it.
    /// Returns `None` if the node does not exist.
    pub fn delete_node(&mut self, id: NodeId) -> Option<RemovedNode> {
        let idx = self.node_index.remove(&id)?;

        let incident: SmallVec<[EdgeIndex; 4]> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        let mut edges: SmallVec<[Edge; 4]> = SmallVec::new();
        for eidx in incident {
            if let Some(edge) = self.graph.remove_edge(eidx) {
                self.edge_index.remove(&edge.id);
                edges.push(edge);
            }
        }

        let node = self.graph.remove_node(idx)?;
        log::debug!("deleted {id} and {} attached edge(s)", edges.len());
        Some(RemovedNode { node, edges })
    }

    /// Connect `source` → `target`, or return `None` if the request would
    /// break a structural invariant.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        match self.try_add_edge(source, target) {
            Ok(id) => Some(id),
            Err(reason) => {
                log::debug!("edge {source} -> {target} rejected: {reason}");
                None
            }
        }
    }

    /// Like [`add_edge`](Self::add_edge) but names the rejection reason.
    pub fn try_add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
    ) -> Result<EdgeId, EdgeRejection> {
        if source == target {
            return Err(EdgeRejection::SelfLoop(source));
        }
        let s = self
            .index_of(source)
            .ok_or(EdgeRejection::MissingEndpoint(source))?;
        let t = self
            .index_of(target)
            .ok_or(EdgeRejection::MissingEndpoint(target))?;
        if self.graph.find_edge_undirected(s, t).is_some() {
            return Err(EdgeRejection::Duplicate {
                from: source,
                to: target,
            });
        }

        self.edge_counter += 1;
        let n = self.edge_counter;
        let id = EdgeId::numbered(n);
        let eidx = self.graph.add_edge(
            s,
            t,
            Edge {
                id,
                source,
                target,
                ordinal: n,
            },
        );
        self.edge_index.insert(id, eidx);
        log::debug!("added {id}: {source} -> {target}");
        Ok(id)
    }

    /// Remove an edge; stale ids are ignored.
    pub fn delete_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let eidx = self.edge_index.remove(&id)?;
        let edge = self.graph.remove_edge(eidx);
        if edge.is_some() {
            log::debug!("deleted {id}");
        }
        edge
    }

    /// Set a node's top-left position. Returns `false` for unknown ids.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                log::trace!("moved {id} to ({}, {})", position.x, position.y);
                true
            }
            None => false,
        }
    }

    /// Replace a node's label. Returns `false` for unknown ids.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index
            .get(&id)
            .and_then(|eidx| self.graph.edge_weight(*eidx))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index.contains_key(&id)
    }

    /// All nodes in creation order (later nodes paint on top).
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| n.ordinal);
        nodes
    }

    /// All edges in creation order.
    pub fn edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.graph.edge_weights().collect();
        edges.sort_by_key(|e| e.ordinal);
        edges
    }

    /// Ids of the edges that have `id` as source or target.
    pub fn edges_touching(&self, id: NodeId) -> SmallVec<[EdgeId; 4]> {
        let Some(idx) = self.index_of(id) else {
            return SmallVec::new();
        };
        let mut edges: SmallVec<[&Edge; 4]> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.weight())
            .collect();
        edges.sort_by_key(|e| e.ordinal);
        edges.into_iter().map(|e| e.id).collect()
    }

    /// Whether an edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.graph.find_edge_undirected(ia, ib).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Verify every structural invariant. Meant for tests and debug
    /// assertions; a failure here is an engine bug, never user error.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.node_index.len() != self.graph.node_count() {
            return Err(format!(
                "node index has {} entries for {} nodes",
                self.node_index.len(),
                self.graph.node_count()
            ));
        }
        if self.edge_index.len() != self.graph.edge_count() {
            return Err(format!(
                "edge index has {} entries for {} edges",
                self.edge_index.len(),
                self.graph.edge_count()
            ));
        }

        let mut pairs = HashSet::new();
        for edge in self.graph.edge_weights() {
            if !self.contains_node(edge.source) || !self.contains_node(edge.target) {
                return Err(format!("{} has a dangling endpoint", edge.id));
            }
            if edge.source == edge.target {
                return Err(format!("{} is a self-loop", edge.id));
            }
            let pair = if edge.source.as_str() <= edge.target.as_str() {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };
            if !pairs.insert(pair) {
                return Err(format!("{} duplicates an existing connection", edge.id));
            }
            if edge.ordinal > self.edge_counter {
                return Err(format!("{} is ahead of the edge counter", edge.id));
            }
        }
        for node in self.graph.node_weights() {
            if node.ordinal > self.node_counter {
                return Err(format!("{} is ahead of the node counter", node.id));
            }
        }
        Ok(())
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let idx = self.index_of(id)?;
        self.graph.node_weight_mut(idx)
    }
}
