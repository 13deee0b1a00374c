//! Tool system for canvas interactions.
//!
//! Each drag mode is a tool that turns canvas pointer events into
//! [`GraphMutation`]s. Tools read the store but never write it; the
//! [`Editor`](crate::editor::Editor) applies what they return. Selection and
//! pan offset are handed to tools through [`ToolContext`] since they are view
//! state, not graph state.
//!
//! Connection drags are not a mode: [`ConnectionGesture`] can start under
//! either tool and is driven by the editor directly. A pointer release ends
//! it together with any tool gesture.

use crate::input::{PointerEvent, PointerPhase};
use crate::selection::SelectionModel;
use flow_core::{EdgeId, EditorConfig, GraphStore, NodeId, NodeKind, Side};
use flow_render::{HitTarget, PendingConnection};
use kurbo::{Point, Vec2};

/// The user-selected drag mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        match name {
            "select" => Some(ToolKind::Select),
            "pan" => Some(ToolKind::Pan),
            _ => None,
        }
    }
}

/// A change to the graph store, produced by tools and shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    AddNode { kind: NodeKind, position: Point },
    MoveNode { id: NodeId, position: Point },
    SetLabel { id: NodeId, label: String },
    RemoveNode { id: NodeId },
    AddEdge { source: NodeId, target: NodeId },
    RemoveEdge { id: EdgeId },
}

/// What a tool may look at and touch while handling an event.
pub struct ToolContext<'a> {
    pub store: &'a GraphStore,
    pub config: &'a EditorConfig,
    pub selection: &'a mut SelectionModel,
    pub pan: &'a mut Vec2,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle a canvas event, returning zero or more mutations.
    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> Vec<GraphMutation>;

    /// Whether no gesture is in progress.
    fn is_idle(&self) -> bool;

    /// Drop any gesture in progress without emitting mutations.
    fn cancel(&mut self);
}

/// Selects an edge if it still exists. Both tools do this on edge press.
fn select_edge(ctx: &mut ToolContext<'_>, id: EdgeId) {
    if ctx.store.contains_edge(id) {
        ctx.selection.select_edge(id);
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct NodeDrag {
    id: NodeId,
    /// Pointer minus node position at press time.
    offset: Vec2,
}

/// Select, drag and create nodes; select edges.
#[derive(Debug, Default)]
pub struct SelectTool {
    drag: Option<NodeDrag>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node being dragged, if any.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.map(|d| d.id)
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> Vec<GraphMutation> {
        match event.phase {
            PointerPhase::Down => {
                match event.target {
                    HitTarget::Background => ctx.selection.clear(),
                    HitTarget::Node { id } => {
                        if let Some(node) = ctx.store.node(id) {
                            ctx.selection.select_node(id);
                            self.drag = Some(NodeDrag {
                                id,
                                offset: event.canvas - node.position,
                            });
                        }
                    }
                    HitTarget::Edge { id } => select_edge(ctx, id),
                    // Handles start connection drags before reaching a tool.
                    HitTarget::Handle { .. } => {}
                }
                vec![]
            }
            PointerPhase::Move => match self.drag {
                Some(drag) => vec![GraphMutation::MoveNode {
                    id: drag.id,
                    position: event.canvas - drag.offset,
                }],
                None => vec![],
            },
            PointerPhase::Up => {
                self.drag = None;
                vec![]
            }
            PointerPhase::DoubleClick => {
                if event.target == HitTarget::Background {
                    vec![GraphMutation::AddNode {
                        kind: ctx.config.default_kind,
                        position: event.canvas,
                    }]
                } else {
                    vec![]
                }
            }
        }
    }

    fn is_idle(&self) -> bool {
        self.drag.is_none()
    }

    fn cancel(&mut self) {
        self.drag = None;
    }
}

// ─── Pan Tool ────────────────────────────────────────────────────────────

/// Translate the view by dragging the background.
#[derive(Debug, Default)]
pub struct PanTool {
    /// Client point minus pan offset at press time.
    grab: Option<Vec2>,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        self.grab.is_some()
    }
}

impl Tool for PanTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pan
    }

    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> Vec<GraphMutation> {
        match event.phase {
            PointerPhase::Down => match event.target {
                HitTarget::Background => {
                    self.grab = Some(event.client.to_vec2() - *ctx.pan);
                }
                HitTarget::Edge { id } => select_edge(ctx, id),
                HitTarget::Node { .. } | HitTarget::Handle { .. } => {}
            },
            PointerPhase::Move => {
                if let Some(grab) = self.grab {
                    *ctx.pan = event.client.to_vec2() - grab;
                    log::trace!("pan → ({}, {})", ctx.pan.x, ctx.pan.y);
                }
            }
            PointerPhase::Up => self.grab = None,
            PointerPhase::DoubleClick => {}
        }
        vec![]
    }

    fn is_idle(&self) -> bool {
        self.grab.is_none()
    }

    fn cancel(&mut self) {
        self.grab = None;
    }
}

// ─── Connection Gesture ──────────────────────────────────────────────────

/// Drag from a node handle to another node to connect them.
#[derive(Debug, Default)]
pub struct ConnectionGesture {
    pending: Option<PendingConnection>,
    hovered: Option<NodeId>,
}

impl ConnectionGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<PendingConnection> {
        self.pending
    }

    /// Node currently under the pointer, never the source.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Start a drag from `source`'s `side` handle, anchored at `anchor`.
    pub fn begin(&mut self, source: NodeId, side: Side, anchor: Point) {
        self.pending = Some(PendingConnection {
            source,
            side,
            start: anchor,
            end: anchor,
        });
        self.hovered = None;
    }

    /// Track the pointer and the node under it.
    pub fn update(&mut self, canvas: Point, target: HitTarget) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.end = canvas;
        self.hovered = target.node().filter(|&id| id != pending.source);
    }

    /// End the drag. Yields an edge request if released over another node.
    pub fn finish(&mut self, canvas: Point, target: HitTarget) -> Option<GraphMutation> {
        self.update(canvas, target);
        let pending = self.pending.take()?;
        let hovered = self.hovered.take()?;
        Some(GraphMutation::AddEdge {
            source: pending.source,
            target: hovered,
        })
    }

    /// Abandon the drag without connecting anything.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.hovered = None;
    }
    /// Stop referring to a deleted node. Losing the source ends the drag.
    pub fn forget_node(&mut self, id: NodeId) {
        if self.pending.is_some_and(|p| p.source == id) {
            self.cancel();
        } else if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}
