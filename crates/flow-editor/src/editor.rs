//! The interaction controller.
//!
//! [`Editor`] owns the graph store plus every piece of transient interaction
//! state, and is the only writer to the store. Hosts push [`InputEvent`]s
//! into [`Editor::handle`] one at a time and poll [`Editor::scene`] for what
//! to paint.

use crate::input::{CanvasOrigin, CoordinateTransform, InputEvent, PointerEvent, PointerPhase};
use crate::selection::SelectionModel;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{
    ConnectionGesture, GraphMutation, PanTool, SelectTool, Tool, ToolContext, ToolKind,
};
use flow_core::geometry::handle_anchor;
use flow_core::{
    EdgeId, EditorConfig, GraphStore, NodeId, NodeKind, NodeTypeRegistry, Selection,
};
use flow_render::{HitTarget, PendingConnection, Scene, SceneState, build_scene, hit_test};
use kurbo::{Point, Vec2};

/// Everything that affects the painted frame besides the graph itself.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewState {
    mode: ToolKind,
    selection: Option<Selection>,
    pan: Vec2,
    connection: Option<PendingConnection>,
    hovered: Option<NodeId>,
}

pub struct Editor {
    store: GraphStore,
    config: EditorConfig,
    selection: SelectionModel,
    active_tool: ToolKind,
    select_tool: SelectTool,
    pan_tool: PanTool,
    connection: ConnectionGesture,
    pan: Vec2,
    transform: Box<dyn CoordinateTransform>,
    /// Whether the keyboard scope is attached.
    mounted: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), NodeTypeRegistry::default())
    }
}

impl Editor {
    #[must_use]
    pub fn new(config: EditorConfig, registry: NodeTypeRegistry) -> Self {
        Self {
            store: GraphStore::new(registry),
            config,
            selection: SelectionModel::new(),
            active_tool: ToolKind::Select,
            select_tool: SelectTool::new(),
            pan_tool: PanTool::new(),
            connection: ConnectionGesture::new(),
            pan: Vec2::ZERO,
            transform: Box::new(CanvasOrigin::default()),
            mounted: false,
        }
    }

    /// Replace the client → canvas mapping (e.g. when the canvas element moves).
    pub fn set_transform(&mut self, transform: impl CoordinateTransform + 'static) {
        self.transform = Box::new(transform);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.get()
    }

    pub fn mode(&self) -> ToolKind {
        self.active_tool
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.connection.hovered()
    }

    pub fn pending_connection(&self) -> Option<PendingConnection> {
        self.connection.pending()
    }

    /// Whether no drag, pan or connection gesture is in progress.
    pub fn is_idle(&self) -> bool {
        !self.connection.is_active() && self.select_tool.is_idle() && self.pan_tool.is_idle()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn view_state(&self) -> ViewState {
        ViewState {
            mode: self.active_tool,
            selection: self.selection.get(),
            pan: self.pan,
            connection: self.connection.pending(),
            hovered: self.connection.hovered(),
        }
    }

    // ─── Keyboard scope ──────────────────────────────────────────────────

    /// Attach the keyboard scope. Returns `false` if it was already attached.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        log::debug!("keyboard scope attached");
        true
    }

    /// Detach the keyboard scope. Returns `false` if it was not attached.
    pub fn unmount(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.mounted = false;
        log::debug!("keyboard scope detached");
        true
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Process one input event. Returns whether anything visible changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key { key } => self.handle_key(&key),
            other => match other.pointer() {
                Some((phase, client, target)) => {
                    let canvas = self.transform.to_canvas(client, self.pan);
                    self.handle_pointer(PointerEvent {
                        phase,
                        client,
                        canvas,
                        target,
                    })
                }
                None => false,
            },
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let before = self.view_state();
        let mut mutated = false;

        if self.connection.is_active() {
            match event.phase {
                PointerPhase::Move => self.connection.update(event.canvas, event.target),
                PointerPhase::Up => {
                    if let Some(mutation) = self.connection.finish(event.canvas, event.target) {
                        mutated = self.apply_mutation(mutation);
                    }
                }
                PointerPhase::Down | PointerPhase::DoubleClick => {}
            }
        } else if event.phase == PointerPhase::Down
            && let HitTarget::Handle { node, side } = event.target
        {
            if let Some(n) = self.store.node(node) {
                let anchor = handle_anchor(n.position, side, &self.config);
                self.connection.begin(node, side, anchor);
                log::debug!("connection drag from {node} ({})", side.as_str());
            }
        } else {
            let tool: &mut dyn Tool = match self.active_tool {
                ToolKind::Select => &mut self.select_tool,
                ToolKind::Pan => &mut self.pan_tool,
            };
            let mut ctx = ToolContext {
                store: &self.store,
                config: &self.config,
                selection: &mut self.selection,
                pan: &mut self.pan,
            };
            let mutations = tool.handle(&event, &mut ctx);
            for mutation in mutations {
                mutated |= self.apply_mutation(mutation);
            }
        }

        // A release ends every gesture, including one a handle press overlapped.
        if event.phase == PointerPhase::Up {
            self.select_tool.cancel();
            self.pan_tool.cancel();
        }

        mutated || before != self.view_state()
    }

    fn handle_key(&mut self, key: &str) -> bool {
        if !self.mounted {
            return false;
        }
        match ShortcutMap::resolve(key) {
            Some(ShortcutAction::Delete) => self.delete_selected(),
            Some(ShortcutAction::ToolSelect) => self.switch_mode(ToolKind::Select),
            Some(ShortcutAction::ToolPan) => self.switch_mode(ToolKind::Pan),
            None => false,
        }
    }

    fn switch_mode(&mut self, mode: ToolKind) -> bool {
        let before = self.active_tool;
        self.set_mode(mode) && before != mode
    }

    /// Switch drag mode. Refused (returns `false`) while a gesture is in
    /// progress.
    pub fn set_mode(&mut self, mode: ToolKind) -> bool {
        if !self.is_idle() {
            log::debug!("mode switch to {} refused mid-gesture", mode.as_str());
            return false;
        }
        self.active_tool = mode;
        true
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply a mutation to the store and keep selection and transient state
    /// pointing only at live entities. Returns whether the store changed.
    pub fn apply_mutation(&mut self, mutation: GraphMutation) -> bool {
        match mutation {
            GraphMutation::AddNode { kind, position } => {
                self.store.add_node(kind, position);
                true
            }
            GraphMutation::MoveNode { id, position } => self.store.move_node(id, position),
            GraphMutation::SetLabel { id, label } => self.store.set_label(id, label),
            GraphMutation::RemoveNode { id } => {
                let Some(removed) = self.store.delete_node(id) else {
                    return false;
                };
                self.selection.forget_node(id);
                for edge in &removed.edges {
                    self.selection.forget_edge(edge.id);
                }
                self.connection.forget_node(id);
                true
            }
            GraphMutation::AddEdge { source, target } => {
                self.store.add_edge(source, target).is_some()
            }
            GraphMutation::RemoveEdge { id } => {
                if self.store.delete_edge(id).is_none() {
                    return false;
                }
                self.selection.forget_edge(id);
                true
            }
        }
    }

    /// Add a node of `kind` at a canvas position (toolbar "Add" buttons).
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> NodeId {
        self.store.add_node(kind, position)
    }

    pub fn delete_node(&mut self, id: NodeId) -> bool {
        self.apply_mutation(GraphMutation::RemoveNode { id })
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        self.apply_mutation(GraphMutation::RemoveEdge { id })
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        self.apply_mutation(GraphMutation::SetLabel {
            id,
            label: label.into(),
        })
    }

    /// Delete whatever is selected. No-op with nothing selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.get() {
            Some(Selection::Node(id)) => self.delete_node(id),
            Some(Selection::Edge(id)) => self.delete_edge(id),
            None => false,
        }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// What lies under a client point, for hosts without their own hit testing.
    pub fn hit_test(&self, client: Point) -> HitTarget {
        let canvas = self.transform.to_canvas(client, self.pan);
        hit_test(&self.store, canvas, &self.config)
    }

    pub fn scene(&self) -> Scene {
        let state = SceneState {
            selection: self.selection.get(),
            hovered: self.connection.hovered(),
            connection: self.connection.pending(),
            pan: self.pan,
        };
        build_scene(&self.store, &self.config, &state)
    }
}
