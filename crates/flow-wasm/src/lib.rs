//! WASM bridge for Flow Canvas: exposes the editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards raw DOM
//! pointer/keyboard events, repaints from `get_scene_json` whenever a handler
//! returns `true`, and owns no graph state of its own.

use flow_core::{ConfigError, EdgeId, EditorConfig, NodeId, NodeKind, NodeTypeRegistry, Point};
use flow_editor::{CanvasOrigin, Editor, InputEvent, ToolKind};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct FlowCanvas {
    editor: Editor,
}

impl Default for FlowCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl FlowCanvas {
    /// Create a canvas with the default node types and geometry.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: Editor::default(),
        }
    }

    /// Create a canvas from JSON configuration. Either argument may be an
    /// empty string to use the defaults.
    pub fn with_config(config_json: &str, registry_json: &str) -> Result<FlowCanvas, JsValue> {
        console_error_panic_hook_setup();
        Self::from_json_parts(config_json, registry_json)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Record where the canvas element sits in client coordinates.
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.editor
            .set_transform(CanvasOrigin::new(Point::new(x, y)));
    }

    // ─── Keyboard scope ──────────────────────────────────────────────────

    pub fn mount(&mut self) -> bool {
        self.editor.mount()
    }

    pub fn unmount(&mut self) -> bool {
        self.editor.unmount()
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    /// Handle pointer down at client (x, y). Returns true if a repaint is needed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        let client = Point::new(x, y);
        let target = self.editor.hit_test(client);
        self.editor.handle(InputEvent::PointerDown { client, target })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let client = Point::new(x, y);
        let target = self.editor.hit_test(client);
        self.editor.handle(InputEvent::PointerMove { client, target })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        let client = Point::new(x, y);
        let target = self.editor.hit_test(client);
        self.editor.handle(InputEvent::PointerUp { client, target })
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        let client = Point::new(x, y);
        let target = self.editor.hit_test(client);
        self.editor.handle(InputEvent::DoubleClick { client, target })
    }

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool,"mode":"<mode_name>"}`
    pub fn handle_key(&mut self, key: &str) -> String {
        let changed = self.editor.handle(InputEvent::Key {
            key: key.to_string(),
        });
        let mode = self.editor.mode().as_str();
        format!(r#"{{"changed":{changed},"mode":"{mode}"}}"#)
    }

    // ─── Modes ───────────────────────────────────────────────────────────

    /// Switch drag mode by name (`"select"` / `"pan"`). Returns false for an
    /// unknown name or while a gesture is in progress.
    pub fn set_mode(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(mode) => self.editor.set_mode(mode),
            None => false,
        }
    }

    pub fn get_mode(&self) -> String {
        self.editor.mode().as_str().to_string()
    }

    // ─── Toolbar commands ────────────────────────────────────────────────

    /// Add a node of `kind` at canvas (x, y). Returns the new node id.
    pub fn add_node(&mut self, kind: &str, x: f64, y: f64) -> String {
        self.editor
            .add_node(NodeKind::intern(kind), Point::new(x, y))
            .to_string()
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        self.editor.delete_node(NodeId::intern(id))
    }

    pub fn delete_edge(&mut self, id: &str) -> bool {
        self.editor.delete_edge(EdgeId::intern(id))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    pub fn set_label(&mut self, id: &str, label: &str) -> bool {
        self.editor.set_label(NodeId::intern(id), label)
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    /// The render-ready scene as JSON.
    pub fn get_scene_json(&self) -> String {
        to_json(&self.editor.scene(), "{}")
    }

    /// `{"type":"node","id":"node-1"}`, `{"type":"edge",...}`, or `null`.
    pub fn get_selection_json(&self) -> String {
        to_json(&self.editor.selection(), "null")
    }

    /// What lies under client (x, y), as JSON.
    pub fn hit_test_json(&self, x: f64, y: f64) -> String {
        to_json(&self.editor.hit_test(Point::new(x, y)), "null")
    }

    /// Registered node types, for building the toolbar.
    pub fn get_node_types_json(&self) -> String {
        to_json(self.editor.store().registry(), "[]")
    }
}

impl FlowCanvas {
    fn from_json_parts(config_json: &str, registry_json: &str) -> Result<Self, ConfigError> {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json)?
        };
        let registry = if registry_json.trim().is_empty() {
            NodeTypeRegistry::default()
        } else {
            NodeTypeRegistry::from_json(registry_json)?
        };
        log::debug!("canvas configured with {} node type(s)", registry.len());
        Ok(Self {
            editor: Editor::new(config, registry),
        })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Flow Canvas WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn connect_and_snapshot() {
        let mut canvas = FlowCanvas::new();
        let a = canvas.add_node("input", 0.0, 0.0);
        let b = canvas.add_node("output", 200.0, 0.0);
        assert_eq!((a.as_str(), b.as_str()), ("node-1", "node-2"));

        assert!(canvas.handle_pointer_down(100.0, 25.0));
        assert!(canvas.handle_pointer_move(250.0, 25.0));
        assert!(canvas.handle_pointer_up(250.0, 25.0));

        let scene: serde_json::Value = serde_json::from_str(&canvas.get_scene_json()).unwrap();
        assert_eq!(scene["edges"][0]["id"], "edge-1");
        assert_eq!(scene["edges"][0]["source"], "node-1");
        assert_eq!(scene["nodes"][1]["label"], "Output Node 2");
    }

    #[test]
    fn keys_and_modes() {
        let mut canvas = FlowCanvas::new();
        assert_eq!(
            canvas.handle_key("h"),
            r#"{"changed":false,"mode":"select"}"#
        );
        canvas.mount();
        assert_eq!(canvas.handle_key("h"), r#"{"changed":true,"mode":"pan"}"#);
        assert!(!canvas.set_mode("connect"));
        assert!(canvas.set_mode("select"));
        assert_eq!(canvas.get_mode(), "select");
    }

    #[test]
    fn selection_json_and_delete() {
        let mut canvas = FlowCanvas::new();
        canvas.add_node("default", 0.0, 0.0);
        assert_eq!(canvas.get_selection_json(), "null");
        canvas.handle_pointer_down(40.0, 20.0);
        canvas.handle_pointer_up(40.0, 20.0);
        assert_eq!(
            canvas.get_selection_json(),
            r#"{"type":"node","id":"node-1"}"#
        );
        assert!(canvas.delete_selected());
        assert_eq!(canvas.get_selection_json(), "null");
    }

    #[test]
    fn canvas_origin_offsets_pointer() {
        let mut canvas = FlowCanvas::new();
        canvas.set_canvas_origin(100.0, 50.0);
        canvas.add_node("default", 0.0, 0.0);
        assert_eq!(
            canvas.hit_test_json(140.0, 70.0),
            r#"{"type":"node","id":"node-1"}"#
        );
        assert_eq!(canvas.hit_test_json(40.0, 20.0), r#"{"type":"background"}"#);
    }

    #[test]
    fn custom_registry() {
        let registry = r#"[{"kind":"task","label":"Task","style":"bg-amber-500"}]"#;
        let canvas = FlowCanvas::from_json_parts("", registry).unwrap();
        let types: serde_json::Value =
            serde_json::from_str(&canvas.get_node_types_json()).unwrap();
        assert_eq!(types[0]["label"], "Task");
        assert!(FlowCanvas::from_json_parts("{", "").is_err());
    }
}
