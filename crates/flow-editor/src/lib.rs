pub mod editor;
pub mod input;
pub mod selection;
pub mod shortcuts;
pub mod tools;

pub use editor::Editor;
pub use input::{CanvasOrigin, CoordinateTransform, InputEvent, PointerEvent, PointerPhase};
pub use selection::SelectionModel;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{ConnectionGesture, GraphMutation, PanTool, SelectTool, Tool, ToolKind};
