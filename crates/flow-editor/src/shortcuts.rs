//! Keyboard shortcut mapping.
//!
//! Maps `KeyboardEvent.key` values to semantic [`ShortcutAction`]s so every
//! host shares one binding table.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Delete the selected node (with its edges) or edge.
    Delete,
    ToolSelect,
    ToolPan,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key to an action, or `None` if it has no binding.
    pub fn resolve(key: &str) -> Option<ShortcutAction> {
        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "h" | "H" => Some(ShortcutAction::ToolPan),
            _ => None,
        }
    }
}
