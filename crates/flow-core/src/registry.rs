//! Node-type registry: kind → display label and presentation style token.
//!
//! Purely descriptive data owned by the host. The store consults it when
//! labeling new nodes and the scene builder forwards the style token, so a
//! new node kind needs no engine change.

use crate::config::ConfigError;
use crate::id::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display information for one node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeInfo {
    pub kind: NodeKind,
    /// Human label, used as the prefix of default node labels.
    pub label: String,
    /// Opaque style token (CSS class, color name...) handed to the painter.
    pub style: String,
}

impl NodeTypeInfo {
    pub fn new(kind: &str, label: &str, style: &str) -> Self {
        Self {
            kind: NodeKind::intern(kind),
            label: label.to_string(),
            style: style.to_string(),
        }
    }
}

/// Ordered set of known node kinds (order is the host's toolbar order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTypeRegistry {
    types: Vec<NodeTypeInfo>,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self {
            types: vec![
                NodeTypeInfo::new("input", "Input Node", "bg-blue-500"),
                NodeTypeInfo::new("default", "Default Node", "bg-gray-500"),
                NodeTypeInfo::new("output", "Output Node", "bg-green-500"),
                NodeTypeInfo::new("process", "Process Node", "bg-purple-500"),
            ],
        }
    }
}

impl NodeTypeRegistry {
    /// An empty registry; every kind falls back to its raw name.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Load a registry from a JSON array of `{ kind, label, style }` objects.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let registry: Self = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for info in &registry.types {
            if !seen.insert(info.kind) {
                return Err(ConfigError::DuplicateKind(info.kind.as_str().to_string()));
            }
        }
        Ok(registry)
    }

    /// Register or replace a kind.
    pub fn register(&mut self, info: NodeTypeInfo) {
        match self.types.iter_mut().find(|t| t.kind == info.kind) {
            Some(existing) => *existing = info,
            None => self.types.push(info),
        }
    }

    pub fn get(&self, kind: NodeKind) -> Option<&NodeTypeInfo> {
        self.types.iter().find(|t| t.kind == kind)
    }

    /// Label prefix for `kind`; unknown kinds use their own name.
    pub fn label_for(&self, kind: NodeKind) -> &str {
        self.get(kind)
            .map(|t| t.label.as_str())
            .unwrap_or_else(|| kind.as_str())
    }

    /// Style token for `kind`; empty for unknown kinds.
    pub fn style_for(&self, kind: NodeKind) -> &str {
        self.get(kind).map(|t| t.style.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeInfo> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_four_kinds_in_order() {
        let registry = NodeTypeRegistry::default();
        let kinds: Vec<&str> = registry.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, ["input", "default", "output", "process"]);
        assert_eq!(registry.label_for(NodeKind::intern("output")), "Output Node");
    }

    #[test]
    fn unknown_kind_falls_back_to_name() {
        let registry = NodeTypeRegistry::default();
        let kind = NodeKind::intern("decision");
        assert_eq!(registry.label_for(kind), "decision");
        assert_eq!(registry.style_for(kind), "");
    }

    #[test]
    fn loads_from_json() {
        let registry = NodeTypeRegistry::from_json(
            r#"[{ "kind": "decision", "label": "Decision", "style": "bg-amber-500" }]"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.style_for(NodeKind::intern("decision")), "bg-amber-500");
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let err = NodeTypeRegistry::from_json(
            r#"[{ "kind": "a", "label": "A", "style": "" },
                { "kind": "a", "label": "A again", "style": "" }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKind(k) if k == "a"));
    }

    #[test]
    fn register_replaces_existing_kind() {
        let mut registry = NodeTypeRegistry::default();
        registry.register(NodeTypeInfo::new("default", "Step", "bg-slate-500"));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.label_for(NodeKind::intern("default")), "Step");
    }
}
