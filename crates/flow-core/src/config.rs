//! Editor configuration: node dimensions, curve tuning, and hit tolerances.
//!
//! Every constant the geometry and interaction layers rely on lives here so
//! hosts can tune them without touching the engine. All fields default to the
//! reference values; a JSON document only needs to name the fields it changes.

use crate::id::NodeKind;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("node type `{0}` is registered more than once")]
    DuplicateKind(String),
}

/// Tunables shared by the store, geometry engine, hit tester and editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Fixed size of every node box.
    pub node_size: Size,
    /// Fraction of the endpoint distance used as bezier control offset.
    pub control_ratio: f64,
    /// Upper bound on the control offset, whatever the node separation.
    pub control_clamp: f64,
    /// Half-width of the invisible band around an edge that accepts clicks.
    pub hit_tolerance: f64,
    /// Radius of the circular hit area around each connection handle.
    pub handle_radius: f64,
    /// Arrowhead length along the curve tangent.
    pub arrow_length: f64,
    /// Arrowhead half-width perpendicular to the tangent.
    pub arrow_half_width: f64,
    /// Node kind created by a background double-click.
    pub default_kind: NodeKind,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_size: Size::new(100.0, 50.0),
            control_ratio: 0.4,
            control_clamp: 80.0,
            hit_tolerance: 15.0,
            handle_radius: 8.0,
            arrow_length: 10.0,
            arrow_half_width: 5.0,
            default_kind: NodeKind::intern("default"),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and tolerances the geometry cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("node_size.width", self.node_size.width),
            ("node_size.height", self.node_size.height),
            ("control_clamp", self.control_clamp),
            ("hit_tolerance", self.hit_tolerance),
            ("handle_radius", self.handle_radius),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.control_ratio.is_finite() && self.control_ratio >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "control_ratio",
                value: self.control_ratio,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_geometry() {
        let config = EditorConfig::default();
        assert_eq!(config.node_size, Size::new(100.0, 50.0));
        assert_eq!(config.control_clamp, 80.0);
        assert_eq!(config.hit_tolerance, 15.0);
        assert_eq!(config.default_kind.as_str(), "default");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = EditorConfig::from_json(r#"{ "hit_tolerance": 6.0 }"#).unwrap();
        assert_eq!(config.hit_tolerance, 6.0);
        assert_eq!(config.control_ratio, 0.4);
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let err = EditorConfig::from_json(r#"{ "node_size": { "width": 0.0, "height": 50.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "node_size.width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }
}
