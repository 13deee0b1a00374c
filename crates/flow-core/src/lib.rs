pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod registry;
pub mod store;

pub use config::{ConfigError, EditorConfig};
pub use geometry::{
    EdgeRoute, PreviewCurve, connection_preview, edge_midpoint, edge_route, handle_anchor,
};
pub use id::{EdgeId, NodeId, NodeKind};
pub use model::{Axis, Edge, Node, Selection, Side};
pub use registry::{NodeTypeInfo, NodeTypeRegistry};
pub use store::{EdgeRejection, GraphStore, RemovedNode};

// Re-export kurbo's geometry primitives so downstream crates share one vocabulary
pub use kurbo::{Point, Size, Vec2};
