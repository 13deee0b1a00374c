pub mod hit;
pub mod scene;

pub use hit::{HitTarget, hit_test};
pub use scene::{
    Arrowhead, ConnectionView, EdgeView, NodeView, PendingConnection, Scene, SceneState,
    build_scene,
};
