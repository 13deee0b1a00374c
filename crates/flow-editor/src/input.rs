//! Input abstraction layer.
//!
//! Hosts forward raw pointer events in client coordinates, tagged with what
//! the pointer is over. The editor maps them into canvas space through a
//! [`CoordinateTransform`] before any tool sees them.

use flow_render::HitTarget;
use kurbo::{Point, Vec2};

/// A raw event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { client: Point, target: HitTarget },
    PointerMove { client: Point, target: HitTarget },
    PointerUp { client: Point, target: HitTarget },
    DoubleClick { client: Point, target: HitTarget },
    /// `KeyboardEvent.key` value (e.g. `"Delete"`, `"v"`).
    Key { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// A pointer event resolved into canvas space, as seen by tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Raw client coordinates. Panning works in this space.
    pub client: Point,
    /// Canvas-local coordinates (pan removed).
    pub canvas: Point,
    pub target: HitTarget,
}

impl InputEvent {
    /// Split a pointer event into its phase, client point and target.
    pub fn pointer(&self) -> Option<(PointerPhase, Point, HitTarget)> {
        match *self {
            Self::PointerDown { client, target } => Some((PointerPhase::Down, client, target)),
            Self::PointerMove { client, target } => Some((PointerPhase::Move, client, target)),
            Self::PointerUp { client, target } => Some((PointerPhase::Up, client, target)),
            Self::DoubleClick { client, target } => {
                Some((PointerPhase::DoubleClick, client, target))
            }
            Self::Key { .. } => None,
        }
    }
}

/// Maps host client coordinates to canvas-local coordinates.
pub trait CoordinateTransform {
    fn to_canvas(&self, client: Point, pan: Vec2) -> Point;
}

/// The usual transform: subtract the canvas element's top-left corner and
/// the current pan offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasOrigin {
    pub origin: Point,
}

impl CanvasOrigin {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }
}

impl CoordinateTransform for CanvasOrigin {
    fn to_canvas(&self, client: Point, pan: Vec2) -> Point {
        client - self.origin.to_vec2() - pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_origin_removes_offset_and_pan() {
        let t = CanvasOrigin::new(Point::new(20.0, 60.0));
        let p = t.to_canvas(Point::new(150.0, 160.0), Vec2::new(30.0, 40.0));
        assert_eq!(p, Point::new(100.0, 60.0));
    }

    #[test]
    fn key_events_have_no_pointer() {
        let key = InputEvent::Key {
            key: "Delete".into(),
        };
        assert!(key.pointer().is_none());
        let up = InputEvent::PointerUp {
            client: Point::new(1.0, 2.0),
            target: HitTarget::Background,
        };
        assert_eq!(
            up.pointer(),
            Some((PointerPhase::Up, Point::new(1.0, 2.0), HitTarget::Background))
        );
    }
}
