//! Edge routing and node geometry.
//!
//! Pure functions of node positions and the [`EditorConfig`]: nothing here
//! reads or writes the store. The router picks a side pair from the dominant
//! axis between node centers, pins the endpoints to the middle of those
//! sides, and bends the curve with control points pushed out along the
//! connection axis. The resulting shallow "S" stays roughly axis-aligned and
//! never overshoots past `control_clamp`, however far apart the nodes are.

use crate::config::EditorConfig;
use crate::model::{Axis, Side};
use kurbo::{CubicBez, ParamCurve, ParamCurveNearest, Point, QuadBez, Rect, Vec2};
use serde::Serialize;

/// Accuracy passed to kurbo's nearest-point solver, in canvas units.
const NEAREST_ACCURACY: f64 = 1e-3;

/// Bounding box of a node placed at `position`.
pub fn node_rect(position: Point, config: &EditorConfig) -> Rect {
    Rect::from_origin_size(position, config.node_size)
}

/// Geometric center of a node placed at `position`.
pub fn node_center(position: Point, config: &EditorConfig) -> Point {
    node_rect(position, config).center()
}

/// Whether `point` falls inside (or on the border of) the node box.
pub fn node_contains(position: Point, point: Point, config: &EditorConfig) -> bool {
    let r = node_rect(position, config);
    point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
}

/// Fixed anchor of a connection handle, relative to the canvas.
pub fn handle_anchor(position: Point, side: Side, config: &EditorConfig) -> Point {
    let w = config.node_size.width;
    let h = config.node_size.height;
    let offset = match side {
        Side::Left => Vec2::new(0.0, h / 2.0),
        Side::Right => Vec2::new(w, h / 2.0),
        Side::Top => Vec2::new(w / 2.0, 0.0),
        Side::Bottom => Vec2::new(w / 2.0, h),
    };
    position + offset
}

/// Mean of the two node centers. Used to place per-edge affordances (the
/// delete button); it is not the curve's true midpoint.
pub fn edge_midpoint(source: Point, target: Point, config: &EditorConfig) -> Point {
    node_center(source, config).midpoint(node_center(target, config))
}

/// A routed edge: the chosen sides and the four cubic control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRoute {
    pub axis: Axis,
    pub source_side: Side,
    pub target_side: Side,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Route an edge between nodes whose top-left corners are `source` and `target`.
pub fn edge_route(source: Point, target: Point, config: &EditorConfig) -> EdgeRoute {
    let delta = node_center(target, config) - node_center(source, config);

    let (axis, source_side) = if delta.x.abs() > delta.y.abs() {
        let side = if delta.x > 0.0 { Side::Right } else { Side::Left };
        (Axis::Horizontal, side)
    } else {
        let side = if delta.y > 0.0 { Side::Bottom } else { Side::Top };
        (Axis::Vertical, side)
    };
    let target_side = source_side.opposite();

    let start = handle_anchor(source, source_side, config);
    let end = handle_anchor(target, target_side, config);

    let reach = (start.distance(end) * config.control_ratio).min(config.control_clamp);
    let outward = side_normal(source_side) * reach;

    EdgeRoute {
        axis,
        source_side,
        target_side,
        start,
        control1: start + outward,
        control2: end - outward,
        end,
    }
}

/// Unit vector pointing out of a node through `side`.
fn side_normal(side: Side) -> Vec2 {
    match side {
        Side::Left => Vec2::new(-1.0, 0.0),
        Side::Right => Vec2::new(1.0, 0.0),
        Side::Top => Vec2::new(0.0, -1.0),
        Side::Bottom => Vec2::new(0.0, 1.0),
    }
}

impl EdgeRoute {
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.start, self.control1, self.control2, self.end)
    }

    /// SVG path data: `M sx sy C c1x c1y c2x c2y ex ey`.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Point on the curve at parameter `t` in `0..=1`.
    pub fn eval(&self, t: f64) -> Point {
        self.to_cubic().eval(t)
    }

    /// Distance from `point` to the nearest point of the curve.
    pub fn distance_to(&self, point: Point) -> f64 {
        self.to_cubic()
            .nearest(point, NEAREST_ACCURACY)
            .distance_sq
            .sqrt()
    }

    /// Whether `point` lies inside the click band of half-width `tolerance`.
    pub fn hits(&self, point: Point, tolerance: f64) -> bool {
        // Cheap reject: the curve lies inside its control polygon's hull.
        // Inclusive on every edge so the band is symmetric.
        let hull = Rect::from_points(self.start, self.end)
            .union_pt(self.control1)
            .union_pt(self.control2)
            .inflate(tolerance, tolerance);
        if point.x < hull.x0 || point.x > hull.x1 || point.y < hull.y0 || point.y > hull.y1 {
            return false;
        }
        self.distance_to(point) <= tolerance
    }

    /// Unit tangent at the target end, pointing into the target node.
    /// Falls back to the inward side normal for degenerate curves.
    pub fn end_tangent(&self) -> Vec2 {
        let d = self.end - self.control2;
        if d.hypot2() > f64::EPSILON {
            return d.normalize();
        }
        let d = self.end - self.start;
        if d.hypot2() > f64::EPSILON {
            d.normalize()
        } else {
            -side_normal(self.target_side)
        }
    }
}

/// The dashed line drawn while a connection is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

/// Quadratic preview from a handle anchor to the pointer. The control point
/// sits half-way across horizontally at the start height, so the line leaves
/// the handle flat and bends toward the pointer.
pub fn connection_preview(start: Point, end: Point) -> PreviewCurve {
    PreviewCurve {
        start,
        control: Point::new(start.x + (end.x - start.x) / 2.0, start.y),
        end,
    }
}

impl PreviewCurve {
    pub fn to_quad(&self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    /// SVG path data: `M sx sy Q cx cy ex ey`.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}
