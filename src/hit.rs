//! Hit-testing the active shape under a model-space point.
//!
//! One rule table per mode:
//!
//! | Mode | Hit when |
//! |------|----------|
//! | rect | point inside or on the rectangle |
//! | circle | distance to center ≤ radius |
//! | triangle | distance to a vertex < [`VERTEX_HIT_RADIUS`] |
//! | polygon | distance to a vertex < [`VERTEX_HIT_RADIUS`] |
//!
//! Vertices are tested in index order and the first match wins, so among
//! overlapping vertices the lowest index is hit. Triangle and polygon
//! interiors are never hit; what an empty-space press does is decided by the
//! engine.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::VERTEX_HIT_RADIUS;
use crate::shapes::{Mode, Selection, ShapeModel};

/// Which part of the active shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Rect,
    Circle,
    TriangleVertex(usize),
    PolygonVertex(usize),
}

impl From<HitPart> for Selection {
    fn from(part: HitPart) -> Self {
        match part {
            HitPart::Rect => Selection::Rect,
            HitPart::Circle => Selection::Circle,
            HitPart::TriangleVertex(i) => Selection::TriangleVertex(i),
            HitPart::PolygonVertex(i) => Selection::PolygonVertex(i),
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub part: HitPart,
    /// The point a drag of this part moves: rect origin, circle center, or the vertex.
    pub anchor: Point,
}

/// Test the shape of the model's active mode at `model_pt`.
#[must_use]
pub fn hit_test(model_pt: Point, shapes: &ShapeModel) -> Option<Hit> {
    match shapes.mode() {
        Mode::Rect => {
            let rect = shapes.rect();
            rect.contains(model_pt).then(|| Hit { part: HitPart::Rect, anchor: rect.origin() })
        }
        Mode::Circle => {
            let circle = shapes.circle();
            circle.contains(model_pt).then(|| Hit { part: HitPart::Circle, anchor: circle.center() })
        }
        Mode::Triangle => {
            let points = &shapes.triangle().points;
            hit_vertex(points, model_pt).map(|i| Hit { part: HitPart::TriangleVertex(i), anchor: points[i] })
        }
        Mode::Polygon => {
            let points = &shapes.polygon().points;
            hit_vertex(points, model_pt).map(|i| Hit { part: HitPart::PolygonVertex(i), anchor: points[i] })
        }
    }
}

/// Index of the first vertex strictly within [`VERTEX_HIT_RADIUS`] of `p`.
#[must_use]
pub fn hit_vertex(points: &[Point], p: Point) -> Option<usize> {
    points.iter().position(|v| v.distance_to(p) < VERTEX_HIT_RADIUS)
}
