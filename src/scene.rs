//! Scene building: the renderer's read-only view of the editor.
//!
//! This module never draws. It turns the current [`ShapeModel`] and
//! [`EditorConfig`] into a [`Scene`]: plain data listing grid lines, the active
//! shape, vertex handles and measurement labels, in back-to-front order. A
//! renderer paints it with whatever API it owns and never writes back.
//!
//! Label anchors are in model space; placing text around them is up to the
//! renderer.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;
use tracing::debug;

use crate::camera::Point;
use crate::config::EditorConfig;
use crate::consts::MAX_GRID_LINES;
use crate::geometry;
use crate::shapes::{Mode, Selection, ShapeModel};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub mode: Mode,
    pub fill_opacity: f64,
    pub show_grid: bool,
    pub snap_to_grid: bool,
    /// Grid lines, empty when the grid is hidden or too dense to draw.
    pub grid: Vec<Line>,
    pub shape: Primitive,
    pub handles: Vec<Handle>,
    pub centroid: Option<Point>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Serialize for a host that renders outside Rust.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; a scene of finite numbers always encodes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

/// The active shape's outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    /// Triangle or polygon. An open polygon is still outlined as a ring; only
    /// rings of three or more points are filled.
    Polygon { points: Vec<Point>, closed: bool, filled: bool },
}

/// A draggable vertex marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Handle {
    pub index: usize,
    pub at: Point,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    VertexName,
    EdgeLength,
    Angle,
    Centroid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub kind: LabelKind,
    pub at: Point,
    pub text: String,
}

/// Build the scene for the model's active mode.
#[must_use]
pub fn build(shapes: &ShapeModel, config: &EditorConfig) -> Scene {
    let bounds = shapes.bounds();
    let mode = shapes.mode();
    let measurements = shapes.measurements(mode);

    // Layer 1: grid.
    let grid = if config.show_grid {
        grid_lines(bounds.width, bounds.height, config.grid_size)
    } else {
        Vec::new()
    };

    // Layer 2: shape, then layer 3: handles and labels.
    let mut labels = Vec::new();
    let (shape, handles) = match mode {
        Mode::Rect => {
            let r = shapes.rect();
            (Primitive::Rect { x: r.x, y: r.y, w: r.w, h: r.h }, Vec::new())
        }
        Mode::Circle => {
            let c = shapes.circle();
            (Primitive::Circle { cx: c.cx, cy: c.cy, r: c.r }, Vec::new())
        }
        Mode::Triangle => {
            let points = shapes.triangle().points.to_vec();
            let selected = match shapes.selection() {
                Selection::TriangleVertex(i) => Some(i),
                _ => None,
            };
            vertex_labels(&points, 1, &measurements.interior_angles, &mut labels);
            let handles = vertex_handles(&points, selected);
            (Primitive::Polygon { filled: true, closed: true, points }, handles)
        }
        Mode::Polygon => {
            let polygon = shapes.polygon();
            let selected = match shapes.selection() {
                Selection::PolygonVertex(i) => Some(i),
                _ => None,
            };
            vertex_labels(&polygon.points, 0, &measurements.interior_angles, &mut labels);
            let handles = vertex_handles(&polygon.points, selected);
            let filled = polygon.points.len() >= 3;
            (Primitive::Polygon { points: polygon.points.clone(), closed: polygon.closed, filled }, handles)
        }
    };

    if let Some(c) = measurements.centroid {
        let text = match mode {
            Mode::Rect => format!("centroid ({}, {})", c.x.round(), c.y.round()),
            Mode::Circle => format!("({}, {})", c.x.round(), c.y.round()),
            Mode::Triangle | Mode::Polygon => "centroid".to_string(),
        };
        labels.push(Label { kind: LabelKind::Centroid, at: c, text });
    }

    Scene {
        width: bounds.width,
        height: bounds.height,
        mode,
        fill_opacity: config.fill_opacity,
        show_grid: config.show_grid,
        snap_to_grid: config.snap_to_grid,
        grid,
        shape,
        handles,
        centroid: measurements.centroid,
        labels,
    }
}

/// Vertical then horizontal lines every `grid` units, covering the canvas.
/// Empty when the total would exceed [`MAX_GRID_LINES`].
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_lines(width: f64, height: f64, grid: f64) -> Vec<Line> {
    if !grid.is_finite() || grid <= 0.0 {
        return Vec::new();
    }
    let cols = (width / grid).ceil() + 1.0;
    let rows = (height / grid).ceil() + 1.0;
    if cols + rows > MAX_GRID_LINES as f64 {
        debug!(cols, rows, "grid too dense; omitted");
        return Vec::new();
    }
    let (cols, rows) = (cols as usize, rows as usize);
    let vertical = (0..cols).map(|i| {
        let x = i as f64 * grid;
        Line { from: Point::new(x, 0.0), to: Point::new(x, height) }
    });
    let horizontal = (0..rows).map(|i| {
        let y = i as f64 * grid;
        Line { from: Point::new(0.0, y), to: Point::new(width, y) }
    });
    vertical.chain(horizontal).collect()
}

fn vertex_handles(points: &[Point], selected: Option<usize>) -> Vec<Handle> {
    points
        .iter()
        .enumerate()
        .map(|(index, at)| Handle { index, at: *at, selected: selected == Some(index) })
        .collect()
}

/// Vertex names (`P{first_name + i}`), edge lengths at edge midpoints, and
/// interior angles at vertices.
fn vertex_labels(points: &[Point], first_name: usize, angles: &[f64], labels: &mut Vec<Label>) {
    let n = points.len();
    for (i, p) in points.iter().enumerate() {
        labels.push(Label { kind: LabelKind::VertexName, at: *p, text: format!("P{}", i + first_name) });
    }
    if n >= 2 {
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % n];
            let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            labels.push(Label { kind: LabelKind::EdgeLength, at: mid, text: format!("{:.1}", geometry::distance(*a, b)) });
        }
    }
    for (p, angle) in points.iter().zip(angles) {
        labels.push(Label { kind: LabelKind::Angle, at: *p, text: format!("{angle:.1}°") });
    }
}
