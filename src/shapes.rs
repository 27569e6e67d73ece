//! Shape model: the four editable shapes, the active mode, and the selection.
//!
//! [`ShapeModel`] is the single owner of shape state. All four shapes live side
//! by side; the [`Mode`] only decides which one the pointer edits and the
//! renderer shows. Fields are private and every write goes through a setter
//! that enforces the shape's invariants:
//!
//! - rectangle extents and circle radius are at least 1, and numeric input
//!   outside the canvas is clamped rather than rejected
//! - the triangle always has exactly three points
//! - a polygon may only be closed with three or more points
//! - vertex indices out of range are caller bugs and come back as
//!   [`ShapeError::VertexOutOfRange`]
//!
//! Derived measurements are recomputed on read from [`crate::geometry`].

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{DEFAULT_CIRCLE, DEFAULT_POLYGON, DEFAULT_RECT, DEFAULT_TRIANGLE, MIN_EXTENT};
use crate::geometry;

/// Error returned by structural shape mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// A vertex index did not name an existing point.
    #[error("{shape} vertex index {index} out of range (len {len})")]
    VertexOutOfRange { shape: Mode, index: usize, len: usize },
    /// Closing was requested on a polygon with fewer than three points.
    #[error("polygon needs at least 3 points to close, has {points}")]
    PolygonTooSmall { points: usize },
}

/// Which shape the editor is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Rect,
    Circle,
    Triangle,
    Polygon,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Polygon => "polygon",
        })
    }
}

/// What the user currently has selected.
///
/// Vertex selections carry the index of the targeted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Rect,
    Circle,
    TriangleVertex(usize),
    PolygonVertex(usize),
}

impl Selection {
    /// The mode whose shape this selection points into, if any.
    #[must_use]
    pub fn mode(self) -> Option<Mode> {
        match self {
            Self::None => None,
            Self::Rect => Some(Mode::Rect),
            Self::Circle => Some(Mode::Circle),
            Self::TriangleVertex(_) => Some(Mode::Triangle),
            Self::PolygonVertex(_) => Some(Mode::Polygon),
        }
    }

    /// The vertex index for vertex selections.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::TriangleVertex(i) | Self::PolygonVertex(i) => Some(i),
            _ => None,
        }
    }
}

/// Canvas extent used to clamp all shape coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Build bounds, flooring each side at 1. Non-finite sides become 1.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: finite_or(width, MIN_EXTENT).max(MIN_EXTENT), height: finite_or(height, MIN_EXTENT).max(MIN_EXTENT) }
    }

    /// Clamp a point into `[0, width] × [0, height]`.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        geometry::clamp_to_bounds(p, self.width, self.height)
    }

    /// Center of the canvas, rounded to whole units.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.width / 2.0).round(), (self.height / 2.0).round())
    }
}

/// Axis-aligned rectangle: top-left corner plus extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether `p` lies inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        let (x, y, w, h) = DEFAULT_RECT;
        Self { x, y, w, h }
    }
}

/// Circle: center plus radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Whether `p` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.center().distance_to(p) <= self.r
    }
}

impl Default for Circle {
    fn default() -> Self {
        let (cx, cy, r) = DEFAULT_CIRCLE;
        Self { cx, cy, r }
    }
}

/// Triangle with exactly three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Default for Triangle {
    fn default() -> Self {
        Self { points: DEFAULT_TRIANGLE }
    }
}

/// Polygon built point by point; `closed` is only ever true with 3+ points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Default for Polygon {
    fn default() -> Self {
        Self { points: DEFAULT_POLYGON.to_vec(), closed: true }
    }
}

/// Derived measurements for one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    pub area: f64,
    /// Perimeter, or circumference for a circle.
    pub perimeter: f64,
    pub centroid: Option<Point>,
    /// Interior angle in degrees at each vertex; empty for rect and circle.
    pub interior_angles: Vec<f64>,
}

/// Aggregate of all shape state, the active mode, and the selection.
#[derive(Debug, Clone)]
pub struct ShapeModel {
    bounds: Bounds,
    mode: Mode,
    selection: Selection,
    rect: Rectangle,
    circle: Circle,
    triangle: Triangle,
    polygon: Polygon,
}

impl ShapeModel {
    /// Create a model with the default shapes, clamped into `bounds`.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        let bounds = Bounds::new(bounds.width, bounds.height);
        let mut model = Self {
            bounds,
            mode: Mode::default(),
            selection: Selection::None,
            rect: Rectangle::default(),
            circle: Circle::default(),
            triangle: Triangle::default(),
            polygon: Polygon::default(),
        };
        let Rectangle { x, y, w, h } = model.rect;
        model.set_rect_bounds(x, y, w, h);
        let Circle { cx, cy, r } = model.circle;
        model.set_circle(cx, cy, r);
        model.triangle.points = model.triangle.points.map(|p| bounds.clamp(p));
        for p in &mut model.polygon.points {
            *p = bounds.clamp(*p);
        }
        model
    }

    // --- Read accessors ---

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    #[must_use]
    pub fn circle(&self) -> Circle {
        self.circle
    }

    #[must_use]
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    // --- Mode and selection ---

    /// Switch the active mode. Shapes keep their state; a selection that
    /// belongs to another mode is cleared. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        if self.selection.mode().is_some_and(|m| m != mode) {
            self.selection = Selection::None;
        }
        true
    }

    /// Replace the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::VertexOutOfRange`] when a vertex selection names a
    /// point that does not exist; the previous selection is kept.
    pub fn set_selection(&mut self, selection: Selection) -> Result<(), ShapeError> {
        match selection {
            Selection::TriangleVertex(index) => check_index(Mode::Triangle, index, 3)?,
            Selection::PolygonVertex(index) => check_index(Mode::Polygon, index, self.polygon.points.len())?,
            Selection::None | Selection::Rect | Selection::Circle => {}
        }
        self.selection = selection;
        Ok(())
    }

    // --- Rectangle ---

    /// Set the rectangle. Extents are kept within `[1, canvas size]` and the
    /// origin is clamped so the whole rectangle stays on the canvas.
    /// Non-finite values keep the current field.
    pub fn set_rect_bounds(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let w = finite_or(w, self.rect.w).clamp(MIN_EXTENT, self.bounds.width);
        let h = finite_or(h, self.rect.h).clamp(MIN_EXTENT, self.bounds.height);
        let x = finite_or(x, self.rect.x).clamp(0.0, self.bounds.width - w);
        let y = finite_or(y, self.rect.y).clamp(0.0, self.bounds.height - h);
        self.rect = Rectangle { x, y, w, h };
    }

    // --- Circle ---

    /// Set the circle. The radius is floored at 1 and the center clamped to
    /// the canvas. Non-finite values keep the current field.
    pub fn set_circle(&mut self, cx: f64, cy: f64, r: f64) {
        let center = self.bounds.clamp(Point::new(finite_or(cx, self.circle.cx), finite_or(cy, self.circle.cy)));
        let r = finite_or(r, self.circle.r).max(MIN_EXTENT);
        self.circle = Circle { cx: center.x, cy: center.y, r };
    }

    // --- Triangle ---

    /// Move one triangle vertex, clamped to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::VertexOutOfRange`] unless `index` is 0, 1 or 2.
    pub fn set_triangle_vertex(&mut self, index: usize, point: Point) -> Result<(), ShapeError> {
        check_index(Mode::Triangle, index, self.triangle.points.len())?;
        let current = self.triangle.points[index];
        self.triangle.points[index] = self.sanitize(point, current);
        Ok(())
    }

    /// Restore the default triangle.
    pub fn reset_triangle(&mut self) {
        self.triangle.points = DEFAULT_TRIANGLE.map(|p| self.bounds.clamp(p));
    }

    // --- Polygon ---

    /// Move one polygon vertex, clamped to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::VertexOutOfRange`] when `index` is past the last point.
    pub fn set_polygon_vertex(&mut self, index: usize, point: Point) -> Result<(), ShapeError> {
        check_index(Mode::Polygon, index, self.polygon.points.len())?;
        let current = self.polygon.points[index];
        self.polygon.points[index] = self.sanitize(point, current);
        Ok(())
    }

    /// Append a point (clamped to the canvas) and reopen the polygon.
    /// Returns the new point's index.
    pub fn add_polygon_point(&mut self, point: Point) -> usize {
        let fallback = self.bounds.center();
        let point = self.sanitize(point, fallback);
        self.polygon.points.push(point);
        self.polygon.closed = false;
        self.polygon.points.len() - 1
    }

    /// Remove the last point, if any. A selection of the removed vertex is cleared.
    pub fn delete_last_polygon_point(&mut self) -> Option<Point> {
        let removed = self.polygon.points.pop()?;
        if self.polygon.points.len() < 3 {
            self.polygon.closed = false;
        }
        self.drop_stale_polygon_selection();
        Some(removed)
    }

    /// Remove every point and reopen the polygon.
    pub fn reset_polygon(&mut self) {
        self.polygon.points.clear();
        self.polygon.closed = false;
        self.drop_stale_polygon_selection();
    }

    /// Flip the polygon between open and closed. Returns the new `closed` value.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::PolygonTooSmall`] when closing would leave a
    /// polygon with fewer than three points closed; the state is unchanged.
    pub fn toggle_close_polygon(&mut self) -> Result<bool, ShapeError> {
        if self.polygon.closed {
            self.polygon.closed = false;
            return Ok(false);
        }
        self.close_polygon()?;
        Ok(true)
    }

    /// Close the polygon regardless of its current state. Returns whether it
    /// was open before.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::PolygonTooSmall`] with fewer than three points.
    pub fn close_polygon(&mut self) -> Result<bool, ShapeError> {
        let points = self.polygon.points.len();
        if points < 3 {
            return Err(ShapeError::PolygonTooSmall { points });
        }
        let was_open = !self.polygon.closed;
        self.polygon.closed = true;
        Ok(was_open)
    }

    // --- Measurements ---

    /// Measurements of the shape shown in `mode`.
    #[must_use]
    pub fn measurements(&self, mode: Mode) -> Measurements {
        match mode {
            Mode::Rect => {
                let Rectangle { w, h, .. } = self.rect;
                Measurements {
                    area: w * h,
                    perimeter: 2.0 * (w + h),
                    centroid: Some(self.rect.center()),
                    interior_angles: Vec::new(),
                }
            }
            Mode::Circle => {
                let r = self.circle.r;
                Measurements {
                    area: PI * r * r,
                    perimeter: 2.0 * PI * r,
                    centroid: Some(self.circle.center()),
                    interior_angles: Vec::new(),
                }
            }
            Mode::Triangle => polygon_measurements(&self.triangle.points),
            Mode::Polygon => polygon_measurements(&self.polygon.points),
        }
    }

    // --- Internals ---

    fn sanitize(&self, p: Point, current: Point) -> Point {
        self.bounds.clamp(Point::new(finite_or(p.x, current.x), finite_or(p.y, current.y)))
    }

    fn drop_stale_polygon_selection(&mut self) {
        if let Selection::PolygonVertex(i) = self.selection {
            if i >= self.polygon.points.len() {
                self.selection = Selection::None;
            }
        }
    }
}

fn polygon_measurements(points: &[Point]) -> Measurements {
    Measurements {
        area: geometry::area(points),
        perimeter: geometry::perimeter(points),
        centroid: geometry::centroid(points),
        interior_angles: geometry::interior_angles(points),
    }
}

fn check_index(shape: Mode, index: usize, len: usize) -> Result<(), ShapeError> {
    if index < len {
        Ok(())
    } else {
        Err(ShapeError::VertexOutOfRange { shape, index, len })
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}
