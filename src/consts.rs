//! Shared numeric constants for the editor crate.

use crate::camera::Point;

// ── Math ────────────────────────────────────────────────────────

/// Below this magnitude a polygon's signed area counts as zero, and an edge
/// length is replaced by it when computing angles.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

// ── Hit-testing ─────────────────────────────────────────────────

/// Model-space radius around a triangle/polygon vertex that counts as a hit.
pub const VERTEX_HIT_RADIUS: f64 = 12.0;

// ── Canvas ──────────────────────────────────────────────────────

pub const DEFAULT_CANVAS_WIDTH: f64 = 820.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 420.0;
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
pub const DEFAULT_FILL_OPACITY: f64 = 0.6;

/// Smallest allowed rectangle extent or circle radius.
pub const MIN_EXTENT: f64 = 1.0;

/// Smallest accepted grid size, in model units.
pub const MIN_GRID_SIZE: f64 = 1.0;

/// Upper limit on grid lines in one scene; beyond it the grid is omitted.
pub const MAX_GRID_LINES: usize = 10_000;

// ── Default shapes ──────────────────────────────────────────────

pub const DEFAULT_RECT: (f64, f64, f64, f64) = (100.0, 90.0, 240.0, 140.0);
pub const DEFAULT_CIRCLE: (f64, f64, f64) = (360.0, 200.0, 70.0);

pub const DEFAULT_TRIANGLE: [Point; 3] = [
    Point { x: 160.0, y: 120.0 },
    Point { x: 320.0, y: 110.0 },
    Point { x: 240.0, y: 260.0 },
];

pub const DEFAULT_POLYGON: [Point; 4] = [
    Point { x: 480.0, y: 110.0 },
    Point { x: 620.0, y: 140.0 },
    Point { x: 640.0, y: 260.0 },
    Point { x: 520.0, y: 300.0 },
];
