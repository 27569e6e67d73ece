//! Pure geometry over point sequences: lengths, areas, centroids, angles.
//!
//! Every function here is side-effect free and total. Degenerate input
//! (too few points, zero-length edges, zero-area polygons) produces a defined
//! fallback value instead of an error or `NaN`.
//!
//! Sequences are treated as closed rings: the last point connects back to the
//! first.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::camera::Point;
use crate::consts::GEOMETRY_EPSILON;

/// Euclidean distance between `a` and `b`.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Sum of edge lengths around the ring, including the closing edge.
///
/// Returns 0 for fewer than 2 points.
#[must_use]
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    edges(points).map(|(a, b)| distance(a, b)).sum()
}

/// Signed shoelace area: positive for counter-clockwise winding in a y-up frame.
///
/// Returns 0 for fewer than 3 points.
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    edges(points).map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f64>() / 2.0
}

/// Absolute shoelace area.
///
/// Self-intersecting rings still yield a finite value (lobes of opposite
/// winding cancel).
#[must_use]
pub fn area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Geometric center of the ring.
///
/// - no points: `None`
/// - one point: that point
/// - two points: their midpoint
/// - three or more: the area-weighted polygon centroid, or the first point
///   when the signed area is below [`GEOMETRY_EPSILON`]
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    match points {
        [] => None,
        [p] => Some(*p),
        [a, b] => Some(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)),
        [first, ..] => {
            let mut twice_area = 0.0;
            let mut cx = 0.0;
            let mut cy = 0.0;
            for (a, b) in edges(points) {
                let cross = a.x * b.y - b.x * a.y;
                twice_area += cross;
                cx += (a.x + b.x) * cross;
                cy += (a.y + b.y) * cross;
            }
            let signed = twice_area / 2.0;
            if signed.abs() < GEOMETRY_EPSILON {
                return Some(*first);
            }
            Some(Point::new(cx / (6.0 * signed), cy / (6.0 * signed)))
        }
    }
}

/// Angle at `vertex` between the rays toward `prev` and `next`, in degrees.
///
/// Always in `[0, 180]`. A zero-length ray is given magnitude
/// [`GEOMETRY_EPSILON`], so coincident points yield 90° rather than `NaN`.
#[must_use]
pub fn interior_angle(prev: Point, vertex: Point, next: Point) -> f64 {
    let v1 = prev - vertex;
    let v2 = next - vertex;
    let dot = v1.x * v2.x + v1.y * v2.y;
    let mag1 = nonzero(v1.x.hypot(v1.y));
    let mag2 = nonzero(v2.x.hypot(v2.y));
    let cos = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle at every vertex of the ring, using wrap-around neighbours.
///
/// Empty for fewer than 3 points.
#[must_use]
pub fn interior_angles(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    (0..n)
        .map(|i| interior_angle(points[(i + n - 1) % n], points[i], points[(i + 1) % n]))
        .collect()
}

/// Round each axis to the nearest multiple of `grid`.
///
/// A non-finite or non-positive `grid` leaves the point unchanged.
#[must_use]
pub fn snap_to_grid(p: Point, grid: f64) -> Point {
    if !grid.is_finite() || grid <= 0.0 {
        return p;
    }
    Point::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}

/// Clamp `p` into `[0, width] × [0, height]`.
#[must_use]
pub fn clamp_to_bounds(p: Point, width: f64, height: f64) -> Point {
    Point::new(p.x.clamp(0.0, width), p.y.clamp(0.0, height))
}

/// Consecutive point pairs, wrapping last → first.
fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

fn nonzero(mag: f64) -> f64 {
    if mag > 0.0 { mag } else { GEOMETRY_EPSILON }
}
