#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either device or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Converts raw pointer coordinates into the shape model's coordinate space.
///
/// Implementations must be pure: the result depends only on the mapper's
/// current transform and the input point.
pub trait CoordinateMapper {
    /// Map a device-space point (as delivered by the pointer event) to model space.
    fn to_model_space(&self, device: Point) -> Point;
}

/// The renderer's view transform: device pixel ratio, then pan, then zoom.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
/// `dpr` is the device pixel ratio (device pixels per CSS pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub dpr: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, dpr: 1.0 }
    }
}

impl Camera {
    /// Build a camera, replacing a non-finite or non-positive `zoom`/`dpr` with 1.0.
    #[must_use]
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64, dpr: f64) -> Self {
        Self { pan_x, pan_y, zoom: positive_or_one(zoom), dpr: positive_or_one(dpr) }
    }

    /// Convert a model-space point to device coordinates.
    #[must_use]
    pub fn model_to_device(&self, model: Point) -> Point {
        Point {
            x: (model.x * self.zoom + self.pan_x) * self.dpr,
            y: (model.y * self.zoom + self.pan_y) * self.dpr,
        }
    }

    /// Convert a device-space distance to a model-space distance.
    #[must_use]
    pub fn device_dist_to_model(&self, device_dist: f64) -> f64 {
        device_dist / (self.dpr * self.zoom)
    }
}

impl CoordinateMapper for Camera {
    fn to_model_space(&self, device: Point) -> Point {
        Point {
            x: (device.x / self.dpr - self.pan_x) / self.zoom,
            y: (device.y / self.dpr - self.pan_y) / self.zoom,
        }
    }
}

fn positive_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}
