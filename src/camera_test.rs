#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn point_add_and_sub() {
    let a = Point::new(5.0, 7.0);
    let b = Point::new(2.0, 3.0);
    assert_eq!(a - b, Point::new(3.0, 4.0));
    assert_eq!(a + b, Point::new(7.0, 10.0));
    assert_eq!((a - b) + b, a);
}

#[test]
fn point_distance_to() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance_to(b), 5.0));
    assert!(approx_eq(b.distance_to(a), 5.0));
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- Camera defaults ---

#[test]
fn point_is_finite() {
    assert!(Point::new(1.0, -2.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.dpr, 1.0);
}

#[test]
fn camera_new_replaces_invalid_zoom_and_dpr() {
    let cam = Camera::new(5.0, 6.0, 0.0, f64::NAN);
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.dpr, 1.0);
    assert_eq!(cam.pan_x, 5.0);
    assert_eq!(cam.pan_y, 6.0);

    let cam = Camera::new(0.0, 0.0, -2.0, f64::INFINITY);
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.dpr, 1.0);
}

#[test]
fn camera_new_keeps_valid_values() {
    let cam = Camera::new(1.0, 2.0, 1.5, 2.0);
    assert_eq!(cam, Camera { pan_x: 1.0, pan_y: 2.0, zoom: 1.5, dpr: 2.0 });
}

// --- to_model_space ---

#[test]
fn to_model_space_identity() {
    let cam = Camera::default();
    let model = cam.to_model_space(Point::new(50.0, 75.0));
    assert!(point_approx_eq(model, Point::new(50.0, 75.0)));
}

#[test]
fn to_model_space_with_zoom() {
    let cam = Camera::new(0.0, 0.0, 4.0, 1.0);
    let model = cam.to_model_space(Point::new(40.0, 80.0));
    assert!(point_approx_eq(model, Point::new(10.0, 20.0)));
}

#[test]
fn to_model_space_with_pan() {
    let cam = Camera::new(100.0, 50.0, 1.0, 1.0);
    let model = cam.to_model_space(Point::new(100.0, 50.0));
    assert!(point_approx_eq(model, Point::new(0.0, 0.0)));
}

#[test]
fn to_model_space_with_dpr() {
    let cam = Camera::new(0.0, 0.0, 1.0, 2.0);
    let model = cam.to_model_space(Point::new(200.0, 100.0));
    assert!(point_approx_eq(model, Point::new(100.0, 50.0)));
}

#[test]
fn to_model_space_with_dpr_pan_and_zoom() {
    let cam = Camera::new(20.0, 10.0, 2.0, 2.0);
    // (100 / 2 - 20) / 2 = 15, (60 / 2 - 10) / 2 = 10
    let model = cam.to_model_space(Point::new(100.0, 60.0));
    assert!(point_approx_eq(model, Point::new(15.0, 10.0)));
}

#[test]
fn to_model_space_negative_coords() {
    let cam = Camera::default();
    let model = cam.to_model_space(Point::new(-10.0, -20.0));
    assert!(point_approx_eq(model, Point::new(-10.0, -20.0)));
}

#[test]
fn to_model_space_through_trait_object() {
    let cam = Camera::new(10.0, 0.0, 1.0, 1.0);
    let mapper: &dyn CoordinateMapper = &cam;
    assert!(point_approx_eq(mapper.to_model_space(Point::new(10.0, 5.0)), Point::new(0.0, 5.0)));
}

// --- model_to_device ---

#[test]
fn model_to_device_with_pan_and_zoom() {
    let cam = Camera::new(20.0, 10.0, 3.0, 1.0);
    let device = cam.model_to_device(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(device, Point::new(35.0, 25.0)));
}

// --- Round trips ---

#[test]
fn round_trip_fractional_transform() {
    let cam = Camera::new(13.7, -42.3, 0.75, 1.25);
    let model = Point::new(333.3, -999.9);
    let back = cam.to_model_space(cam.model_to_device(model));
    assert!((back.x - model.x).abs() < 1e-9);
    assert!((back.y - model.y).abs() < 1e-9);
}

#[test]
fn round_trip_device_first() {
    let cam = Camera::new(10.0, 20.0, 1.5, 2.0);
    let device = Point::new(400.0, 300.0);
    let back = cam.model_to_device(cam.to_model_space(device));
    assert!(point_approx_eq(device, back));
}

// --- device_dist_to_model ---

#[test]
fn device_dist_to_model_identity() {
    let cam = Camera::default();
    assert!(approx_eq(cam.device_dist_to_model(42.0), 42.0));
}

#[test]
fn device_dist_to_model_scales_by_zoom_and_dpr() {
    let cam = Camera::new(999.0, -999.0, 2.0, 2.0);
    assert!(approx_eq(cam.device_dist_to_model(12.0), 3.0));
}
