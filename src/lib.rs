//! Interactive geometry editor core.
//!
//! A rectangle/circle/triangle/polygon playground: a small computational
//! geometry library (area, perimeter, centroid, interior angles) under a
//! pointer-driven state machine (hit-testing, dragging, grid snapping,
//! polygon construction, vertex selection and numeric editing).
//!
//! The host UI forwards pointer events to an [`engine::Editor`], repaints from
//! [`engine::Editor::scene`], and reacts to the returned [`engine::Action`]s.
//! Drawing itself happens outside this crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor state, pointer handlers, direct edits, queries |
//! | [`shapes`] | Shape model, mode and selection, with invariant-enforcing setters |
//! | [`geometry`] | Distance, perimeter, area, centroid, angles, snapping |
//! | [`camera`] | Points and the device-to-model coordinate mapper |
//! | [`input`] | Pointer state machine states and the drag session |
//! | [`hit`] | Mode-specific hit-testing |
//! | [`scene`] | Pure-data scene for the renderer |
//! | [`config`] | Initialization options |
//! | [`consts`] | Shared numeric constants (hit radius, defaults, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod scene;
pub mod shapes;
