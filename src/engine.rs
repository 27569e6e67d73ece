//! The editor engine: pointer events in, shape mutations and host actions out.
//!
//! [`Editor`] owns the [`ShapeModel`], the coordinate mapper, the config and the
//! pointer state machine. Every pointer handler maps the device point to model
//! space, runs the mode's hit-test, applies the resulting mutation, and returns
//! the [`Action`]s the host should react to (repaint, cursor, selection panel).
//!
//! Direct numeric edits from a side panel go through the same engine and are
//! rejected with [`EditError::DragInProgress`] while a drag is open, so a
//! gesture and a panel edit never interleave on the same shape.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;

use tracing::{debug, warn};

use crate::camera::{Camera, CoordinateMapper, Point};
use crate::config::{self, ConfigError, EditorConfig};
use crate::geometry;
use crate::hit::{self, HitPart};
use crate::input::{DragSession, InputState};
use crate::scene::{self, Scene};
use crate::shapes::{Bounds, Measurements, Mode, Selection, ShapeError, ShapeModel};

/// Cursor shown while a shape part is grabbed.
const CURSOR_GRABBING: &str = "grabbing";
/// Cursor shown over the canvas otherwise.
const CURSOR_DEFAULT: &str = "crosshair";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The active mode switched.
    ModeChanged(Mode),
    /// The selection was replaced.
    SelectionChanged(Selection),
    /// The shape shown in this mode changed geometry.
    ShapeChanged(Mode),
    /// A point was appended to the polygon at `index`.
    VertexAdded { index: usize },
    /// The polygon went from open to closed.
    PolygonClosed,
    /// The host should switch the canvas cursor.
    SetCursor(String),
    /// The scene is stale and should be redrawn.
    RenderNeeded,
}

/// A numeric field of the current selection, as shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Rect origin x, circle center x, or vertex x.
    X,
    /// Rect origin y, circle center y, or vertex y.
    Y,
    Width,
    Height,
    Radius,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Radius => "radius",
        })
    }
}

/// Error returned by direct (non-pointer) edits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// A drag session is open; edits are accepted again after pointer-up.
    #[error("edit rejected while a drag is in progress")]
    DragInProgress,
    /// A selection-relative edit was requested with nothing selected.
    #[error("nothing is selected")]
    NoSelection,
    /// The selected shape has no such field.
    #[error("{field} is not editable on a {mode} selection")]
    FieldNotApplicable { field: Field, mode: Mode },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Interactive geometry editor state and event handling.
///
/// Generic over the [`CoordinateMapper`] so a renderer can supply its own
/// device-to-model transform; the default [`Camera`] is the identity.
pub struct Editor<M: CoordinateMapper = Camera> {
    shapes: ShapeModel,
    mapper: M,
    config: EditorConfig,
    input: InputState,
}

impl Default for Editor<Camera> {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            shapes: ShapeModel::new(Bounds::new(config.canvas_width, config.canvas_height)),
            mapper: Camera::default(),
            config,
            input: InputState::Idle,
        }
    }
}

impl Editor<Camera> {
    /// Create an editor with an identity camera.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_mapper(config, Camera::default())
    }
}

impl<M: CoordinateMapper> Editor<M> {
    /// Create an editor that maps pointer input through `mapper`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`EditorConfig::validate`].
    pub fn with_mapper(config: EditorConfig, mapper: M) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(width = config.canvas_width, height = config.canvas_height, "editor initialized");
        Ok(Self {
            shapes: ShapeModel::new(Bounds::new(config.canvas_width, config.canvas_height)),
            mapper,
            config,
            input: InputState::Idle,
        })
    }

    // --- Config ---

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Applies from the next drag move or polygon append.
    pub fn set_snap_to_grid(&mut self, snap: bool) -> Vec<Action> {
        self.config.snap_to_grid = snap;
        vec![Action::RenderNeeded]
    }

    /// Renderer hint only.
    pub fn set_show_grid(&mut self, show: bool) -> Vec<Action> {
        self.config.show_grid = show;
        vec![Action::RenderNeeded]
    }

    /// Renderer hint only. Clamped into `0.0..=1.0`; `NaN` is ignored.
    pub fn set_fill_opacity(&mut self, opacity: f64) -> Vec<Action> {
        if opacity.is_nan() {
            return Vec::new();
        }
        self.config.fill_opacity = opacity.clamp(0.0, 1.0);
        vec![Action::RenderNeeded]
    }

    /// Change the snapping quantum.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GridSize`] for a non-finite size or one below 1.
    pub fn set_grid_size(&mut self, grid_size: f64) -> Result<Vec<Action>, ConfigError> {
        config::validate_grid_size(grid_size)?;
        self.config.grid_size = grid_size;
        Ok(vec![Action::RenderNeeded])
    }

    // --- Mapper ---

    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Replace the device-to-model transform (e.g. after the renderer pans or zooms).
    pub fn set_mapper(&mut self, mapper: M) {
        self.mapper = mapper;
    }

    // --- Mode ---

    /// Switch the active mode, ending any open drag. Other shapes keep their state.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.is_dragging() {
            self.input = InputState::Idle;
            actions.push(Action::SetCursor(CURSOR_DEFAULT.into()));
        }
        let before = self.shapes.selection();
        if self.shapes.set_mode(mode) {
            debug!(%mode, "mode switched");
            actions.push(Action::ModeChanged(mode));
            if self.shapes.selection() != before {
                actions.push(Action::SelectionChanged(self.shapes.selection()));
            }
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Pointer input ---

    /// Pointer pressed: start a drag on a hit, append a polygon point on an
    /// empty-space press of an open polygon, otherwise clear the selection.
    pub fn on_pointer_down(&mut self, device_pt: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            debug!("pointer-down during drag; discarding stale session");
            self.input = InputState::Idle;
        }

        let model_pt = self.mapper.to_model_space(device_pt);
        if !model_pt.is_finite() {
            debug!(x = model_pt.x, y = model_pt.y, "pointer-down off the model plane; ignored");
            return Vec::new();
        }
        let mut actions = Vec::new();

        if let Some(hit) = hit::hit_test(model_pt, &self.shapes) {
            self.input = InputState::Dragging(DragSession::from_hit(hit, model_pt));
            debug!(part = ?hit.part, x = model_pt.x, y = model_pt.y, "drag started");
            self.select(hit.part.into(), &mut actions);
            actions.push(Action::SetCursor(CURSOR_GRABBING.into()));
            actions.push(Action::RenderNeeded);
            return actions;
        }

        if self.shapes.mode() == Mode::Polygon && !self.shapes.polygon().closed {
            let index = self.shapes.add_polygon_point(self.snap(model_pt));
            debug!(index, "polygon vertex appended");
            actions.push(Action::VertexAdded { index });
            actions.push(Action::ShapeChanged(Mode::Polygon));
            actions.push(Action::RenderNeeded);
            return actions;
        }

        self.select(Selection::None, &mut actions);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer moved: move the dragged anchor, snapped and clamped. No-op when idle.
    pub fn on_pointer_move(&mut self, device_pt: Point) -> Vec<Action> {
        let InputState::Dragging(session) = self.input else {
            return Vec::new();
        };

        let model_pt = self.mapper.to_model_space(device_pt);
        let anchor = self.snap(session.candidate(model_pt));

        let moved = match session.target {
            HitPart::Rect => {
                let r = self.shapes.rect();
                self.shapes.set_rect_bounds(anchor.x, anchor.y, r.w, r.h);
                Ok(Mode::Rect)
            }
            HitPart::Circle => {
                let r = self.shapes.circle().r;
                self.shapes.set_circle(anchor.x, anchor.y, r);
                Ok(Mode::Circle)
            }
            HitPart::TriangleVertex(i) => self.shapes.set_triangle_vertex(i, anchor).map(|()| Mode::Triangle),
            HitPart::PolygonVertex(i) => self.shapes.set_polygon_vertex(i, anchor).map(|()| Mode::Polygon),
        };

        match moved {
            Ok(mode) => vec![Action::ShapeChanged(mode), Action::RenderNeeded],
            Err(e) => {
                warn!(error = %e, "drag target vanished; ending drag");
                self.input = InputState::Idle;
                vec![Action::SetCursor(CURSOR_DEFAULT.into())]
            }
        }
    }

    /// Pointer released: always returns to idle, with no further mutation.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if let InputState::Dragging(session) = self.input {
            debug!(part = ?session.target, "drag ended");
            self.input = InputState::Idle;
            return vec![Action::SetCursor(CURSOR_DEFAULT.into())];
        }
        Vec::new()
    }

    /// Double-click: in polygon mode with three or more points, close the
    /// polygon. Never reopens it.
    pub fn on_double_click(&mut self, device_pt: Point) -> Vec<Action> {
        if self.shapes.mode() != Mode::Polygon {
            return Vec::new();
        }
        let model_pt = self.mapper.to_model_space(device_pt);
        match self.shapes.close_polygon() {
            Ok(true) => {
                debug!(x = model_pt.x, y = model_pt.y, "polygon closed by double-click");
                vec![Action::PolygonClosed, Action::ShapeChanged(Mode::Polygon), Action::RenderNeeded]
            }
            Ok(false) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "double-click close ignored");
                Vec::new()
            }
        }
    }

    // --- Selection ---

    /// Replace the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::VertexOutOfRange`] for a vertex that does not exist.
    pub fn set_selection(&mut self, selection: Selection) -> Result<Vec<Action>, EditError> {
        self.shapes.set_selection(selection).inspect_err(|e| warn!(error = %e, "selection rejected"))?;
        Ok(vec![Action::SelectionChanged(selection), Action::RenderNeeded])
    }

    // --- Direct shape edits ---

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn set_rect_bounds(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        self.shapes.set_rect_bounds(x, y, w, h);
        Ok(changed(Mode::Rect))
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn set_circle(&mut self, cx: f64, cy: f64, r: f64) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        self.shapes.set_circle(cx, cy, r);
        Ok(changed(Mode::Circle))
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging and
    /// [`ShapeError::VertexOutOfRange`] unless `index` is 0, 1 or 2.
    pub fn set_triangle_vertex(&mut self, index: usize, point: Point) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        self.shapes
            .set_triangle_vertex(index, point)
            .inspect_err(|e| warn!(error = %e, "triangle vertex edit rejected"))?;
        Ok(changed(Mode::Triangle))
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn reset_triangle(&mut self) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        self.shapes.reset_triangle();
        Ok(changed(Mode::Triangle))
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging and
    /// [`ShapeError::VertexOutOfRange`] for an index past the last point.
    pub fn set_polygon_vertex(&mut self, index: usize, point: Point) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        self.shapes
            .set_polygon_vertex(index, point)
            .inspect_err(|e| warn!(error = %e, "polygon vertex edit rejected"))?;
        Ok(changed(Mode::Polygon))
    }

    /// Append `point` to the polygon, reopening it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn add_polygon_point(&mut self, point: Point) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        let index = self.shapes.add_polygon_point(point);
        let mut actions = vec![Action::VertexAdded { index }];
        actions.extend(changed(Mode::Polygon));
        Ok(actions)
    }

    /// Append the canvas center to the polygon, reopening it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn add_polygon_point_at_center(&mut self) -> Result<Vec<Action>, EditError> {
        let center = self.shapes.bounds().center();
        self.add_polygon_point(center)
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn delete_last_polygon_point(&mut self) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        let before = self.shapes.selection();
        if self.shapes.delete_last_polygon_point().is_none() {
            return Ok(Vec::new());
        }
        let mut actions = Vec::new();
        if self.shapes.selection() != before {
            actions.push(Action::SelectionChanged(self.shapes.selection()));
        }
        actions.extend(changed(Mode::Polygon));
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging.
    pub fn reset_polygon(&mut self) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        let before = self.shapes.selection();
        self.shapes.reset_polygon();
        let mut actions = Vec::new();
        if self.shapes.selection() != before {
            actions.push(Action::SelectionChanged(self.shapes.selection()));
        }
        actions.extend(changed(Mode::Polygon));
        Ok(actions)
    }

    /// Open a closed polygon or close an open one.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::DragInProgress`] while dragging and
    /// [`ShapeError::PolygonTooSmall`] when closing fewer than three points;
    /// the host should tell the user to add more points.
    pub fn toggle_close_polygon(&mut self) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        let closed = self
            .shapes
            .toggle_close_polygon()
            .inspect_err(|e| warn!(error = %e, "polygon close rejected"))?;
        let mut actions = Vec::new();
        if closed {
            actions.push(Action::PolygonClosed);
        }
        actions.extend(changed(Mode::Polygon));
        Ok(actions)
    }

    /// Set one numeric field of the current selection, as typed into the side panel.
    ///
    /// Values are clamped like the matching shape setter.
    ///
    /// # Errors
    ///
    /// - [`EditError::DragInProgress`] while dragging
    /// - [`EditError::NoSelection`] with nothing selected
    /// - [`EditError::FieldNotApplicable`] for a field the selection lacks
    pub fn edit_selected(&mut self, field: Field, value: f64) -> Result<Vec<Action>, EditError> {
        self.ensure_idle()?;
        let selection = self.shapes.selection();
        let Some(mode) = selection.mode() else {
            return Err(EditError::NoSelection);
        };
        let not_applicable = EditError::FieldNotApplicable { field, mode };

        match selection {
            Selection::None => return Err(EditError::NoSelection),
            Selection::Rect => {
                let r = self.shapes.rect();
                let (x, y, w, h) = match field {
                    Field::X => (value, r.y, r.w, r.h),
                    Field::Y => (r.x, value, r.w, r.h),
                    Field::Width => (r.x, r.y, value, r.h),
                    Field::Height => (r.x, r.y, r.w, value),
                    Field::Radius => return Err(not_applicable),
                };
                self.shapes.set_rect_bounds(x, y, w, h);
            }
            Selection::Circle => {
                let c = self.shapes.circle();
                let (cx, cy, r) = match field {
                    Field::X => (value, c.cy, c.r),
                    Field::Y => (c.cx, value, c.r),
                    Field::Radius => (c.cx, c.cy, value),
                    Field::Width | Field::Height => return Err(not_applicable),
                };
                self.shapes.set_circle(cx, cy, r);
            }
            Selection::TriangleVertex(i) => {
                let current = vertex(&self.shapes.triangle().points, Mode::Triangle, i)?;
                let p = with_axis(current, field, value).ok_or(not_applicable)?;
                self.shapes.set_triangle_vertex(i, p)?;
            }
            Selection::PolygonVertex(i) => {
                let current = vertex(&self.shapes.polygon().points, Mode::Polygon, i)?;
                let p = with_axis(current, field, value).ok_or(not_applicable)?;
                self.shapes.set_polygon_vertex(i, p)?;
            }
        }
        Ok(changed(mode))
    }

    // --- Queries ---

    #[must_use]
    pub fn shapes(&self) -> &ShapeModel {
        &self.shapes
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.shapes.mode()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.shapes.selection()
    }

    /// Whether a drag session is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Measurements of the active mode's shape.
    #[must_use]
    pub fn measurements(&self) -> Measurements {
        self.shapes.measurements(self.shapes.mode())
    }

    /// Measurements of any shape, active or not.
    #[must_use]
    pub fn measurements_for(&self, mode: Mode) -> Measurements {
        self.shapes.measurements(mode)
    }

    /// Drawable description of the active shape for the renderer.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(&self.shapes, &self.config)
    }

    // --- Internals ---

    fn snap(&self, p: Point) -> Point {
        if self.config.snap_to_grid {
            geometry::snap_to_grid(p, self.config.grid_size)
        } else {
            p
        }
    }

    fn select(&mut self, selection: Selection, actions: &mut Vec<Action>) {
        if self.shapes.selection() == selection {
            return;
        }
        match self.shapes.set_selection(selection) {
            Ok(()) => actions.push(Action::SelectionChanged(selection)),
            Err(e) => warn!(error = %e, "hit produced an invalid selection"),
        }
    }

    fn ensure_idle(&self) -> Result<(), EditError> {
        if self.input.is_dragging() {
            warn!("direct edit rejected during drag");
            return Err(EditError::DragInProgress);
        }
        Ok(())
    }
}

fn changed(mode: Mode) -> Vec<Action> {
    vec![Action::ShapeChanged(mode), Action::RenderNeeded]
}

fn vertex(points: &[Point], shape: Mode, index: usize) -> Result<Point, ShapeError> {
    points
        .get(index)
        .copied()
        .ok_or(ShapeError::VertexOutOfRange { shape, index, len: points.len() })
}

fn with_axis(p: Point, field: Field, value: f64) -> Option<Point> {
    match field {
        Field::X => Some(Point::new(value, p.y)),
        Field::Y => Some(Point::new(p.x, value)),
        Field::Width | Field::Height | Field::Radius => None,
    }
}
