//! Editor configuration supplied by the hosting UI at initialization.
//!
//! The host passes a JSON object; absent keys fall back to the defaults in
//! [`crate::consts`]. `show_grid` and `fill_opacity` are renderer hints and
//! never affect the shape model.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_FILL_OPACITY, DEFAULT_GRID_SIZE, MIN_EXTENT, MIN_GRID_SIZE,
};

/// Error returned by [`EditorConfig::from_json`] and [`EditorConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON text could not be parsed into a config object.
    #[error("invalid editor config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Canvas width or height is not a finite number of at least 1.
    #[error("invalid canvas size {width}x{height}: both sides must be finite and at least 1")]
    CanvasSize { width: f64, height: f64 },
    /// Grid size is not a finite number of at least [`MIN_GRID_SIZE`].
    #[error("invalid grid size {0}: must be finite and at least 1")]
    GridSize(f64),
    /// Fill opacity lies outside `0.0..=1.0`.
    #[error("invalid fill opacity {0}: must be within 0..=1")]
    FillOpacity(f64),
}

/// Initialization options for an [`crate::engine::Editor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Right edge of the clamping bounds, in model units.
    pub canvas_width: f64,
    /// Bottom edge of the clamping bounds, in model units.
    pub canvas_height: f64,
    /// Quantization unit for snapping.
    pub grid_size: f64,
    /// Snap dragged anchors and newly appended polygon points to the grid.
    pub snap_to_grid: bool,
    /// Renderer hint: draw grid lines.
    pub show_grid: bool,
    /// Renderer hint: shape fill alpha in `0.0..=1.0`.
    pub fill_opacity: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            show_grid: true,
            fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields,
    /// and the matching validation error for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !valid_extent(self.canvas_width) || !valid_extent(self.canvas_height) {
            return Err(ConfigError::CanvasSize { width: self.canvas_width, height: self.canvas_height });
        }
        validate_grid_size(self.grid_size)?;
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ConfigError::FillOpacity(self.fill_opacity));
        }
        Ok(())
    }
}

/// Check a grid size on its own, for runtime changes.
pub(crate) fn validate_grid_size(grid_size: f64) -> Result<(), ConfigError> {
    if grid_size.is_finite() && grid_size >= MIN_GRID_SIZE {
        Ok(())
    } else {
        Err(ConfigError::GridSize(grid_size))
    }
}

fn valid_extent(v: f64) -> bool {
    v.is_finite() && v >= MIN_EXTENT
}
