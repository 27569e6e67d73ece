//! Input model: the pointer gesture state machine's states.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. A drag carries a [`DragSession`] with everything needed to turn
//! later pointer positions into anchor positions; it never outlives the
//! gesture and is never exposed outside the engine.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::hit::{Hit, HitPart};

/// Transient record linking a pointer-down hit to later pointer moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The shape part being dragged.
    pub target: HitPart,
    /// Model-space offset from the target's anchor to the grab point.
    pub pointer_offset: Point,
}

impl DragSession {
    /// Start a drag from a hit at `model_pt`, preserving the grab offset.
    #[must_use]
    pub fn from_hit(hit: Hit, model_pt: Point) -> Self {
        Self { target: hit.part, pointer_offset: model_pt - hit.anchor }
    }

    /// Where the target's anchor goes when the pointer is at `model_pt`,
    /// before snapping and clamping.
    #[must_use]
    pub fn candidate(&self, model_pt: Point) -> Point {
        model_pt - self.pointer_offset
    }
}

/// State of the pointer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A shape part is being dragged.
    Dragging(DragSession),
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The open drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}
