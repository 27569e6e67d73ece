use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert_eq!(state, InputState::Idle);
    assert!(!state.is_dragging());
    assert!(state.session().is_none());
}

#[test]
fn input_state_dragging_exposes_session() {
    let session = DragSession { target: HitPart::Circle, pointer_offset: pt(1.0, 2.0) };
    let state = InputState::Dragging(session);
    assert!(state.is_dragging());
    assert_eq!(state.session(), Some(&session));
}

// =============================================================
// DragSession
// =============================================================

#[test]
fn from_hit_records_offset_from_anchor() {
    let hit = Hit { part: HitPart::Rect, anchor: pt(100.0, 90.0) };
    let session = DragSession::from_hit(hit, pt(150.0, 120.0));
    assert_eq!(session.target, HitPart::Rect);
    assert_eq!(session.pointer_offset, pt(50.0, 30.0));
}

#[test]
fn candidate_preserves_grab_point() {
    let hit = Hit { part: HitPart::Rect, anchor: pt(100.0, 90.0) };
    let session = DragSession::from_hit(hit, pt(150.0, 120.0));
    assert_eq!(session.candidate(pt(170.0, 125.0)), pt(120.0, 95.0));
}

#[test]
fn candidate_at_grab_point_is_anchor() {
    let hit = Hit { part: HitPart::PolygonVertex(3), anchor: pt(520.0, 300.0) };
    let session = DragSession::from_hit(hit, pt(515.0, 296.0));
    assert_eq!(session.candidate(pt(515.0, 296.0)), pt(520.0, 300.0));
}
