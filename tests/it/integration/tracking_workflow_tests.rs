//! Mouse Tracking Workflow Integration Tests
//!
//! Full passes through the host: raw events in, published node outputs out.

use crate::helpers::{SessionBuilder, assert_point_close, parallel_viewport};
use glam::{DVec2, DVec3};
use mousenode::graph::{BooleanParam, Value};
use mousenode::types::Rect;

#[test]
fn test_alt_drag_publishes_and_propagates() {
    let mut session = SessionBuilder::new().with_wired_probe().build();
    assert_eq!(session.probe_solves(), 1.0);
    assert!(!session.pressed());

    let down = session.alt_down(400.0, 300.0);
    assert!(down.canceled);
    assert_eq!(down.delivered, 1);
    assert!(!down.drag_select_active);
    assert!(session.pressed());
    assert_eq!(session.pixel(), Some(DVec2::new(400.0, 300.0)));
    assert_eq!(
        session.tracker_output(2),
        Some(Value::Point(DVec2::new(0.5, 0.375)))
    );
    assert_eq!(session.probe_solves(), 2.0);

    let moved = session.alt_move(500.0, 320.0);
    assert!(moved.canceled);
    assert_eq!(session.pixel(), Some(DVec2::new(500.0, 320.0)));
    assert_eq!(session.probe_solves(), 3.0);

    // Release publishes the falling edge but keeps the dragged position:
    // a press is the only thing an up event retires, never the capture.
    session.alt_up(520.0, 330.0);
    assert!(!session.pressed());
    assert_eq!(session.pixel(), Some(DVec2::new(500.0, 320.0)));
    assert_eq!(session.probe_solves(), 4.0);
}

#[test]
fn test_published_line_follows_the_view_ray() {
    let mut session = SessionBuilder::new().with_tracker().build();
    assert_eq!(session.tracker_output(0), None);

    session.alt_down(400.0, 300.0);
    let Some(Value::Line(line)) = session.tracker_output(0) else {
        panic!("no line published after a capture");
    };
    // Perspective camera at (0, -30, 0) aimed at the origin: the center
    // pixel's ray runs down the Y axis, ending a near-clip from the camera.
    assert_point_close(line.to, DVec3::new(0.0, -29.9, 0.0));
    assert!(line.from.y > line.to.y);
}

#[test]
fn test_parallel_camera_publishes_plane_projected_line() {
    let mut session = SessionBuilder::new()
        .with_viewport(parallel_viewport())
        .with_tracker()
        .build();

    session.alt_down(600.0, 150.0);
    let Some(Value::Line(line)) = session.tracker_output(0) else {
        panic!("no line published after a capture");
    };
    // Parallel camera at (0, -40, 10) aimed at (0, 10, 10): the segment
    // starts on the camera plane under the pixel and runs one
    // camera-to-target distance along +Y.
    assert_point_close(line.from, DVec3::new(20.0 / 3.0, -40.0, 15.0));
    assert_point_close(line.to, DVec3::new(20.0 / 3.0, 10.0, 15.0));
    assert_eq!(
        session.tracker_output(2),
        Some(Value::Point(DVec2::new(0.75, 0.1875)))
    );
}

#[test]
fn test_outputs_freeze_while_off() {
    let mut session = SessionBuilder::new().with_tracker().build();
    session.alt_down(400.0, 300.0);
    session.alt_up(400.0, 300.0);
    assert_eq!(session.pixel(), Some(DVec2::new(400.0, 300.0)));

    // Gate the tracker off through its On input.
    let toggle = session
        .host
        .document
        .add(Box::new(BooleanParam::new(false)), Rect::new(0.0, 0.0, 80.0, 40.0))
        .unwrap();
    let tracker = session.tracker();
    session.host.document.connect(toggle, 0, tracker, 0).unwrap();
    session.host.solve().unwrap();
    assert_eq!(session.host.dispatcher.live_count(), 0);

    // Events fall through to the host; published outputs stay frozen at
    // the last captured position.
    let outcome = session.alt_down(500.0, 320.0);
    assert!(!outcome.canceled);
    assert_eq!(outcome.delivered, 0);
    assert!(outcome.drag_select_active);
    assert_eq!(session.pixel(), Some(DVec2::new(400.0, 300.0)));
    session.alt_up(500.0, 320.0);

    // Toggling the switch back on revives the subscription.
    session.host.document.activate_menu(toggle, "toggle").unwrap();
    session.host.solve().unwrap();
    assert_eq!(session.host.dispatcher.live_count(), 1);

    let outcome = session.alt_down(240.0, 120.0);
    assert!(outcome.canceled);
    assert!(session.pressed());
    assert_eq!(session.pixel(), Some(DVec2::new(240.0, 120.0)));
}

#[test]
fn test_menu_toggle_drops_alt_requirement() {
    let mut session = SessionBuilder::new().with_tracker().build();

    // Alt-gated by default: a plain press reaches the listener and is
    // declined.
    let outcome = session.plain_down(200.0, 150.0);
    assert_eq!(outcome.delivered, 1);
    assert!(!outcome.canceled);
    assert!(!session.pressed());
    session.plain_up(200.0, 150.0);

    let tracker = session.tracker();
    session
        .host
        .document
        .activate_menu(tracker, "require_alt_key")
        .unwrap();
    session.host.solve().unwrap();

    let outcome = session.plain_down(200.0, 150.0);
    assert!(outcome.canceled);
    assert!(session.pressed());
    assert_eq!(session.pixel(), Some(DVec2::new(200.0, 150.0)));
}

#[test]
fn test_locked_tracker_lets_events_fall_through() {
    let mut session = SessionBuilder::new().with_tracker().build();
    let tracker = session.tracker();
    session.host.document.set_locked(tracker, true);

    let outcome = session.alt_down(100.0, 100.0);
    assert_eq!(outcome.delivered, 1);
    assert!(!outcome.canceled);
    assert!(outcome.drag_select_active);
    assert!(!session.pressed());

    // The drag-select band ends up covering the locked tracker, which
    // still participates in selection like any other node.
    session.alt_move(700.0, 500.0);
    session.alt_up(700.0, 500.0);
    assert!(session.host.document.entry(tracker).unwrap().selected);
}
