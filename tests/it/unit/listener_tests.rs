//! Unit tests for the tracker's event listener.

use glam::DVec2;
use mousenode::graph::ListenerCtx;
use mousenode::tracker::TrackerListener;
use mousenode::types::ListenerToken;
use mousenode::{Modifiers, MouseButton, MouseEvent, Viewport};

use crate::helpers::perspective_viewport;

fn unlocked(viewport: &Viewport) -> ListenerCtx<'_> {
    ListenerCtx {
        viewport,
        token: ListenerToken(0),
        locked: false,
    }
}

fn locked(viewport: &Viewport) -> ListenerCtx<'_> {
    ListenerCtx {
        viewport,
        token: ListenerToken(0),
        locked: true,
    }
}

#[test]
fn test_press_drag_release_cycle() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));
    assert!(listener.pressed());
    assert!(listener.consume_propagation());

    let mut drag = MouseEvent::moved(DVec2::new(300.0, 200.0), Modifiers::ALT);
    listener.handle(&mut drag, &unlocked(&vp));
    assert_eq!(listener.tracked().unwrap().pixel, DVec2::new(300.0, 200.0));
    assert!(listener.consume_propagation());

    let mut up = MouseEvent::up(MouseButton::Left, DVec2::new(300.0, 200.0), Modifiers::ALT);
    listener.handle(&mut up, &unlocked(&vp));
    assert!(!listener.pressed());
    // The release edge propagates once, then the flag is spent.
    assert!(listener.consume_propagation());
    assert!(!listener.consume_propagation());
}

#[test]
fn test_alt_released_mid_drag_stops_capturing() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));

    // Alt slips off but the button stays down: moves fail the gate, so the
    // press stays latched and the sample does not advance.
    let mut drift = MouseEvent::moved(DVec2::new(500.0, 500.0), Modifiers::NONE);
    let response = listener.handle(&mut drift, &unlocked(&vp));

    assert!(!response.expire_owner);
    assert!(!drift.cancel);
    assert!(listener.pressed());
    assert_eq!(listener.tracked().unwrap().pixel, DVec2::new(100.0, 100.0));

    // Alt comes back: capture resumes from the latched press.
    let mut resume = MouseEvent::moved(DVec2::new(520.0, 510.0), Modifiers::ALT);
    listener.handle(&mut resume, &unlocked(&vp));
    assert_eq!(listener.tracked().unwrap().pixel, DVec2::new(520.0, 510.0));
}

#[test]
fn test_locking_mid_drag_freezes_capture() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));

    let mut drag = MouseEvent::moved(DVec2::new(400.0, 400.0), Modifiers::ALT);
    let response = listener.handle(&mut drag, &locked(&vp));

    assert_eq!(listener.tracked().unwrap().pixel, DVec2::new(100.0, 100.0));
    assert!(!drag.cancel);
    assert!(!response.retire_listener);
}

#[test]
fn test_middle_button_release_is_not_a_release() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));

    let mut up = MouseEvent::up(MouseButton::Middle, DVec2::new(100.0, 100.0), Modifiers::ALT);
    let response = listener.handle(&mut up, &unlocked(&vp));

    assert!(listener.pressed());
    assert!(!response.expire_owner);
    assert!(!up.cancel);
}

#[test]
fn test_leave_then_return_requires_new_press() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));

    let mut leave = MouseEvent::leave(DVec2::new(-1.0, -1.0));
    listener.handle(&mut leave, &unlocked(&vp));
    assert!(!listener.pressed());

    // Back inside without the button: gated moves no longer capture.
    let mut hover = MouseEvent::moved(DVec2::new(200.0, 200.0), Modifiers::ALT);
    listener.handle(&mut hover, &unlocked(&vp));
    assert_eq!(listener.tracked().unwrap().pixel, DVec2::new(100.0, 100.0));
}

#[test]
fn test_leave_loses_the_release_edge() {
    let vp = perspective_viewport();
    let mut listener = TrackerListener::new();

    let mut down = MouseEvent::down(MouseButton::Left, DVec2::new(100.0, 100.0), Modifiers::ALT);
    listener.handle(&mut down, &unlocked(&vp));
    assert!(listener.consume_propagation());

    // Leaving clears the press without setting the release flag, so the
    // next expiry does not ripple downstream.
    let mut leave = MouseEvent::leave(DVec2::new(-1.0, -1.0));
    listener.handle(&mut leave, &unlocked(&vp));
    assert!(!listener.consume_propagation());
}
