//! Event handling and captured state for the mouse tracker.
//!
//! The listener is the stateful half of the tracker node: it decides which
//! events to accept, captures the mouse position on accepted presses and
//! drags, and remembers the press state between solves. Accepted events
//! claim the event (so the host skips drag-select) and retire the
//! subscription slot they arrived through; the node's next solve opens a
//! fresh slot. Pointer-leave is the one exception: it is never gated, never
//! claims the event, and only drops the pressed flag.

use crate::graph::node::{EventResponse, ListenerCtx};
use crate::input::coords::TrackedPosition;
use crate::input::events::{Modifiers, MouseButton, MouseEvent, MouseEventKind};

/// Captured mouse state plus the rules for updating it.
#[derive(Clone, Debug)]
pub struct TrackerListener {
    /// When set, only events with Alt as the sole modifier are accepted
    pub require_alt: bool,
    pressed: bool,
    just_released: bool,
    tracked: Option<TrackedPosition>,
}

impl Default for TrackerListener {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerListener {
    pub fn new() -> Self {
        Self {
            require_alt: true,
            pressed: false,
            just_released: false,
            tracked: None,
        }
    }

    /// Whether the left button is currently held (as far as accepted
    /// events have told us).
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// The most recent captured position, if any press or drag has been
    /// accepted yet.
    pub fn tracked(&self) -> Option<&TrackedPosition> {
        self.tracked.as_ref()
    }

    /// Drop the pressed flag without touching the captured position.
    pub fn clear_pressed(&mut self) {
        self.pressed = false;
    }

    /// Whether an expiry should ripple downstream, consuming the one-shot
    /// release flag as it answers. Captured data only changes while the
    /// button is held or on the release edge, so downstream work is skipped
    /// for plain gated moves.
    pub fn consume_propagation(&mut self) -> bool {
        let propagate = self.pressed || self.just_released;
        self.just_released = false;
        propagate
    }

    /// The modifier gate. Exact equality: Alt with Shift or Control held
    /// does not pass.
    fn gate_passes(&self, modifiers: Modifiers) -> bool {
        !self.require_alt || modifiers.is_exactly_alt()
    }

    /// Route one event. Returns what the node wants the host to do.
    pub fn handle(&mut self, event: &mut MouseEvent, ctx: &ListenerCtx<'_>) -> EventResponse {
        match event.kind {
            MouseEventKind::Down(button) => self.on_down(button, event, ctx),
            MouseEventKind::Up(button) => self.on_up(button, event, ctx),
            MouseEventKind::Move => self.on_move(event, ctx),
            MouseEventKind::Leave => {
                // Ungated and silent: the cursor left the viewport, so the
                // button can no longer be considered held
                self.pressed = false;
                EventResponse::ignored()
            }
        }
    }

    fn on_down(
        &mut self,
        button: MouseButton,
        event: &mut MouseEvent,
        ctx: &ListenerCtx<'_>,
    ) -> EventResponse {
        if !self.gate_passes(event.modifiers) {
            return EventResponse::ignored();
        }
        if button != MouseButton::Left || ctx.locked {
            return EventResponse::ignored();
        }
        self.pressed = true;
        self.tracked = Some(TrackedPosition::capture(ctx.viewport, event.position));
        event.cancel = true;
        EventResponse {
            expire_owner: true,
            retire_listener: true,
        }
    }

    fn on_up(
        &mut self,
        button: MouseButton,
        event: &mut MouseEvent,
        ctx: &ListenerCtx<'_>,
    ) -> EventResponse {
        if !self.gate_passes(event.modifiers) {
            return EventResponse::ignored();
        }
        if button != MouseButton::Left || ctx.locked {
            return EventResponse::ignored();
        }
        // The release edge is reported without re-capturing the position;
        // the outputs keep the last dragged sample
        self.pressed = false;
        self.just_released = true;
        event.cancel = true;
        EventResponse {
            expire_owner: true,
            retire_listener: true,
        }
    }

    fn on_move(&mut self, event: &mut MouseEvent, ctx: &ListenerCtx<'_>) -> EventResponse {
        if !self.gate_passes(event.modifiers) {
            return EventResponse::ignored();
        }
        if ctx.locked {
            return EventResponse::ignored();
        }
        if self.pressed {
            self.tracked = Some(TrackedPosition::capture(ctx.viewport, event.position));
        }
        // Even a hover move claims the event while the gate passes, so the
        // host never starts a drag-select mid-track
        event.cancel = true;
        EventResponse {
            expire_owner: true,
            retire_listener: true,
        }
    }
}
