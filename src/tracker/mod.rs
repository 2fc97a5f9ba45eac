//! The mouse tracker node.
//!
//! Publishes the viewport mouse position as graph data while the left
//! button is held: a world-space line under the cursor, the cursor in
//! pixels, the cursor as a fraction of the viewport width, and the pressed
//! flag itself.
//!
//! ## Architecture
//!
//! The node splits into three pieces:
//!
//! - `listener` - gating, capture, and press state (the event half)
//! - `attributes` - the custom capsule rendering (the canvas half)
//! - this module - the [`Node`] impl wiring both into the graph
//!
//! The subscription protocol is deliberately one-shot: every accepted
//! press, release, or gated move retires the current slot and expires the
//! node, and the node's next solve subscribes a fresh slot. That round-trip
//! through the solver is what keeps claimed events ahead of the host's own
//! drag-select handling without a persistent grab.
//!
//! Only one tracker may live on a canvas at a time; see
//! [`Node::exclusive`].

pub mod attributes;
pub mod listener;

use uuid::uuid;

use crate::graph::node::{EventResponse, ListenerCtx, MenuEntry, Node, ParamSpec, SolveCtx};
use crate::graph::value::Value;
use crate::input::coords::TrackedPosition;
use crate::input::events::MouseEvent;
use crate::render::{DrawOp, NodeLayout};
use crate::types::{ListenerToken, TypeGuid};

pub use listener::TrackerListener;

// ============================================================================
// Parameters
// ============================================================================

const IN_ON: usize = 0;
const OUT_LINE: usize = 0;
const OUT_PIXELS: usize = 1;
const OUT_FRACTION: usize = 2;
const OUT_PRESSED: usize = 3;

const INPUTS: &[ParamSpec] = &[ParamSpec {
    name: "On",
    nickname: "On",
    description: "Turn on/off mouse tracking",
}];

const OUTPUTS: &[ParamSpec] = &[
    ParamSpec {
        name: "Mouse Line",
        nickname: "L",
        description: "The line from the camera to the mouse position",
    },
    ParamSpec {
        name: "Mouse Position (pixels)",
        nickname: "Sp",
        description: "Position of the mouse in the 2D viewport space, measured in \
                      pixels from the viewport's top left corner",
    },
    ParamSpec {
        name: "Mouse Position (fraction)",
        nickname: "Sf",
        description: "Position of the mouse in 2D viewport space, measured as a \
                      fraction of the viewport's width and height",
    },
    ParamSpec {
        name: "Left Mouse Pressed",
        nickname: "B",
        description: "True if the left mouse button is being pressed while the \
                      mouse cursor is in the viewport",
    },
];

const DESCRIPTION: &str =
    "Continuously outputs the current mouse position in the viewport while the left \
     mouse button is pressed. Note: while tracking is on, clicking no longer selects \
     objects in the viewport; set the \"On\" input to False to get selection back. \
     The right-click menu has a \"Require Alt key\" option. When it is enabled, the \
     Alt key must also be held down for tracking to work, which lets you switch \
     quickly between tracking and normal mouse use.";

// ============================================================================
// Node
// ============================================================================

/// Tracks the viewport mouse while the left button is held.
pub struct MouseTracker {
    listener: TrackerListener,
    token: Option<ListenerToken>,
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseTracker {
    pub const TYPE_GUID: TypeGuid =
        TypeGuid::new(uuid!("7f3a9b2c-51d4-4e8a-9f0b-2c6d8a41e573"));

    pub fn new() -> Self {
        Self {
            listener: TrackerListener::new(),
            token: None,
        }
    }

    pub fn pressed(&self) -> bool {
        self.listener.pressed()
    }

    pub fn tracked(&self) -> Option<&TrackedPosition> {
        self.listener.tracked()
    }

    pub fn require_alt(&self) -> bool {
        self.listener.require_alt
    }
}

impl Node for MouseTracker {
    fn type_guid(&self) -> TypeGuid {
        Self::TYPE_GUID
    }

    fn name(&self) -> &'static str {
        "Mouse Tracker"
    }

    fn nickname(&self) -> &'static str {
        "Mouse"
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn inputs(&self) -> &'static [ParamSpec] {
        INPUTS
    }

    fn outputs(&self) -> &'static [ParamSpec] {
        OUTPUTS
    }

    fn default_input(&self, index: usize) -> Option<Value> {
        match index {
            IN_ON => Some(Value::Bool(true)),
            _ => None,
        }
    }

    fn solve(&mut self, ctx: &mut SolveCtx<'_>) {
        let on = ctx.input_bool(IN_ON).unwrap_or(true);
        if on {
            // A fresh slot every solve; subscribing drops the previous one
            self.token = Some(ctx.dispatcher.subscribe(ctx.document, ctx.node));
        } else if let Some(token) = self.token.take() {
            ctx.dispatcher.unsubscribe(token);
            self.listener.clear_pressed();
        }

        // Position outputs keep the last captured sample, even while off
        if let Some(tracked) = self.listener.tracked() {
            ctx.set_output(OUT_LINE, tracked.world_line);
            ctx.set_output(OUT_PIXELS, tracked.pixel);
            ctx.set_output(OUT_FRACTION, tracked.fraction);
        }
        ctx.set_output(OUT_PRESSED, self.listener.pressed());
    }

    fn expires_downstream(&mut self) -> bool {
        self.listener.consume_propagation()
    }

    fn exclusive(&self) -> bool {
        true
    }

    fn on_mouse_event(&mut self, event: &mut MouseEvent, ctx: &ListenerCtx<'_>) -> EventResponse {
        self.listener.handle(event, ctx)
    }

    fn context_menu(&self) -> Vec<MenuEntry> {
        vec![MenuEntry {
            id: "require_alt_key",
            label: "Require Alt key".to_string(),
            checked: self.listener.require_alt,
        }]
    }

    fn activate_menu(&mut self, id: &str) {
        if id == "require_alt_key" {
            self.listener.require_alt = !self.listener.require_alt;
        }
    }

    fn input_grip(&self, layout: &NodeLayout, _slot: usize) -> (f32, f32) {
        attributes::input_grip(layout)
    }

    fn render_body(&self, layout: &NodeLayout) -> Vec<DrawOp> {
        attributes::render_body(layout, self.inputs().len())
    }
}
