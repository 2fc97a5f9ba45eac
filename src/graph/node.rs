//! The node seam: everything a document knows about a node type.
//!
//! Nodes are trait objects. Identity is static metadata (a type GUID plus
//! names), behavior hangs off hooks with conservative defaults, so a plain
//! value node only implements identity, parameters, and `solve`.

use crate::input::dispatcher::MouseDispatcher;
use crate::input::events::MouseEvent;
use crate::render::{DrawOp, NodeLayout, default_body, default_input_grip, default_output_grip};
use crate::types::{ListenerToken, NodeId, TypeGuid};
use crate::viewport::Viewport;
use uuid::Uuid;

use super::value::Value;

/// Static description of one input or output slot.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub nickname: &'static str,
    pub description: &'static str,
}

/// One entry in a node's right-click menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Stable id handed back to `Node::activate_menu`
    pub id: &'static str,
    pub label: String,
    pub checked: bool,
}

/// What a node asks of the host after handling a mouse event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Expire the owning node so the next solve pass re-evaluates it
    pub expire_owner: bool,
    /// Drop the subscription slot the event came through
    pub retire_listener: bool,
}

impl EventResponse {
    /// The event was not for this node; nothing changes.
    pub fn ignored() -> Self {
        Self::default()
    }
}

/// Context handed to `Node::on_mouse_event`.
pub struct ListenerCtx<'a> {
    pub viewport: &'a Viewport,
    /// Token of the subscription slot that delivered the event
    pub token: ListenerToken,
    /// Whether the node entry is locked on the canvas
    pub locked: bool,
}

/// Context handed to `Node::solve`.
pub struct SolveCtx<'a> {
    /// Document the solve runs in
    pub document: Uuid,
    pub node: NodeId,
    /// Resolved input values, one per input spec: the wired upstream value
    /// if present, else the node's default
    pub inputs: &'a [Option<Value>],
    /// Output slots to publish into, cleared before the solve
    pub outputs: &'a mut [Option<Value>],
    /// Host mouse subscriptions, for nodes that listen
    pub dispatcher: &'a mut MouseDispatcher,
}

impl SolveCtx<'_> {
    pub fn input_bool(&self, index: usize) -> Option<bool> {
        self.inputs.get(index).copied().flatten().and_then(|v| v.as_bool())
    }

    pub fn set_output(&mut self, index: usize, value: impl Into<Value>) {
        if let Some(slot) = self.outputs.get_mut(index) {
            *slot = Some(value.into());
        }
    }
}

/// A node type pluggable into a [`Document`](super::Document).
pub trait Node {
    fn type_guid(&self) -> TypeGuid;
    fn name(&self) -> &'static str;
    fn nickname(&self) -> &'static str;
    fn description(&self) -> &'static str {
        ""
    }

    fn inputs(&self) -> &'static [ParamSpec];
    fn outputs(&self) -> &'static [ParamSpec];

    /// Fallback value for an unwired input slot.
    fn default_input(&self, _index: usize) -> Option<Value> {
        None
    }

    /// Recompute and publish outputs.
    fn solve(&mut self, ctx: &mut SolveCtx<'_>);

    /// Consulted when this node is expired: whether the expiry walk carries
    /// on into downstream consumers. Stateful nodes may throttle here; the
    /// hook runs once per expiry, so it may also consume edge flags.
    fn expires_downstream(&mut self) -> bool {
        true
    }

    /// At most one instance of this type per document. Enforced by the
    /// document on insertion and transfer.
    fn exclusive(&self) -> bool {
        false
    }

    /// Mouse events arrive here while the node holds a live subscription.
    fn on_mouse_event(&mut self, _event: &mut MouseEvent, _ctx: &ListenerCtx<'_>) -> EventResponse {
        EventResponse::ignored()
    }

    /// Entries for the node's right-click menu.
    fn context_menu(&self) -> Vec<MenuEntry> {
        Vec::new()
    }

    /// Activate a context-menu entry by its id.
    fn activate_menu(&mut self, _id: &str) {}

    /// Extra per-node state for document persistence.
    fn write_chunk(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn read_chunk(&mut self, _chunk: &serde_json::Value) {}

    /// Canvas position of an input grip. The default spaces grips down the
    /// left edge, one per row.
    fn input_grip(&self, layout: &NodeLayout, slot: usize) -> (f32, f32) {
        default_input_grip(layout, slot, self.inputs().len())
    }

    /// Canvas position of an output grip, spaced down the right edge.
    fn output_grip(&self, layout: &NodeLayout, slot: usize) -> (f32, f32) {
        default_output_grip(layout, slot, self.outputs().len())
    }

    /// Draw the node body. The default is a styled capsule with one grip
    /// per parameter row.
    fn render_body(&self, layout: &NodeLayout) -> Vec<DrawOp> {
        default_body(layout, self.inputs().len(), self.outputs().len())
    }
}
