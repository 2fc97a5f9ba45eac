//! Mouse event fan-out to subscribed nodes.
//!
//! The dispatcher owns the subscription slots that connect host mouse events
//! to listening nodes. Each slot is keyed by `(document, node)` and carries a
//! token the node can hold on to. Subscribing a node that already holds a
//! slot replaces the old slot outright, so a node can never accumulate two
//! live subscriptions by re-enabling itself.
//!
//! Dispatch walks a snapshot of the slots, delivers the event to each node
//! that still exists in the given document, and applies whatever the node
//! asked for in its [`EventResponse`]: retiring the slot, expiring the node,
//! or both. Slots whose node has vanished from the document are pruned on
//! the way through.

use tracing::debug;
use uuid::Uuid;

use crate::graph::document::Document;
use crate::input::events::MouseEvent;
use crate::types::{ListenerToken, NodeId};
use crate::viewport::Viewport;

// ============================================================================
// Subscription slots
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct Slot {
    token: ListenerToken,
    document: Uuid,
    node: NodeId,
}

/// What one dispatch pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// A handler claimed the event; the host should skip its own default
    /// reaction (for example drag-select on left press)
    pub canceled: bool,
    /// How many listeners the event reached
    pub delivered: usize,
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Routes host mouse events to subscribed nodes.
#[derive(Debug, Default)]
pub struct MouseDispatcher {
    slots: Vec<Slot>,
    next_token: u64,
}

impl MouseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a subscription slot for a node. Any existing slot for the same
    /// `(document, node)` pair is dropped first, so the returned token is
    /// the node's only live subscription. Tokens are never reused.
    pub fn subscribe(&mut self, document: Uuid, node: NodeId) -> ListenerToken {
        if let Some(prior) = self.subscription(document, node) {
            debug!(token = prior.0, node = %node, "replacing existing subscription");
            self.unsubscribe(prior);
        }
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.slots.push(Slot { token, document, node });
        debug!(token = token.0, node = %node, "listener subscribed");
        token
    }

    /// Drop a slot by token. Returns whether the token was live.
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.token != token);
        let removed = self.slots.len() < before;
        if removed {
            debug!(token = token.0, "listener retired");
        }
        removed
    }

    pub fn is_subscribed(&self, token: ListenerToken) -> bool {
        self.slots.iter().any(|s| s.token == token)
    }

    /// The live token for a `(document, node)` pair, if one exists.
    pub fn subscription(&self, document: Uuid, node: NodeId) -> Option<ListenerToken> {
        self.slots
            .iter()
            .find(|s| s.document == document && s.node == node)
            .map(|s| s.token)
    }

    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Deliver one event to every listener registered against `document`.
    ///
    /// Handlers run against a snapshot of the slot list, so a handler that
    /// retires itself (or subscribes a replacement) does not disturb the
    /// walk. Slots pointing at nodes the document no longer contains are
    /// pruned rather than delivered.
    pub fn dispatch(
        &mut self,
        document: &mut Document,
        viewport: &Viewport,
        event: &mut MouseEvent,
    ) -> DispatchOutcome {
        crate::profile_scope!("dispatch_mouse_event");
        let snapshot = self.slots.clone();
        let mut delivered = 0;
        for slot in snapshot {
            // An earlier handler in this pass may have retired the slot
            if !self.is_subscribed(slot.token) {
                continue;
            }
            if slot.document != document.id {
                continue;
            }
            if !document.contains(slot.node) {
                debug!(token = slot.token.0, node = %slot.node, "pruning slot for vanished node");
                self.unsubscribe(slot.token);
                continue;
            }
            let response = document.deliver_mouse_event(slot.node, slot.token, event, viewport);
            delivered += 1;
            if response.retire_listener {
                self.unsubscribe(slot.token);
            }
            if response.expire_owner {
                document.expire_from(slot.node);
            }
        }
        DispatchOutcome {
            canceled: event.cancel,
            delivered,
        }
    }
}
