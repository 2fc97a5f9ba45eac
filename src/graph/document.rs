//! The node-graph document: entries, wires, and the expiry-driven solver.
//!
//! A [`Document`] owns a flat list of node entries plus the wires between
//! their parameter slots. Edits never recompute anything directly; they
//! *expire* the touched node, expiry ripples downstream along wires, and a
//! later [`Document::solve_pending`] pass re-evaluates expired nodes in
//! upstream-first order. This mirrors how dataflow canvases schedule work:
//! the solver only ever runs nodes whose upstream values are already fresh.
//!
//! ## Architecture
//!
//! - **Entries** pair a boxed [`Node`] with canvas state (bounds, locked,
//!   hidden, selected) and its published output values.
//! - **Wires** connect one output slot to one input slot. Input slots accept
//!   at most one wire.
//! - **Expiry** is a phase flag on the entry. Marking an already-expired
//!   entry is a no-op, which keeps ripple passes linear even on diamonds
//!   and stops recursion on accidental cycles.
//! - **Exclusive node types** are policed with a per-type count the document
//!   maintains on insert and removal, so the check is O(1) rather than a
//!   scan of the canvas.
//! - **Persistence** round-trips through [`DocumentState`], a plain serde
//!   struct. Node internals travel as opaque JSON chunks written and read
//!   by the node itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::MAX_SOLVE_STEPS;
use crate::input::dispatcher::MouseDispatcher;
use crate::input::events::MouseEvent;
use crate::notices::NoticeManager;
use crate::render::{DrawOp, NodeLayout, wire_path};
use crate::types::{ListenerToken, NodeId, Rect, TypeGuid};
use crate::viewport::Viewport;

use super::error::{GraphError, GraphResult};
use super::node::{EventResponse, ListenerCtx, Node, SolveCtx};
use super::registry::NodeRegistry;
use super::value::Value;

// ============================================================================
// Wires
// ============================================================================

/// A connection from an output slot to an input slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub source: NodeId,
    pub source_slot: usize,
    pub target: NodeId,
    pub target_slot: usize,
}

// ============================================================================
// Node entries
// ============================================================================

/// A node placed on the canvas, together with its document-side state.
pub struct NodeEntry {
    pub id: NodeId,
    pub node: Box<dyn Node>,
    pub bounds: Rect,
    pub locked: bool,
    pub hidden: bool,
    pub selected: bool,
    /// Published output values, one per output spec. `None` until the first
    /// solve, and cleared again while a solve is rewriting them.
    outputs: Vec<Option<Value>>,
    /// Expired entries are stale and queued for the next solve pass
    expired: bool,
}

impl NodeEntry {
    /// The value last published on `slot`, if any.
    pub fn output(&self, slot: usize) -> Option<Value> {
        self.outputs.get(slot).copied().flatten()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Canvas layout snapshot handed to the node's render hooks.
    pub fn layout(&self) -> NodeLayout {
        NodeLayout {
            bounds: self.bounds,
            selected: self.selected,
            locked: self.locked,
            hidden: self.hidden,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A canvas full of nodes and wires, with expiry-driven evaluation.
pub struct Document {
    pub id: Uuid,
    entries: Vec<NodeEntry>,
    wires: Vec<Wire>,
    /// Live count per node type, kept in step with `entries`. Lets the
    /// exclusivity check stay O(1).
    type_counts: HashMap<TypeGuid, usize>,
    next_node: u64,
    /// User-facing messages raised while editing or loading
    pub notices: NoticeManager,
}

/// Manual impl: entries hold `Box<dyn Node>`, which has no `Debug` bound.
impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("entries", &self.entries.len())
            .field("wires", &self.wires)
            .field("next_node", &self.next_node)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
            wires: Vec::new(),
            type_counts: HashMap::new(),
            next_node: 0,
            notices: NoticeManager::default(),
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Place a node on the canvas. Returns `None` if the node type is
    /// exclusive and an instance already lives here; the rejected node is
    /// dropped and a blocking notice is raised.
    pub fn add(&mut self, node: Box<dyn Node>, bounds: Rect) -> Option<NodeId> {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        info!(node = %id, name = node.name(), "adding node");
        self.insert_checked(NodeEntry {
            id,
            node,
            bounds,
            locked: false,
            hidden: false,
            selected: false,
            outputs: Vec::new(),
            expired: true,
        })
    }

    /// Insert a prepared entry, enforcing the exclusivity rule. The per-type
    /// count is bumped first so the check is a plain lookup.
    fn insert_checked(&mut self, mut entry: NodeEntry) -> Option<NodeId> {
        let guid = entry.node.type_guid();
        let id = entry.id;
        let name = entry.node.name();
        let exclusive = entry.node.exclusive();
        entry.outputs = vec![None; entry.node.outputs().len()];

        let count = self.type_counts.entry(guid).or_insert(0);
        *count += 1;
        let over = exclusive && *count > 1;
        self.entries.push(entry);

        if over {
            warn!(node = %id, name, "rejecting duplicate exclusive node");
            self.notices.blocking(format!(
                "There is already a {name} component on the canvas. It is not \
                 possible to have more than one component of this type on the \
                 same canvas."
            ));
            self.take_entry(id);
            return None;
        }
        Some(id)
    }

    /// Remove a node, its wires, and its type count. Consumers of its
    /// outputs are expired since their input just vanished.
    pub fn remove(&mut self, id: NodeId) -> GraphResult<()> {
        let consumers: Vec<NodeId> = self
            .wires
            .iter()
            .filter(|w| w.source == id)
            .map(|w| w.target)
            .collect();
        let entry = self.take_entry(id).ok_or(GraphError::UnknownNode(id))?;
        info!(node = %id, name = entry.node.name(), "removed node");
        for target in consumers {
            self.expire_from(target);
        }
        Ok(())
    }

    /// Detach an entry from the document: strips its wires and decrements
    /// its type count. The caller decides what happens to the entry.
    fn take_entry(&mut self, id: NodeId) -> Option<NodeEntry> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        if let Some(count) = self.type_counts.get_mut(&entry.node.type_guid()) {
            *count = count.saturating_sub(1);
        }
        self.wires.retain(|w| w.source != id && w.target != id);
        Some(entry)
    }

    /// Move a node into another document. The entry gets a fresh id in the
    /// destination and arrives expired; the destination's exclusivity rule
    /// applies, so the move can reject the node (returning `Ok(None)`).
    pub fn transfer_to(&mut self, id: NodeId, dest: &mut Document) -> GraphResult<Option<NodeId>> {
        let consumers: Vec<NodeId> = self
            .wires
            .iter()
            .filter(|w| w.source == id)
            .map(|w| w.target)
            .collect();
        let mut entry = self.take_entry(id).ok_or(GraphError::UnknownNode(id))?;
        for target in consumers {
            self.expire_from(target);
        }
        entry.id = NodeId(dest.next_node);
        dest.next_node += 1;
        entry.expired = true;
        debug!(from = %self.id, to = %dest.id, node = %entry.id, "transferring node");
        Ok(dest.insert_checked(entry))
    }

    /// Wire an output slot to an input slot and expire the consumer.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_slot: usize,
        target: NodeId,
        target_slot: usize,
    ) -> GraphResult<()> {
        if source == target {
            return Err(GraphError::SelfWire(source));
        }
        let source_entry = self.entry(source).ok_or(GraphError::UnknownNode(source))?;
        if source_slot >= source_entry.node.outputs().len() {
            return Err(GraphError::SlotOutOfRange { node: source, slot: source_slot });
        }
        let target_entry = self.entry(target).ok_or(GraphError::UnknownNode(target))?;
        if target_slot >= target_entry.node.inputs().len() {
            return Err(GraphError::SlotOutOfRange { node: target, slot: target_slot });
        }
        if self
            .wires
            .iter()
            .any(|w| w.target == target && w.target_slot == target_slot)
        {
            return Err(GraphError::InputAlreadyWired { node: target, slot: target_slot });
        }
        self.wires.push(Wire { source, source_slot, target, target_slot });
        self.expire_from(target);
        Ok(())
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(index) = self.index_of(id) {
            self.entries[index].bounds = bounds;
        }
    }

    pub fn set_locked(&mut self, id: NodeId, locked: bool) {
        if let Some(index) = self.index_of(id) {
            self.entries[index].locked = locked;
        }
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(index) = self.index_of(id) {
            self.entries[index].hidden = hidden;
        }
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(index) = self.index_of(id) {
            self.entries[index].selected = selected;
        }
    }

    /// Run a node's context-menu action and expire it so the change takes
    /// effect on the next solve pass.
    pub fn activate_menu(&mut self, id: NodeId, entry_id: &str) -> GraphResult<()> {
        let index = self.index_of(id).ok_or(GraphError::UnknownNode(id))?;
        self.entries[index].node.activate_menu(entry_id);
        debug!(node = %id, entry = entry_id, "menu action applied");
        self.expire_from(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn entry(&self, id: NodeId) -> Option<&NodeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Node ids in canvas order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live instances of a node type on this canvas.
    pub fn count_of_type(&self, guid: TypeGuid) -> usize {
        self.type_counts.get(&guid).copied().unwrap_or(0)
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    // ------------------------------------------------------------------
    // Expiry
    // ------------------------------------------------------------------

    /// Mark a node stale and ripple the mark downstream along wires.
    ///
    /// Already-expired nodes are skipped, which both bounds the ripple and
    /// breaks recursion if the wires happen to form a cycle. A node may
    /// decline to propagate via [`Node::expires_downstream`]; the node
    /// itself is still marked.
    pub fn expire_from(&mut self, id: NodeId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.entries[index].expired {
            return;
        }
        self.entries[index].expired = true;
        if !self.entries[index].node.expires_downstream() {
            return;
        }
        let consumers: Vec<NodeId> = self
            .wires
            .iter()
            .filter(|w| w.source == id)
            .map(|w| w.target)
            .collect();
        for target in consumers {
            self.expire_from(target);
        }
    }

    /// Ids of all currently expired nodes, in canvas order.
    pub fn expired_nodes(&self) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter(|e| e.expired)
            .map(|e| e.id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Solving
    // ------------------------------------------------------------------

    /// Re-evaluate every expired node, upstream-first. Returns how many
    /// nodes were solved. Fails with [`GraphError::SolveStalled`] if
    /// expired nodes remain with no runnable candidate (a wire cycle).
    pub fn solve_pending(&mut self, dispatcher: &mut MouseDispatcher) -> GraphResult<usize> {
        crate::profile_scope!("solve_pending");
        let mut solved = 0;
        for _ in 0..MAX_SOLVE_STEPS {
            let Some(index) = self.next_ready() else {
                break;
            };
            self.solve_at(index, dispatcher);
            solved += 1;
        }
        let remaining = self.entries.iter().filter(|e| e.expired).count();
        if remaining > 0 {
            warn!(remaining, "solve pass stalled");
            return Err(GraphError::SolveStalled { remaining });
        }
        if solved > 0 {
            debug!(solved, "solve pass complete");
        }
        Ok(solved)
    }

    /// An expired node whose wired upstream sources are all fresh.
    fn next_ready(&self) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.expired
                && !self.wires.iter().any(|w| {
                    w.target == e.id && self.entry(w.source).is_some_and(|src| src.expired)
                })
        })
    }

    /// Resolve inputs, clear outputs, and run one node's solve.
    fn solve_at(&mut self, index: usize, dispatcher: &mut MouseDispatcher) {
        let inputs = self.collect_inputs(index);
        let document = self.id;
        let entry = &mut self.entries[index];
        let mut outputs: Vec<Option<Value>> = vec![None; entry.node.outputs().len()];
        let mut ctx = SolveCtx {
            document,
            node: entry.id,
            inputs: &inputs,
            outputs: &mut outputs,
            dispatcher,
        };
        entry.node.solve(&mut ctx);
        entry.outputs = outputs;
        entry.expired = false;
    }

    /// One resolved value per input spec: the wired upstream output when a
    /// wire exists, otherwise the node's own default.
    fn collect_inputs(&self, index: usize) -> Vec<Option<Value>> {
        let entry = &self.entries[index];
        let id = entry.id;
        (0..entry.node.inputs().len())
            .map(|slot| {
                let wired = self
                    .wires
                    .iter()
                    .find(|w| w.target == id && w.target_slot == slot);
                match wired {
                    Some(w) => self.entry(w.source).and_then(|src| src.output(w.source_slot)),
                    None => entry.node.default_input(slot),
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Deliver one mouse event to a node through a subscription slot.
    /// Dispatcher plumbing; most callers want
    /// [`MouseDispatcher::dispatch`](crate::input::MouseDispatcher::dispatch).
    pub fn deliver_mouse_event(
        &mut self,
        id: NodeId,
        token: ListenerToken,
        event: &mut MouseEvent,
        viewport: &Viewport,
    ) -> EventResponse {
        let Some(index) = self.index_of(id) else {
            return EventResponse::ignored();
        };
        let entry = &mut self.entries[index];
        let ctx = ListenerCtx {
            viewport,
            token,
            locked: entry.locked,
        };
        entry.node.on_mouse_event(event, &ctx)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Flatten the whole canvas into a draw list, wires beneath nodes.
    pub fn render_canvas(&self) -> Vec<DrawOp> {
        crate::profile_scope!("render_canvas");
        let mut ops = Vec::new();
        for wire in &self.wires {
            let (Some(source), Some(target)) =
                (self.entry(wire.source), self.entry(wire.target))
            else {
                continue;
            };
            let from = source.node.output_grip(&source.layout(), wire.source_slot);
            let to = target.node.input_grip(&target.layout(), wire.target_slot);
            ops.push(wire_path(from, to));
        }
        for entry in &self.entries {
            ops.extend(entry.node.render_body(&entry.layout()));
        }
        ops
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Plain-data snapshot of the document for serialization.
    pub fn snapshot(&self) -> DocumentState {
        DocumentState {
            id: self.id,
            next_node: self.next_node,
            nodes: self
                .entries
                .iter()
                .map(|e| NodeState {
                    id: e.id,
                    type_guid: e.node.type_guid(),
                    bounds: e.bounds,
                    locked: e.locked,
                    hidden: e.hidden,
                    chunk: e.node.write_chunk(),
                })
                .collect(),
            wires: self.wires.clone(),
        }
    }

    /// Save as pretty JSON, writing through a temp file in the same
    /// directory so an interrupted save never corrupts the target.
    pub fn save_to(&self, path: &Path) -> GraphResult<()> {
        let state = self.snapshot();
        let json = serde_json::to_string_pretty(&state)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file = NamedTempFile::new_in(dir)?;
        fs::write(file.path(), json)?;
        file.persist(path).map_err(|e| GraphError::Io(e.error))?;
        info!(path = %path.display(), nodes = self.entries.len(), "document saved");
        Ok(())
    }

    /// Load a document, rebuilding nodes through the registry. Every node
    /// arrives expired so the first solve pass rebuilds all outputs. Wires
    /// whose endpoints did not survive the load are dropped.
    pub fn load_from(path: &Path, registry: &NodeRegistry) -> GraphResult<Document> {
        let json = fs::read_to_string(path)?;
        let state: DocumentState = serde_json::from_str(&json)?;
        let mut doc = Document {
            id: state.id,
            ..Document::new()
        };
        for saved in state.nodes {
            let mut node = registry
                .create(saved.type_guid)
                .ok_or(GraphError::UnknownType(saved.type_guid))?;
            node.read_chunk(&saved.chunk);
            doc.insert_checked(NodeEntry {
                id: saved.id,
                node,
                bounds: saved.bounds,
                locked: saved.locked,
                hidden: saved.hidden,
                selected: false,
                outputs: Vec::new(),
                expired: true,
            });
        }
        doc.next_node = state.next_node;
        let wires: Vec<Wire> = state
            .wires
            .into_iter()
            .filter(|w| doc.contains(w.source) && doc.contains(w.target))
            .collect();
        doc.wires = wires;
        info!(
            path = %path.display(),
            nodes = doc.entries.len(),
            wires = doc.wires.len(),
            "document loaded"
        );
        Ok(doc)
    }
}

// ============================================================================
// Serialized form
// ============================================================================

/// Serializable snapshot of a [`Document`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentState {
    pub id: Uuid,
    pub next_node: u64,
    pub nodes: Vec<NodeState>,
    pub wires: Vec<Wire>,
}

/// Serializable snapshot of one node entry. Node internals are an opaque
/// chunk owned by the node type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeState {
    pub id: NodeId,
    pub type_guid: TypeGuid,
    pub bounds: Rect,
    pub locked: bool,
    pub hidden: bool,
    pub chunk: serde_json::Value,
}
