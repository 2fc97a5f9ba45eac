//! Error types for document operations
//!
//! Gating rejections in the input path are silent no-ops, never errors;
//! this enum covers structural mistakes and persistence failures only.

use crate::types::{NodeId, TypeGuid};
use thiserror::Error;

/// Errors that can occur while editing, solving, or persisting a document
#[derive(Error, Debug)]
pub enum GraphError {
    /// Referenced node is not in this document
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Slot index past the node's parameter list
    #[error("slot {slot} out of range for node {node}")]
    SlotOutOfRange { node: NodeId, slot: usize },

    /// Input slots accept a single wire
    #[error("input slot {slot} of node {node} is already wired")]
    InputAlreadyWired { node: NodeId, slot: usize },

    /// A node cannot feed itself
    #[error("node {0} cannot be wired to itself")]
    SelfWire(NodeId),

    /// The solve pass stopped making progress (wire cycle)
    #[error("solve stalled with {remaining} nodes unsolved")]
    SolveStalled { remaining: usize },

    /// Document file references a node type with no registered factory
    #[error("no registered node type {0}")]
    UnknownType(TypeGuid),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for document operations
pub type GraphResult<T> = Result<T, GraphError>;
