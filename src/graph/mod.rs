//! Node-graph model: documents, node types, values, and evaluation.
//!
//! The graph is deliberately host-shaped rather than general-purpose. Nodes
//! implement the [`Node`] trait, live inside a [`Document`], and exchange
//! [`Value`]s over wires. Evaluation is expiry-driven: see
//! [`Document::solve_pending`] for the scheduling rules.

pub mod document;
pub mod error;
pub mod node;
pub mod params;
pub mod registry;
pub mod value;

pub use document::{Document, DocumentState, NodeEntry, NodeState, Wire};
pub use error::{GraphError, GraphResult};
pub use node::{EventResponse, ListenerCtx, MenuEntry, Node, ParamSpec, SolveCtx};
pub use params::BooleanParam;
pub use registry::NodeRegistry;
pub use value::Value;
