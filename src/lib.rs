//! Viewport mouse tracking for a node-graph canvas host.
//!
//! The crate centers on one node type, [`MouseTracker`], which publishes
//! the viewport mouse position into a dataflow graph while the left button
//! is held: the world-space line under the cursor, the cursor in pixels and
//! as a fraction of the viewport width, and the pressed flag.
//!
//! Around that node sits a small headless host: a [`Viewport`] with real
//! perspective and parallel camera math, a [`MouseDispatcher`] that routes
//! events to subscribed nodes, and a [`Document`] that owns the node graph
//! and runs its expiry-driven solver. [`Host`] ties the pieces into a
//! feed-one-event loop.
//!
//! ## Modules
//!
//! - `tracker` - the mouse tracker node (listener, rendering, Node impl)
//! - `graph` - documents, nodes, values, wires, and the solver
//! - `input` - mouse events, dispatch, and coordinate capture
//! - `viewport` - camera model and client-to-world unprojection
//! - `render` - draw-list rendering of the canvas
//! - `host` - the event loop and default mouse behavior
//! - `notices` - user-facing message queue
//! - `perf` - timing instrumentation for the hot paths

pub mod constants;
pub mod geometry;
pub mod graph;
pub mod host;
pub mod input;
pub mod notices;
pub mod perf;
pub mod render;
pub mod tracker;
pub mod types;
pub mod viewport;

pub use geometry::Line;
pub use graph::{Document, GraphError, GraphResult, Node, NodeRegistry, Value};
pub use host::{FeedOutcome, Host};
pub use input::{Modifiers, MouseButton, MouseDispatcher, MouseEvent, MouseEventKind};
pub use notices::{Notice, NoticeLevel, NoticeManager};
pub use tracker::MouseTracker;
pub use types::{ListenerToken, NodeId, Rect, TypeGuid};
pub use viewport::{Projection, Viewport};
