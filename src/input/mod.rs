//! Mouse input: event types, coordinate capture, and dispatch.
//!
//! Events enter as [`MouseEvent`]s in pixel coordinates. The
//! [`MouseDispatcher`] fans them out to subscribed nodes, and
//! [`coords`] converts the pixel position into the world-space line and
//! screen fractions that tracking nodes publish.

pub mod coords;
pub mod dispatcher;
pub mod events;

pub use coords::{TrackedPosition, mouse_fraction, mouse_line};
pub use dispatcher::{DispatchOutcome, MouseDispatcher};
pub use events::{Modifiers, MouseButton, MouseEvent, MouseEventKind};
