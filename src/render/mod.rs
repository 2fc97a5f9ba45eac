//! Canvas rendering as a flat draw list.
//!
//! The host does not paint pixels. Rendering a document produces a list of
//! [`DrawOp`]s in canvas coordinates that a frontend (or a snapshot test)
//! can consume. Ops serialize to JSON, which keeps visual regressions
//! diffable.
//!
//! ## Modules
//!
//! - `capsule` - Node body and grip layout (the default `Node` render hooks)

mod capsule;

use serde::Serialize;

use crate::constants::{WIRE_COLOR, WIRE_CONTROL_FRACTION, WIRE_MIN_CONTROL_OFFSET, WIRE_THICKNESS};
use crate::types::Rect;

pub use capsule::{CapsuleStyle, default_body, default_input_grip, default_output_grip};

// ============================================================================
// Draw ops
// ============================================================================

/// One primitive in a canvas draw list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Rounded-rectangle node body
    Capsule {
        bounds: Rect,
        corner_radius: f32,
        fill: &'static str,
        edge: &'static str,
    },
    /// Parameter connection point on a capsule edge
    Grip {
        center: (f32, f32),
        radius: f32,
        color: &'static str,
    },
    /// Cubic bezier wire between two grips
    WirePath {
        from: (f32, f32),
        control_a: (f32, f32),
        control_b: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: &'static str,
    },
}

/// Canvas state a node needs to draw itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub bounds: Rect,
    pub selected: bool,
    pub locked: bool,
    pub hidden: bool,
}

// ============================================================================
// Wires
// ============================================================================

/// Bezier wire between an output grip and an input grip.
///
/// Control points extend horizontally from each grip so wires leave and
/// enter capsules side-on, with a minimum offset that keeps short wires
/// from collapsing into straight lines.
pub fn wire_path(from: (f32, f32), to: (f32, f32)) -> DrawOp {
    let offset = ((to.0 - from.0).abs() * WIRE_CONTROL_FRACTION).max(WIRE_MIN_CONTROL_OFFSET);
    DrawOp::WirePath {
        from,
        control_a: (from.0 + offset, from.1),
        control_b: (to.0 - offset, to.1),
        to,
        thickness: WIRE_THICKNESS,
        color: WIRE_COLOR,
    }
}
