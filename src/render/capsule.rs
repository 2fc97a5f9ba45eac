//! Default node body rendering: the capsule and its parameter grips.

use crate::constants::{
    CAPSULE_CORNER_RADIUS, CAPSULE_EDGE, CAPSULE_EDGE_SELECTED, CAPSULE_FILL_HIDDEN,
    CAPSULE_FILL_LOCKED, CAPSULE_FILL_NORMAL, GRIP_COLOR, GRIP_RADIUS, PARAM_ROW_HEIGHT,
};
use crate::types::Rect;

use super::{DrawOp, NodeLayout};

/// Fill and edge colors implied by a node's canvas state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapsuleStyle {
    pub fill: &'static str,
    pub edge: &'static str,
}

impl CapsuleStyle {
    /// Locked wins over hidden for the fill; selection only affects the edge.
    pub fn for_layout(layout: &NodeLayout) -> Self {
        let fill = if layout.locked {
            CAPSULE_FILL_LOCKED
        } else if layout.hidden {
            CAPSULE_FILL_HIDDEN
        } else {
            CAPSULE_FILL_NORMAL
        };
        let edge = if layout.selected {
            CAPSULE_EDGE_SELECTED
        } else {
            CAPSULE_EDGE
        };
        Self { fill, edge }
    }
}

/// Styled capsule plus one grip per parameter row.
pub fn default_body(layout: &NodeLayout, input_count: usize, output_count: usize) -> Vec<DrawOp> {
    let style = CapsuleStyle::for_layout(layout);
    let mut ops = vec![DrawOp::Capsule {
        bounds: layout.bounds,
        corner_radius: CAPSULE_CORNER_RADIUS,
        fill: style.fill,
        edge: style.edge,
    }];
    for slot in 0..input_count {
        ops.push(DrawOp::Grip {
            center: default_input_grip(layout, slot, input_count),
            radius: GRIP_RADIUS,
            color: GRIP_COLOR,
        });
    }
    for slot in 0..output_count {
        ops.push(DrawOp::Grip {
            center: default_output_grip(layout, slot, output_count),
            radius: GRIP_RADIUS,
            color: GRIP_COLOR,
        });
    }
    ops
}

/// Input grips sit on the left edge, one per row, with the row block
/// centered vertically.
pub fn default_input_grip(layout: &NodeLayout, slot: usize, count: usize) -> (f32, f32) {
    (layout.bounds.x, grip_row_y(&layout.bounds, slot, count))
}

/// Output grips mirror the inputs on the right edge.
pub fn default_output_grip(layout: &NodeLayout, slot: usize, count: usize) -> (f32, f32) {
    (layout.bounds.right(), grip_row_y(&layout.bounds, slot, count))
}

fn grip_row_y(bounds: &Rect, slot: usize, count: usize) -> f32 {
    let block = count as f32 * PARAM_ROW_HEIGHT;
    let top = bounds.y + (bounds.height - block) / 2.0;
    top + (slot as f32 + 0.5) * PARAM_ROW_HEIGHT
}
