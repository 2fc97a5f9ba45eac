//! Custom canvas look for the tracker: a bare capsule with its input grip
//! tucked near the bottom-left corner instead of the usual centered rows.

use crate::constants::{CAPSULE_CORNER_RADIUS, GRIP_BOTTOM_OFFSET, GRIP_COLOR, GRIP_RADIUS};
use crate::render::{CapsuleStyle, DrawOp, NodeLayout};

/// Where the tracker's input grip sits: on the left edge, a fixed offset
/// up from the bottom of the capsule.
pub fn input_grip(layout: &NodeLayout) -> (f32, f32) {
    (layout.bounds.x, layout.bounds.bottom() - GRIP_BOTTOM_OFFSET)
}

/// Bare capsule plus one low-slung grip per input. No output grips are
/// drawn; wires still anchor at the default output positions.
pub fn render_body(layout: &NodeLayout, input_count: usize) -> Vec<DrawOp> {
    let style = CapsuleStyle::for_layout(layout);
    let mut ops = vec![DrawOp::Capsule {
        bounds: layout.bounds,
        corner_radius: CAPSULE_CORNER_RADIUS,
        fill: style.fill,
        edge: style.edge,
    }];
    for _ in 0..input_count {
        ops.push(DrawOp::Grip {
            center: input_grip(layout),
            radius: GRIP_RADIUS,
            color: GRIP_COLOR,
        });
    }
    ops
}
