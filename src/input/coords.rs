//! Derives tracked mouse coordinates from a client pixel.
//!
//! One pixel yields three coordinate readings: a world-space line under the
//! cursor, the raw client pixel, and a width-scaled fraction pair. The line
//! construction differs per projection mode and its orientation is part of
//! the contract.

use crate::geometry::{Line, project_onto_plane};
use crate::viewport::{Projection, Viewport};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Snapshot of where the mouse was last tracked.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedPosition {
    /// World-space segment under the cursor; see [`mouse_line`] for its
    /// orientation per projection mode
    pub world_line: Line,
    /// Client pixel, origin top-left
    pub pixel: DVec2,
    /// Client pixel scaled by the viewport width
    pub fraction: DVec2,
}

impl TrackedPosition {
    /// Capture all three readings for `pixel` in `viewport`.
    pub fn capture(viewport: &Viewport, pixel: DVec2) -> Self {
        Self {
            world_line: mouse_line(viewport, pixel),
            pixel,
            fraction: mouse_fraction(viewport, pixel),
        }
    }
}

/// World-space line under a client pixel.
///
/// Perspective viewports reverse the raw near→far mapping, so the segment
/// runs from the scene toward the camera. Parallel viewports have no usable
/// far point in the raw mapping; the segment is rebuilt from the plane
/// through the camera location (perpendicular to the view direction) along
/// the view direction, with the camera-to-target distance as its length.
/// The parallel segment keeps that forward orientation.
pub fn mouse_line(viewport: &Viewport, pixel: DVec2) -> Line {
    let raw = viewport.client_to_world(pixel);
    match viewport.projection {
        Projection::Perspective => raw.reversed(),
        Projection::Parallel => {
            let cam_dir = viewport.camera_direction.normalize();
            let start = project_onto_plane(raw.from, viewport.camera_location, cam_dir);
            Line::new(start, start + cam_dir * viewport.target_distance())
        }
    }
}

/// Client pixel scaled into width-relative coordinates.
///
/// Both axes divide by the viewport width, so y spans 0..height/width
/// rather than 0..1. Downstream consumers expect exactly this scaling; do
/// not "fix" it to divide y by height.
#[inline]
pub fn mouse_fraction(viewport: &Viewport, pixel: DVec2) -> DVec2 {
    DVec2::new(pixel.x / viewport.width, pixel.y / viewport.width)
}
