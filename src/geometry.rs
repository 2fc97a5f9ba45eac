//! World-space line segments and small vector helpers.
//!
//! All world math is `f64`, matching the precision host viewports report.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A finite, directed line segment in world space.
///
/// Direction matters: consumers of tracked mouse lines rely on the segment
/// running from the scene toward the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: DVec3,
    pub to: DVec3,
}

impl Line {
    pub fn new(from: DVec3, to: DVec3) -> Self {
        Self { from, to }
    }

    /// The same segment with its direction flipped.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.to - self.from).length()
    }

    /// Unnormalized from→to vector.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.to - self.from
    }

    /// Point at parameter `t` along the segment (0 = from, 1 = to).
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.from + (self.to - self.from) * t
    }
}

/// Project `point` onto the plane through `origin` with unit normal `normal`.
#[inline]
pub fn project_onto_plane(point: DVec3, origin: DVec3, normal: DVec3) -> DVec3 {
    point - normal * normal.dot(point - origin)
}
