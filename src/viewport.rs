//! Viewport camera model and client-to-world mapping.
//!
//! This is the host-side description a tracking component sees: pixel size,
//! projection mode, and the camera frame. `client_to_world` maps a client
//! pixel to the world-space segment between the near and far clipping
//! planes; everything beyond simple ray construction (picking, clipping,
//! frustum queries) belongs to the host and is out of scope here.

use crate::constants::{
    DEFAULT_FAR_CLIP, DEFAULT_FOV_Y, DEFAULT_NEAR_CLIP, DEFAULT_PARALLEL_HALF_HEIGHT,
};
use crate::geometry::Line;
use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Projection mode of a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    Perspective,
    Parallel,
}

/// One host viewport: client area plus camera frame.
///
/// Fields are public so hosts (and tests) can describe any camera; the
/// constructors cover the common case of a camera aimed at a target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Viewport {
    /// Client width in pixels
    pub width: f64,
    /// Client height in pixels
    pub height: f64,
    pub projection: Projection,
    pub camera_location: DVec3,
    /// View direction; not required to be unit length
    pub camera_direction: DVec3,
    pub camera_target: DVec3,
    pub camera_up: DVec3,
    pub near_clip: f64,
    pub far_clip: f64,
    /// Vertical field of view in radians (perspective only)
    pub fov_y: f64,
    /// Half-height of the view volume in world units (parallel only)
    pub half_height: f64,
}

impl Viewport {
    /// Perspective viewport looking from `location` toward `target`.
    pub fn perspective(width: f64, height: f64, location: DVec3, target: DVec3) -> Self {
        let direction = target - location;
        Self {
            width,
            height,
            projection: Projection::Perspective,
            camera_location: location,
            camera_direction: direction,
            camera_target: target,
            camera_up: default_up(direction),
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
            fov_y: DEFAULT_FOV_Y,
            half_height: DEFAULT_PARALLEL_HALF_HEIGHT,
        }
    }

    /// Parallel (orthographic) viewport looking from `location` toward
    /// `target`.
    pub fn parallel(width: f64, height: f64, location: DVec3, target: DVec3) -> Self {
        Self {
            projection: Projection::Parallel,
            ..Self::perspective(width, height, location, target)
        }
    }

    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Camera-to-target distance, the length parallel mouse lines take.
    #[inline]
    pub fn target_distance(&self) -> f64 {
        (self.camera_target - self.camera_location).length()
    }

    fn view_matrix(&self) -> DMat4 {
        DMat4::look_to_rh(
            self.camera_location,
            self.camera_direction.normalize(),
            self.camera_up,
        )
    }

    fn projection_matrix(&self) -> DMat4 {
        match self.projection {
            Projection::Perspective => {
                DMat4::perspective_rh(self.fov_y, self.aspect(), self.near_clip, self.far_clip)
            }
            Projection::Parallel => {
                let half_width = self.half_height * self.aspect();
                DMat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -self.half_height,
                    self.half_height,
                    self.near_clip,
                    self.far_clip,
                )
            }
        }
    }

    /// Map a client pixel (origin top-left, y down) to the world-space
    /// segment from the near plane to the far plane.
    pub fn client_to_world(&self, pixel: DVec2) -> Line {
        let inv_vp = (self.projection_matrix() * self.view_matrix()).inverse();

        let ndc_x = (pixel.x / self.width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (pixel.y / self.height) * 2.0;

        let near = inv_vp * DVec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_vp * DVec4::new(ndc_x, ndc_y, 1.0, 1.0);

        Line::new(near.truncate() / near.w, far.truncate() / far.w)
    }
}

/// World Z-up unless the view direction is near-vertical (top/bottom
/// views), where Y serves as up instead.
fn default_up(direction: DVec3) -> DVec3 {
    let dir = direction.normalize_or_zero();
    if dir.z.abs() > 0.999 { DVec3::Y } else { DVec3::Z }
}
