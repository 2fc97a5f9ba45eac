//! Unit tests for the viewport camera model.

use crate::helpers::{assert_close, assert_point_close, parallel_viewport};
use glam::{DVec2, DVec3};
use mousenode::{Projection, Viewport};

fn side_camera() -> Viewport {
    Viewport::perspective(800.0, 600.0, DVec3::new(5.0, -20.0, 3.0), DVec3::new(5.0, 0.0, 3.0))
}

#[test]
fn test_aspect_ratio() {
    assert_close(side_camera().aspect(), 800.0 / 600.0);
}

#[test]
fn test_target_distance() {
    assert_close(side_camera().target_distance(), 20.0);
}

#[test]
fn test_center_pixel_spans_clip_planes() {
    let vp = side_camera();
    let line = vp.client_to_world(DVec2::new(400.0, 300.0));

    assert_point_close(line.from, DVec3::new(5.0, -19.9, 3.0));
    assert_point_close(line.to, DVec3::new(5.0, 980.0, 3.0));
}

#[test]
fn test_every_perspective_pixel_passes_through_camera() {
    let vp = side_camera();
    for pixel in [
        DVec2::new(0.0, 0.0),
        DVec2::new(617.0, 133.0),
        DVec2::new(799.0, 599.0),
        DVec2::new(23.0, 541.0),
    ] {
        let line = vp.client_to_world(pixel);
        let near = (line.from - vp.camera_location).normalize();
        let far = (line.to - vp.camera_location).normalize();
        assert!(
            near.cross(far).length() < 1e-9,
            "pixel {pixel:?} does not project through the camera"
        );
    }
}

#[test]
fn test_screen_axes_match_world_axes() {
    let vp = side_camera();
    // Camera on -Y looking at +Y with Z up: screen right is +X, screen up
    // is +Z.
    let right = vp.client_to_world(DVec2::new(800.0, 300.0));
    let top = vp.client_to_world(DVec2::new(400.0, 0.0));

    assert!(right.to.x > 5.0);
    assert!(top.to.z > 3.0);
}

#[test]
fn test_parallel_corner_pixel_offsets_by_half_extents() {
    let vp = parallel_viewport();
    assert_eq!(vp.projection, Projection::Parallel);

    // Top-left pixel sits half a view-volume left and up from the camera
    // axis: x = -half_height * aspect, z = +half_height.
    let line = vp.client_to_world(DVec2::new(0.0, 0.0));
    assert_point_close(line.from, DVec3::new(-40.0 / 3.0, -39.9, 20.0));
}

#[test]
fn test_custom_clip_planes_are_respected() {
    let mut vp = side_camera();
    vp.near_clip = 1.0;
    vp.far_clip = 100.0;

    let line = vp.client_to_world(DVec2::new(400.0, 300.0));
    assert_point_close(line.from, DVec3::new(5.0, -19.0, 3.0));
    assert_point_close(line.to, DVec3::new(5.0, 80.0, 3.0));
}

#[test]
fn test_viewport_serde_roundtrip() {
    let vp = parallel_viewport();
    let json = serde_json::to_string(&vp).unwrap();
    let restored: Viewport = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.projection, Projection::Parallel);
    assert_close(restored.width, vp.width);
    assert_point_close(restored.camera_location, vp.camera_location);
    assert_point_close(restored.camera_target, vp.camera_target);
}
