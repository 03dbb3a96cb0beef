//! Viewport mapping and the camera capability consumed by picking.

use crate::Camera;
use billboard3d_core::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Pixel rectangle a camera renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Depth written for the near plane.
    pub min_depth: f32,
    /// Depth written for the far plane.
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    /// Full-target viewport of the given size with a `0..1` depth range.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Maps clip-space coordinates to pixels (y grows downwards).
    ///
    /// The mapping stays homogeneous: dividing the result by `w` gives pixel
    /// coordinates, so screen-space offsets can be scaled by `w` before the
    /// inverse transform.
    pub fn matrix(&self) -> Mat4 {
        let half_width = self.width * 0.5;
        let half_height = self.height * 0.5;
        Mat4::from_cols(
            Vec4::new(half_width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -half_height, 0.0, 0.0),
            Vec4::new(0.0, 0.0, self.max_depth - self.min_depth, 0.0),
            Vec4::new(self.x + half_width, self.y + half_height, self.min_depth, 1.0),
        )
    }
}

/// Camera matrices of the viewport a billboard is rendered into.
pub trait CameraContext {
    /// World space -> camera space.
    fn view_matrix(&self) -> Mat4;

    /// Camera space -> clip space.
    fn projection_matrix(&self) -> Mat4;

    /// Clip space -> viewport pixels (homogeneous).
    fn viewport_matrix(&self) -> Mat4;

    /// Composed world space -> homogeneous screen space transform.
    fn world_to_screen(&self) -> Mat4 {
        self.viewport_matrix() * self.projection_matrix() * self.view_matrix()
    }

    /// Camera eye position in world space.
    fn eye_position(&self) -> Vec3 {
        self.view_matrix().inverse().transform_point3(Vec3::ZERO)
    }
}

/// A camera bound to the viewport it renders into.
#[derive(Debug, Clone)]
pub struct SceneViewport {
    camera: Camera,
    viewport: Viewport,
}

impl SceneViewport {
    /// Bind `camera` to `viewport`, matching the camera aspect to the viewport.
    pub fn new(mut camera: Camera, viewport: Viewport) -> Self {
        camera.set_aspect(viewport.width, viewport.height);
        Self { camera, viewport }
    }

    /// The bound camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The pixel rectangle.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl CameraContext for SceneViewport {
    fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    fn projection_matrix(&self) -> Mat4 {
        self.camera.projection_matrix()
    }

    fn viewport_matrix(&self) -> Mat4 {
        self.viewport.matrix()
    }

    fn eye_position(&self) -> Vec3 {
        self.camera.position
    }
}

/// Convert a pixel position to a world-space ray leaving the camera eye.
///
/// Returns `None` when the camera matrices are degenerate.
pub fn screen_to_ray(pixel: Vec2, camera: &dyn CameraContext) -> Option<Ray> {
    let screen_to_world = camera.world_to_screen().inverse();

    // Unproject the pixel at the far end of the depth range
    let far = screen_to_world * Vec4::new(pixel.x, pixel.y, 1.0, 1.0);
    if far.w.abs() <= f32::EPSILON {
        return None;
    }
    let far = far.truncate() / far.w;

    let origin = camera.eye_position();
    let direction = (far - origin).normalize_or_zero();
    if direction == Vec3::ZERO || !direction.is_finite() {
        return None;
    }
    Some(Ray::new(origin, direction))
}
