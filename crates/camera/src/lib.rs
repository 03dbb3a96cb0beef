#![warn(missing_docs)]
//! Camera and viewport matrices used to place and pick billboards.

mod viewport;

use glam::{Mat4, Vec3};

pub use viewport::{screen_to_ray, CameraContext, SceneViewport, Viewport};

/// Perspective camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a camera at `position` oriented towards `target`.
    ///
    /// Targets straight above or below the camera clamp to the pitch limit.
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.face(target);
        camera
    }

    /// Re-orient the camera towards `target`.
    pub fn face(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = direction.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = direction.z.atan2(direction.x);
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Update the aspect ratio (call when the viewport resizes).
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_looks_down_negative_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-5);
        assert!(forward.y.abs() < 1e-5);
        assert!((forward.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let camera = Camera::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::new(-1.0, 0.0, 2.0));
        let expected = (Vec3::new(-1.0, 0.0, 2.0) - Vec3::new(3.0, 4.0, 5.0)).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn look_at_own_position_keeps_orientation() {
        let camera = Camera::look_at(Vec3::ONE, Vec3::ONE);
        assert_eq!(camera.yaw, Camera::default().yaw);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn view_maps_target_onto_negative_z_axis() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(in_view.x.abs() < 1e-4);
        assert!(in_view.y.abs() < 1e-4);
        assert!((in_view.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn camera_matrices_are_valid() {
        let camera = Camera::default();

        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let view_proj = proj * view;

        assert!(view.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(proj.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(view_proj.determinant().abs() > 0.0);
    }

    #[test]
    fn zero_height_keeps_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(800.0, 0.0);
        assert_eq!(camera.aspect, 16.0 / 9.0);
        camera.set_aspect(800.0, 600.0);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);
    }
}
