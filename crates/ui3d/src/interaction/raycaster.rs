//! Screen-space billboard picking

use billboard3d_camera::CameraContext;
use billboard3d_core::{Aabb, BillboardSource, Ray};
use glam::{DMat4, DVec4, Mat4, Vec3};
use tracing::debug;

/// Result of a billboard raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardHit {
    /// Position where the ray entered the billboard bounds
    pub point: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// World-space box the ray was tested against
    pub bounds: Aabb,
}

/// Picks billboards by their on-screen rectangle.
///
/// The billboard's pixel rectangle around its first anchor is projected back
/// into world space and the ray is tested against the axis-aligned box of the
/// four reprojected corners. The box is looser than the camera-facing quad
/// itself whenever the camera looks at it obliquely; callers rely on that
/// looseness, so it is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSpaceHitTester {
    /// Multiplier applied to the billboard's half height.
    pub height_scale: f32,
}

impl Default for ScreenSpaceHitTester {
    fn default() -> Self {
        Self { height_scale: 1.0 }
    }
}

impl ScreenSpaceHitTester {
    /// Create a tester with a custom height scale.
    pub fn new(height_scale: f32) -> Self {
        Self { height_scale }
    }

    /// World-space box covering the billboard's on-screen rectangle.
    ///
    /// `None` for zero-sized billboards, sources without an anchor, anchors
    /// at or behind the camera plane and singular camera matrices.
    pub fn world_bounds(
        &self,
        source: &dyn BillboardSource,
        camera: &dyn CameraContext,
    ) -> Option<Aabb> {
        let (width, height) = (source.width(), source.height());
        if width == 0.0 || height == 0.0 {
            return None;
        }
        let anchor = *source.positions().first()?;

        let world_to_screen = to_dmat4(camera.world_to_screen());
        let determinant = world_to_screen.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            debug!("camera matrices are singular, billboard cannot be picked");
            return None;
        }
        let screen_to_world = world_to_screen.inverse();

        let screen = world_to_screen * anchor.as_dvec3().extend(1.0);
        if screen.w <= f64::EPSILON {
            debug!(?anchor, "billboard anchor is behind the camera");
            return None;
        }

        let half_width = f64::from(width) / 2.0;
        let half_height = f64::from(height) / 2.0 * f64::from(self.height_scale);
        let (left, right) = (-half_width, half_width);
        let (top, bottom) = (-half_height, half_height);

        let mut corners = [Vec3::ZERO; 4];
        for (corner, (dx, dy)) in corners
            .iter_mut()
            .zip([(left, bottom), (right, bottom), (right, top), (left, top)])
        {
            // Offsets are scaled by w so they stay in pixels after the divide
            let on_screen = DVec4::new(
                screen.x + dx * screen.w,
                screen.y + dy * screen.w,
                screen.z,
                screen.w,
            );
            let world = screen_to_world * on_screen;
            if world.w.abs() <= f64::EPSILON {
                return None;
            }
            *corner = (world.truncate() / world.w).as_vec3();
        }

        Aabb::from_points(&corners)
    }

    /// Test `ray` against the billboard's on-screen rectangle.
    pub fn test(
        &self,
        ray: &Ray,
        source: &dyn BillboardSource,
        camera: &dyn CameraContext,
    ) -> Option<BillboardHit> {
        let bounds = self.world_bounds(source, camera)?;
        let distance = bounds.ray_intersection(ray)?;
        Some(BillboardHit {
            point: ray.at(distance),
            distance,
            bounds,
        })
    }
}

fn to_dmat4(matrix: Mat4) -> DMat4 {
    DMat4::from_cols_array(&matrix.to_cols_array().map(f64::from))
}
