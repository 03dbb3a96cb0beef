//! Rays and axis-aligned boxes in world space.

use glam::Vec3;

/// Directions shorter than this on an axis are treated as parallel to that axis' slabs.
const PARALLEL_EPSILON: f32 = 1e-12;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Ray direction; does not need to be normalized, distances are in multiples of it.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `distance` along the ray.
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`; `None` when the slice is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for point in rest {
            aabb.min = aabb.min.min(*point);
            aabb.max = aabb.max.max(*point);
        }
        Some(aabb)
    }

    /// Slab test against `ray`.
    ///
    /// Returns the entry distance along the ray, or `0.0` when the origin is
    /// already inside the box. Boxes entirely behind the origin are misses.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = 0.0_f32;
        let mut t_far = f32::MAX;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (min, max) = (self.min[axis], self.max[axis]);

            if direction.abs() < PARALLEL_EPSILON {
                // Parallel to this slab pair: origin must already be between them
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t1 = (min - origin) * inv;
            let mut t2 = (max - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_near = t_near.max(t1);
            t_far = t_far.min(t2);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cube(center: Vec3, size: f32) -> Aabb {
        Aabb::new(center - Vec3::splat(size * 0.5), center + Vec3::splat(size * 0.5))
    }

    #[test]
    fn test_aabb_ray_intersection() {
        let aabb = cube(Vec3::ZERO, 1.0);

        // Ray pointing at center from positive Z
        let hit = aabb.ray_intersection(&Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!((hit.unwrap() - 1.5).abs() < 0.001);

        // Ray missing the box
        let miss = aabb.ray_intersection(&Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!(miss.is_none());
    }

    #[test]
    fn box_behind_origin_is_missed() {
        let aabb = cube(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        assert!(aabb.ray_intersection(&ray).is_none());
    }

    #[test]
    fn origin_inside_reports_zero_distance() {
        let aabb = cube(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(aabb.ray_intersection(&ray), Some(0.0));
    }

    #[test]
    fn flat_box_is_hit_head_on() {
        // Zero thickness along Z, like a screen-facing quad footprint
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let distance = aabb.ray_intersection(&ray).unwrap();
        assert!((distance - 10.0).abs() < 1e-5);
        assert!((ray.at(distance) - Vec3::ZERO).length() < 1e-5);
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let aabb = cube(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::NEG_Z);
        assert!(aabb.ray_intersection(&ray).is_none());
    }

    #[test]
    fn from_points_encloses_all() {
        let points = [
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 0.5));
        assert!(points
            .iter()
            .all(|p| p.cmpge(aabb.min).all() && p.cmple(aabb.max).all()));
        assert!(Aabb::from_points(&[]).is_none());
    }

    proptest! {
        #[test]
        fn rays_aimed_at_the_center_hit(
            cx in -50.0f32..50.0, cy in -50.0f32..50.0, cz in -50.0f32..50.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0, dz in -1.0f32..1.0,
            distance in 5.0f32..100.0,
        ) {
            let direction = Vec3::new(dx, dy, dz);
            prop_assume!(direction.length() > 0.1);
            let direction = direction.normalize();
            let center = Vec3::new(cx, cy, cz);
            let aabb = cube(center, 2.0);

            let ray = Ray::new(center - direction * distance, direction);
            let hit = aabb.ray_intersection(&ray);
            prop_assert!(hit.is_some());
            let t = hit.unwrap();
            prop_assert!(t <= distance);
            prop_assert!(t >= distance - 2.0);
        }
    }
}
