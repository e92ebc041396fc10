use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// An inverted box that any point extends. Stays empty until the first fold.
    pub fn empty() -> AABB {
        AABB {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn largest_extent(&self) -> f32 {
        self.extent().max_element()
    }

    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Folds the eight local corners, moved into world space, into this box.
    ///
    /// This bounds the transformed box, not the geometry inside it, so a
    /// rotated object can report a looser box than its vertices would.
    pub fn extend_transformed_corners(&mut self, corners: &[Vec3; 8], transform: &Mat4) {
        for corner in corners {
            self.extend(transform.transform_point3(*corner));
        }
    }

    #[allow(dead_code)]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_empty_box_is_empty_until_extended() {
        let mut aabb = AABB::empty();
        assert!(aabb.is_empty());

        aabb.extend(Vec3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_center_and_largest_extent() {
        let aabb = AABB::new(Vec3::new(4.0, -2.0, 0.0), Vec3::new(-4.0, 2.0, 1.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(aabb.largest_extent(), 8.0);
    }

    #[test]
    fn test_transformed_corners_follow_translation() {
        let local = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let mut world = AABB::empty();
        world.extend_transformed_corners(
            &local.corners(),
            &Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)),
        );

        assert_eq!(world.min, Vec3::new(9.0, -1.0, -1.0));
        assert_eq!(world.max, Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotated_corners_widen_the_box() {
        let local = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let mut world = AABB::empty();
        world.extend_transformed_corners(
            &local.corners(),
            &Mat4::from_quat(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
        );

        let half_diagonal = 2.0_f32.sqrt();
        assert!((world.max.x - half_diagonal).abs() < 1e-5);
        assert!((world.max.z - 1.0).abs() < 1e-5);
        assert!(world.contains_point(Vec3::new(1.4, 0.0, 0.0)));
    }
}
