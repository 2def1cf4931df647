use cgmath::{Point3, Vector3};

use crate::camera::Ray;

/// Axis-aligned box used as an invisible hit-volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn from_center_size(center: Point3<f32>, size: Vector3<f32>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Grows the box so it contains `point`.
    pub fn include(&mut self, point: Point3<f32>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Slab test. Returns the distance along the ray to the first hit, or
    /// `None` when the ray misses or the box lies entirely behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
        let direction = [ray.direction.x, ray.direction.y, ray.direction.z];
        let min = [self.min.x, self.min.y, self.min.z];
        let max = [self.max.x, self.max.y, self.max.z];

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            if direction[axis] == 0.0 {
                // parallel to this slab: the origin must already be inside it
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / direction[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_center_size(Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
    }

    fn ray(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    #[test]
    fn head_on_hit_reports_front_face_distance() {
        let t = unit_box().intersect(&ray([0.0, 0.0, 10.0], [0.0, 0.0, -1.0]));
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn miss_beside_the_box() {
        assert!(unit_box().intersect(&ray([3.0, 0.0, 10.0], [0.0, 0.0, -1.0])).is_none());
    }

    #[test]
    fn box_behind_origin_is_not_hit() {
        assert!(unit_box().intersect(&ray([0.0, 0.0, 10.0], [0.0, 0.0, 1.0])).is_none());
    }

    #[test]
    fn origin_inside_hits_exit_face() {
        assert_eq!(unit_box().intersect(&ray([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])), Some(1.0));
    }

    #[test]
    fn include_grows_bounds() {
        let mut b = unit_box();
        b.include(Point3::new(5.0, -3.0, 0.0));
        assert_eq!(b.max.x, 5.0);
        assert_eq!(b.min.y, -3.0);
        assert_eq!(b.center(), Point3::new(2.0, -1.0, 0.0));
    }
}
