//! Placement of a model in the world.
//!
//! An [`Instance`] is position, rotation and scale. The asset loader uses it
//! to flatten glTF node hierarchies and the scene registry uses it to put a
//! model at its slot on the wall.

use std::ops::Mul;

use cgmath::{EuclideanSpace, One, Point3, Quaternion, Rad, Rotation, Rotation3, Vector3};

#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Same as [`to_matrix`](Self::to_matrix) with an extra spin about the
    /// vertical axis applied in model space.
    pub fn to_matrix_with_yaw(&self, yaw: Rad<f32>) -> cgmath::Matrix4<f32> {
        let spun = Instance {
            rotation: self.rotation * Quaternion::from_angle_y(yaw),
            ..self.clone()
        };
        spun.to_matrix()
    }

    pub fn transform_point(&self, point: Point3<f32>) -> Point3<f32> {
        let scaled = Vector3::new(
            point.x * self.scale.x,
            point.y * self.scale.y,
            point.z * self.scale.z,
        );
        Point3::from_vec(self.rotation.rotate_vector(scaled) + self.position)
    }
}

impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    /// Parent times child: the child's transform expressed in the parent's space.
    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let scaled_rhs_pos = Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        let new_position = self.position + (self.rotation * scaled_rhs_pos);

        Instance {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl From<Vector3<f32>> for Instance {
    fn from(position: Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, InnerSpace};

    use super::*;

    #[test]
    fn parent_translation_moves_child() {
        let parent = Instance::from(Vector3::new(1.0, 2.0, 3.0));
        let child = Instance::from(Vector3::new(0.5, 0.0, 0.0));
        let world = &parent * &child;
        assert_eq!(world.position, Vector3::new(1.5, 2.0, 3.0));
    }

    #[test]
    fn rotation_is_applied_before_translation() {
        let instance = Instance {
            position: Vector3::new(0.0, 0.0, -1.0),
            rotation: Quaternion::from_angle_y(Deg(90.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        };
        let p = instance.transform_point(Point3::new(1.0, 0.0, 0.0));
        // +x rotated a quarter turn about +y lands on -z
        assert!((p - Point3::new(0.0, 0.0, -2.0)).magnitude() < 1e-5);
    }
}
