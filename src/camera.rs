//! Perspective camera, pointer coordinates and picking rays.
//!
//! The camera is fixed for the whole session: it sits in front of the wall
//! and looks at its centre. Only the aspect ratio changes when the host
//! resizes the viewport.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector2, Vector3};

use crate::config::WallConfig;

/// cgmath builds OpenGL style clip space (z in -1..1); wgpu expects 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A pointer position in physical pixels, origin top-left, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PointerPosition {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A half-line starting at `origin`. `direction` is normalised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(config: &WallConfig) -> Self {
        let (width, height) = config.viewport;
        Self {
            eye: config.eye,
            target: config.target,
            up: Vector3::unit_y(),
            fovy: config.fovy.into(),
            znear: config.znear,
            zfar: config.zfar,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Adopts a new viewport size. Zero-sized viewports (minimised windows)
    /// are ignored so the aspect ratio never degenerates.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj = cgmath::perspective(self.fovy, self.aspect(), self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * self.view_matrix()
    }

    /// Orthonormal camera basis: (forward, right, up).
    fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.eye).normalize();
        let mut right = forward.cross(self.up);
        if right.magnitude2() < f32::EPSILON {
            right = Vector3::unit_x();
        }
        let right = right.normalize();
        let up = right.cross(forward);
        (forward, right, up)
    }

    fn tan_half_fovy(&self) -> f32 {
        (self.fovy.0 / 2.0).tan()
    }

    /// Screen pixels to normalised device coordinates, both axes in -1..1
    /// with y pointing up.
    pub fn to_ndc(&self, pointer: PointerPosition) -> Vector2<f32> {
        let x = (pointer.x / f64::from(self.width)) * 2.0 - 1.0;
        let y = -(pointer.y / f64::from(self.height)) * 2.0 + 1.0;
        Vector2::new(x as f32, y as f32)
    }

    /// The ray leaving the eye through a point in normalised device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vector2<f32>) -> Ray {
        let (forward, right, up) = self.basis();
        let tan = self.tan_half_fovy();
        let direction =
            forward + right * (ndc.x * tan * self.aspect()) + up * (ndc.y * tan);
        Ray {
            origin: self.eye,
            direction: direction.normalize(),
        }
    }

    pub fn cast_ray_from_pointer(&self, pointer: PointerPosition) -> Ray {
        self.ray_from_ndc(self.to_ndc(pointer))
    }

    /// Projects a world point to screen pixels. `None` when the point lies
    /// behind the near plane.
    pub fn world_to_screen(&self, point: Point3<f32>) -> Option<PointerPosition> {
        let (forward, right, up) = self.basis();
        let rel = point - self.eye;
        let depth = rel.dot(forward);
        if depth <= self.znear {
            return None;
        }
        let tan = self.tan_half_fovy();
        let ndc_x = rel.dot(right) / (depth * tan * self.aspect());
        let ndc_y = rel.dot(up) / (depth * tan);
        Some(PointerPosition {
            x: (f64::from(ndc_x) + 1.0) / 2.0 * f64::from(self.width),
            y: (1.0 - f64::from(ndc_y)) / 2.0 * f64::from(self.height),
        })
    }
}
