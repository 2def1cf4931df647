//! CPU-side model data.
//!
//! A [`Model`] is what the asset loader produces from one glTF file: the
//! flattened triangle meshes, their bounds, and where the model sits on the
//! wall. The only thing that changes after registration is the spin.

use std::f64::consts::TAU;

use cgmath::{Point3, Rad, Vector3};

use crate::data_structures::{aabb::Aabb, instance::Instance};

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn num_elements(&self) -> u32 {
        self.indices.len() as u32
    }

    /// A box centred on the origin with one quad (four vertices) per face so
    /// every face gets a flat normal.
    pub fn cuboid(name: &str, size: Vector3<f32>) -> Self {
        let h = size * 0.5;
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [[-h.x, -h.y, h.z], [h.x, -h.y, h.z], [h.x, h.y, h.z], [-h.x, h.y, h.z]],
            ),
            (
                [0.0, 0.0, -1.0],
                [[h.x, -h.y, -h.z], [-h.x, -h.y, -h.z], [-h.x, h.y, -h.z], [h.x, h.y, -h.z]],
            ),
            (
                [1.0, 0.0, 0.0],
                [[h.x, -h.y, h.z], [h.x, -h.y, -h.z], [h.x, h.y, -h.z], [h.x, h.y, h.z]],
            ),
            (
                [-1.0, 0.0, 0.0],
                [[-h.x, -h.y, -h.z], [-h.x, -h.y, h.z], [-h.x, h.y, h.z], [-h.x, h.y, -h.z]],
            ),
            (
                [0.0, 1.0, 0.0],
                [[-h.x, h.y, h.z], [h.x, h.y, h.z], [h.x, h.y, -h.z], [-h.x, h.y, -h.z]],
            ),
            (
                [0.0, -1.0, 0.0],
                [[-h.x, -h.y, -h.z], [h.x, -h.y, -h.z], [h.x, -h.y, h.z], [-h.x, -h.y, h.z]],
            ),
        ];
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = positions.len() as u32;
            positions.extend_from_slice(&corners);
            normals.extend_from_slice(&[normal; 4]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self {
            name: name.to_string(),
            positions,
            normals,
            indices,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    /// Bounds of all mesh positions in model space.
    pub bounds: Aabb,
    pub placement: Instance,
    /// Kept in f64 so a wall left running for days still shows
    /// `frames × step (mod 2π)`.
    yaw: f64,
}

impl Model {
    /// `None` when the meshes carry no positions at all.
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Option<Self> {
        let mut points = meshes.iter().flat_map(|mesh| mesh.positions.iter());
        let first: Point3<f32> = (*points.next()?).into();
        let mut bounds = Aabb {
            min: first,
            max: first,
        };
        points.for_each(|p| bounds.include((*p).into()));
        Some(Self {
            name: name.into(),
            meshes,
            bounds,
            placement: Instance::new(),
            yaw: 0.0,
        })
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.placement.position = Vector3::new(position.x, position.y, position.z);
    }

    pub fn position(&self) -> Point3<f32> {
        let p = self.placement.position;
        Point3::new(p.x, p.y, p.z)
    }

    /// Current spin about the vertical axis, always in `0..2π`.
    pub fn yaw(&self) -> Rad<f32> {
        let yaw = self.yaw as f32;
        // a value just under 2π can round up when narrowed
        Rad(if yaw >= std::f32::consts::TAU { 0.0 } else { yaw })
    }

    pub fn spin(&mut self, step: Rad<f32>) {
        self.yaw = (self.yaw + f64::from(step.0)).rem_euclid(TAU);
    }

    pub fn world_matrix(&self) -> cgmath::Matrix4<f32> {
        self.placement.to_matrix_with_yaw(self.yaw())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}
