//! glTF / glb to [`Model`].
//!
//! Node hierarchies are flattened: every primitive becomes one [`Mesh`] whose
//! positions and normals are already in model space.

use cgmath::{InnerSpace, Point3, Quaternion, Rotation, Vector3};
use log::debug;

use crate::{
    data_structures::{
        instance::Instance,
        model::{Mesh, Model},
    },
    error::{AssetLoadError, AssetLoadErrorKind},
    resources::fetch::load_binary,
};

/// Parses a glb (or a glTF whose buffers live next to it in `dir`) into a
/// model.
pub async fn load_model_gltf(dir: &str, name: &str, bytes: &[u8]) -> Result<Model, AssetLoadError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| AssetLoadError::new(name, e))?;

    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf.blob.as_deref().ok_or_else(|| {
                    AssetLoadError::new(name, AssetLoadErrorKind::MissingBuffer(buffer.index()))
                })?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(load_binary(dir, uri).await?);
            }
        }
    }

    let meshes = meshes_from_document(&gltf.document, &buffer_data);
    Model::new(name, meshes).ok_or_else(|| AssetLoadError::new(name, AssetLoadErrorKind::NoGeometry))
}

/// Walks the default scene (or every scene when none is marked default).
pub fn meshes_from_document(document: &gltf::Document, buffers: &[Vec<u8>]) -> Vec<Mesh> {
    let mut meshes = Vec::new();
    let roots: Vec<gltf::Node> = match document.default_scene() {
        Some(scene) => scene.nodes().collect(),
        None => document.scenes().flat_map(|scene| scene.nodes()).collect(),
    };
    for node in roots {
        collect_node(&node, &Instance::new(), buffers, &mut meshes);
    }
    meshes
}

fn local_transform(node: &gltf::Node) -> Instance {
    let (translation, [x, y, z, w], scale) = node.transform().decomposed();
    Instance {
        position: translation.into(),
        rotation: Quaternion::new(w, x, y, z),
        scale: scale.into(),
    }
}

fn collect_node(node: &gltf::Node, parent: &Instance, buffers: &[Vec<u8>], out: &mut Vec<Mesh>) {
    let world = parent * &local_transform(node);

    if let Some(mesh) = node.mesh() {
        let mesh_name = mesh.name().unwrap_or("unknown_mesh");
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                debug!("Skipping non-triangle primitive in mesh {}", mesh_name);
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(iter) => iter
                    .map(|p| world.transform_point(Point3::from(p)).into())
                    .collect(),
                None => continue,
            };
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(iter) => iter
                    .map(|n| {
                        let n = world.rotation.rotate_vector(Vector3::from(n));
                        normalize_or_up(n).into()
                    })
                    .collect(),
                None => Vec::new(),
            };
            let normals = if normals.len() == positions.len() {
                normals
            } else {
                face_normals(&positions, &indices)
            };

            out.push(Mesh {
                name: mesh_name.to_string(),
                positions,
                normals,
                indices,
            });
        }
    }

    for child in node.children() {
        collect_node(&child, &world, buffers, out);
    }
}

fn normalize_or_up(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > f32::EPSILON {
        v.normalize()
    } else {
        Vector3::unit_y()
    }
}

/// Averaged face normals for meshes exported without a normal attribute.
fn face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let (pa, pb, pc) = (Vector3::from(*pa), Vector3::from(*pb), Vector3::from(*pc));
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter().map(|n| normalize_or_up(n).into()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_normals_point_out_of_a_ccw_triangle() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = face_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn unreferenced_vertices_get_a_default_normal() {
        let positions = [[0.0, 0.0, 0.0]];
        assert_eq!(face_normals(&positions, &[]), vec![[0.0, 1.0, 0.0]]);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = futures::executor::block_on(load_model_gltf("assets", "junk.glb", b"not a glb"))
            .unwrap_err();
        assert_eq!(err.name, "junk.glb");
        assert!(matches!(err.kind, AssetLoadErrorKind::Gltf(_)));
    }
}
