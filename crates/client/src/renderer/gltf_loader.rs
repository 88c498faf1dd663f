//! glTF model loader.
//!
//! Loads .glb/.gltf files and extracts mesh primitives (positions, normals,
//! texture coordinates, base color) and point/directional lights from the
//! KHR_lights_punctual extension, as plain scene-ready data.

use std::path::Path;

use glam::{Mat4, Vec3, Vec4};

use super::mesh::{MeshData, MeshVertex};
use crate::scene::Transform;

/// Error type for glTF loading.
#[derive(Debug, thiserror::Error)]
pub enum GltfError {
    #[error("Failed to load glTF file: {0}")]
    LoadError(#[from] gltf::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing position data for mesh: {0}")]
    MissingPositions(String),
}

/// One mesh primitive, flattened into world-space-ready data.
pub struct LoadedMesh {
    pub name: String,
    pub mesh: MeshData,
    pub transform: Transform,
    pub base_color: Vec4,
}

/// A light pulled from KHR_lights_punctual.
pub struct LoadedLight {
    pub name: String,
    pub kind: LoadedLightKind,
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadedLightKind {
    Point,
    Directional,
}

/// Everything extracted from one file.
pub struct LoadedModel {
    pub meshes: Vec<LoadedMesh>,
    pub lights: Vec<LoadedLight>,
}

/// Load a glTF/GLB file.
pub fn load_gltf(path: impl AsRef<Path>) -> Result<LoadedModel, GltfError> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;

    let mut meshes = Vec::new();

    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, Mat4::IDENTITY, &mut meshes)?;
        }
    }

    let lights = extract_lights(&document);

    tracing::info!(
        "Loaded glTF {}: {} meshes, {} lights",
        path.display(),
        meshes.len(),
        lights.len()
    );

    Ok(LoadedModel { meshes, lights })
}

/// Process a glTF node and its children recursively, accumulating parent
/// transforms.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    meshes: &mut Vec<LoadedMesh>,
) -> Result<(), GltfError> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        let name = mesh.name().unwrap_or("unnamed").to_string();

        for primitive in mesh.primitives() {
            let data = extract_primitive(&primitive, buffers, &name)?;

            let color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            meshes.push(LoadedMesh {
                name: name.clone(),
                mesh: data,
                transform: decompose(world),
                base_color: Vec4::from_array(color),
            });
        }
    }

    for child in node.children() {
        process_node(&child, buffers, world, meshes)?;
    }

    Ok(())
}

/// Flatten a glTF primitive into a triangle soup.
fn extract_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    name: &str,
) -> Result<MeshData, GltfError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| GltfError::MissingPositions(name.to_string()))?
        .collect();

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|iter| iter.collect())
        .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let vertices = indices
        .iter()
        .map(|&i| {
            let i = i as usize;
            MeshVertex {
                position: positions[i],
                normal: normals[i],
                uv: uvs[i],
            }
        })
        .collect();

    Ok(MeshData { vertices })
}

/// Pull point/directional lights out of KHR_lights_punctual.
fn extract_lights(document: &gltf::Document) -> Vec<LoadedLight> {
    let Some(lights_ext) = document.lights() else {
        return Vec::new();
    };

    let mut lights = Vec::new();
    for (idx, light) in lights_ext.enumerate() {
        let kind = match light.kind() {
            gltf::khr_lights_punctual::Kind::Point => LoadedLightKind::Point,
            gltf::khr_lights_punctual::Kind::Directional => LoadedLightKind::Directional,
            // Spot lights fall back to point; the demos have no cone shading.
            gltf::khr_lights_punctual::Kind::Spot { .. } => LoadedLightKind::Point,
        };

        // Find the node that references this light for its position.
        let position = document
            .nodes()
            .find(|n| n.light().map(|l| l.index() == idx).unwrap_or(false))
            .map(|n| {
                let t = n.transform().decomposed().0;
                Vec3::from_array(t)
            })
            .unwrap_or(Vec3::ZERO);

        lights.push(LoadedLight {
            name: light.name().unwrap_or("light").to_string(),
            kind,
            position,
            color: Vec3::from_array(light.color()),
            intensity: light.intensity(),
        });
    }
    lights
}

/// Break a world matrix back into the scene's transform representation.
fn decompose(matrix: Mat4) -> Transform {
    let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
    let (x, y, z) = rotation.to_euler(glam::EulerRot::XYZ);
    Transform {
        position: translation,
        rotation: Vec3::new(x, y, z),
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_identity() {
        let t = decompose(Mat4::IDENTITY);
        assert!(t.position.length() < 1e-6);
        assert!(t.rotation.length() < 1e-6);
        assert!((t.scale - Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn test_decompose_roundtrip() {
        let original = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.2, 0.4, 0.1),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let back = decompose(original.matrix());
        assert!((back.position - original.position).length() < 1e-4);
        assert!((back.rotation - original.rotation).length() < 1e-4);
        assert!((back.scale - original.scale).length() < 1e-4);
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(matches!(
            load_gltf("/nonexistent/model.glb"),
            Err(GltfError::LoadError(_) | GltfError::IoError(_))
        ));
    }
}
