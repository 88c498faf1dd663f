//! Scene content: transforms, materials, lights and mesh nodes.

use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

use crate::renderer::mesh_pipeline::GlobalUniforms;
use crate::renderer::GpuMesh;

/// Position / rotation / scale, composed into a model matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

/// Fragment shading selection for a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Flat base color.
    Unlit,
    /// Ambient + diffuse + specular.
    Phong { shininess: f32 },
    /// World-space normal visualization.
    Normal,
    /// Banded diffuse.
    Toon { steps: u32 },
    /// Base color modulated by the bound texture.
    Textured,
}

/// Base color + shading mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec4,
    pub shading: Shading,
}

impl Material {
    pub fn unlit(color: Vec4) -> Self {
        Self {
            color,
            shading: Shading::Unlit,
        }
    }

    pub fn phong(color: Vec4) -> Self {
        Self {
            color,
            shading: Shading::Phong { shininess: 32.0 },
        }
    }

    pub fn normal() -> Self {
        Self {
            color: Vec4::ONE,
            shading: Shading::Normal,
        }
    }

    pub fn toon(color: Vec4) -> Self {
        Self {
            color,
            shading: Shading::Toon { steps: 4 },
        }
    }

    pub fn textured() -> Self {
        Self {
            color: Vec4::ONE,
            shading: Shading::Textured,
        }
    }
}

/// Uniform background light.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Omnidirectional light at a position.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Parallel light along a direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// The scene's light slots. Zero-intensity slots are disabled in the shader.
#[derive(Debug, Clone, Copy)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub point: Option<PointLight>,
    pub directional: Option<DirectionalLight>,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Vec3::ONE,
                intensity: 0.15,
            },
            point: None,
            directional: None,
        }
    }
}

impl Lights {
    /// Fill the light slots of the global uniforms.
    pub(crate) fn write_uniforms(&self, globals: &mut GlobalUniforms) {
        globals.ambient = [
            self.ambient.color.x,
            self.ambient.color.y,
            self.ambient.color.z,
            self.ambient.intensity,
        ];
        if let Some(point) = self.point {
            globals.point_pos = [
                point.position.x,
                point.position.y,
                point.position.z,
                point.intensity,
            ];
            globals.point_color = point.color.extend(1.0).into();
        }
        if let Some(dir) = self.directional {
            globals.dir_dir = [
                dir.direction.x,
                dir.direction.y,
                dir.direction.z,
                dir.intensity,
            ];
            globals.dir_color = dir.color.extend(1.0).into();
        }
    }
}

/// A drawable mesh instance in the scene.
pub struct MeshNode {
    pub name: String,
    pub(crate) gpu: GpuMesh,
    pub transform: Transform,
    pub material: Material,
    /// Index into [`Scene::groups`]; the group transform composes on top.
    pub group: Option<usize>,
    pub visible: bool,
}

impl MeshNode {
    pub fn new(name: impl Into<String>, gpu: GpuMesh, material: Material) -> Self {
        Self {
            name: name.into(),
            gpu,
            transform: Transform::default(),
            material,
            group: None,
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }
}

/// All drawable content plus lights and background.
pub struct Scene {
    pub nodes: Vec<MeshNode>,
    /// Shared parent transforms, addressed by index from nodes.
    pub groups: Vec<Transform>,
    pub lights: Lights,
    pub clear_color: wgpu::Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            groups: Vec::new(),
            lights: Lights::default(),
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.06,
                a: 1.0,
            },
        }
    }

    /// Add a node, returning its index.
    pub fn add(&mut self, node: MeshNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Add a group transform, returning its index.
    pub fn add_group(&mut self, transform: Transform) -> usize {
        self.groups.push(transform);
        self.groups.len() - 1
    }

    pub fn node_mut(&mut self, index: usize) -> &mut MeshNode {
        &mut self.nodes[index]
    }

    pub fn group_mut(&mut self, index: usize) -> &mut Transform {
        &mut self.groups[index]
    }

    /// Model matrix of a node, including its group's transform.
    pub fn model_matrix(&self, node: &MeshNode) -> Mat4 {
        match node.group {
            Some(g) => self.groups[g].matrix() * node.transform.matrix(),
            None => node.transform.matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_is_identity() {
        let t = Transform::default();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_translates() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let p = t.matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn transform_scales_before_rotating() {
        let t = Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // Unit X scales to 2, then rotates 90 deg about Y onto -Z.
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn lights_disable_unused_slots() {
        let lights = Lights::default();
        let mut globals = GlobalUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, 0.0);
        lights.write_uniforms(&mut globals);
        assert_eq!(globals.point_pos[3], 0.0);
        assert_eq!(globals.dir_dir[3], 0.0);
        assert_eq!(globals.ambient[3], 0.15);
    }

    #[test]
    fn lights_fill_point_slot() {
        let lights = Lights {
            point: Some(PointLight {
                position: Vec3::new(2.0, 3.0, 4.0),
                color: Vec3::ONE,
                intensity: 0.5,
            }),
            ..Default::default()
        };
        let mut globals = GlobalUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, 0.0);
        lights.write_uniforms(&mut globals);
        assert_eq!(globals.point_pos, [2.0, 3.0, 4.0, 0.5]);
    }
}
