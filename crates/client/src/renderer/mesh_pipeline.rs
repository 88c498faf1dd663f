//! Shaded mesh render pipeline with uniform buffers.
//!
//! One pipeline covers every material mode the demos use (unlit, phong,
//! normal-visualization, toon, textured); the mode travels in the
//! per-instance uniforms.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};
use wgpu::{
    util::DeviceExt, BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline,
    TextureFormat,
};

use super::mesh::MeshVertex;
use super::texture::Texture;

/// Shader source embedded at compile time.
const MESH_SHADER: &str = include_str!("shaders/mesh.wgsl");

/// Fragment shading modes; must match the constants in `mesh.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeMode {
    Unlit = 0,
    Phong = 1,
    Normal = 2,
    Toon = 3,
    Textured = 4,
}

/// Global uniforms (camera, time, light slots).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    /// rgb + intensity.
    pub ambient: [f32; 4],
    /// xyz + intensity; zero intensity disables the slot.
    pub point_pos: [f32; 4],
    pub point_color: [f32; 4],
    /// xyz direction + intensity; zero intensity disables the slot.
    pub dir_dir: [f32; 4],
    pub dir_color: [f32; 4],
}

impl GlobalUniforms {
    pub fn new(projection: Mat4, view: Mat4, camera_pos: Vec3, time: f32) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            camera_pos: camera_pos.into(),
            time,
            ambient: [1.0, 1.0, 1.0, 0.15],
            point_pos: [0.0; 4],
            point_color: [0.0; 4],
            dir_dir: [0.0; 4],
            dir_color: [0.0; 4],
        }
    }
}

/// Per-node uniforms (model matrix, color, shading mode).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceUniforms {
    pub model: [[f32; 4]; 4],
    /// mat3x3 requires padding, so use 3 vec4 columns.
    pub normal_matrix: [[f32; 4]; 3],
    pub color: [f32; 4],
    /// x: shade mode, y: shininess (phong) or band count (toon).
    pub shade: [f32; 4],
}

impl InstanceUniforms {
    pub fn new(model: Mat4, color: Vec4, mode: ShadeMode, shade_param: f32) -> Self {
        // Normal matrix: inverse transpose of the upper-left 3x3.
        let normal_mat = Mat3::from_mat4(model).inverse().transpose();

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: [
                normal_mat.x_axis.extend(0.0).into(),
                normal_mat.y_axis.extend(0.0).into(),
                normal_mat.z_axis.extend(0.0).into(),
            ],
            color: color.into(),
            shade: [mode as u32 as f32, shade_param, 0.0, 0.0],
        }
    }
}

/// Shaded mesh pipeline resources.
pub struct MeshPipeline {
    pub pipeline: RenderPipeline,
    pub global_bind_group_layout: BindGroupLayout,
    pub instance_bind_group_layout: BindGroupLayout,
    pub texture_bind_group_layout: BindGroupLayout,
    pub global_uniform_buffer: Buffer,
    pub global_bind_group: BindGroup,
    /// 1x1 white fallback bound for untextured nodes.
    pub default_texture_bind_group: BindGroup,
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl MeshPipeline {
    /// Create the mesh pipeline.
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });

        // Global uniforms (group 0)
        let global_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mesh_global_bind_group_layout"),
                entries: &[uniform_layout_entry(0)],
            });

        // Per-node uniforms (group 1)
        let instance_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mesh_instance_bind_group_layout"),
                entries: &[uniform_layout_entry(0)],
            });

        // Base color texture (group 2)
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mesh_texture_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[
                &global_bind_group_layout,
                &instance_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let global_uniforms = GlobalUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, 0.0);

        let global_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_global_uniform_buffer"),
            contents: bytemuck::cast_slice(&[global_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_global_bind_group"),
            layout: &global_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_uniform_buffer.as_entire_binding(),
            }],
        });

        let white = Texture::white(device, queue);
        let default_texture_bind_group = Self::texture_bind_group_with_layout(
            device,
            &texture_bind_group_layout,
            &white,
            "mesh_default_texture_bind_group",
        );

        Self {
            pipeline,
            global_bind_group_layout,
            instance_bind_group_layout,
            texture_bind_group_layout,
            global_uniform_buffer,
            global_bind_group,
            default_texture_bind_group,
        }
    }

    /// Update global uniforms.
    pub fn update_global_uniforms(&self, queue: &Queue, uniforms: &GlobalUniforms) {
        queue.write_buffer(
            &self.global_uniform_buffer,
            0,
            bytemuck::cast_slice(&[*uniforms]),
        );
    }

    /// Create a per-node bind group for an instance uniform buffer.
    pub fn create_instance_bind_group(&self, device: &Device, buffer: &Buffer) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_instance_bind_group"),
            layout: &self.instance_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    /// Create a bind group for a base color texture.
    pub fn create_texture_bind_group(&self, device: &Device, texture: &Texture) -> BindGroup {
        Self::texture_bind_group_with_layout(
            device,
            &self.texture_bind_group_layout,
            texture,
            "mesh_texture_bind_group",
        )
    }

    fn texture_bind_group_with_layout(
        device: &Device,
        layout: &BindGroupLayout,
        texture: &Texture,
        label: &str,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }
}
