//! WebGPU renderer for the Vela demos.
//!
//! Uses wgpu for cross-platform GPU rendering (Vulkan/Metal/DX12). Owns the
//! surface, the two pipelines (shaded meshes, point clouds) and the depth
//! buffer; scene content lives in [`crate::scene`].

pub mod gltf_loader;
pub mod mesh;
pub mod mesh_pipeline;
pub mod point_cloud;
pub mod points_pipeline;
pub mod texture;

use std::sync::Arc;

use glam::Mat4;
use wgpu::{
    util::DeviceExt, Backends, Device, DeviceDescriptor, Instance, InstanceDescriptor,
    PowerPreference, Queue, RequestAdapterOptions, Surface, SurfaceConfiguration, TextureUsages,
};
use winit::{dpi::PhysicalSize, window::Window};

use vela_core::{PointCloudBackend, PointCloudData};

use crate::camera::OrbitCamera;
use crate::scene::{Scene, Shading};
use self::mesh::MeshData;
use self::mesh_pipeline::{GlobalUniforms, InstanceUniforms, MeshPipeline, ShadeMode};
use self::point_cloud::GpuPointCloud;
use self::points_pipeline::{PointsGlobals, PointsPipeline};
use self::texture::Texture;

/// An uploaded mesh with its per-node GPU state. The vertex buffer (and
/// texture binding) can be shared between nodes via
/// [`Renderer::instantiate_mesh`]; the uniform buffer is always per node.
pub struct GpuMesh {
    pub(crate) vertex_buffer: Arc<wgpu::Buffer>,
    pub(crate) vertex_count: u32,
    pub(crate) instance_uniform_buffer: wgpu::Buffer,
    pub(crate) instance_bind_group: wgpu::BindGroup,
    pub(crate) texture_bind_group: Option<Arc<wgpu::BindGroup>>,
}

/// The main renderer.
pub struct Renderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    mesh_pipeline: MeshPipeline,
    points_pipeline: PointsPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = Instance::new(&InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No suitable GPU adapter found"))?;

        tracing::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    label: Some("vela_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);
        let mesh_pipeline = MeshPipeline::new(&device, &queue, format);
        let points_pipeline = PointsPipeline::new(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_view,
            mesh_pipeline,
            points_pipeline,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Reconfigure the surface and depth buffer after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Upload mesh data and wrap it with its per-node GPU state.
    pub fn upload_mesh(&self, mesh: &MeshData) -> GpuMesh {
        self.upload_mesh_with_texture(mesh, None)
    }

    /// Upload mesh data with a base color texture.
    pub fn upload_mesh_with_texture(&self, mesh: &MeshData, texture: Option<&Texture>) -> GpuMesh {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertex_buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let texture_bind_group = texture
            .map(|t| Arc::new(self.mesh_pipeline.create_texture_bind_group(&self.device, t)));

        let (instance_uniform_buffer, instance_bind_group) = self.create_instance_state();

        GpuMesh {
            vertex_buffer: Arc::new(vertex_buffer),
            vertex_count: mesh.vertex_count(),
            instance_uniform_buffer,
            instance_bind_group,
            texture_bind_group,
        }
    }

    /// New node state over an already-uploaded mesh: the vertex buffer and
    /// texture binding are shared, the uniforms are fresh.
    pub fn instantiate_mesh(&self, gpu: &GpuMesh) -> GpuMesh {
        let (instance_uniform_buffer, instance_bind_group) = self.create_instance_state();

        GpuMesh {
            vertex_buffer: Arc::clone(&gpu.vertex_buffer),
            vertex_count: gpu.vertex_count,
            instance_uniform_buffer,
            instance_bind_group,
            texture_bind_group: gpu.texture_bind_group.clone(),
        }
    }

    fn create_instance_state(&self) -> (wgpu::Buffer, wgpu::BindGroup) {
        let uniforms =
            InstanceUniforms::new(Mat4::IDENTITY, glam::Vec4::ONE, ShadeMode::Unlit, 0.0);
        let instance_uniform_buffer =
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_instance_uniform_buffer"),
                    contents: bytemuck::cast_slice(&[uniforms]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

        let instance_bind_group = self
            .mesh_pipeline
            .create_instance_bind_group(&self.device, &instance_uniform_buffer);

        (instance_uniform_buffer, instance_bind_group)
    }

    /// Render one frame of `scene` plus any point clouds.
    pub fn render(
        &mut self,
        scene: &Scene,
        clouds: &[&GpuPointCloud],
        camera: &OrbitCamera,
        elapsed: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        // Refresh global uniforms for both pipelines.
        let mut globals = GlobalUniforms::new(
            camera.projection_matrix(),
            camera.view_matrix(),
            camera.position(),
            elapsed,
        );
        scene.lights.write_uniforms(&mut globals);
        self.mesh_pipeline.update_global_uniforms(&self.queue, &globals);

        self.points_pipeline.update_globals(
            &self.queue,
            &PointsGlobals::new(camera.projection_matrix(), camera.view_matrix()),
        );

        // Refresh per-node uniforms.
        for node in scene.nodes.iter().filter(|n| n.visible) {
            let model = scene.model_matrix(node);
            let (mode, param) = shade_of(node.material.shading);
            let uniforms = InstanceUniforms::new(model, node.material.color, mode, param);
            self.queue.write_buffer(
                &node.gpu.instance_uniform_buffer,
                0,
                bytemuck::cast_slice(&[uniforms]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Opaque meshes first; they write depth.
            pass.set_pipeline(&self.mesh_pipeline.pipeline);
            pass.set_bind_group(0, &self.mesh_pipeline.global_bind_group, &[]);
            for node in scene.nodes.iter().filter(|n| n.visible) {
                pass.set_bind_group(1, &node.gpu.instance_bind_group, &[]);
                let texture_bind_group: &wgpu::BindGroup = match &node.gpu.texture_bind_group {
                    Some(t) => t.as_ref(),
                    None => &self.mesh_pipeline.default_texture_bind_group,
                };
                pass.set_bind_group(2, texture_bind_group, &[]);
                pass.set_vertex_buffer(0, node.gpu.vertex_buffer.slice(..));
                pass.draw(0..node.gpu.vertex_count, 0..1);
            }

            // Point clouds after: depth-tested, additive, no depth writes.
            if !clouds.is_empty() {
                pass.set_pipeline(&self.points_pipeline.pipeline);
                pass.set_bind_group(0, &self.points_pipeline.global_bind_group, &[]);
                pass.set_vertex_buffer(0, self.points_pipeline.quad_vertex_buffer.slice(..));
                for cloud in clouds {
                    pass.set_bind_group(1, &cloud.bind_group, &[]);
                    pass.set_vertex_buffer(1, cloud.instance_buffer.slice(..));
                    pass.draw(0..6, 0..cloud.count);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// The renderer is the GPU realization of the core's point-cloud seam.
impl PointCloudBackend for Renderer {
    type Handle = GpuPointCloud;

    fn upload(&mut self, data: &PointCloudData, point_size: f32) -> GpuPointCloud {
        GpuPointCloud::new(&self.device, &self.points_pipeline, data, point_size)
    }

    fn dispose(&mut self, handle: GpuPointCloud) {
        handle.destroy();
    }
}

fn shade_of(shading: Shading) -> (ShadeMode, f32) {
    match shading {
        Shading::Unlit => (ShadeMode::Unlit, 0.0),
        Shading::Phong { shininess } => (ShadeMode::Phong, shininess),
        Shading::Normal => (ShadeMode::Normal, 0.0),
        Shading::Toon { steps } => (ShadeMode::Toon, steps as f32),
        Shading::Textured => (ShadeMode::Textured, 0.0),
    }
}

fn create_depth_view(device: &Device, config: &SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
