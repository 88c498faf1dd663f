//! GPU-side point cloud: the wgpu realization of the core's backend handle.

use vela_core::PointCloudData;
use wgpu::util::DeviceExt;

use super::points_pipeline::{CloudUniforms, PointInstance, PointsPipeline};

/// A drawable point cloud: instance buffer plus its per-cloud uniforms.
pub struct GpuPointCloud {
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) cloud_uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) count: u32,
}

impl GpuPointCloud {
    /// Interleave the flat position/color buffers and upload.
    pub fn new(
        device: &wgpu::Device,
        pipeline: &PointsPipeline,
        data: &PointCloudData,
        point_size: f32,
    ) -> Self {
        let count = data.point_count();
        let mut instances = Vec::with_capacity(count);
        for i in 0..count {
            instances.push(PointInstance {
                position: data.position(i),
                color: data.color(i),
            });
        }

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_cloud_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let cloud_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_cloud_uniforms"),
            contents: bytemuck::cast_slice(&[CloudUniforms {
                point_size,
                _pad: [0.0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = pipeline.create_cloud_bind_group(device, &cloud_uniform_buffer);

        Self {
            instance_buffer,
            cloud_uniform_buffer,
            bind_group,
            count: count as u32,
        }
    }

    pub fn point_count(&self) -> u32 {
        self.count
    }

    /// Release the GPU buffers now instead of waiting for garbage
    /// collection at the end of the frame.
    pub fn destroy(&self) {
        self.instance_buffer.destroy();
        self.cloud_uniform_buffer.destroy();
    }
}
