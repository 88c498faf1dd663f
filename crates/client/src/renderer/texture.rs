//! GPU texture creation from decoded images.

use std::path::Path;

use image::RgbaImage;
use wgpu::{Device, Queue};

/// A GPU texture with its view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Upload a decoded RGBA image.
    pub fn from_image(device: &Device, queue: &Queue, img: &RgbaImage, label: &str) -> Self {
        Self::upload(device, queue, img, label, wgpu::FilterMode::Linear)
    }

    /// Load and decode an image file, then upload it.
    pub fn load(device: &Device, queue: &Queue, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        tracing::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(device, queue, &img, "file_texture"))
    }

    /// A 1x1 opaque white texture, used as the untextured fallback.
    pub fn white(device: &Device, queue: &Queue) -> Self {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::upload(device, queue, &img, "white_texture", wgpu::FilterMode::Linear)
    }

    /// Generate and upload a two-color checkerboard. Sampled with nearest
    /// filtering so the cells stay crisp.
    pub fn checkerboard(
        device: &Device,
        queue: &Queue,
        cells: u32,
        cell_px: u32,
        a: [u8; 4],
        b: [u8; 4],
    ) -> Self {
        let size = cells * cell_px;
        let img = RgbaImage::from_fn(size, size, |x, y| {
            let cell = (x / cell_px + y / cell_px) % 2;
            image::Rgba(if cell == 0 { a } else { b })
        });
        Self::upload(
            device,
            queue,
            &img,
            "checkerboard_texture",
            wgpu::FilterMode::Nearest,
        )
    }

    fn upload(
        device: &Device,
        queue: &Queue,
        img: &RgbaImage,
        label: &str,
        filter: wgpu::FilterMode,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: img.width(),
            height: img.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            img,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * img.width()),
                rows_per_image: Some(img.height()),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
