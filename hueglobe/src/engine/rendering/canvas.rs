use crate::rendering::SampleCoord;
use wgpu::{
    Device, Extent3d, Texture, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView, TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;

pub const CANVAS_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;
pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// The offscreen render target the globe is drawn into and sampled from.
///
/// Cleared to transparent black, so pixels the globe doesn't cover show the page behind it.
pub struct Canvas {
    texture: Texture,
    view: TextureView,
    depth_view: TextureView,
    size: PhysicalSize<u32>,
}

impl Canvas {
    pub fn new(device: &Device, size: PhysicalSize<u32>) -> Self {
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));
        let extent = Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Canvas Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT
                | TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&TextureViewDescriptor::default());

        let depth_view = device
            .create_texture(&TextureDescriptor {
                label: Some("Canvas Depth Texture"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&TextureViewDescriptor::default());

        Canvas {
            texture,
            view,
            depth_view,
            size,
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }

    pub fn depth_view(&self) -> &TextureView {
        &self.depth_view
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn center(&self) -> SampleCoord {
        SampleCoord::center(self.size.width, self.size.height)
    }
}
