//! Adapter, device and queue, shared by every render pass.

use snafu::{ResultExt, Snafu};
use std::sync::Arc;
use tracing::{debug, info};
use wgpu::{
    Adapter, CompositeAlphaMode, CreateSurfaceError, Device, DeviceDescriptor, Features, Instance, InstanceDescriptor,
    Limits, PowerPreference, PresentMode, Queue, RequestAdapterError, RequestAdapterOptions,
    RequestDeviceError, Surface, SurfaceConfiguration, TextureFormat, TextureUsages,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum StateError {
    #[snafu(display("Couldn't create a surface for the window: {source}"))]
    CreateSurface { source: CreateSurfaceError },

    #[snafu(display("No graphics adapter can present to this window: {source}"))]
    RequestAdapter { source: RequestAdapterError },

    #[snafu(display("Couldn't open the graphics device: {source}"))]
    RequestDevice { source: RequestDeviceError },

    #[snafu(display("The surface reports no supported texture formats"))]
    NoSurfaceFormat,
}

pub struct State {
    pub instance: Instance,
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

impl State {
    /// Opens a device that can present to `window` and returns it together with the window's
    /// surface, which isn't configured yet.
    pub fn new(window: Arc<Window>) -> Result<(Self, Surface<'static>), StateError> {
        let instance = Instance::new(&InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .context(CreateSurfaceErr)?;

        let adapter = futures::executor::block_on(instance.request_adapter(
            &RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            },
        ))
        .context(RequestAdapterErr)?;

        let info = adapter.get_info();
        info!("Using adapter {:?} ({:?})", info.name, info.backend);

        let (device, queue) = futures::executor::block_on(adapter.request_device(
            &DeviceDescriptor {
                label: Some("Renderer Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..DeviceDescriptor::default()
            },
        ))
        .context(RequestDeviceErr)?;

        Ok((
            State {
                instance,
                adapter,
                device,
                queue,
            },
            surface,
        ))
    }

    /// Builds a configuration for `surface` at `size`.
    ///
    /// Prefers a non-sRGB format. The widget outputs final colors that are read back byte for
    /// byte, so the swapchain must not re-encode them.
    pub fn surface_config(
        &self,
        surface: &Surface,
        size: PhysicalSize<u32>,
    ) -> Result<SurfaceConfiguration, StateError> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(StateError::NoSurfaceFormat)?;

        let view_format = format.remove_srgb_suffix();
        let view_formats = if view_format == format {
            vec![]
        } else {
            vec![view_format]
        };

        debug!("Surface format {format:?}, view format {view_format:?}");

        Ok(SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(CompositeAlphaMode::Auto),
            view_formats,
        })
    }
}

/// The format render passes should use for a view of a surface configured with `config`
pub fn surface_view_format(config: &SurfaceConfiguration) -> TextureFormat {
    config
        .view_formats
        .first()
        .copied()
        .unwrap_or(config.format)
}
