use crate::components::OrbitSettings;
use crate::output::OutputPolicy;
use crate::utils::Sample;
use bon::Builder;
use nalgebra::Point3;
use std::path::PathBuf;
use winit::dpi::PhysicalSize;

/// Size of the embedded canvas the hex picker renders into
pub const EMBEDDED_CANVAS_SIZE: u32 = 200;

/// How big the canvas is and where it sits in the window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Viewport {
    /// A fixed size canvas, centered in the window
    Fixed { width: u32, height: u32 },
    /// The canvas takes the window's size at startup and is stretched over the window afterwards
    FullWindow,
}

/// Canvas placement in window pixels, top left origin
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

impl Viewport {
    pub const EMBEDDED: Viewport = Viewport::Fixed {
        width: EMBEDDED_CANVAS_SIZE,
        height: EMBEDDED_CANVAS_SIZE,
    };

    pub fn canvas_size(&self, window: PhysicalSize<u32>) -> PhysicalSize<u32> {
        let size = match *self {
            Viewport::Fixed { width, height } => PhysicalSize::new(width, height),
            Viewport::FullWindow => window,
        };
        PhysicalSize::new(size.width.max(1), size.height.max(1))
    }

    /// Where a canvas of `canvas` pixels is drawn inside a `window` sized surface.
    ///
    /// A fixed canvas that doesn't fit is scaled down, keeping its aspect ratio.
    pub fn placement(&self, window: PhysicalSize<u32>, canvas: PhysicalSize<u32>) -> CanvasRect {
        let win_w = window.width as f32;
        let win_h = window.height as f32;

        match self {
            Viewport::FullWindow => CanvasRect {
                x: 0.0,
                y: 0.0,
                width: win_w,
                height: win_h,
            },
            Viewport::Fixed { .. } => {
                let canvas_w = canvas.width.max(1) as f32;
                let canvas_h = canvas.height.max(1) as f32;
                let scale = (win_w / canvas_w).min(win_h / canvas_h).min(1.0);
                let width = (canvas_w * scale).floor();
                let height = (canvas_h * scale).floor();

                CanvasRect {
                    x: ((win_w - width) / 2.0).floor(),
                    y: ((win_h - height) / 2.0).floor(),
                    width,
                    height,
                }
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            fov: 75.0,
            near: 0.2,
            far: 1000.0,
            position: Point3::new(0.0, 1.0, 1.6),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightingSettings {
    pub directional_color: Sample,
    pub directional_intensity: f32,
    pub directional_position: Point3<f32>,
    pub ambient_color: Sample,
}

impl Default for LightingSettings {
    fn default() -> Self {
        LightingSettings {
            directional_color: Sample::WHITE,
            directional_intensity: 1.0,
            directional_position: Point3::new(5.0, 10.0, 7.5),
            ambient_color: Sample::from_u32(0x404040),
        }
    }
}

/// Everything a widget needs before it opens its window.
#[derive(Debug, Clone, Builder)]
pub struct WidgetConfig {
    #[builder(into, default = "Globe Picker".to_string())]
    pub title: String,
    /// glTF or GLB file with the globe
    #[builder(into)]
    pub asset: PathBuf,
    #[builder(default = Viewport::EMBEDDED)]
    pub viewport: Viewport,
    /// Initial inner size of the window
    #[builder(default = PhysicalSize::new(400, 300))]
    pub window_size: PhysicalSize<u32>,
    #[builder(default)]
    pub camera: CameraSettings,
    #[builder(default)]
    pub controls: OrbitSettings,
    #[builder(default)]
    pub output: OutputPolicy,
    /// Backdrop behind the canvas until the first sample replaces it
    #[builder(default = Sample::WHITE)]
    pub page_color: Sample,
    #[builder(default)]
    pub lights: LightingSettings,
}

impl WidgetConfig {
    /// A 200x200 canvas in a page, writing the color under the globe's center as `#rrggbb`
    pub fn hex_picker(asset: impl Into<PathBuf>) -> Self {
        WidgetConfig::builder()
            .title("Globe Hex Picker")
            .asset(asset)
            .viewport(Viewport::EMBEDDED)
            .output(OutputPolicy::Hex)
            .page_color(Sample::WHITE)
            .build()
    }

    /// A full window globe that paints the page with the color under its center
    pub fn backdrop(asset: impl Into<PathBuf>) -> Self {
        WidgetConfig::builder()
            .title("Globe Backdrop")
            .asset(asset)
            .viewport(Viewport::FullWindow)
            .window_size(PhysicalSize::new(800, 600))
            .camera(CameraSettings {
                position: Point3::new(0.0, 1.5, 2.4),
                ..CameraSettings::default()
            })
            .output(OutputPolicy::Background)
            .build()
    }

    /// The canvas size this config renders at for a window of `window` pixels
    pub fn canvas_size(&self, window: PhysicalSize<u32>) -> PhysicalSize<u32> {
        self.viewport.canvas_size(window)
    }
}
