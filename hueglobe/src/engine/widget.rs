//! The widget's per frame logic, independent of the window and the GPU.
//!
//! [`Widget`] owns the scene, the camera and its controls. The app drives it once per redraw:
//! [`Widget::begin_frame`] applies a finished model load and moves the camera, the renderer draws
//! and samples, and [`Widget::publish`] turns the sample into output.

use crate::assets::{AssetSource, LoadError, Material, ModelLoader, PendingLoad};
use crate::components::{Light, OrbitControls, PerspectiveCamera};
use crate::core::{NodeId, NodeKind, Scene};
use crate::input::InputManager;
use crate::output::{ColorOutput, ColorSink, OutputPolicy};
use crate::utils::Sample;
use crate::utils::frame_counter::FrameCounter;
use crate::windowing::{LightingSettings, WidgetConfig};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

pub struct Widget {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    input: InputManager,
    pending: Option<PendingLoad>,
    policy: OutputPolicy,
    sink: Option<Box<dyn ColorSink>>,
    frames: FrameCounter,
    canvas_size: PhysicalSize<u32>,
    last_output: Option<ColorOutput>,
}

impl Widget {
    /// Sets up camera, controls and lights for a canvas of `canvas_size` pixels.
    /// Nothing is loaded yet, see [`Widget::start_loading`].
    pub fn new(config: &WidgetConfig, canvas_size: PhysicalSize<u32>) -> Self {
        let mut camera = PerspectiveCamera::new(
            config.camera.fov,
            1.0,
            config.camera.near,
            config.camera.far,
        );
        camera.position = config.camera.position;
        camera.resize(canvas_size.width as f32, canvas_size.height as f32);

        let mut controls = OrbitControls::new(config.controls);
        controls.update(&mut camera);

        let mut scene = Scene::new();
        add_lights(&mut scene, &config.lights);

        Widget {
            scene,
            camera,
            controls,
            input: InputManager::new(),
            pending: None,
            policy: config.output,
            sink: None,
            frames: FrameCounter::default(),
            canvas_size,
            last_output: None,
        }
    }

    pub fn with_sink(self, sink: impl ColorSink) -> Self {
        self.with_boxed_sink(Box::new(sink))
    }

    pub fn with_boxed_sink(mut self, sink: Box<dyn ColorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Starts fetching the model in the background. Every mesh gets the hue gradient material.
    pub fn start_loading<S: AssetSource>(&mut self, source: S) {
        if let Some(previous) = &self.pending {
            warn!("Replacing unfinished load of {:?}", previous.name());
        }

        let pending = ModelLoader::new(source)
            .override_material(Material::HueGradient)
            .spawn();
        self.pending = Some(pending);
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Forwards a window event to the pointer state
    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.process_event(event);
    }

    /// Applies a finished load and advances the controls by one frame.
    ///
    /// Returns the load outcome in the frame it arrives, `None` otherwise.
    /// A failed load is logged here and leaves the scene untouched.
    pub fn begin_frame(&mut self) -> Option<Result<NodeId, LoadError>> {
        self.frames.tick();

        let outcome = self.poll_load();

        let height = self.canvas_size.height as f32;
        self.controls.handle_input(&self.input, &self.camera, height);
        self.controls.update(&mut self.camera);
        self.input.next_frame();

        outcome
    }

    fn poll_load(&mut self) -> Option<Result<NodeId, LoadError>> {
        let outcome = self.pending.as_mut()?.poll(&mut self.scene)?;
        self.pending = None;
        Some(self.report_load(outcome))
    }

    /// Blocks until the running load is done and applies it. `None` if nothing is loading.
    pub fn finish_loading(&mut self) -> Option<Result<NodeId, LoadError>> {
        let outcome = self.pending.take()?.wait(&mut self.scene)?;
        Some(self.report_load(outcome))
    }

    fn report_load(&self, outcome: Result<NodeId, LoadError>) -> Result<NodeId, LoadError> {
        match &outcome {
            Ok(_) => info!("Model is now part of the scene"),
            Err(e) => error!("An error happened while loading the model: {e}"),
        }
        outcome
    }

    /// Formats `sample` according to the output policy and hands it to the sink.
    pub fn publish(&mut self, sample: Sample) -> &ColorOutput {
        let output = ColorOutput::new(sample, self.policy);
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(output.sample, &output.text);
        }
        self.last_output.insert(output)
    }

    pub fn last_output(&self) -> Option<&ColorOutput> {
        self.last_output.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn frames(&self) -> &FrameCounter {
        &self.frames
    }
}

fn add_lights(scene: &mut Scene, lights: &LightingSettings) {
    let directional = Light::directional(
        lights.directional_color,
        lights.directional_intensity,
        lights.directional_position,
    );
    let ambient = Light::ambient(lights.ambient_color);

    for (name, light) in [("Directional Light", directional), ("Ambient Light", ambient)] {
        let node = scene.new_node(name, NodeKind::Light(light));
        if let Err(e) = scene.add_root(node) {
            warn!("Couldn't add {name}: {e}");
        }
    }
}
