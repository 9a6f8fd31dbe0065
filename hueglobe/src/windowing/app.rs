use crate::assets::FileSource;
use crate::output::{ColorOutput, ColorSink, OutputPolicy};
use crate::rendering::{RenderError, Renderer};
use crate::widget::Widget;
use crate::windowing::WidgetConfig;
use snafu::{ResultExt, Snafu};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, trace};
use winit::application::ApplicationHandler;
use winit::dpi::Size;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

/// Frames between two FPS log lines
const FPS_LOG_INTERVAL: u64 = 600;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum WidgetError {
    #[snafu(display("Couldn't create the event loop: {source}"))]
    EventLoop { source: EventLoopError },

    #[snafu(display("Couldn't create the widget window: {source}"))]
    CreateWindow { source: OsError },

    #[snafu(display("Couldn't create renderer: {source}"))]
    CreateRenderer { source: RenderError },

    #[snafu(display("Rendering failed: {source}"))]
    Frame { source: RenderError },
}

/// A configured widget that hasn't opened its window yet.
pub struct AppSettings {
    pub config: WidgetConfig,
    sink: Option<Box<dyn ColorSink>>,
}

impl AppSettings {
    pub fn new(config: WidgetConfig) -> Self {
        AppSettings { config, sink: None }
    }

    /// Observes every published color next to the built-in output
    pub fn with_sink(mut self, sink: impl ColorSink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Opens the window and runs the widget until the window is closed.
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoop::new().context(EventLoopErr)?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App {
            settings: Some(self),
            renderer: None,
            widget: None,
            failure: None,
        };

        event_loop.run_app(&mut app).context(EventLoopErr)?;

        match app.failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

struct App {
    settings: Option<AppSettings>,
    renderer: Option<Renderer>,
    widget: Option<Widget>,
    failure: Option<WidgetError>,
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WidgetError> {
        let Some(settings) = self.settings.take() else {
            return Ok(());
        };
        let config = settings.config;

        info!("Initializing {:?}", config.title);

        let attributes = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(Size::Physical(config.window_size));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context(CreateWindowErr)?,
        );
        trace!("Created widget window");

        let renderer = Renderer::new(window, config.viewport, config.page_color)
            .context(CreateRendererErr)?;
        trace!("Created Renderer");

        let mut widget = Widget::new(&config, renderer.canvas().size());
        if let Some(sink) = settings.sink {
            widget = widget.with_boxed_sink(sink);
        }
        widget.start_loading(FileSource::new(config.asset.clone()));

        renderer.window().request_redraw();

        self.renderer = Some(renderer);
        self.widget = Some(widget);
        Ok(())
    }

    fn redraw(renderer: &mut Renderer, widget: &mut Widget) -> Result<(), WidgetError> {
        widget.begin_frame();

        let Some(sample) = renderer
            .render(widget.scene(), widget.camera())
            .context(FrameErr)?
        else {
            return Ok(());
        };

        apply_output(renderer, widget.publish(sample));

        let frames = widget.frames();
        if frames.frames() % FPS_LOG_INTERVAL == 0 {
            debug!(
                "{} fps, {:.2} ms per frame",
                frames.fps(),
                frames.mean_delta_time() * 1000.0
            );
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: WidgetError) {
        error!("{e}");
        self.failure = Some(e);
        event_loop.exit();
    }
}

fn apply_output(renderer: &mut Renderer, output: &ColorOutput) {
    match output.policy {
        OutputPolicy::Hex => renderer.window().set_title(&output.text),
        OutputPolicy::Background => renderer.set_page_color(output.sample),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if event_loop.exiting() {
            return;
        }

        let (Some(renderer), Some(widget)) = (self.renderer.as_mut(), self.widget.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = Self::redraw(renderer, widget) {
                    self.fail(event_loop, e);
                    return;
                }
                renderer.window().request_redraw();
            }
            WindowEvent::Resized(size) => renderer.resize(size),
            WindowEvent::CloseRequested => event_loop.exit(),
            event => widget.handle_event(&event),
        }
    }
}
