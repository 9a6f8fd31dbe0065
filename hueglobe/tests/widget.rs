use hueglobe::assets::{AssetSource, FileSource, LoadError};
use hueglobe::output::OutputPolicy;
use hueglobe::utils::Sample;
use hueglobe::widget::Widget;
use hueglobe::{Viewport, WidgetConfig};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use winit::dpi::PhysicalSize;

const TRIANGLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/assets/triangle.gltf");
const CANVAS: PhysicalSize<u32> = PhysicalSize::new(200, 200);

#[derive(Debug)]
struct BrokenSource;

impl AssetSource for BrokenSource {
    fn describe(&self) -> String {
        "broken".to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Err(LoadError::Unavailable {
            reason: "404".to_string(),
        })
    }
}

#[test]
fn test_widget_starts_with_two_lights() {
    let widget = Widget::new(&WidgetConfig::hex_picker(TRIANGLE), CANVAS);

    assert_eq!(widget.scene().child_count(), 2);
    assert_eq!(widget.scene().lights().count(), 2);
    assert!(widget.scene().draw_list().is_empty());
    assert_eq!(widget.camera().aspect, 1.0);
}

#[test]
fn test_widget_publishes_every_frame() {
    let published = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let published = published.clone();
        move |sample: Sample, text: &str| {
            published.lock().unwrap().push((sample, text.to_string()));
        }
    };

    let mut widget = Widget::new(&WidgetConfig::hex_picker(TRIANGLE), CANVAS).with_sink(sink);

    widget.publish(Sample::new(255, 0, 0));
    widget.publish(Sample::new(255, 0, 0));
    let last = widget.publish(Sample::new(16, 16, 16)).clone();

    assert_eq!(last.text, "#101010");
    assert_eq!(last.policy, OutputPolicy::Hex);

    let published = published.lock().unwrap();
    let texts: Vec<&str> = published.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, ["#ff0000", "#ff0000", "#101010"]);
}

#[test]
fn test_backdrop_widget_formats_css() {
    let mut widget = Widget::new(&WidgetConfig::backdrop(TRIANGLE), PhysicalSize::new(800, 600));

    let output = widget.publish(Sample::new(0, 128, 255));
    assert_eq!(output.text, "rgb(0, 128, 255)");
    assert_eq!(widget.camera().aspect, 800.0 / 600.0);
}

#[test]
fn test_widget_applies_load_in_a_frame() {
    let mut widget = Widget::new(&WidgetConfig::hex_picker(TRIANGLE), CANVAS);
    widget.start_loading(FileSource::new(TRIANGLE));
    assert!(widget.is_loading());

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut outcomes = Vec::new();
    while widget.is_loading() && Instant::now() < deadline {
        outcomes.extend(widget.begin_frame());
        std::thread::sleep(Duration::from_millis(1));
    }
    outcomes.extend(widget.begin_frame());

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_ok());
    assert_eq!(widget.scene().child_count(), 3);

    let draws = widget.scene().draw_list();
    assert_eq!(draws.len(), 1);
    assert!(draws[0].material.is_hue_gradient());
}

#[test]
fn test_widget_survives_failed_load() {
    let mut widget = Widget::new(&WidgetConfig::hex_picker(TRIANGLE), CANVAS);
    widget.start_loading(BrokenSource);

    let outcome = widget.finish_loading().unwrap();
    assert!(outcome.is_err());
    assert!(widget.finish_loading().is_none());
    assert!(widget.begin_frame().is_none());

    assert_eq!(widget.scene().child_count(), 2);
    assert_eq!(widget.publish(Sample::BLACK).text, "#000000");
}

#[test]
fn test_fixed_viewport_canvas_size() {
    let config = WidgetConfig::hex_picker(TRIANGLE);
    assert_eq!(
        config.canvas_size(PhysicalSize::new(1920, 1080)),
        CANVAS
    );
    assert!(matches!(config.viewport, Viewport::Fixed { .. }));
}
