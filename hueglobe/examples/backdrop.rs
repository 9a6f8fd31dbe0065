//! The globe fills the window and the page behind it takes the color under its center.
//! Drag to spin it, scroll to zoom, right drag to pan.

use hueglobe::utils::Sample;
use hueglobe::{AppSettings, HueGlobeApp, HueGlobePreset, WidgetConfig};
use tracing::debug;

#[derive(Debug, Default, HueGlobeApp)]
struct Backdrop;

impl HueGlobePreset for Backdrop {
    fn configure(&self) -> WidgetConfig {
        WidgetConfig::backdrop("globe.glb")
    }

    fn settings(self) -> AppSettings {
        let mut last = None;
        AppSettings::new(self.configure()).with_sink(move |sample: Sample, text: &str| {
            if last != Some(sample) {
                debug!("Page is now {text}");
                last = Some(sample);
            }
        })
    }
}
