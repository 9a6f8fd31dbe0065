use crate::windowing::{AppSettings, WidgetConfig};

/// A ready made widget setup.
///
/// `#[derive(HueGlobeApp)]` on a preset generates a `main` that runs it.
pub trait HueGlobePreset: Sized {
    fn configure(&self) -> WidgetConfig;

    fn settings(self) -> AppSettings {
        AppSettings::new(self.configure())
    }
}
