//! A small globe in the middle of a white page. The color under the globe's center is written
//! to the window title as `#rrggbb`.
//!
//! Pass a different model with `HUEGLOBE_ASSET=path/to/model.glb`.

use hueglobe::{HueGlobeApp, HueGlobePreset, WidgetConfig};
use std::path::PathBuf;

#[derive(Debug, HueGlobeApp)]
struct HexPicker {
    asset: PathBuf,
}

impl Default for HexPicker {
    fn default() -> Self {
        let asset = std::env::var_os("HUEGLOBE_ASSET")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("globe.glb"));
        HexPicker { asset }
    }
}

impl HueGlobePreset for HexPicker {
    fn configure(&self) -> WidgetConfig {
        WidgetConfig::hex_picker(&self.asset)
    }
}
