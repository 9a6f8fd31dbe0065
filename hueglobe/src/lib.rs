//! A globe color picker widget.
//!
//! A glTF globe is rendered with a hue gradient, and every frame the pixel at the center of the
//! canvas is sampled. Depending on the [`OutputPolicy`](output::OutputPolicy) the sample is shown
//! as a `#rrggbb` hex string or painted as the page background.
//!
//! ```no_run
//! use hueglobe::utils::Sample;
//! use hueglobe::{AppSettings, WidgetConfig};
//!
//! AppSettings::new(WidgetConfig::hex_picker("globe.glb"))
//!     .with_sink(|_sample: Sample, text: &str| println!("{text}"))
//!     .run()
//!     .ok();
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
pub mod engine;
pub mod utils;
pub mod windowing;

pub use engine::*;
pub use windowing::*;

pub use ::tracing;
pub use ::winit;

#[cfg(feature = "derive")]
pub use ::hueglobe_macros;

#[cfg(feature = "derive")]
pub use ::hueglobe_macros::HueGlobeApp;

#[cfg(feature = "derive")]
pub use ::tracing_subscriber;
