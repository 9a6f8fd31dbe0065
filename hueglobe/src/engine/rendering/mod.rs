//! GPU side of the widget, built on top of `wgpu`.
//!
//! The [`Renderer`] owns the device, the window surface and the offscreen [`Canvas`]. Each frame
//! it draws the scene into the canvas, reads the center pixel back with [`PixelReadback`] and
//! composites the canvas into the window over the page color.

mod canvas;
mod error;
pub mod readback;
pub mod renderer;
pub mod state;
pub(crate) mod uniform;

pub use canvas::*;
pub use error::*;
pub use readback::*;
pub use renderer::*;
pub use state::*;
pub use uniform::*;
