//! The native window the widget lives in.
//!
//! The window stands in for the page: the canvas is composited into it, the hex output goes to
//! its title and the background output becomes its backdrop.

pub mod app;
pub mod config;
pub mod preset;

pub use app::*;
pub use config::*;
pub use preset::*;
