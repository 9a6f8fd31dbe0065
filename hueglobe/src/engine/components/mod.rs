//! Things that sit in or look at the scene: the camera, its orbit controls and the lights.

pub mod camera;
pub mod light;
pub mod orbit;

pub use camera::*;
pub use light::*;
pub use orbit::*;
