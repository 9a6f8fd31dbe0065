pub mod checks;
pub mod color;
pub mod frame_counter;
pub mod math;

pub use checks::*;
pub use color::*;
pub use math::*;
