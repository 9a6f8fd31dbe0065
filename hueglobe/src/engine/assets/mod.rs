pub mod loader;
pub mod material;
pub mod scene_loader;
pub mod shader;
pub mod source;

pub use loader::*;
pub use material::*;
pub use scene_loader::*;
pub use shader::*;
pub use source::*;
