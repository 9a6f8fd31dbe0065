pub mod mesh;
pub mod scene;
pub mod vertex;

pub use mesh::*;
pub use scene::*;
pub use vertex::*;
