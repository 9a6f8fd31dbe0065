use crate::core::Vertex3D;

/// CPU side triangle list. Every three vertices form one triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex3D>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex3D>) -> Self {
        Mesh {
            name: name.into(),
            vertices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
