use nalgebra::{Vector2, Vector3};
use static_assertions::const_assert_eq;
use std::mem::size_of;
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode};

/// A single vertex as the hue gradient pipeline consumes it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: Vector3<f32>,
    pub uv: Vector2<f32>,
}

const_assert_eq!(size_of::<Vertex3D>(), 20);

impl Vertex3D {
    const ATTRIBUTES: [VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
    ];

    pub const fn new(position: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Vertex3D { position, uv }
    }

    pub const fn continuous_descriptor() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: size_of::<Vertex3D>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<([f32; 3], [f32; 2])> for Vertex3D {
    fn from((position, uv): ([f32; 3], [f32; 2])) -> Self {
        Vertex3D::new(Vector3::from(position), Vector2::from(uv))
    }
}
