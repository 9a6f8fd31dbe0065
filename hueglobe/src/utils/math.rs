use nalgebra::Matrix4;

/// Remaps the OpenGL clip depth range `[-1, 1]` that `nalgebra` projections produce onto the
/// `[0, 1]` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);
