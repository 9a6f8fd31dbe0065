use crate::assets::Material;
use crate::components::PerspectiveCamera;
use nalgebra::{Matrix4, Vector4};
use static_assertions::const_assert_eq;

pub const DRAW_MODE_HUE_GRADIENT: u32 = 0;
pub const DRAW_MODE_UNLIT: u32 = 1;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: Matrix4<f32>,
}

const_assert_eq!(size_of::<CameraUniform>(), 64);

impl CameraUniform {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        CameraUniform {
            view_proj: camera.view_projection(),
        }
    }
}

/// Per mesh data, mirrors `Draw` in `hue_gradient.wgsl`
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: Matrix4<f32>,
    pub color: Vector4<f32>,
    pub mode: u32,
    _pad: [u32; 3],
}

const_assert_eq!(size_of::<DrawUniform>(), 96);

impl DrawUniform {
    pub fn new(model: Matrix4<f32>, material: &Material) -> Self {
        let (mode, color) = match material {
            Material::HueGradient => (DRAW_MODE_HUE_GRADIENT, Vector4::new(1.0, 1.0, 1.0, 1.0)),
            Material::Unlit { color, .. } => {
                (DRAW_MODE_UNLIT, Vector4::new(color.x, color.y, color.z, 1.0))
            }
        };

        DrawUniform {
            model,
            color,
            mode,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn draw_uniform_picks_mode_from_material() {
        let hue = DrawUniform::new(Matrix4::identity(), &Material::HueGradient);
        assert_eq!(hue.mode, DRAW_MODE_HUE_GRADIENT);

        let unlit = DrawUniform::new(
            Matrix4::identity(),
            &Material::unlit("Red", Vector3::new(1.0, 0.0, 0.0)),
        );
        assert_eq!(unlit.mode, DRAW_MODE_UNLIT);
        assert_eq!(unlit.color, Vector4::new(1.0, 0.0, 0.0, 1.0));
    }
}
