use crate::utils::Sample;
use nalgebra::{Point3, Vector3};

/// Scene lights.
///
/// The hue gradient material is unlit, so none of these change what ends up on the canvas.
/// They are kept in the scene so a lit material would see the same setup.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Shines from `position` towards the origin
    Directional {
        color: Vector3<f32>,
        intensity: f32,
        position: Point3<f32>,
    },
    Ambient {
        color: Vector3<f32>,
        intensity: f32,
    },
}

impl Light {
    pub fn directional(color: Sample, intensity: f32, position: Point3<f32>) -> Self {
        Light::Directional {
            color: color.to_unorm(),
            intensity,
            position,
        }
    }

    pub fn ambient(color: Sample) -> Self {
        Light::Ambient {
            color: color.to_unorm(),
            intensity: 1.0,
        }
    }
}
