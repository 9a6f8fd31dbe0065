use nalgebra::Vector3;

/// How a mesh is shaded. Lights never affect either variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Hue follows the horizontal texture coordinate, full saturation, half lightness.
    HueGradient,
    /// A flat color, imported from the asset's base color factor.
    Unlit { name: String, color: Vector3<f32> },
}

impl Material {
    pub fn unlit(name: impl Into<String>, color: Vector3<f32>) -> Self {
        Material::Unlit {
            name: name.into(),
            color,
        }
    }

    pub fn is_hue_gradient(&self) -> bool {
        matches!(self, Material::HueGradient)
    }

    /// Flat color for the unlit variant, `None` for the hue gradient.
    pub fn base_color(&self) -> Option<Vector3<f32>> {
        match self {
            Material::HueGradient => None,
            Material::Unlit { color, .. } => Some(*color),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::unlit("Default", Vector3::new(1.0, 1.0, 1.0))
    }
}
