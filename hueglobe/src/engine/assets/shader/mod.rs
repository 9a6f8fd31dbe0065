// this module only has tests for the built-in shaders and can be safely ignored
#[cfg(test)]
mod shaders;

use wgpu::{Device, ShaderModule, ShaderModuleDescriptor, ShaderSource};

const SHADER_HUE_GRADIENT: &str = include_str!("shaders/hue_gradient.wgsl");
const SHADER_COMPOSITE: &str = include_str!("shaders/composite.wgsl");

/// A built-in WGSL program with a vertex and a fragment entry point
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Shader {
    pub name: &'static str,
    pub code: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

impl Shader {
    /// Draws meshes with the hue gradient, or a flat color for unlit materials.
    pub const HUE_GRADIENT: Shader = Shader {
        name: "Hue Gradient Shader",
        code: SHADER_HUE_GRADIENT,
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
    };

    /// Copies the canvas onto the window over the page backdrop.
    pub const COMPOSITE: Shader = Shader {
        name: "Canvas Composite Shader",
        code: SHADER_COMPOSITE,
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
    };

    pub fn module(&self, device: &Device) -> ShaderModule {
        device.create_shader_module(ShaderModuleDescriptor {
            label: Some(self.name),
            source: ShaderSource::Wgsl(self.code.into()),
        })
    }
}
