use crate::utils::OPENGL_TO_WGPU;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

/// A perspective camera that always looks at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        PerspectiveCamera::new(75.0, 1.0, 0.2, 1000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        PerspectiveCamera {
            fov,
            aspect,
            near,
            far,
            position: Point3::new(0.0, 0.0, 1.0),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect, self.fov.to_radians(), self.near, self.far)
    }

    pub fn view(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Projection times view, already remapped to wgpu's clip space
    pub fn view_projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU * self.projection().to_homogeneous() * self.view().to_homogeneous()
    }

    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or(-Vector3::z())
    }

    pub fn right(&self) -> Vector3<f32> {
        self.forward()
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or(Vector3::x())
    }

    /// The camera's own up axis, perpendicular to its forward direction
    pub fn camera_up(&self) -> Vector3<f32> {
        self.right().cross(&self.forward())
    }
}
