//! Damped orbit controls.
//!
//! Left drag rotates the camera around its target, the wheel dollies in and out and right drag
//! pans. With damping enabled, every [`OrbitControls::update`] applies only a fraction of the
//! accumulated motion and decays the rest, so the camera keeps gliding after the pointer stops.

use crate::components::PerspectiveCamera;
use crate::input::InputManager;
use nalgebra::{Point3, Vector2, Vector3};
use std::f32::consts::{PI, TAU};
use winit::event::MouseButton;

const EPS: f32 = 1e-6;

/// Closest the polar angle gets to either pole. Smaller angles vanish in `f32` trigonometry.
pub const MIN_POLE_DISTANCE: f32 = 1e-3;

/// Tuning for [`OrbitControls`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_rotate: bool,
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub zoom_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        OrbitSettings {
            enable_damping: true,
            damping_factor: 0.05,
            enable_rotate: true,
            rotate_speed: 1.0,
            enable_zoom: true,
            zoom_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

/// Spherical coordinates around the y axis. `phi` is the polar angle measured from +y,
/// `theta` the azimuth measured from +z towards +x.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: &Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return Spherical::default();
        }

        Spherical {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(&self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keeps `phi` away from the poles, where the view direction would be parallel to up
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(MIN_POLE_DISTANCE, PI - MIN_POLE_DISTANCE);
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    pub target: Point3<f32>,
    spherical_delta: Spherical,
    pan_offset: Vector3<f32>,
    scale: f32,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings) -> Self {
        OrbitControls {
            settings,
            target: Point3::origin(),
            spherical_delta: Spherical::default(),
            pan_offset: Vector3::zeros(),
            scale: 1.0,
        }
    }

    /// Turns this frame's pointer input into pending camera motion.
    ///
    /// `viewport_height` is the canvas height in pixels, drag distances are relative to it.
    pub fn handle_input(
        &mut self,
        input: &InputManager,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) {
        let delta = *input.mouse_delta();
        let height = viewport_height.max(1.0);

        if self.settings.enable_rotate && input.is_button_pressed(MouseButton::Left) {
            self.rotate(delta, height);
        } else if self.settings.enable_pan && input.is_button_pressed(MouseButton::Right) {
            self.pan(delta, camera, height);
        }

        let wheel = input.wheel_delta();
        if self.settings.enable_zoom && wheel.abs() > f32::EPSILON {
            if wheel > 0.0 {
                self.dolly_in(self.zoom_scale());
            } else {
                self.dolly_out(self.zoom_scale());
            }
        }
    }

    /// Drag by `delta` pixels on a canvas `height` pixels tall. A drag across the full height
    /// turns the camera once around.
    pub fn rotate(&mut self, delta: Vector2<f32>, height: f32) {
        self.rotate_left(TAU * delta.x / height * self.settings.rotate_speed);
        self.rotate_up(TAU * delta.y / height * self.settings.rotate_speed);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Moves the target so the point under the cursor follows it
    pub fn pan(&mut self, delta: Vector2<f32>, camera: &PerspectiveCamera, height: f32) {
        let offset = camera.position - self.target;
        let target_distance = offset.norm() * (camera.fov.to_radians() / 2.0).tan();
        let speed = self.settings.pan_speed;

        let left = camera.right() * (-2.0 * delta.x * target_distance / height * speed);
        let up = camera.camera_up() * (2.0 * delta.y * target_distance / height * speed);
        self.pan_offset += left + up;
    }

    pub fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.settings.zoom_speed)
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    /// True while damped motion is still being applied
    pub fn is_moving(&self) -> bool {
        self.spherical_delta.theta.abs() > EPS
            || self.spherical_delta.phi.abs() > EPS
            || self.pan_offset.norm() > EPS
    }

    /// Moves the camera by the pending motion and points it at the target.
    /// Call once per frame, before rendering.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(&offset);
        let damping = self.settings.damping_factor;

        if self.settings.enable_damping {
            spherical.theta += self.spherical_delta.theta * damping;
            spherical.phi += self.spherical_delta.phi * damping;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.settings.min_polar_angle, self.settings.max_polar_angle);
        spherical.make_safe();

        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);

        if self.settings.enable_damping {
            self.target += self.pan_offset * damping;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.settings.enable_damping {
            self.spherical_delta.theta *= 1.0 - damping;
            self.spherical_delta.phi *= 1.0 - damping;
            self.pan_offset *= 1.0 - damping;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vector3::zeros();
        }

        self.scale = 1.0;
    }
}
