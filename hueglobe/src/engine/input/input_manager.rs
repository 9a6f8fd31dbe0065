use nalgebra::Vector2;
use std::collections::HashMap;
use tracing::trace;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pixels a `PixelDelta` scroll has to travel to count as one wheel step
const PIXELS_PER_SCROLL_STEP: f32 = 100.0;

/// Pointer state collected from window events between two frames.
#[derive(Debug, Default)]
pub struct InputManager {
    button_states: HashMap<MouseButton, ElementState>,
    mouse_pos: Option<PhysicalPosition<f32>>,
    mouse_delta: Vector2<f32>,
    mouse_wheel_delta: f32,
}

impl InputManager {
    pub fn new() -> Self {
        InputManager::default()
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.process_mouse_position(PhysicalPosition::new(
                    position.x as f32,
                    position.y as f32,
                ));
            }
            WindowEvent::CursorLeft { .. } => self.mouse_pos = None,
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_STEP,
                };
                self.process_wheel(y);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.process_button(*button, *state);
            }
            _ => {}
        }
    }

    pub fn process_mouse_position(&mut self, position: PhysicalPosition<f32>) {
        if let Some(last) = self.mouse_pos {
            self.mouse_delta += Vector2::new(position.x - last.x, position.y - last.y);
        }
        self.mouse_pos = Some(position);
    }

    /// Positive values scroll away from the user
    pub fn process_wheel(&mut self, steps: f32) {
        self.mouse_wheel_delta += steps;
    }

    pub fn process_button(&mut self, button: MouseButton, state: ElementState) {
        trace!("{button:?} is now {state:?}");
        self.button_states.insert(button, state);
    }

    pub fn button_state(&self, button: MouseButton) -> ElementState {
        *self
            .button_states
            .get(&button)
            .unwrap_or(&ElementState::Released)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.button_state(button) == ElementState::Pressed
    }

    /// Cursor movement in pixels since the last frame, +x right, +y down
    pub fn mouse_delta(&self) -> &Vector2<f32> {
        &self.mouse_delta
    }

    pub fn wheel_delta(&self) -> f32 {
        self.mouse_wheel_delta
    }

    pub fn next_frame(&mut self) {
        self.mouse_delta = Vector2::zeros();
        self.mouse_wheel_delta = 0.0;
    }
}
