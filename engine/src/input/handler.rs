//! Input Handler
//!
//! Bridges winit events into the platform-agnostic input types. Only the
//! keys and buttons the explorer binds are mapped; everything else becomes
//! `Unknown`/`Other` and is ignored downstream.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode as WinitKeyCode;

use super::InputState;
use super::keyboard::KeyCode;
use super::mouse_state::PointerButton;

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}

impl InputState {
    /// Feed a winit keyboard event (physical key code).
    pub fn on_winit_key(&mut self, key: WinitKeyCode, state: ElementState) -> bool {
        self.handle_key(key.into(), state == ElementState::Pressed)
    }

    /// Feed a winit mouse button event. Only presses matter.
    pub fn on_winit_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        self.handle_pointer_down(button.into())
    }

    /// Feed a `DeviceEvent::MouseMotion` delta.
    pub fn on_winit_mouse_motion(&mut self, delta: (f64, f64)) -> bool {
        self.handle_pointer_motion(delta.0 as f32, delta.1 as f32)
    }
}
