//! Keyboard and mouse state, polled once per frame into a `ControlSnapshot`.

use engine_core::{ControlSnapshot, FlightInput, WalkInput};
use glam::Vec2;
use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process raw mouse movement. Ignored unless the pointer is locked.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_locked {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Drop all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys_released.extend(self.keys_held.drain());
        self.accumulated_delta = Vec2::ZERO;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
        if !locked {
            self.accumulated_delta = Vec2::ZERO;
        }
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    /// Walking axes from WASD. Forward (W) is `z = -1`.
    pub fn walk_input(&self) -> WalkInput {
        let mut input = WalkInput::ZERO;
        if self.is_key_held(KeyCode::KeyW) {
            input.z -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyS) {
            input.z += 1.0;
        }
        if self.is_key_held(KeyCode::KeyA) {
            input.x -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyD) {
            input.x += 1.0;
        }
        input
    }

    /// Flight axes. Each axis takes the last matching binding, so opposing keys
    /// resolve toward the second one (S over W, D over A, Z over Q, Shift over Space).
    pub fn flight_input(&self) -> FlightInput {
        let mut input = FlightInput::ZERO;

        // Elevator: W pushes the nose down, S pulls it up.
        if self.any_held(&[KeyCode::KeyW, KeyCode::ArrowUp]) {
            input.pitch = -1.0;
        }
        if self.any_held(&[KeyCode::KeyS, KeyCode::ArrowDown]) {
            input.pitch = 1.0;
        }

        // Rudder
        if self.any_held(&[KeyCode::KeyA, KeyCode::ArrowLeft]) {
            input.yaw = -1.0;
        }
        if self.any_held(&[KeyCode::KeyD, KeyCode::ArrowRight]) {
            input.yaw = 1.0;
        }

        // Ailerons
        if self.is_key_held(KeyCode::KeyQ) {
            input.roll = -1.0;
        }
        if self.is_key_held(KeyCode::KeyZ) {
            input.roll = 1.0;
        }

        if self.is_key_held(KeyCode::Space) {
            input.throttle = 1.0;
        }
        if self.is_key_held(KeyCode::ShiftLeft) {
            input.throttle = -1.0;
        }

        input
    }

    /// Check if run is held (Left Shift).
    pub fn is_running(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft)
    }

    /// Check if jump was pressed (Space).
    pub fn is_jump_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
    }

    /// Check if interact was pressed (E).
    pub fn is_interact_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyE)
    }

    /// Check if exit was pressed (Escape).
    pub fn is_exit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Poll everything the simulation needs for one tick.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            flight: self.flight_input(),
            walk: self.walk_input(),
            interact: self.is_interact_pressed(),
            exit: self.is_exit_pressed(),
            run: self.is_running(),
            jump: self.is_jump_pressed(),
            mouse_delta: self.mouse_delta,
            pointer_locked: self.cursor_locked,
        }
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
