//! Input Module
//!
//! Platform-agnostic intent tracking for the explorer. Key events set
//! level-triggered movement intents, pointer motion accumulates look deltas,
//! and both only count while the pointer is locked.
//!
//! # Example
//!
//! ```rust,ignore
//! use whiterun_engine::input::{InputState, KeyCode, PointerButton};
//!
//! let mut input = InputState::new();
//! input.handle_pointer_down(PointerButton::Primary); // acquire lock
//! input.handle_key(KeyCode::W, true);
//! input.handle_pointer_motion(12.0, -3.0);
//!
//! let intents = input.snapshot();
//! assert!(intents.movement.forward);
//! ```

pub mod handler;
pub mod keyboard;
pub mod mouse_state;

pub use keyboard::{Intent, KeyCode, MovementIntents};
pub use mouse_state::{PointerButton, PointerState};

/// Everything one simulation step reads from input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntents {
    /// Held movement intents
    pub movement: MovementIntents,
    /// Pointer motion accumulated since the previous snapshot
    pub pointer_delta: (f32, f32),
}

/// Combined keyboard and pointer state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    movement: MovementIntents,
    pointer: PointerState,
}

impl InputState {
    /// Create a new input state with nothing held and the pointer free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release.
    ///
    /// Ignored while the pointer is free. Escape releases the lock.
    /// Returns `true` if the event changed anything.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if !self.pointer.is_locked() {
            return false;
        }
        if key == KeyCode::Escape {
            if pressed {
                self.release_lock();
                return true;
            }
            return false;
        }
        self.movement.handle_key(key, pressed)
    }

    /// Handle a pointer button press. The primary button acquires the lock.
    pub fn handle_pointer_down(&mut self, button: PointerButton) -> bool {
        let locked = self.pointer.handle_button_down(button);
        if locked {
            log::debug!("pointer lock acquired");
        }
        locked
    }

    /// Handle relative pointer motion (pixels).
    pub fn handle_pointer_motion(&mut self, dx: f32, dy: f32) -> bool {
        self.pointer.accumulate_delta(dx, dy)
    }

    /// Release the pointer lock, dropping all held intents and pending motion.
    pub fn release_lock(&mut self) {
        if self.pointer.is_locked() {
            log::debug!("pointer lock released");
        }
        self.pointer.set_locked(false);
        self.movement.reset();
    }

    /// Whether the pointer is currently locked.
    pub fn is_locked(&self) -> bool {
        self.pointer.is_locked()
    }

    /// Currently held intents, without consuming anything.
    pub fn intents(&self) -> MovementIntents {
        self.movement
    }

    /// Take the state for one step: held intents plus the pointer motion
    /// accumulated since the last snapshot.
    pub fn snapshot(&mut self) -> InputIntents {
        InputIntents {
            movement: self.movement,
            pointer_delta: self.pointer.consume_delta(),
        }
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.pointer.reset();
    }
}
