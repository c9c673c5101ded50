//! Keyboard Input Module
//!
//! Contains the level-triggered movement intents and the key codes that
//! drive them. Decoupled from winit to use generic key codes.

/// Generic key codes for movement input, independent of windowing system.
///
/// Only the keys the explorer binds are distinguished; everything else is
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// A named movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Run,
    Jump,
}

impl Intent {
    /// Intent bound to `key`, if any.
    ///
    /// W forward, S backward, A left, D right, left Shift run, Space jump.
    pub fn for_key(key: KeyCode) -> Option<Intent> {
        match key {
            KeyCode::W => Some(Intent::Forward),
            KeyCode::S => Some(Intent::Backward),
            KeyCode::A => Some(Intent::Left),
            KeyCode::D => Some(Intent::Right),
            KeyCode::ShiftLeft => Some(Intent::Run),
            KeyCode::Space => Some(Intent::Jump),
            KeyCode::Escape | KeyCode::Unknown => None,
        }
    }
}

/// Tracks which movement intents are currently held.
///
/// These are levels, not edges: holding W keeps `forward` true until the
/// key is released, and reading the state never resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntents {
    /// W key - move forward
    pub forward: bool,
    /// S key - move backward (at half speed)
    pub backward: bool,
    /// A key - strafe left
    pub left: bool,
    /// D key - strafe right
    pub right: bool,
    /// Left Shift - run
    pub run: bool,
    /// Space - jump when on the floor
    pub jump: bool,
}

impl MovementIntents {
    /// Create a new intent state with everything released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single intent.
    pub fn set(&mut self, intent: Intent, active: bool) {
        match intent {
            Intent::Forward => self.forward = active,
            Intent::Backward => self.backward = active,
            Intent::Left => self.left = active,
            Intent::Right => self.right = active,
            Intent::Run => self.run = active,
            Intent::Jump => self.jump = active,
        }
    }

    /// Read a single intent.
    pub fn is_active(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Backward => self.backward,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Run => self.run,
            Intent::Jump => self.jump,
        }
    }

    /// Update intent state based on key press/release.
    ///
    /// Returns `true` if the key is bound to an intent and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match Intent::for_key(key) {
            Some(intent) => {
                self.set(intent, pressed);
                true
            }
            None => false,
        }
    }

    /// Check if any directional intent is held.
    pub fn any_directional(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
