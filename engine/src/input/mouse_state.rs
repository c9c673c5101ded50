//! Pointer Lock State Tracker
//!
//! Handles captured pointer input with delta accumulation for first-person
//! look control. Relative motion only counts while the pointer is locked;
//! motion arriving while it is free is dropped.

/// Pointer buttons relevant to lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (left) button - acquires the lock
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Pointer lock state with delta accumulation.
///
/// - **Lock gating**: deltas accumulate only while locked
/// - **Delta accumulation**: raw deltas add up until consumed
/// - **Atomic consumption**: `consume_delta()` returns the sum and resets it
///
/// # Example
///
/// ```rust,ignore
/// let mut pointer = PointerState::new();
///
/// pointer.handle_button_down(PointerButton::Primary); // lock engaged
/// pointer.accumulate_delta(10.0, -5.0);
/// pointer.accumulate_delta(3.0, 2.0);
///
/// let (dx, dy) = pointer.consume_delta(); // (13.0, -3.0)
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Accumulated horizontal delta since last consume.
    delta_x: f32,
    /// Accumulated vertical delta since last consume.
    delta_y: f32,
    /// Whether the pointer is currently locked.
    locked: bool,
}

impl PointerState {
    /// Create a new pointer state with zero deltas and the lock released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw pointer motion.
    ///
    /// Returns `false` (and drops the motion) when the pointer is not locked
    /// or the delta is not finite.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) -> bool {
        if !self.locked || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.delta_x += dx;
        self.delta_y += dy;
        true
    }

    /// Consume the accumulated delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    /// A button press; the primary button acquires the lock.
    ///
    /// Returns `true` if this press engaged the lock.
    pub fn handle_button_down(&mut self, button: PointerButton) -> bool {
        if button == PointerButton::Primary && !self.locked {
            self.set_locked(true);
            return true;
        }
        false
    }

    /// Engage or release the lock.
    ///
    /// Releasing clears pending deltas so re-locking does not jump.
    #[inline]
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    /// Check if the pointer is currently locked.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
