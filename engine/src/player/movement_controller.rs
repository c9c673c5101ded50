//! Player Movement Integrator
//!
//! Turns held movement intents and elapsed frame time into a velocity
//! update and a candidate displacement. Movement direction is relative to
//! the view's horizontal facing.
//!
//! # Physics Model
//!
//! - Base speed: `(on_floor ? 1.75 : 0.2) * gravity * speed_multiplier`
//!   (84 m/s² grounded, 9.6 m/s² airborne with default tuning)
//! - Running: ×1.6
//! - Backward: ×0.5, strafe: ×0.75
//! - Jump: sets `velocity.y = 30` while on the floor (not additive)
//! - Damping: `velocity += velocity * (exp(-5 dt) - 1)`, scaled by 0.1 in
//!   the air; gravity is applied before damping
//!
//! # Usage
//!
//! ```rust,ignore
//! use whiterun_engine::player::MovementIntegrator;
//!
//! let integrator = MovementIntegrator::new(&config.player);
//!
//! // Each frame:
//! let displacement = integrator.integrate(&mut avatar, &intents, &basis, dt);
//! ```

use glam::Vec3;

use crate::camera::MovementBasis;
use crate::config::PlayerConfig;
use crate::input::MovementIntents;

use super::avatar::Avatar;

/// Velocity integration for the avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementIntegrator {
    config: PlayerConfig,
}

impl Default for MovementIntegrator {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl MovementIntegrator {
    pub fn new(config: &PlayerConfig) -> Self {
        Self { config: *config }
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Velocity change budget for this frame.
    pub fn speed_delta(&self, dt: f32, on_floor: bool, running: bool) -> f32 {
        let mut delta = dt * self.config.base_speed(on_floor);
        if running {
            delta *= self.config.run_multiplier;
        }
        delta
    }

    /// Add the held directional intents to `velocity` and apply the jump.
    pub fn accumulate_intents(
        &self,
        velocity: &mut Vec3,
        intents: &MovementIntents,
        basis: &MovementBasis,
        speed_delta: f32,
        on_floor: bool,
    ) {
        if intents.forward {
            *velocity += basis.forward * speed_delta;
        }
        if intents.backward {
            *velocity += basis.forward * (-speed_delta * self.config.backward_factor);
        }
        if intents.left {
            *velocity += basis.side * (-speed_delta * self.config.strafe_factor);
        }
        if intents.right {
            *velocity += basis.side * (speed_delta * self.config.strafe_factor);
        }

        if on_floor && intents.jump {
            velocity.y = self.config.jump_impulse;
        }
    }

    /// Per-frame damping factor, always in `(-1, 0]`.
    pub fn damping_factor(&self, dt: f32, on_floor: bool) -> f32 {
        let damping = (-self.config.damping_rate * dt).exp() - 1.0;
        if on_floor {
            damping
        } else {
            damping * self.config.airborne_damping_scale
        }
    }

    /// Gravity (airborne only) followed by exponential damping.
    pub fn apply_gravity_and_damping(&self, velocity: &mut Vec3, dt: f32, on_floor: bool) {
        if !on_floor {
            velocity.y -= self.config.gravity * dt;
        }
        let damping = self.damping_factor(dt, on_floor);
        *velocity += *velocity * damping;
    }

    /// Run one integration step on `avatar.velocity`.
    ///
    /// Negative `dt` is treated as zero. Returns the candidate displacement
    /// `velocity * dt`; the collider is not moved here.
    pub fn integrate(
        &self,
        avatar: &mut Avatar,
        intents: &MovementIntents,
        basis: &MovementBasis,
        dt: f32,
    ) -> Vec3 {
        let dt = dt.max(0.0);
        let on_floor = avatar.on_floor;

        let speed_delta = self.speed_delta(dt, on_floor, intents.run);
        self.accumulate_intents(&mut avatar.velocity, intents, basis, speed_delta, on_floor);
        self.apply_gravity_and_damping(&mut avatar.velocity, dt, on_floor);

        avatar.velocity * dt
    }
}
