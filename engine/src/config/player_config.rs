//! Player Configuration
//!
//! Tuning values for the avatar's body, movement feel, look controls,
//! out-of-bounds recovery and frame clock. `Default` reproduces the
//! designed values; every field can be overridden from a JSON file.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::player::respawn::SpawnPose;

/// Capsule radius in meters
pub const CAPSULE_RADIUS: f32 = 0.35;
/// Capsule segment height (eye height above the bottom sphere center)
pub const AVATAR_HEIGHT: f32 = 1.7;
/// Gravity acceleration in m/s²
pub const GRAVITY: f32 = 60.0;
/// Global movement tuning factor
pub const SPEED_MULTIPLIER: f32 = 0.8;
/// Speed factor while standing on the floor
pub const GROUNDED_SPEED_FACTOR: f32 = 1.75;
/// Speed factor while airborne (reduced air control)
pub const AIRBORNE_SPEED_FACTOR: f32 = 0.2;
/// Speed factor applied while the run intent is held
pub const RUN_MULTIPLIER: f32 = 1.6;
/// Backward movement relative to forward
pub const BACKWARD_FACTOR: f32 = 0.5;
/// Strafe movement relative to forward
pub const STRAFE_FACTOR: f32 = 0.75;
/// Vertical velocity set by a jump (m/s)
pub const JUMP_IMPULSE: f32 = 30.0;
/// Exponential damping rate (1/s)
pub const DAMPING_RATE: f32 = 5.0;
/// Damping scale while airborne, keeps jump arcs intact
pub const AIRBORNE_DAMPING_SCALE: f32 = 0.1;
/// Pointer pixels per radian of rotation
pub const LOOK_SENSITIVITY: f32 = 500.0;
/// Y coordinate below which the avatar is considered lost
pub const OUT_OF_BOUNDS_Y: f32 = -20.0;
/// Default spawn position for the Whiterun location
pub const SPAWN_POSITION: Vec3 = Vec3::new(12.64, AVATAR_HEIGHT + 0.5, 64.0198);
/// Upper bound of a single simulation step (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

const_assert!(GROUNDED_SPEED_FACTOR > AIRBORNE_SPEED_FACTOR);
const_assert!(BACKWARD_FACTOR < 1.0);
const_assert!(STRAFE_FACTOR < 1.0);
const_assert!(AIRBORNE_DAMPING_SCALE < 1.0);

/// Body and movement tuning for the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Capsule radius (meters)
    pub capsule_radius: f32,
    /// Capsule segment height (meters)
    pub height: f32,
    /// Gravity acceleration (m/s²)
    pub gravity: f32,
    /// Global speed tuning factor
    pub speed_multiplier: f32,
    /// Speed factor on the floor
    pub grounded_speed_factor: f32,
    /// Speed factor in the air
    pub airborne_speed_factor: f32,
    /// Multiplier while running
    pub run_multiplier: f32,
    /// Backward speed relative to forward
    pub backward_factor: f32,
    /// Strafe speed relative to forward
    pub strafe_factor: f32,
    /// Vertical velocity set on jump (m/s)
    pub jump_impulse: f32,
    /// Exponential damping rate (1/s)
    pub damping_rate: f32,
    /// Damping scale while airborne
    pub airborne_damping_scale: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            capsule_radius: CAPSULE_RADIUS,
            height: AVATAR_HEIGHT,
            gravity: GRAVITY,
            speed_multiplier: SPEED_MULTIPLIER,
            grounded_speed_factor: GROUNDED_SPEED_FACTOR,
            airborne_speed_factor: AIRBORNE_SPEED_FACTOR,
            run_multiplier: RUN_MULTIPLIER,
            backward_factor: BACKWARD_FACTOR,
            strafe_factor: STRAFE_FACTOR,
            jump_impulse: JUMP_IMPULSE,
            damping_rate: DAMPING_RATE,
            airborne_damping_scale: AIRBORNE_DAMPING_SCALE,
        }
    }
}

impl PlayerConfig {
    /// Base speed for the current floor state, before `dt` and running.
    pub fn base_speed(&self, on_floor: bool) -> f32 {
        let factor = if on_floor {
            self.grounded_speed_factor
        } else {
            self.airborne_speed_factor
        };
        factor * self.gravity * self.speed_multiplier
    }
}

/// Pointer-look tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Pointer pixels per radian
    pub sensitivity: f32,
    /// Symmetric pitch limit in radians
    pub pitch_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: LOOK_SENSITIVITY,
            pitch_limit: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Out-of-bounds recovery.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Eye height below which the avatar is reset
    pub out_of_bounds_y: f32,
    /// Where the avatar is placed on reset
    pub spawn: SpawnPose,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_y: OUT_OF_BOUNDS_Y,
            spawn: SpawnPose::new(SPAWN_POSITION),
        }
    }
}

/// Frame time bounds applied before the simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Smallest dt handed to the step (seconds)
    pub min_dt: f32,
    /// Largest dt handed to the step (seconds)
    pub max_dt: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            min_dt: 0.0,
            max_dt: MAX_FRAME_DT,
        }
    }
}
