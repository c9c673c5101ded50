//! Avatar state
//!
//! The simulated body: a capsule collider, a persistent velocity and the
//! floor flag recomputed after every collision sweep.

use glam::Vec3;

use crate::config::PlayerConfig;
use crate::physics::Capsule;

use super::respawn::SpawnPose;

/// Movement state of the avatar.
///
/// There is no separate falling/jumping distinction; the sign of the
/// vertical velocity carries that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    /// Last collision sweep found an upward-facing contact
    Grounded,
    /// No contact, or only walls/ceilings
    #[default]
    Airborne,
}

impl MovementState {
    pub fn from_on_floor(on_floor: bool) -> Self {
        if on_floor {
            Self::Grounded
        } else {
            Self::Airborne
        }
    }

    pub fn is_grounded(self) -> bool {
        self == Self::Grounded
    }
}

/// The simulated avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// Capsule collider; `end` is the eye point
    pub collider: Capsule,
    /// Vertical extent between capsule `start` and `end`
    pub height: f32,
    /// World-space velocity, persists across frames
    pub velocity: Vec3,
    /// Result of the most recent collision sweep
    pub on_floor: bool,
    /// Position published to the camera
    pub view_position: Vec3,
}

impl Avatar {
    /// Place a fresh avatar at `spawn`.
    ///
    /// The capsule bottom sits on the spawn point with the segment standing
    /// `config.height` above it.
    pub fn at_spawn(config: &PlayerConfig, spawn: &SpawnPose) -> Self {
        Self {
            collider: Capsule::upright(spawn.position, config.height, config.capsule_radius),
            height: config.height,
            velocity: spawn.velocity,
            on_floor: false,
            view_position: spawn.position,
        }
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        MovementState::from_on_floor(self.on_floor)
    }

    /// Eye point of the capsule.
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.collider.end
    }

    /// Copy the corrected capsule end into the published view position.
    #[inline]
    pub fn sync_view(&mut self) {
        self.view_position = self.collider.end;
    }

    /// Current `end.y - start.y`.
    #[inline]
    pub fn segment_height(&self) -> f32 {
        self.collider.vertical_extent()
    }
}
