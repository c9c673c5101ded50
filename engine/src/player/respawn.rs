//! Out-of-bounds recovery
//!
//! When the avatar falls below the world floor threshold it is teleported
//! back to a fixed spawn pose. This is the designed safety net for gaps and
//! malformed colliders, not an error path.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::RespawnConfig;
use crate::config::player_config::SPAWN_POSITION;

use super::avatar::Avatar;

/// Fixed pose the avatar is reset to.
///
/// `yaw`/`pitch` are used for initial placement only; an out-of-bounds
/// reset keeps the current look direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPose {
    /// Capsule bottom and view position after a reset
    pub position: Vec3,
    /// Initial yaw (radians)
    pub yaw: f32,
    /// Initial pitch (radians)
    pub pitch: f32,
    /// Velocity after a reset
    pub velocity: Vec3,
}

impl SpawnPose {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
        }
    }
}

impl Default for SpawnPose {
    fn default() -> Self {
        Self::new(SPAWN_POSITION)
    }
}

/// Checks the avatar against the out-of-bounds threshold and resets it.
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnGuard {
    threshold_y: f32,
    spawn: SpawnPose,
}

impl Default for RespawnGuard {
    fn default() -> Self {
        Self::new(&RespawnConfig::default())
    }
}

impl RespawnGuard {
    pub fn new(config: &RespawnConfig) -> Self {
        Self {
            threshold_y: config.out_of_bounds_y,
            spawn: config.spawn,
        }
    }

    #[inline]
    pub fn threshold_y(&self) -> f32 {
        self.threshold_y
    }

    #[inline]
    pub fn spawn(&self) -> &SpawnPose {
        &self.spawn
    }

    /// Strictly below the threshold counts as lost, as does a non-finite
    /// position (NaN never compares below anything).
    #[inline]
    pub fn is_out_of_bounds(&self, view_position: Vec3) -> bool {
        !view_position.is_finite() || view_position.y < self.threshold_y
    }

    /// Reset the avatar if it has fallen out of the world.
    ///
    /// Returns `true` when a respawn happened.
    pub fn check(&self, avatar: &mut Avatar) -> bool {
        if !self.is_out_of_bounds(avatar.view_position) {
            return false;
        }
        log::warn!(
            "avatar out of bounds at {:?} (threshold y={}), respawning at {:?}",
            avatar.view_position,
            self.threshold_y,
            self.spawn.position
        );
        self.respawn(avatar);
        true
    }

    /// Teleport to the spawn pose.
    ///
    /// Velocity is copied from the spawn pose, the capsule is rebuilt at the
    /// spawn point with the avatar's height reapplied, and the view jumps
    /// straight to the spawn point.
    pub fn respawn(&self, avatar: &mut Avatar) {
        avatar.velocity = self.spawn.velocity;
        avatar.collider.start = self.spawn.position;
        avatar.collider.end = self.spawn.position;
        avatar.collider.end.y += avatar.height;
        avatar.on_floor = false;
        avatar.view_position = self.spawn.position;
    }
}
