//! Per-frame simulation step
//!
//! Owns the avatar and the components that move it, and runs them in a
//! fixed order each frame:
//!
//! 1. apply the frame's pointer motion and snapshot the movement basis
//! 2. integrate intents, gravity and damping into a displacement
//! 3. translate the capsule and resolve penetration (recomputes `on_floor`)
//! 4. sync the view position from the corrected capsule
//! 5. reset the avatar if it fell out of the world

use glam::Vec3;

use crate::camera::{OrientationController, ViewPose};
use crate::config::ExplorerConfig;
use crate::input::InputIntents;
use crate::physics::{CapsuleQuery, CollisionResult};

use super::avatar::{Avatar, MovementState};
use super::collision_resolver::CollisionResolver;
use super::movement_controller::MovementIntegrator;
use super::respawn::RespawnGuard;

/// Outcome of one [`PlayerSimulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Floor state after the collision sweep (after respawn, if any)
    pub state: MovementState,
    /// Whether the avatar was reset to spawn this step
    pub respawned: bool,
    /// Contact found by the sweep, if any
    pub collision: Option<CollisionResult>,
    /// Pose to hand to the camera
    pub pose: ViewPose,
}

/// Player movement core: avatar state plus the systems that update it.
#[derive(Debug, Clone)]
pub struct PlayerSimulation {
    avatar: Avatar,
    orientation: OrientationController,
    integrator: MovementIntegrator,
    resolver: CollisionResolver,
    respawn: RespawnGuard,
}

impl Default for PlayerSimulation {
    fn default() -> Self {
        Self::new(&ExplorerConfig::default())
    }
}

impl PlayerSimulation {
    pub fn new(config: &ExplorerConfig) -> Self {
        let spawn = config.respawn.spawn;
        let mut orientation = OrientationController::new(&config.look);
        orientation.set_orientation(spawn.yaw, spawn.pitch);

        Self {
            avatar: Avatar::at_spawn(&config.player, &spawn),
            orientation,
            integrator: MovementIntegrator::new(&config.player),
            resolver: CollisionResolver::new(),
            respawn: RespawnGuard::new(&config.respawn),
        }
    }

    #[inline]
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    #[inline]
    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    #[inline]
    pub fn orientation(&self) -> &OrientationController {
        &self.orientation
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.avatar.velocity
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        self.avatar.state()
    }

    /// Forward a pointer-move event to the look controller.
    ///
    /// Callers gate this on pointer lock; `InputState` already drops motion
    /// while unlocked.
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.orientation.apply_pointer_delta(dx, dy);
    }

    /// Current camera pose.
    pub fn view_pose(&self) -> ViewPose {
        self.orientation.view_pose(self.avatar.view_position)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// `intents.pointer_delta` is applied to the orientation before the
    /// movement basis is taken. Hosts that forward pointer events through
    /// [`apply_pointer_delta`](Self::apply_pointer_delta) pass a zero delta.
    pub fn step<Q: CapsuleQuery + ?Sized>(
        &mut self,
        dt: f32,
        intents: &InputIntents,
        collider: &Q,
    ) -> StepReport {
        let (dx, dy) = intents.pointer_delta;
        if dx != 0.0 || dy != 0.0 {
            self.orientation.apply_pointer_delta(dx, dy);
        }
        let basis = self.orientation.movement_basis();

        let displacement =
            self.integrator
                .integrate(&mut self.avatar, &intents.movement, &basis, dt);
        let collision = self.resolver.resolve(&mut self.avatar, displacement, collider);
        let respawned = self.respawn.check(&mut self.avatar);

        StepReport {
            state: self.avatar.state(),
            respawned,
            collision,
            pose: self.view_pose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MovementIntents;
    use crate::physics::{Octree, Triangle};

    const DT: f32 = 1.0 / 60.0;

    fn floor(half: f32, y: f32) -> Octree {
        let a = Vec3::new(-half, y, -half);
        let b = Vec3::new(half, y, -half);
        let c = Vec3::new(half, y, half);
        let d = Vec3::new(-half, y, half);
        Octree::build([Triangle::new(a, d, c), Triangle::new(a, c, b)])
    }

    fn walking(movement: MovementIntents) -> InputIntents {
        InputIntents {
            movement,
            pointer_delta: (0.0, 0.0),
        }
    }

    fn sim_at(base: Vec3) -> PlayerSimulation {
        let mut config = ExplorerConfig::default();
        config.respawn.spawn.position = base;
        PlayerSimulation::new(&config)
    }

    #[test]
    fn test_initial_pose() {
        let sim = PlayerSimulation::default();
        let pose = sim.view_pose();
        assert!((pose.position - Vec3::new(12.64, 2.2, 64.0198)).length() < 1e-5);
        assert_eq!(pose.yaw, 0.0);
        assert_eq!(sim.state(), MovementState::Airborne);
        assert!((sim.avatar().segment_height() - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_respawn_from_below_threshold() {
        let mut sim = PlayerSimulation::default();
        {
            let avatar = sim.avatar_mut();
            let offset = Vec3::new(0.0, -20.0001 - avatar.collider.end.y, 0.0);
            avatar.collider.translate(offset);
            avatar.sync_view();
            avatar.velocity = Vec3::new(2.0, -40.0, 0.0);
        }

        let report = sim.step(DT, &InputIntents::default(), &Octree::empty());

        assert!(report.respawned);
        assert!((report.pose.position - Vec3::new(12.64, 2.2, 64.0198)).length() < 1e-5);
        assert_eq!(sim.velocity(), Vec3::ZERO);
        assert!((sim.avatar().segment_height() - 1.7).abs() < 1e-5);
        assert_eq!(report.state, MovementState::Airborne);
    }

    #[test]
    fn test_free_fall_with_empty_collider_eventually_respawns() {
        let mut sim = PlayerSimulation::default();
        let collider = Octree::empty();

        let mut respawned = false;
        for _ in 0..600 {
            let report = sim.step(DT, &InputIntents::default(), &collider);
            assert_eq!(report.state, MovementState::Airborne);
            if report.respawned {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
    }

    #[test]
    fn test_lands_on_floor() {
        let mut sim = sim_at(Vec3::new(1.0, 1.0, -2.0));
        let collider = floor(20.0, 0.0);

        let mut grounded = false;
        for _ in 0..120 {
            if sim.step(DT, &InputIntents::default(), &collider).state.is_grounded() {
                grounded = true;
                break;
            }
        }
        assert!(grounded);
        assert!(sim.avatar().collider.start.y > 0.0);
        assert!((sim.avatar().segment_height() - 1.7).abs() < 1e-4);
    }

    #[test]
    fn test_pose_tracks_capsule_end() {
        let mut sim = sim_at(Vec3::new(1.0, 1.0, -2.0));
        let report = sim.step(DT, &InputIntents::default(), &floor(20.0, 0.0));
        assert_eq!(report.pose.position, sim.avatar().collider.end);
    }

    #[test]
    fn test_walk_forward_on_floor() {
        let mut sim = sim_at(Vec3::new(1.0, 0.36, -2.0));
        let collider = floor(50.0, 0.0);

        // Settle onto the floor first
        for _ in 0..30 {
            sim.step(DT, &InputIntents::default(), &collider);
        }
        let start_z = sim.view_pose().position.z;

        let forward = walking(MovementIntents {
            forward: true,
            ..Default::default()
        });
        for _ in 0..30 {
            sim.step(DT, &forward, &collider);
        }
        // Yaw 0 walks toward -Z
        assert!(sim.view_pose().position.z < start_z - 0.5);
    }

    #[test]
    fn test_pointer_delta_turns_before_moving() {
        let mut sim = sim_at(Vec3::new(1.0, 0.36, -2.0));
        let collider = floor(50.0, 0.0);
        for _ in 0..30 {
            sim.step(DT, &InputIntents::default(), &collider);
        }

        // Turn 90 degrees right (yaw -= π/2), then walk forward toward +X
        let turn = InputIntents {
            movement: MovementIntents {
                forward: true,
                ..Default::default()
            },
            pointer_delta: (500.0 * std::f32::consts::FRAC_PI_2, 0.0),
        };
        let start = sim.view_pose().position;
        sim.step(DT, &turn, &collider);
        let moved = sim.view_pose().position - start;
        assert!(moved.x > 0.0);
        assert!(moved.z.abs() < moved.x);
    }

    #[test]
    fn test_apply_pointer_delta_event_driven() {
        let mut sim = PlayerSimulation::default();
        sim.apply_pointer_delta(0.0, -1.0e6);
        assert!((sim.view_pose().pitch - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_jump_leaves_floor() {
        let mut sim = sim_at(Vec3::new(1.0, 0.36, -2.0));
        let collider = floor(50.0, 0.0);
        for _ in 0..30 {
            sim.step(DT, &InputIntents::default(), &collider);
        }
        assert!(sim.state().is_grounded());

        let jump = walking(MovementIntents {
            jump: true,
            ..Default::default()
        });
        let report = sim.step(DT, &jump, &collider);
        assert_eq!(report.state, MovementState::Airborne);
        assert!(sim.velocity().y > 0.0);
    }
}
