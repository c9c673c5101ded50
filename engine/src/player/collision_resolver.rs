//! Collision resolution
//!
//! Moves the avatar capsule by the candidate displacement, asks the spatial
//! index for penetration and applies a single positional correction along
//! the contact normal. Residual overlap is left for the next frame.
//!
//! The sweep is discrete: a displacement larger than the geometry's
//! thickness plus the capsule radius can pass straight through.

use glam::Vec3;

use crate::physics::{CapsuleQuery, CollisionResult};

use super::avatar::Avatar;

/// Single-iteration capsule correction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Translate, query, correct.
    ///
    /// `avatar.on_floor` is recomputed here and nowhere else: true only when
    /// the contact normal points upward. The view position is synced from
    /// the corrected capsule end every call.
    pub fn resolve<Q: CapsuleQuery + ?Sized>(
        &self,
        avatar: &mut Avatar,
        displacement: Vec3,
        collider: &Q,
    ) -> Option<CollisionResult> {
        avatar.collider.translate(displacement);

        let result = collider.capsule_intersect(&avatar.collider);
        match result {
            Some(hit) => {
                avatar.on_floor = hit.is_floor();
                avatar.collider.translate(hit.correction());
            }
            None => avatar.on_floor = false,
        }

        avatar.sync_view();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::physics::{Capsule, Octree, Triangle};
    use crate::player::respawn::SpawnPose;

    /// Always reports the same contact.
    struct FixedContact(CollisionResult);

    impl CapsuleQuery for FixedContact {
        fn capsule_intersect(&self, _capsule: &Capsule) -> Option<CollisionResult> {
            Some(self.0)
        }
    }

    fn avatar_at(base: Vec3) -> Avatar {
        Avatar::at_spawn(&PlayerConfig::default(), &SpawnPose::new(base))
    }

    fn floor(half: f32) -> Octree {
        let a = Vec3::new(-half, 0.0, -half);
        let b = Vec3::new(half, 0.0, -half);
        let c = Vec3::new(half, 0.0, half);
        let d = Vec3::new(-half, 0.0, half);
        Octree::build([Triangle::new(a, d, c), Triangle::new(a, c, b)])
    }

    #[test]
    fn test_floor_correction_sets_on_floor() {
        let depth = 0.125;
        let collider = FixedContact(CollisionResult::new(Vec3::Y, depth));
        let mut avatar = avatar_at(Vec3::ZERO);
        let before = avatar.collider;

        CollisionResolver::new().resolve(&mut avatar, Vec3::ZERO, &collider);

        assert!(avatar.on_floor);
        assert_eq!(avatar.collider.start - before.start, Vec3::new(0.0, depth, 0.0));
        assert!((avatar.collider.end - before.end - Vec3::new(0.0, depth, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_wall_contact_is_not_floor() {
        let collider = FixedContact(CollisionResult::new(Vec3::X, 0.1));
        let mut avatar = avatar_at(Vec3::ZERO);
        avatar.on_floor = true;

        CollisionResolver::new().resolve(&mut avatar, Vec3::ZERO, &collider);
        assert!(!avatar.on_floor);
    }

    #[test]
    fn test_ceiling_contact_is_not_floor() {
        let collider = FixedContact(CollisionResult::new(Vec3::NEG_Y, 0.1));
        let mut avatar = avatar_at(Vec3::ZERO);
        CollisionResolver::new().resolve(&mut avatar, Vec3::ZERO, &collider);
        assert!(!avatar.on_floor);
    }

    #[test]
    fn test_empty_collider_clears_on_floor() {
        let collider = Octree::empty();
        for y in [-50.0, 0.0, 3.0] {
            let mut avatar = avatar_at(Vec3::new(0.0, y, 0.0));
            avatar.on_floor = true;
            let result =
                CollisionResolver::new().resolve(&mut avatar, Vec3::new(0.0, -1.0, 0.0), &collider);
            assert!(result.is_none());
            assert!(!avatar.on_floor);
        }
    }

    #[test]
    fn test_view_synced_to_capsule_end() {
        let collider = Octree::empty();
        let mut avatar = avatar_at(Vec3::ZERO);
        CollisionResolver::new().resolve(&mut avatar, Vec3::new(1.0, 2.0, 3.0), &collider);
        assert_eq!(avatar.view_position, avatar.collider.end);
    }

    #[test]
    fn test_segment_height_preserved() {
        let collider = floor(10.0);
        let mut avatar = avatar_at(Vec3::new(1.0, 0.3, -2.0));
        CollisionResolver::new().resolve(&mut avatar, Vec3::new(0.4, -0.2, 0.1), &collider);
        assert!((avatar.segment_height() - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_real_floor_pushes_up() {
        let collider = floor(10.0);
        let mut avatar = avatar_at(Vec3::new(1.0, 0.5, -2.0));

        let result =
            CollisionResolver::new().resolve(&mut avatar, Vec3::new(0.0, -0.3, 0.0), &collider);
        let hit = result.unwrap();
        assert!(avatar.on_floor);
        assert!((hit.depth - 0.15).abs() < 1e-4);
        assert!((avatar.collider.start.y - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_dyn_collider() {
        let collider: Box<dyn CapsuleQuery> = Box::new(floor(10.0));
        let mut avatar = avatar_at(Vec3::new(1.0, 0.2, -2.0));
        CollisionResolver::new().resolve(&mut avatar, Vec3::ZERO, collider.as_ref());
        assert!(avatar.on_floor);
    }

    #[test]
    fn test_discrete_sweep_tunnels_through_thin_floor() {
        // A single large step carries the capsule clean through the plane;
        // the resolver only sees the end position.
        let collider = floor(10.0);
        let mut avatar = avatar_at(Vec3::new(1.0, 1.0, -2.0));

        let result =
            CollisionResolver::new().resolve(&mut avatar, Vec3::new(0.0, -5.0, 0.0), &collider);
        assert!(result.is_none());
        assert!(!avatar.on_floor);
        assert!(avatar.collider.end.y < 0.0);
    }
}
