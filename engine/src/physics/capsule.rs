//! Capsule collider
//!
//! A swept sphere defined by a segment (start, end) and a radius.
//! The avatar's body is a vertical capsule whose `end` sits at eye height.

use glam::Vec3;

use super::collision::Aabb;

/// Default capsule radius in meters
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.35;

/// Swept-sphere shape used for avatar collision.
///
/// `start` is the bottom sphere center, `end` the top sphere center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Bottom sphere center in world space
    pub start: Vec3,
    /// Top sphere center in world space
    pub end: Vec3,
    /// Radius of both spheres and the cylinder between them
    pub radius: f32,
}

impl Capsule {
    /// Create a capsule from its segment endpoints and radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Create a vertical capsule standing on `base` with a segment of `height`.
    ///
    /// Both endpoints share the XZ coordinates of `base`; `end.y = base.y + height`.
    pub fn upright(base: Vec3, height: f32, radius: f32) -> Self {
        Self {
            start: base,
            end: base + Vec3::new(0.0, height, 0.0),
            radius,
        }
    }

    /// Move both endpoints by `offset`.
    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Length of the inner segment (not counting the caps).
    #[inline]
    pub fn segment_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Vertical extent of the segment, `end.y - start.y`.
    #[inline]
    pub fn vertical_extent(&self) -> f32 {
        self.end.y - self.start.y
    }

    /// Axis-aligned bounds including the spherical caps.
    pub fn aabb(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(self.start.min(self.end) - r, self.start.max(self.end) + r)
    }

    /// Conservative overlap test against a box.
    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.aabb().intersects(aabb)
    }
}

impl Default for Capsule {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            radius: DEFAULT_CAPSULE_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upright_capsule() {
        let capsule = Capsule::upright(Vec3::new(1.0, 2.0, 3.0), 1.7, 0.35);
        assert_eq!(capsule.start, Vec3::new(1.0, 2.0, 3.0));
        assert!((capsule.end.y - 3.7).abs() < 1e-6);
        assert!((capsule.vertical_extent() - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_translate_preserves_extent() {
        let mut capsule = Capsule::upright(Vec3::ZERO, 1.7, 0.35);
        capsule.translate(Vec3::new(5.0, -3.0, 2.0));
        assert_eq!(capsule.start, Vec3::new(5.0, -3.0, 2.0));
        assert!((capsule.vertical_extent() - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_center() {
        let capsule = Capsule::upright(Vec3::ZERO, 2.0, 0.5);
        assert_eq!(capsule.center(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_aabb_includes_radius() {
        let capsule = Capsule::upright(Vec3::ZERO, 1.0, 0.5);
        let aabb = capsule.aabb();
        assert_eq!(aabb.min, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(aabb.max, Vec3::new(0.5, 1.5, 0.5));
    }
}
