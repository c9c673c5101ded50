//! Collision detection module
//!
//! Narrow-phase primitives for the capsule collider: axis-aligned boxes,
//! world triangles, and the triangle-vs-capsule penetration test used by
//! the octree.
//!
//! # Penetration Test
//!
//! A triangle is tested against a capsule in two stages:
//!
//! 1. Face: the signed distance of both capsule endpoints to the triangle's
//!    plane (minus the radius) locates where the segment crosses the
//!    surface. If that point lies inside the triangle the contact normal is
//!    the face normal.
//! 2. Edges: otherwise the closest points between the capsule segment and
//!    each triangle edge are compared against the radius.
//!
//! # Example
//!
//! ```ignore
//! use whiterun_engine::physics::collision::{triangle_capsule_intersect, Triangle};
//! use whiterun_engine::physics::Capsule;
//! use glam::Vec3;
//!
//! let floor = Triangle::new(
//!     Vec3::new(-10.0, 0.0, 10.0),
//!     Vec3::new(10.0, 0.0, 10.0),
//!     Vec3::new(0.0, 0.0, -10.0),
//! );
//! let capsule = Capsule::upright(Vec3::new(0.0, 0.25, 0.0), 1.7, 0.35);
//!
//! if let Some(hit) = triangle_capsule_intersect(&capsule, &floor) {
//!     println!("push out by {} along {:?}", hit.depth, hit.normal);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::capsule::Capsule;

/// Tolerance for degenerate lengths and areas
const EPSILON: f32 = 1e-10;

/// Penetration of a capsule into world geometry.
///
/// Produced per query and never kept beyond the frame that asked for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Unit direction that moves the capsule out of the geometry
    pub normal: Vec3,
    /// Overlap distance along `normal` (always >= 0)
    pub depth: f32,
}

impl CollisionResult {
    /// Creates a new CollisionResult.
    pub fn new(normal: Vec3, depth: f32) -> Self {
        Self { normal, depth }
    }

    /// Translation that removes the overlap (`normal * depth`).
    #[inline]
    pub fn correction(&self) -> Vec3 {
        self.normal * self.depth
    }

    /// True when the contact supports the capsule from below.
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.normal.y > 0.0
    }
}

/// Spatial index query used by the movement core.
///
/// Implementors return the combined penetration of `capsule` into the
/// indexed geometry, or `None` when it is free.
pub trait CapsuleQuery {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult>;
}

// =============================================================================
// Aabb
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any `expand_to_include` call will replace.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Returns true if no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Grow the box so it contains `point`.
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow the box by `margin` on every side.
    pub fn padded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test (touching boxes count as overlapping).
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    /// Exact triangle/box overlap using the separating axis theorem.
    ///
    /// Tests the three box normals, the triangle normal and the nine
    /// edge-cross-axis combinations.
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        if self.is_empty() {
            return false;
        }

        let center = self.center();
        let extents = self.half_extents();

        let v0 = triangle.a - center;
        let v1 = triangle.b - center;
        let v2 = triangle.c - center;

        // Box face normals
        let tri_min = v0.min(v1).min(v2);
        let tri_max = v0.max(v1).max(v2);
        if tri_min.x > extents.x
            || tri_max.x < -extents.x
            || tri_min.y > extents.y
            || tri_max.y < -extents.y
            || tri_min.z > extents.z
            || tri_max.z < -extents.z
        {
            return false;
        }

        let edges = [v1 - v0, v2 - v1, v0 - v2];
        for edge in edges {
            for box_axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                let axis = box_axis.cross(edge);
                if separated_on_axis(axis, v0, v1, v2, extents) {
                    return false;
                }
            }
        }

        // Triangle plane
        let normal = edges[0].cross(edges[1]);
        let r = extents.dot(normal.abs());
        let s = normal.dot(v0);
        s.abs() <= r
    }
}

/// Project the triangle and the box onto `axis` and check for a gap.
fn separated_on_axis(axis: Vec3, v0: Vec3, v1: Vec3, v2: Vec3, extents: Vec3) -> bool {
    let p0 = v0.dot(axis);
    let p1 = v1.dot(axis);
    let p2 = v2.dot(axis);
    let r = extents.dot(axis.abs());
    let max = p0.max(p1).max(p2);
    let min = p0.min(p1).min(p2);
    (-max).max(min) > r
}

// =============================================================================
// Triangle - static world geometry
// =============================================================================

/// A world-space triangle of the collision geometry.
///
/// Winding is counter-clockwise when seen from the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized face normal; its length is twice the area.
    #[inline]
    fn scaled_normal(&self) -> Vec3 {
        (self.c - self.b).cross(self.a - self.b)
    }

    /// Unit face normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.scaled_normal().normalize_or_zero()
    }

    /// Returns true if the triangle has no plane, i.e. its normal cannot be
    /// normalized. Small but real slivers are kept.
    pub fn is_degenerate(&self) -> bool {
        self.normal() == Vec3::ZERO
    }

    /// Signed distance from `point` to the triangle's plane.
    #[inline]
    pub fn plane_distance(&self, point: Vec3) -> f32 {
        self.normal().dot(point - self.a)
    }

    /// Barycentric containment test for a point on (or near) the plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = point - self.a;

        let dot00 = v0.dot(v0);
        let dot01 = v0.dot(v1);
        let dot02 = v0.dot(v2);
        let dot11 = v1.dot(v1);
        let dot12 = v1.dot(v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < EPSILON {
            return false;
        }

        let inv = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv;
        let v = (dot00 * dot12 - dot01 * dot02) * inv;

        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// Bounding box of the three vertices.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.a.min(self.b).min(self.c), self.a.max(self.b).max(self.c))
    }

    /// The three edges as (from, to) pairs.
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

/// Closest points between segments `p1-q1` and `p2-q2`.
///
/// Returns `(point_on_first, point_on_second)`. Degenerate segments are
/// treated as points.
pub fn closest_points_on_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    if a <= EPSILON && e <= EPSILON {
        return (p1, p2);
    }

    let (s, t) = if a <= EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s = if denom.abs() > EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                // Parallel segments: any s works, pick the start
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Penetration of `capsule` into a single triangle.
///
/// Returns `None` when the capsule is clear of the triangle, or entirely
/// more than one radius behind its plane.
pub fn triangle_capsule_intersect(capsule: &Capsule, triangle: &Triangle) -> Option<CollisionResult> {
    let normal = triangle.normal();
    if normal == Vec3::ZERO {
        return None;
    }

    let radius = capsule.radius;
    let d1 = normal.dot(capsule.start - triangle.a) - radius;
    let d2 = normal.dot(capsule.end - triangle.a) - radius;

    if (d1 > 0.0 && d2 > 0.0) || (d1 < -radius && d2 < -radius) {
        return None;
    }

    let span = d1.abs() + d2.abs();
    let delta = if span > EPSILON { (d1 / span).abs() } else { 0.0 };
    let crossing = capsule.start.lerp(capsule.end, delta);

    if triangle.contains_point(crossing) {
        return Some(CollisionResult::new(normal, d1.min(d2).abs()));
    }

    let radius_sq = radius * radius;
    for (edge_start, edge_end) in triangle.edges() {
        let (on_capsule, on_edge) =
            closest_points_on_segments(capsule.start, capsule.end, edge_start, edge_end);

        let dist_sq = on_capsule.distance_squared(on_edge);
        if dist_sq < radius_sq {
            let push = (on_capsule - on_edge).normalize_or_zero();
            // Segment passes through the edge itself: fall back to the face
            let push = if push == Vec3::ZERO { normal } else { push };
            return Some(CollisionResult::new(push, radius - dist_sq.sqrt()));
        }
    }

    None
}
