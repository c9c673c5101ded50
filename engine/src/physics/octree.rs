//! Octree spatial collider
//!
//! A static octree over world triangles, built once per loaded location
//! from its collider geometry and immutable afterwards. Answers "how far and
//! in which direction must this capsule move to stop penetrating the world".
//!
//! # Construction
//!
//! The root box is the triangle bounds padded by [`BOUNDS_PADDING`]. A node
//! holding more than [`TRIANGLES_PER_LEAF`] triangles is split into eight
//! equal children (up to [`MAX_DEPTH`] levels). A triangle is stored in every
//! child it overlaps, so a leaf never misses geometry crossing its walls.
//!
//! # Query
//!
//! ```ignore
//! let octree = Octree::build(triangles);
//! if let Some(hit) = octree.capsule_intersect(&capsule) {
//!     capsule.translate(hit.correction());
//! }
//! ```

use glam::Vec3;

use super::capsule::Capsule;
use super::collision::{Aabb, CapsuleQuery, CollisionResult, Triangle, triangle_capsule_intersect};

/// Maximum triangles a node keeps before it is split
pub const TRIANGLES_PER_LEAF: usize = 8;

/// Maximum subdivision depth
pub const MAX_DEPTH: u32 = 16;

/// Margin added around the triangle bounds of the root node (meters)
pub const BOUNDS_PADDING: f32 = 0.01;

/// Minimum combined push-out considered a collision (meters)
const MIN_COLLISION_DEPTH: f32 = 1e-7;

#[derive(Debug, Clone)]
struct OctreeNode {
    bounds: Aabb,
    /// Indices into `Octree::triangles`; empty for inner nodes
    triangles: Vec<u32>,
    children: Vec<OctreeNode>,
}

impl OctreeNode {
    fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            triangles: Vec::new(),
            children: Vec::new(),
        }
    }

    fn split(&mut self, all: &[Triangle], depth: u32) {
        let half = self.bounds.half_extents();
        let mut children = Vec::with_capacity(8);

        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    let offset = Vec3::new(x as f32, y as f32, z as f32) * half;
                    let min = self.bounds.min + offset;
                    children.push(OctreeNode::new(Aabb::new(min, min + half)));
                }
            }
        }

        for index in self.triangles.drain(..) {
            let triangle = &all[index as usize];
            for child in children.iter_mut() {
                if child.bounds.intersects_triangle(triangle) {
                    child.triangles.push(index);
                }
            }
        }

        for mut child in children {
            let count = child.triangles.len();
            if count > TRIANGLES_PER_LEAF && depth < MAX_DEPTH {
                child.split(all, depth + 1);
            }
            if count != 0 {
                self.children.push(child);
            }
        }
    }

    fn collect(&self, region: &Aabb, out: &mut Vec<u32>) {
        if !self.bounds.intersects(region) {
            return;
        }
        out.extend_from_slice(&self.triangles);
        for child in &self.children {
            child.collect(region, out);
        }
    }

    fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(OctreeNode::count_nodes).sum::<usize>()
    }

    fn depth(&self) -> u32 {
        1 + self.children.iter().map(OctreeNode::depth).max().unwrap_or(0)
    }
}

/// Static octree over collision triangles.
///
/// Immutable after [`Octree::build`]; safe to share between threads.
#[derive(Debug, Clone)]
pub struct Octree {
    triangles: Vec<Triangle>,
    root: Option<OctreeNode>,
}

impl Octree {
    /// An octree with no geometry. Every query reports no penetration.
    pub fn empty() -> Self {
        Self {
            triangles: Vec::new(),
            root: None,
        }
    }

    /// Build the octree from world-space triangles.
    ///
    /// Degenerate triangles are dropped; they have no plane to collide with.
    pub fn build(triangles: impl IntoIterator<Item = Triangle>) -> Self {
        let triangles: Vec<Triangle> = triangles
            .into_iter()
            .filter(|t| !t.is_degenerate())
            .collect();

        if triangles.is_empty() {
            log::debug!("octree built with no collision triangles");
            return Self::empty();
        }

        let mut bounds = Aabb::empty();
        for t in &triangles {
            bounds.expand_to_include(t.a);
            bounds.expand_to_include(t.b);
            bounds.expand_to_include(t.c);
        }

        let mut root = OctreeNode::new(bounds.padded(BOUNDS_PADDING));
        root.triangles = (0..triangles.len() as u32).collect();
        if triangles.len() > TRIANGLES_PER_LEAF {
            root.split(&triangles, 0);
        }

        let octree = Self {
            triangles,
            root: Some(root),
        };
        log::debug!(
            "octree built: {} triangles, {} nodes, depth {}",
            octree.triangle_count(),
            octree.node_count(),
            octree.depth()
        );
        octree
    }

    /// Number of (non-degenerate) triangles indexed.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the octree holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, OctreeNode::count_nodes)
    }

    /// Depth of the deepest leaf (root alone = 1).
    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, OctreeNode::depth)
    }

    /// Bounds of the root node, if any geometry was indexed.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| r.bounds)
    }

    /// Triangles stored in leaves overlapping `region`, deduplicated.
    pub fn triangles_near(&self, region: &Aabb) -> Vec<&Triangle> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let mut indices = Vec::new();
        root.collect(region, &mut indices);
        indices.sort_unstable();
        indices.dedup();
        indices
            .into_iter()
            .map(|i| &self.triangles[i as usize])
            .collect()
    }

    /// Combined penetration of `capsule` into the indexed triangles.
    ///
    /// Each candidate triangle is tested against a working copy of the
    /// capsule which is pushed out by every hit in turn; the result is the
    /// total displacement of the capsule center.
    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult> {
        let candidates = self.triangles_near(&capsule.aabb());
        if candidates.is_empty() {
            return None;
        }

        let mut working = *capsule;
        let mut hit = false;
        for triangle in candidates {
            if let Some(result) = triangle_capsule_intersect(&working, triangle) {
                hit = true;
                working.translate(result.correction());
            }
        }

        if !hit {
            return None;
        }

        let displacement = working.center() - capsule.center();
        let depth = displacement.length();
        if depth < MIN_COLLISION_DEPTH {
            return None;
        }
        Some(CollisionResult::new(displacement / depth, depth))
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::empty()
    }
}

impl CapsuleQuery for Octree {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<CollisionResult> {
        Octree::capsule_intersect(self, capsule)
    }
}

static_assertions::assert_impl_all!(Octree: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles forming a square floor at `y`, normal +Y.
    fn floor_quad(half: f32, y: f32) -> [Triangle; 2] {
        let a = Vec3::new(-half, y, -half);
        let b = Vec3::new(half, y, -half);
        let c = Vec3::new(half, y, half);
        let d = Vec3::new(-half, y, half);
        [Triangle::new(a, d, c), Triangle::new(a, c, b)]
    }

    /// A grid of floor tiles, 2 triangles per tile.
    fn tiled_floor(tiles: i32, size: f32) -> Vec<Triangle> {
        let mut out = Vec::new();
        for i in 0..tiles {
            for j in 0..tiles {
                let x0 = i as f32 * size;
                let z0 = j as f32 * size;
                let a = Vec3::new(x0, 0.0, z0);
                let b = Vec3::new(x0 + size, 0.0, z0);
                let c = Vec3::new(x0 + size, 0.0, z0 + size);
                let d = Vec3::new(x0, 0.0, z0 + size);
                out.push(Triangle::new(a, d, c));
                out.push(Triangle::new(a, c, b));
            }
        }
        out
    }

    #[test]
    fn test_floor_quad_normal_is_up() {
        for t in floor_quad(5.0, 0.0) {
            assert!((t.normal() - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_empty_octree_never_collides() {
        let octree = Octree::empty();
        assert!(octree.is_empty());
        for y in [-100.0, -1.0, 0.0, 0.5, 100.0] {
            let capsule = Capsule::upright(Vec3::new(0.0, y, 0.0), 1.7, 0.35);
            assert!(octree.capsule_intersect(&capsule).is_none());
        }
    }

    #[test]
    fn test_build_drops_degenerate_triangles() {
        let octree = Octree::build([Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 3.0)]);
        assert!(octree.is_empty());
        assert_eq!(octree.node_count(), 0);
    }

    #[test]
    fn test_floor_penetration() {
        let octree = Octree::build(floor_quad(10.0, 0.0));
        let capsule = Capsule::upright(Vec3::new(1.0, 0.2, 1.0), 1.7, 0.35);

        let hit = octree.capsule_intersect(&capsule).unwrap();
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
        assert!((hit.depth - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_capsule_resting_above_floor() {
        let octree = Octree::build(floor_quad(10.0, 0.0));
        let capsule = Capsule::upright(Vec3::new(0.0, 0.5, 0.0), 1.7, 0.35);
        assert!(octree.capsule_intersect(&capsule).is_none());
    }

    #[test]
    fn test_large_mesh_is_subdivided() {
        let triangles = tiled_floor(8, 1.0);
        let octree = Octree::build(triangles);
        assert_eq!(octree.triangle_count(), 128);
        assert!(octree.node_count() > 1);
        assert!(octree.depth() > 1);
        assert!(octree.depth() <= MAX_DEPTH + 1);
    }

    #[test]
    fn test_query_only_returns_nearby_triangles() {
        let octree = Octree::build(tiled_floor(8, 1.0));
        let region = Aabb::new(Vec3::new(0.1, -0.1, 0.1), Vec3::new(0.4, 0.1, 0.4));
        let near = octree.triangles_near(&region);
        assert!(!near.is_empty());
        assert!(near.len() < 128);
    }

    #[test]
    fn test_subdivided_floor_penetration() {
        let octree = Octree::build(tiled_floor(8, 1.0));
        let capsule = Capsule::upright(Vec3::new(3.3, 0.3, 4.7), 1.7, 0.35);
        let hit = octree.capsule_intersect(&capsule).unwrap();
        assert!(hit.normal.y > 0.99);
        assert!((hit.depth - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_wall_pushes_sideways() {
        // Wall in the plane x = 2 facing -X
        let wall = [
            Triangle::new(
                Vec3::new(2.0, -5.0, -5.0),
                Vec3::new(2.0, -5.0, 5.0),
                Vec3::new(2.0, 5.0, 5.0),
            ),
            Triangle::new(
                Vec3::new(2.0, -5.0, -5.0),
                Vec3::new(2.0, 5.0, 5.0),
                Vec3::new(2.0, 5.0, -5.0),
            ),
        ];
        assert!(wall[0].normal().x < -0.99);

        let octree = Octree::build(wall);
        let capsule = Capsule::upright(Vec3::new(1.8, 0.0, 0.0), 1.7, 0.35);
        let hit = octree.capsule_intersect(&capsule).unwrap();
        assert!(hit.normal.x < -0.99);
        assert!(!hit.is_floor());
        assert!((hit.depth - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_thin_floor_tunnels_at_high_speed() {
        // Discrete collision: a capsule translated past a floor in one step
        // is not caught. Accepted limitation.
        let octree = Octree::build(floor_quad(10.0, 0.0));
        let capsule = Capsule::upright(Vec3::new(0.0, -3.0, 0.0), 1.7, 0.35);
        assert!(octree.capsule_intersect(&capsule).is_none());
    }
}
