//! Physics module
//!
//! Collision geometry and queries for the first-person avatar.
//! Built from scratch on glam without an external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Mat4, Quat) re-exported from glam
//! - [`capsule`] - Swept-sphere avatar collider
//! - [`collision`] - Boxes, triangles and the triangle-vs-capsule test
//! - [`octree`] - Static spatial index answering capsule penetration queries
//!
//! Collision is discrete: the capsule is tested where it ends up after a
//! frame's displacement, not along the way. Very large steps can pass
//! through thin geometry.

pub mod capsule;
pub mod collision;
pub mod octree;
pub mod types;

// Re-export commonly used types at the physics module level
pub use capsule::{Capsule, DEFAULT_CAPSULE_RADIUS};
pub use collision::{Aabb, CapsuleQuery, CollisionResult, Triangle, triangle_capsule_intersect};
pub use octree::Octree;
pub use types::{Mat4, Quat, Vec3};
