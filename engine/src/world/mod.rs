//! World Module
//!
//! Scene graph input, per-location collider lifecycle and the frame clock.
//!
//! ## Colliders
//! Each location's scene carries a node named `"collider"`. Its triangles
//! (in world space) are indexed once into an [`Octree`](crate::physics::Octree)
//! and shared read-only with the movement core.

pub mod clock;
pub mod location;
pub mod scene;

pub use clock::{FrameClock, sanitize_dt};
pub use location::{COLLIDER_NODE, LocationColliders, WorldEvent};
pub use scene::{MeshData, SceneError, SceneNode};
