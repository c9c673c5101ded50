//! Player Module
//!
//! Avatar movement and collision for first-person exploration.
//!
//! # Components
//!
//! - [`Avatar`] - Capsule collider, velocity and floor state
//! - [`MovementIntegrator`] - Intents + dt into velocity and displacement
//!   - Reduced air control, exponential damping, fixed-impulse jump
//! - [`CollisionResolver`] - Single-iteration push-out against a [`CapsuleQuery`]
//! - [`RespawnGuard`] - Out-of-bounds reset to the spawn pose
//! - [`PlayerSimulation`] - Runs the above in order each frame
//!
//! [`CapsuleQuery`]: crate::physics::CapsuleQuery

pub mod avatar;
pub mod collision_resolver;
pub mod movement_controller;
pub mod respawn;
pub mod simulation;

pub use avatar::{Avatar, MovementState};
pub use collision_resolver::CollisionResolver;
pub use movement_controller::MovementIntegrator;
pub use respawn::{RespawnGuard, SpawnPose};
pub use simulation::{PlayerSimulation, StepReport};
