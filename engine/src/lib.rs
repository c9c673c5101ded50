//! Whiterun Engine Library
//!
//! Player movement and collision core for a first-person exploration
//! experience. A capsule-shaped avatar is driven by held input intents,
//! integrated with gravity and exponential damping, and pushed out of a
//! static triangle world indexed by an octree.
//!
//! # Modules
//!
//! - [`input`] - Intent tracking with pointer lock, plus a winit bridge
//! - [`camera`] - Look orientation and the published view pose
//! - [`physics`] - Capsule, triangle tests and the octree collider
//! - [`player`] - Avatar state, integration, collision resolution, respawn
//! - [`world`] - Scene graph input, location colliders, frame clock
//! - [`config`] - Tuning values loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use whiterun_engine::config::ExplorerConfig;
//! use whiterun_engine::input::{InputState, KeyCode, PointerButton};
//! use whiterun_engine::player::PlayerSimulation;
//! use whiterun_engine::world::{FrameClock, LocationColliders, SceneNode};
//!
//! let config = ExplorerConfig::default();
//! let scene = SceneNode::load_json(Path::new("whiterun.json"))?;
//!
//! let mut colliders = LocationColliders::new();
//! let collider = colliders.enter("whiterun", &scene)?;
//!
//! let mut input = InputState::new();
//! let mut sim = PlayerSimulation::new(&config);
//! let mut clock = FrameClock::new(&config.clock);
//!
//! input.handle_pointer_down(PointerButton::Primary);
//! input.handle_key(KeyCode::W, true);
//!
//! // Each frame:
//! let dt = clock.tick();
//! let report = sim.step(dt, &input.snapshot(), collider.as_ref());
//! camera.set_pose(report.pose.position, report.pose.rotation());
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Re-export the types a host loop touches every frame
pub use camera::{OrientationController, ViewPose};
pub use config::{ConfigError, ExplorerConfig};
pub use input::{InputIntents, InputState, KeyCode, PointerButton};
pub use physics::{Capsule, CapsuleQuery, CollisionResult, Octree, Triangle};
pub use player::{PlayerSimulation, StepReport};
pub use world::{FrameClock, LocationColliders, SceneNode, WorldEvent};
