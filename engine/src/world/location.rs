//! Location collider lifecycle
//!
//! Each explorable location has one static collider built from the scene
//! node named `"collider"`. The octree is built the first time the location
//! is entered and reused afterwards. Entering a location publishes a
//! [`WorldEvent::ColliderReady`] to the registered listener.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::physics::Octree;

use super::scene::{SceneError, SceneNode};

/// Name of the scene node holding collision geometry.
pub const COLLIDER_NODE: &str = "collider";

/// Notifications sent to the owning context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    /// The collider for `location` is built and active.
    ColliderReady {
        location: String,
        triangle_count: usize,
    },
}

/// Per-location collider cache.
#[derive(Debug, Default)]
pub struct LocationColliders {
    cache: HashMap<String, Arc<Octree>>,
    active: Option<String>,
    tx_evt: Option<Sender<WorldEvent>>,
}

impl LocationColliders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, replacing any previous one.
    pub fn subscribe(&mut self) -> Receiver<WorldEvent> {
        let (tx_evt, rx_evt) = mpsc::channel::<WorldEvent>();
        self.tx_evt = Some(tx_evt);
        rx_evt
    }

    /// Make `location` active, building its collider from `scene` on the
    /// first visit.
    ///
    /// A scene without a collider node yields an empty collider; the avatar
    /// then free-falls until the respawn guard catches it.
    pub fn enter(&mut self, location: &str, scene: &SceneNode) -> Result<Arc<Octree>, SceneError> {
        let octree = match self.cache.get(location) {
            Some(octree) => {
                log::debug!("reusing collider for location '{location}'");
                Arc::clone(octree)
            }
            None => {
                let octree = Arc::new(build_collider(location, scene)?);
                self.cache.insert(location.to_string(), Arc::clone(&octree));
                octree
            }
        };

        self.active = Some(location.to_string());
        self.notify(WorldEvent::ColliderReady {
            location: location.to_string(),
            triangle_count: octree.triangle_count(),
        });
        Ok(octree)
    }

    /// Collider of the active location.
    pub fn active(&self) -> Option<Arc<Octree>> {
        self.active
            .as_ref()
            .and_then(|name| self.cache.get(name))
            .map(Arc::clone)
    }

    pub fn active_location(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_cached(&self, location: &str) -> bool {
        self.cache.contains_key(location)
    }

    fn notify(&mut self, event: WorldEvent) {
        let Some(tx) = &self.tx_evt else {
            return;
        };
        if tx.send(event).is_err() {
            log::debug!("world event listener dropped");
            self.tx_evt = None;
        }
    }
}

fn build_collider(location: &str, scene: &SceneNode) -> Result<Octree, SceneError> {
    let Some(triangles) = scene.world_triangles_of(COLLIDER_NODE) else {
        log::warn!("location '{location}' has no '{COLLIDER_NODE}' node, using empty collider");
        return Ok(Octree::empty());
    };
    let triangles = triangles?;
    let octree = Octree::build(triangles);
    log::info!(
        "collider for '{location}' ready: {} triangles, {} nodes",
        octree.triangle_count(),
        octree.node_count()
    );
    Ok(octree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::scene::MeshData;
    use glam::{Mat4, Vec3};

    fn town() -> SceneNode {
        let mesh = MeshData {
            positions: vec![
                Vec3::new(-5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, 5.0),
                Vec3::new(-5.0, 0.0, 5.0),
            ],
            indices: Some(vec![0, 3, 2, 0, 2, 1]),
        };
        SceneNode::new("land")
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)))
            .with_child(SceneNode::new("ground"))
            .with_child(SceneNode::new(COLLIDER_NODE).with_mesh(mesh))
    }

    #[test]
    fn test_enter_builds_and_notifies() {
        let mut colliders = LocationColliders::new();
        let rx = colliders.subscribe();

        let octree = colliders.enter("whiterun", &town()).unwrap();
        assert_eq!(octree.triangle_count(), 2);
        assert_eq!(
            rx.try_recv().unwrap(),
            WorldEvent::ColliderReady {
                location: "whiterun".to_string(),
                triangle_count: 2,
            }
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(colliders.active_location(), Some("whiterun"));
    }

    #[test]
    fn test_parent_transform_applied() {
        let mut colliders = LocationColliders::new();
        let octree = colliders.enter("whiterun", &town()).unwrap();
        let bounds = octree.bounds().unwrap();
        assert!((bounds.center().y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_reenter_reuses_cache() {
        let mut colliders = LocationColliders::new();
        let rx = colliders.subscribe();

        let first = colliders.enter("whiterun", &town()).unwrap();
        let second = colliders.enter("whiterun", &SceneNode::new("ignored")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // One event per enter
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn test_missing_collider_is_empty() {
        let mut colliders = LocationColliders::new();
        let rx = colliders.subscribe();

        let octree = colliders.enter("void", &SceneNode::new("nothing")).unwrap();
        assert!(octree.is_empty());
        assert_eq!(
            rx.try_recv().unwrap(),
            WorldEvent::ColliderReady {
                location: "void".to_string(),
                triangle_count: 0,
            }
        );
    }

    #[test]
    fn test_switch_locations() {
        let mut colliders = LocationColliders::new();
        colliders.enter("whiterun", &town()).unwrap();
        colliders.enter("void", &SceneNode::new("nothing")).unwrap();

        assert!(colliders.is_cached("whiterun"));
        assert!(colliders.active().unwrap().is_empty());
    }

    #[test]
    fn test_dropped_listener_is_harmless() {
        let mut colliders = LocationColliders::new();
        drop(colliders.subscribe());
        assert!(colliders.enter("whiterun", &town()).is_ok());
    }
}
