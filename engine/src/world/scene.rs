//! Scene graph description
//!
//! A minimal scene graph as handed over by the asset loader: named nodes
//! with a local transform, optional triangle mesh and children. The movement
//! core only needs it to pull collision triangles out of a sub-graph.

use std::path::Path;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::Triangle;

/// Errors that can occur while loading or reading a scene description.
#[derive(Debug)]
pub enum SceneError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
    /// Mesh data that cannot be turned into triangles.
    InvalidMesh { node: String, reason: String },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {e}"),
            SceneError::JsonError(e) => write!(f, "JSON error: {e}"),
            SceneError::InvalidMesh { node, reason } => {
                write!(f, "invalid mesh on node '{node}': {reason}")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::IoError(e) => Some(e),
            SceneError::JsonError(e) => Some(e),
            SceneError::InvalidMesh { .. } => None,
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::JsonError(e)
    }
}

/// Triangle mesh in node-local space.
///
/// Without `indices`, consecutive position triples form triangles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    #[serde(default)]
    pub indices: Option<Vec<u32>>,
}

impl MeshData {
    fn triangles(&self, node: &str, world: &Mat4, out: &mut Vec<Triangle>) -> Result<(), SceneError> {
        let invalid = |reason: String| SceneError::InvalidMesh {
            node: node.to_string(),
            reason,
        };
        let position = |i: u32| -> Result<Vec3, SceneError> {
            self.positions
                .get(i as usize)
                .map(|p| world.transform_point3(*p))
                .ok_or_else(|| {
                    invalid(format!(
                        "index {i} out of range ({} positions)",
                        self.positions.len()
                    ))
                })
        };

        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(invalid(format!(
                        "index count {} is not a multiple of 3",
                        indices.len()
                    )));
                }
                for tri in indices.chunks_exact(3) {
                    out.push(Triangle::new(
                        position(tri[0])?,
                        position(tri[1])?,
                        position(tri[2])?,
                    ));
                }
            }
            None => {
                if self.positions.len() % 3 != 0 {
                    return Err(invalid(format!(
                        "position count {} is not a multiple of 3",
                        self.positions.len()
                    )));
                }
                for tri in self.positions.chunks_exact(3) {
                    out.push(Triangle::new(
                        world.transform_point3(tri[0]),
                        world.transform_point3(tri[1]),
                        world.transform_point3(tri[2]),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A node in the loaded scene graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    /// Local transform relative to the parent
    #[serde(default)]
    pub transform: Mat4,
    #[serde(default)]
    pub mesh: Option<MeshData>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for a node by name (this node included).
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Depth-first search returning the node and its parent's world transform.
    pub fn find_with_parent_transform(&self, name: &str) -> Option<(&SceneNode, Mat4)> {
        self.find_from(name, Mat4::IDENTITY)
    }

    fn find_from(&self, name: &str, parent: Mat4) -> Option<(&SceneNode, Mat4)> {
        if self.name == name {
            return Some((self, parent));
        }
        let world = parent * self.transform;
        self.children
            .iter()
            .find_map(|child| child.find_from(name, world))
    }

    /// World-space triangles of the sub-graph rooted at `name`.
    pub fn world_triangles_of(&self, name: &str) -> Option<Result<Vec<Triangle>, SceneError>> {
        self.find_with_parent_transform(name)
            .map(|(node, parent)| node.collect_triangles_under(parent))
    }

    /// All triangles in this sub-graph, in this node's parent space.
    pub fn collect_triangles(&self) -> Result<Vec<Triangle>, SceneError> {
        self.collect_triangles_under(Mat4::IDENTITY)
    }

    /// All triangles in this sub-graph, with `parent` as the parent's world
    /// transform.
    pub fn collect_triangles_under(&self, parent: Mat4) -> Result<Vec<Triangle>, SceneError> {
        let mut out = Vec::new();
        self.collect_into(parent, &mut out)?;
        Ok(out)
    }

    fn collect_into(&self, parent: Mat4, out: &mut Vec<Triangle>) -> Result<(), SceneError> {
        let world = parent * self.transform;
        if let Some(mesh) = &self.mesh {
            mesh.triangles(&self.name, &world, out)?;
        }
        for child in &self.children {
            child.collect_into(world, out)?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a scene description from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        log::debug!("loaded scene '{}' from {}", scene.name, path.display());
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData {
            positions: vec![
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 1.0),
            ],
            indices: Some(vec![0, 3, 2, 0, 2, 1]),
        }
    }

    #[test]
    fn test_find_nested() {
        let scene = SceneNode::new("root")
            .with_child(SceneNode::new("town").with_child(SceneNode::new("collider")));
        assert_eq!(scene.find("collider").map(|n| n.name.as_str()), Some("collider"));
        assert!(scene.find("missing").is_none());
    }

    #[test]
    fn test_collect_indexed() {
        let node = SceneNode::new("collider").with_mesh(quad());
        let triangles = node.collect_triangles().unwrap();
        assert_eq!(triangles.len(), 2);
        assert!((triangles[0].normal() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_collect_unindexed() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::Z, Vec3::X],
            indices: None,
        };
        let triangles = SceneNode::new("n").with_mesh(mesh).collect_triangles().unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_transforms_compose() {
        let scene = SceneNode::new("root")
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)))
            .with_child(
                SceneNode::new("collider")
                    .with_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)))
                    .with_mesh(quad()),
            );
        let triangles = scene.collect_triangles().unwrap();
        for t in &triangles {
            assert!((t.a.y - 5.0).abs() < 1e-6);
            assert!(t.a.x >= 9.0 && t.a.x <= 11.0);
        }

        let (node, parent) = scene.find_with_parent_transform("collider").unwrap();
        let world = parent * node.transform;
        assert!((world.transform_point3(Vec3::ZERO) - Vec3::new(10.0, 5.0, 0.0)).length() < 1e-6);

        let world_triangles = scene.world_triangles_of("collider").unwrap().unwrap();
        assert_eq!(world_triangles, triangles);
    }

    #[test]
    fn test_index_out_of_range() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X],
            indices: Some(vec![0, 1, 7]),
        };
        let err = SceneNode::new("broken").with_mesh(mesh).collect_triangles();
        assert!(matches!(err, Err(SceneError::InvalidMesh { .. })));
    }

    #[test]
    fn test_ragged_indices() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            indices: Some(vec![0, 1]),
        };
        let err = SceneNode::new("broken").with_mesh(mesh).collect_triangles();
        assert!(matches!(err, Err(SceneError::InvalidMesh { .. })));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "name": "root",
            "children": [
                { "name": "collider", "mesh": { "positions": [[0,0,0],[0,0,1],[1,0,0]] } }
            ]
        }"#;
        let scene = SceneNode::from_json_str(json).unwrap();
        assert_eq!(scene.transform, Mat4::IDENTITY);
        let collider = scene.find("collider").unwrap();
        assert_eq!(collider.collect_triangles().unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneNode::load_json(Path::new("/definitely/not/a/scene.json"));
        assert!(matches!(err, Err(SceneError::IoError(_))));
    }
}
