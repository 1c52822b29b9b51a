use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

use glam::Vec3;

use crate::geometry::SphereGeometry;
use crate::material::PhysicalMaterial;

/// Half extent of the cube the bubbles are scattered through
pub const REGION_HALF_EXTENT: i32 = 25;

/// Handle for a node in the scene graph
///
/// Ids are never reused, so a stale handle from a removed node can only
/// miss, not alias a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// One bubble instance: the shared sphere mesh translated by `offset`
#[derive(Debug, Clone, Copy)]
pub struct SceneNode {
    pub id: NodeId,
    pub offset: Vec3,
}

/// Flat scene graph over the bubble nodes
///
/// `revision` increments on every mutation; the renderer compares it against
/// the revision of its instance buffer to decide when to re-upload.
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    next_id: u64,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 0,
            revision: 0,
        }
    }

    pub fn add(&mut self, offset: Vec3) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(SceneNode { id, offset });
        self.revision += 1;
        id
    }

    /// Removes a node by id, keeping the survivors in insertion order;
    /// false when the id is not present
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(index) = self.nodes.iter().position(|node| node.id == id) else {
            return false;
        };
        self.nodes.remove(index);
        self.revision += 1;
        true
    }

    pub fn clear(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.nodes.clear();
        self.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Mesh and material shared by every bubble node
pub struct BubblePrototype {
    pub geometry: SphereGeometry,
    pub material: PhysicalMaterial,
    pub radius: f32,
}

impl BubblePrototype {
    pub fn new() -> Self {
        let radius = 0.5;
        Self {
            geometry: SphereGeometry::new(radius, 50, 50),
            material: PhysicalMaterial::bubble(),
            radius,
        }
    }
}

impl Default for BubblePrototype {
    fn default() -> Self {
        Self::new()
    }
}

/// Soft white fill light over the whole scene
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }
}

/// Integer offset in [-25, 25] per axis, derived from the hash of
/// (generation, index)
///
/// The generation makes each respawn wave land on a fresh layout while the
/// wave itself stays deterministic for a given hasher state.
pub fn scatter_offset(state: &RandomState, generation: u64, index: u32) -> Vec3 {
    let mut hasher = state.build_hasher();
    (generation, index).hash(&mut hasher);
    let hash = hasher.finish();

    let span = (REGION_HALF_EXTENT * 2 + 1) as u64;
    let x = (hash % span) as i32 - REGION_HALF_EXTENT;
    let y = ((hash >> 8) % span) as i32 - REGION_HALF_EXTENT;
    let z = ((hash >> 16) % span) as i32 - REGION_HALF_EXTENT;
    Vec3::new(x as f32, y as f32, z as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Vec3::ZERO);
        let b = graph.add(Vec3::ONE);
        assert_ne!(a, b, "Consecutive adds must produce distinct ids");
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_remove_existing_node() {
        let mut graph = SceneGraph::new();
        let id = graph.add(Vec3::new(1.0, 2.0, 3.0));
        assert!(graph.remove(id));
        assert_eq!(graph.len(), 0);
        assert!(!graph.remove(id), "Second removal of the same id must miss");
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Vec3::ZERO);
        graph.remove(a);
        let b = graph.add(Vec3::ZERO);
        assert_ne!(a, b, "Removed ids must never be reissued");
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut graph = SceneGraph::new();
        let before = graph.revision();
        let id = graph.add(Vec3::ZERO);
        assert!(graph.revision() > before, "Add should bump the revision");

        let after_add = graph.revision();
        graph.remove(id);
        assert!(graph.revision() > after_add, "Remove should bump the revision");

        let after_remove = graph.revision();
        assert!(!graph.remove(id));
        assert_eq!(graph.revision(), after_remove,
            "A missed removal must not bump the revision");
    }

    #[test]
    fn test_clear_on_empty_graph_keeps_revision() {
        let mut graph = SceneGraph::new();
        let before = graph.revision();
        graph.clear();
        assert_eq!(graph.revision(), before);
    }

    #[test]
    fn test_clear_removes_all_nodes() {
        let mut graph = SceneGraph::new();
        for i in 0..10 {
            graph.add(Vec3::splat(i as f32));
        }
        graph.clear();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_iter_visits_every_node() {
        let mut graph = SceneGraph::new();
        for i in 0..5 {
            graph.add(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert_eq!(graph.iter().count(), 5);
    }

    #[test]
    fn test_scatter_offsets_stay_in_region() {
        let state = RandomState::new();
        for generation in 0..3_u64 {
            for index in 0..2000_u32 {
                let offset = scatter_offset(&state, generation, index);
                for axis in [offset.x, offset.y, offset.z] {
                    assert!(axis >= -25.0 && axis <= 25.0,
                        "Offset axis {} outside the region for ({}, {})",
                        axis, generation, index);
                    assert_eq!(axis, axis.trunc(),
                        "Offsets must land on integer coordinates, got {}", axis);
                }
            }
        }
    }

    #[test]
    fn test_scatter_deterministic_per_state() {
        let state = RandomState::new();
        let a = scatter_offset(&state, 1, 42);
        let b = scatter_offset(&state, 1, 42);
        assert_eq!(a, b, "Same state, generation, and index must agree");
    }

    #[test]
    fn test_scatter_generations_differ() {
        let state = RandomState::new();
        let differing = (0..100_u32)
            .filter(|&i| scatter_offset(&state, 0, i) != scatter_offset(&state, 1, i))
            .count();
        assert!(differing > 50,
            "Respawn waves should land on mostly fresh layouts, only {} of 100 moved",
            differing);
    }

    #[test]
    fn test_bubble_prototype_mesh_resolution() {
        let prototype = BubblePrototype::new();
        assert_eq!(prototype.radius, 0.5);
        assert_eq!(prototype.geometry.vertices.len(), 51 * 51);
        assert_eq!(prototype.material.transmission, 1.0);
    }
}
