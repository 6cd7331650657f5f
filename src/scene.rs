use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Mat4;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn new_node_id() -> usize {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a scene node, stable for the node's lifetime.
pub type NodeId = usize;

/// Semantic category of a node's attribute payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAttribute {
    SkeletonJoint,
    Marker,
    Mesh,
    NurbsCurve,
    NurbsSurface,
    Patch,
    SubdivisionSurface,
    Line,
    Camera,
    Light,
    Null,
    Unknown,
}

/// A skin binding from a deformable surface back to one influencing node.
///
/// `link_transform` is the linked node's world pose at bind time, as stored
/// by the authoring tool.
#[derive(Debug, Clone)]
pub struct BindingCluster {
    pub link: NodeId,
    pub link_transform: Mat4,
}

/// Skin deformation data attached to a mesh-like node.
#[derive(Debug, Clone, Default)]
pub struct SkinDeformer {
    pub clusters: Vec<BindingCluster>,
}

/// One (node, world matrix) entry of a pose snapshot.
#[derive(Debug, Clone)]
pub struct PoseEntry {
    pub node: NodeId,
    pub matrix: Mat4,
}

/// A scene-wide pose snapshot, tagged as a bind pose or not.
#[derive(Debug, Clone, Default)]
pub struct PoseSnapshot {
    pub bind_pose: bool,
    pub entries: Vec<PoseEntry>,
}

impl PoseSnapshot {
    pub fn find(&self, node: NodeId) -> Option<&Mat4> {
        self.entries
            .iter()
            .find(|entry| entry.node == node)
            .map(|entry| &entry.matrix)
    }
}

/// A node of the externally authored scene graph.
///
/// The graph is a tree (guaranteed by the provider); nodes are read-only
/// for the duration of an extraction call. `world_transform` is the node's
/// evaluated world pose, which may differ from its pose at bind time.
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    pub name: String,
    pub attribute: Option<NodeAttribute>,
    pub world_transform: Mat4,
    pub deformers: Vec<SkinDeformer>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            attribute: None,
            world_transform: Mat4::IDENTITY,
            deformers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// An in-memory scene: one root node plus the scene-wide pose snapshots.
#[derive(Debug, Clone)]
pub struct Scene {
    pub root: SceneNode,
    pub poses: Vec<PoseSnapshot>,
}

impl Scene {
    pub fn new(root: SceneNode) -> Self {
        Self {
            root,
            poses: Vec::new(),
        }
    }
}
