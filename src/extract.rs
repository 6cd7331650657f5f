use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};

use glam::Mat4;
use log::{error, trace};

use crate::{
    scene::{NodeAttribute, NodeId, PoseSnapshot, Scene, SceneNode},
    skeleton::{Joint, JointIndex, Skeleton},
    transform::TransformConverter,
};

/// Which attribute categories are promoted to joints.
///
/// `any` overrides the per-category flags and accepts every node that
/// carries some attribute. The default selects skeletal joints only.
#[derive(Debug, Clone, Copy)]
pub struct NodeSelection {
    pub skeleton: bool,
    pub marker: bool,
    pub geometry: bool,
    pub camera: bool,
    pub light: bool,
    pub any: bool,
}

impl Default for NodeSelection {
    fn default() -> Self {
        Self {
            skeleton: true,
            marker: false,
            geometry: false,
            camera: false,
            light: false,
            any: false,
        }
    }
}

impl NodeSelection {
    /// Selection accepting every attributed node.
    pub fn any() -> Self {
        Self {
            any: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// Traversal completed without producing a single joint.
    NothingFound,
    /// A resolved bind transform could not be decomposed into
    /// translation/rotation/scale. Names the offending joint.
    ConversionFailure { joint: String },
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NothingFound => write!(f, "No skeleton found in scene"),
            ExtractError::ConversionFailure { joint } => {
                write!(f, "Failed to extract skeleton transform for joint \"{}\"", joint)
            }
        }
    }
}

impl Error for ExtractError {}

fn is_selected(selection: NodeSelection, attribute: NodeAttribute) -> bool {
    // Early out to accept any attributed node
    if selection.any {
        return true;
    }

    match attribute {
        NodeAttribute::SkeletonJoint => selection.skeleton,
        NodeAttribute::Marker => selection.marker,
        NodeAttribute::Mesh
        | NodeAttribute::NurbsCurve
        | NodeAttribute::NurbsSurface
        | NodeAttribute::Patch
        | NodeAttribute::SubdivisionSurface
        | NodeAttribute::Line => selection.geometry,
        NodeAttribute::Camera => selection.camera,
        NodeAttribute::Light => selection.light,
        NodeAttribute::Null | NodeAttribute::Unknown => false,
    }
}

/// Gathers every binding cluster reachable from any node of the scene,
/// keyed by the cluster's link-target node.
///
/// The walk is not filtered by the node selection: a deformable surface
/// carrying skin bindings may itself be an excluded geometry node. When
/// several clusters link the same node, the first one in pre-order
/// collection order wins.
fn collect_clusters(root: &SceneNode) -> HashMap<NodeId, Mat4> {
    let mut clusters = HashMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for deformer in &node.deformers {
            for cluster in &deformer.clusters {
                clusters
                    .entry(cluster.link)
                    .or_insert(cluster.link_transform);
            }
        }
        stack.extend(node.children.iter().rev());
    }
    clusters
}

/// Resolves a node's authoritative world-space bind transform.
///
/// Authoring tools populate bind information inconsistently: some only
/// bake it into skin clusters, some only into a separate pose list, some
/// provide neither for non-deforming joints such as end-effectors. Hence
/// a three-tier fallback, first match wins:
/// 1. a binding cluster linking this node,
/// 2. an entry for this node in a bind-pose snapshot,
/// 3. the node's currently evaluated world transform.
fn resolve_bind_transform(
    node: &SceneNode,
    clusters: &HashMap<NodeId, Mat4>,
    poses: &[PoseSnapshot],
) -> Mat4 {
    if let Some(matrix) = clusters.get(&node.id()) {
        return *matrix;
    }
    for pose in poses {
        if !pose.bind_pose {
            continue;
        }
        if let Some(matrix) = pose.find(node.id()) {
            return *matrix;
        }
    }
    node.world_transform
}

struct Frame<'a> {
    node: &'a SceneNode,
    // Nearest accepted ancestor, if any, and the inverse of its resolved
    // world bind transform.
    parent: Option<JointIndex>,
    parent_world_inv: Mat4,
}

/// Extracts a skeleton from a scene graph.
///
/// Walks the scene depth-first in pre-order. Every node whose attribute
/// category matches `selection` becomes a joint, attached to the nearest
/// accepted ancestor (or to the forest roots when there is none), with a
/// transform relative to that ancestor's resolved world bind pose.
/// Attribute-less and excluded nodes are traversed through without
/// blocking their descendants.
///
/// Fails with [`ExtractError::NothingFound`] when no node matched, and
/// with [`ExtractError::ConversionFailure`] as soon as one relative
/// transform cannot be converted; no partial skeleton is ever returned.
pub fn extract<C: TransformConverter>(
    scene: &Scene,
    selection: NodeSelection,
    converter: &C,
) -> Result<Skeleton, ExtractError> {
    // Clusters can link nodes visited later in the walk, so they are
    // collected up front from the whole scene.
    let clusters = collect_clusters(&scene.root);

    let mut skeleton = Skeleton::default();
    let mut stack = vec![Frame {
        node: &scene.root,
        parent: None,
        parent_world_inv: Mat4::IDENTITY,
    }];

    while let Some(frame) = stack.pop() {
        let node = frame.node;

        let (parent, parent_world_inv) = match node.attribute {
            Some(attribute) if is_selected(selection, attribute) => {
                let node_world = resolve_bind_transform(node, &clusters, &scene.poses);
                let node_local = frame.parent_world_inv * node_world;

                let transform = match converter.convert_transform(&node_local) {
                    Some(transform) => transform,
                    None => {
                        error!(
                            "Failed to extract skeleton transform for joint \"{}\".",
                            node.name
                        );
                        return Err(ExtractError::ConversionFailure {
                            joint: node.name.clone(),
                        });
                    }
                };

                trace!("Extracted joint \"{}\"", node.name);
                let index = skeleton.push_joint(
                    Joint {
                        name: node.name.clone(),
                        transform,
                        children: Vec::new(),
                    },
                    frame.parent,
                );

                // This joint is the parent context for the children below.
                (Some(index), node_world.inverse())
            }
            _ => (frame.parent, frame.parent_world_inv),
        };

        // Children are walked even when this node was not accepted, so
        // descendants attach to the nearest accepted ancestor. Pushed in
        // reverse to keep sibling order.
        for child in node.children.iter().rev() {
            stack.push(Frame {
                node: child,
                parent,
                parent_world_inv,
            });
        }
    }

    if skeleton.is_empty() {
        error!("No skeleton found in scene.");
        return Err(ExtractError::NothingFound);
    }
    Ok(skeleton)
}
