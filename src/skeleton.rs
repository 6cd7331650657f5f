use crate::transform::DecomposedTransform;

/// Index of a joint inside [`Skeleton`]'s arena.
pub type JointIndex = usize;

/// A joint of the output skeleton.
///
/// The transform is relative to the parent joint, or to the skeleton's
/// origin for roots. Child order is traversal order and is significant:
/// it determines joint indexing downstream.
#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub transform: DecomposedTransform,
    pub children: Vec<JointIndex>,
}

/// A skeleton as a forest of joints.
///
/// Joints live in a single arena and reference each other by index, so
/// growing the arena never invalidates an existing joint handle. The
/// structure is a pure forest: every non-root joint has exactly one parent
/// and there are no cycles.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    joints: Vec<Joint>,
    roots: Vec<JointIndex>,
}

impl Skeleton {
    pub(crate) fn push_joint(&mut self, joint: Joint, parent: Option<JointIndex>) -> JointIndex {
        let index = self.joints.len();
        self.joints.push(joint);
        match parent {
            Some(parent) => self.joints[parent].children.push(index),
            None => self.roots.push(index),
        }
        index
    }

    pub fn joint(&self, index: JointIndex) -> &Joint {
        &self.joints[index]
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn roots(&self) -> &[JointIndex] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}
