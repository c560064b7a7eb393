//! Seam to the host's render transforms.

use vexil_math::Pose;
use vexil_types::NodeHandle;

/// Render-transform storage owned by the host.
///
/// The simulation never holds node references, only handles, and writes
/// each element's pose once per tick.
pub trait SceneGraph {
    /// Creates a node with an initial pose.
    fn spawn(&mut self, pose: Pose) -> NodeHandle;

    /// Overwrites a node's pose. Unknown handles are ignored.
    fn set_transform(&mut self, node: NodeHandle, pose: Pose);

    /// Current pose of a node, if it exists.
    fn transform(&self, node: NodeHandle) -> Option<Pose>;
}

/// In-memory [`SceneGraph`] for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Pose>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node's pose in spawn order.
    pub fn poses(&self) -> &[Pose] {
        &self.nodes
    }
}

impl SceneGraph for NodeStore {
    fn spawn(&mut self, pose: Pose) -> NodeHandle {
        self.nodes.push(pose);
        NodeHandle((self.nodes.len() - 1) as u32)
    }

    fn set_transform(&mut self, node: NodeHandle, pose: Pose) {
        if let Some(slot) = self.nodes.get_mut(node.index()) {
            *slot = pose;
        }
    }

    fn transform(&self, node: NodeHandle) -> Option<Pose> {
        self.nodes.get(node.index()).copied()
    }
}
