//! Animated elements and their stagger ranks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use vexil_cloth::FlagDimensions;
use vexil_math::Pose;
use vexil_types::{ElementId, NodeHandle};

use crate::layout::{cloth_layout, rigid_layout};
use crate::scene_graph::SceneGraph;

/// One star of the morph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedElement {
    pub id: ElementId,
    /// Render transform this element drives.
    pub node: NodeHandle,
    /// Pose relative to the rigid pivot.
    pub rigid: Pose,
    /// Where the element rides on the cloth.
    pub uv: (f32, f32),
    /// Rank in the stagger permutation; lower ranks start earlier.
    pub stagger_index: usize,
}

/// A permutation of `0..count`, reproducible for a given `seed`.
pub fn stagger_order(count: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

/// Lays out one element per icosahedron vertex and spawns its render node
/// at the rigid pose.
pub fn spawn_elements<G: SceneGraph + ?Sized>(
    dims: &FlagDimensions,
    seed: u64,
    graph: &mut G,
) -> Vec<AnimatedElement> {
    let rigid = rigid_layout(dims);
    let uvs = cloth_layout(dims, rigid.len());
    let order = stagger_order(rigid.len(), seed);

    rigid
        .into_iter()
        .zip(uvs)
        .zip(order)
        .enumerate()
        .map(|(i, ((rigid, uv), stagger_index))| AnimatedElement {
            id: ElementId(i as u16),
            node: graph.spawn(rigid),
            rigid,
            uv,
            stagger_index,
        })
        .collect()
}
