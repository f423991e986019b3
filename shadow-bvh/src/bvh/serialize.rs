use shadow_bvh_gpu::{BvhRecord, INVALID};

use super::{BvhLinearNode, BvhPrimitive};
use crate::MeshView;

/// Packs nodes into the buffer layout described by [`BvhRecord`].
///
/// `primitives` must be indexed by primitive id.
pub fn run(
    nodes: &[BvhLinearNode],
    primitives: &[BvhPrimitive],
    mesh: &MeshView,
) -> Vec<BvhRecord> {
    let node_count = nodes.len() as u32;
    let mut out = Vec::with_capacity(2 * nodes.len() + primitives.len());

    debug_assert!(
        (2 * nodes.len() as u64 + primitives.len() as u64) < INVALID as u64
    );

    for node in nodes {
        if node.is_leaf() {
            let primitive = primitives[node.primitive_id as usize];
            let [v0, v1, v2] = mesh.triangle(primitive.triangle_id);

            // Offsetting the id past all the node records makes it point at
            // the primitive's `v0` and tells it apart from `INVALID`
            let tagged_id = node.primitive_id + 2 * node_count;

            out.push(BvhRecord::new(v1 - v0, tagged_id));
            out.push(BvhRecord::new(v2 - v0, node.next));
        } else {
            out.push(BvhRecord::new(node.bb_min, INVALID));
            out.push(BvhRecord::new(node.bb_max, node.next));
        }
    }

    for primitive in primitives {
        let [v0, _, _] = mesh.triangle(primitive.triangle_id);

        out.push(BvhRecord::new(v0, 0));
    }

    out
}
