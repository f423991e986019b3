mod builder;
mod linearize;
mod node;
mod primitive;
mod printer;
mod sah;
mod serialize;
mod tree;

use shadow_bvh_gpu::{BvhRecord, BvhView, INVALID};

pub use self::builder::*;
pub use self::linearize::BvhLinearNode;
pub use self::node::*;
pub use self::primitive::{BvhPrimitive, BvhPrimitiveId};
pub use self::tree::*;
use crate::{BoundingBox, MeshView};

/// Finished hierarchy: nodes in traversal order, plus their packed form ready
/// to be uploaded into a storage buffer.
#[derive(Clone, Debug, Default)]
pub struct Bvh {
    nodes: Vec<BvhLinearNode>,
    records: Vec<BvhRecord>,
    triangle_ids: Vec<u32>,
}

impl Bvh {
    /// Builds BVH with the default settings; see [`BvhBuilder`].
    pub fn build(mesh: &MeshView) -> Self {
        BvhBuilder::default().build(mesh)
    }

    pub fn nodes(&self) -> &[BvhLinearNode] {
        &self.nodes
    }

    pub fn records(&self) -> &[BvhRecord] {
        &self.records
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn view(&self) -> BvhView<'_> {
        BvhView::new(&self.records)
    }

    /// Returns bounds of the entire mesh, skipping degenerate triangles.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.nodes.first().map(BvhLinearNode::bounds)
    }

    /// Returns the node that follows given node's subtree; `None` if the
    /// subtree runs until the end of the tree or if there's no such node.
    pub fn next(&self, node_id: u32) -> Option<u32> {
        let next = self.nodes.get(node_id as usize)?.next;

        (next != INVALID).then_some(next)
    }

    /// Maps primitive id (as stored in leaves) back to the index of the mesh's
    /// triangle it came from.
    pub fn triangle_id(&self, primitive_id: u32) -> Option<u32> {
        self.triangle_ids.get(primitive_id as usize).copied()
    }

    pub fn primitive_count(&self) -> usize {
        self.triangle_ids.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
