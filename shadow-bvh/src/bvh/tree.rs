use std::ops;

use super::{BvhNode, BvhNodeId};

/// Arena-allocated binary tree, as produced by the construction phase.
///
/// The first `n` slots hold leaves (one per primitive), followed by `n - 1`
/// internal nodes; the root, being allocated last, occupies the last slot.
#[derive(Clone, Debug, Default)]
pub struct BvhTree {
    nodes: Vec<BvhNode>,
    root_id: Option<BvhNodeId>,
}

impl BvhTree {
    pub fn new(nodes: Vec<BvhNode>, root_id: Option<BvhNodeId>) -> Self {
        Self { nodes, root_id }
    }

    pub fn root_id(&self) -> Option<BvhNodeId> {
        self.root_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BvhNodeId, &BvhNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (BvhNodeId::new(id as u32), node))
    }

    /// Panics if any of the structural invariants doesn't hold:
    ///
    /// - children are allocated before their parents,
    /// - children point back at their parent,
    /// - internal node's bounds are exactly the union of its children's,
    /// - every node except the root is referenced by exactly one parent,
    /// - there are `2n - 1` nodes for `n` leaves.
    pub fn validate(&self) {
        let Some(root_id) = self.root_id else {
            assert!(self.nodes.is_empty(), "Tree has nodes, but no root");
            return;
        };

        assert!(
            self[root_id].parent_id().is_none(),
            "Root {} has a parent",
            root_id
        );

        let mut references = vec![0; self.nodes.len()];
        let mut leaves = 0;

        for (id, node) in self.iter() {
            let Some((left_id, right_id)) = node.children() else {
                leaves += 1;
                continue;
            };

            for child_id in [left_id, right_id] {
                assert!(
                    child_id < id,
                    "Node {} refers to child {} allocated after it",
                    id,
                    child_id
                );

                assert_eq!(
                    Some(id),
                    self[child_id].parent_id(),
                    "Node {} doesn't point back at its parent",
                    child_id
                );

                references[child_id.get() as usize] += 1;
            }

            assert_eq!(
                self[left_id].bounds() + self[right_id].bounds(),
                node.bounds(),
                "Node {} isn't the union of its children",
                id
            );
        }

        for (id, count) in references.into_iter().enumerate() {
            let expected = if id as u32 == root_id.get() { 0 } else { 1 };

            assert_eq!(expected, count, "Node {} has {} parents", id, count);
        }

        assert_eq!(2 * leaves - 1, self.nodes.len());
    }
}

impl ops::Index<BvhNodeId> for BvhTree {
    type Output = BvhNode;

    fn index(&self, index: BvhNodeId) -> &Self::Output {
        &self.nodes[index.get() as usize]
    }
}
