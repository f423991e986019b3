//! Flattens the tree into depth-first order and ropes it together with `next`
//! pointers, which allows for stackless traversal later in the shader.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use shadow_bvh_gpu::INVALID;

use super::BvhTree;
use crate::BoundingBox;

/// Node in depth-first order, laid out the way it's uploaded.
///
/// `primitive_id` is [`INVALID`] for internal nodes; `next` points at the node
/// that follows this node's subtree, or is [`INVALID`] if there's none.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BvhLinearNode {
    pub bb_min: Vec3,
    pub primitive_id: u32,
    pub bb_max: Vec3,
    pub next: u32,
}

impl BvhLinearNode {
    pub fn is_leaf(&self) -> bool {
        self.primitive_id != INVALID
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.bb_min, self.bb_max)
    }
}

pub fn run(tree: &BvhTree) -> Vec<BvhLinearNode> {
    let Some(root_id) = tree.root_id() else {
        return Vec::new();
    };

    let mut visit_orders = vec![INVALID; tree.len()];
    let mut nexts = vec![None; tree.len()];
    let mut visit_order = 0;

    // Pre-order walk; the left child's subtree is followed by the right child,
    // while the right child's subtree is followed by whatever follows the
    // parent
    let mut stack = vec![(root_id, None)];

    while let Some((node_id, next_id)) = stack.pop() {
        visit_orders[node_id.get() as usize] = visit_order;
        nexts[node_id.get() as usize] = next_id;
        visit_order += 1;

        if let Some((left_id, right_id)) = tree[node_id].children() {
            stack.push((right_id, next_id));
            stack.push((left_id, Some(right_id)));
        }
    }

    debug_assert_eq!(tree.len(), visit_order as usize);

    // ---

    let mut nodes = vec![BvhLinearNode::zeroed(); tree.len()];

    for (node_id, node) in tree.iter() {
        let bounds = node.bounds();

        let next = nexts[node_id.get() as usize]
            .map_or(INVALID, |next_id| visit_orders[next_id.get() as usize]);

        nodes[visit_orders[node_id.get() as usize] as usize] = BvhLinearNode {
            bb_min: bounds.min(),
            primitive_id: node.primitive_id().map_or(INVALID, |id| id.get()),
            bb_max: bounds.max(),
            next,
        };
    }

    nodes
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;
    use crate::bvh::{primitive, sah};
    use crate::test_utils::TestMesh;

    fn linearize(mesh: &TestMesh) -> Vec<BvhLinearNode> {
        let primitives = primitive::extract(&mesh.view(), 1e-4);

        run(&sah::build(&primitives, 1_000_000))
    }

    /// Returns the size of each node's subtree, given the nodes are laid out in
    /// pre-order.
    fn subtree_sizes(nodes: &[BvhLinearNode]) -> Vec<u32> {
        fn visit(
            nodes: &[BvhLinearNode],
            ptr: usize,
            sizes: &mut [u32],
        ) -> u32 {
            let size = if nodes[ptr].is_leaf() {
                1
            } else {
                let left_size = visit(nodes, ptr + 1, sizes);
                let right_size =
                    visit(nodes, ptr + 1 + left_size as usize, sizes);

                1 + left_size + right_size
            };

            sizes[ptr] = size;
            size
        }

        let mut sizes = vec![0; nodes.len()];

        if !nodes.is_empty() {
            visit(nodes, 0, &mut sizes);
        }

        sizes
    }

    #[test]
    fn layout() {
        assert_eq!(32, mem::size_of::<BvhLinearNode>());
    }

    #[test]
    fn empty() {
        assert!(run(&BvhTree::default()).is_empty());
    }

    #[test]
    fn unit_square() {
        let nodes = linearize(&TestMesh::unit_square());

        assert_eq!(3, nodes.len());

        assert!(!nodes[0].is_leaf());
        assert_eq!(INVALID, nodes[0].next);

        assert_eq!(0, nodes[1].primitive_id);
        assert_eq!(2, nodes[1].next);

        assert_eq!(1, nodes[2].primitive_id);
        assert_eq!(INVALID, nodes[2].next);
    }

    #[test]
    fn next_points_past_subtree() {
        for seed in 0..8 {
            let nodes = linearize(&TestMesh::random(seed, 100));
            let sizes = subtree_sizes(&nodes);

            // Subtree sizes add up only if every internal node is followed by
            // its children
            assert_eq!(nodes.len() as u32, sizes[0]);

            for (ptr, node) in nodes.iter().enumerate() {
                let past_subtree = ptr as u32 + sizes[ptr];

                if past_subtree == nodes.len() as u32 {
                    assert_eq!(INVALID, node.next, "node {}", ptr);
                } else {
                    assert_eq!(past_subtree, node.next, "node {}", ptr);
                }
            }
        }
    }

    #[test]
    fn stackless_walk_visits_every_node_once() {
        for seed in 0..8 {
            let nodes = linearize(&TestMesh::random(seed, 100));
            let mut visited = vec![false; nodes.len()];
            let mut ptr = 0;

            // Descend into every internal node, jump on every leaf
            while ptr != INVALID {
                assert!(!visited[ptr as usize], "node {} visited twice", ptr);

                visited[ptr as usize] = true;

                ptr = if nodes[ptr as usize].is_leaf() {
                    nodes[ptr as usize].next
                } else {
                    ptr + 1
                };
            }

            assert!(visited.into_iter().all(|visited| visited));
        }
    }

    #[test]
    fn skipping_from_root_terminates() {
        let nodes = linearize(&TestMesh::random(0, 100));

        // Skipping a subtree lands either past the array or on a node that
        // hasn't been entered yet
        for (ptr, node) in nodes.iter().enumerate() {
            assert!(node.next == INVALID || node.next > ptr as u32);
        }

        assert_eq!(INVALID, nodes[0].next);
    }

    #[test]
    fn visit_order_is_a_permutation() {
        let mesh = TestMesh::random(3, 150);
        let primitives = primitive::extract(&mesh.view(), 1e-4);
        let tree = sah::build(&primitives, 1_000_000);
        let nodes = run(&tree);

        assert_eq!(tree.len(), nodes.len());

        // Every node of the tree shows up exactly once, keeping its bounds
        let mut leaves: Vec<_> = nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.primitive_id)
            .collect();

        leaves.sort_unstable();

        assert_eq!((0..primitives.len() as u32).collect::<Vec<_>>(), leaves);

        let root = tree[tree.root_id().unwrap()];

        assert_eq!(root.bounds(), nodes[0].bounds());

        for node in &nodes {
            if node.is_leaf() {
                let primitive = primitives[node.primitive_id as usize];

                assert_eq!(primitive.bounds, node.bounds());
            }
        }
    }
}
