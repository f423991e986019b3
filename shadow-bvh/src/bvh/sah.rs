//! Top-down BVH builder driven by the surface area heuristic.
//!
//! Each range of primitives gets sorted along every axis and swept from both
//! ends to find the split with the lowest `area * count` cost; ranges larger
//! than the configured threshold fall back to a cheaper midpoint split along
//! the longest axis.

use std::mem;

use super::{BvhNode, BvhNodeId, BvhPrimitive, BvhTree};
use crate::{Axis, BoundingBox};

pub fn build(primitives: &[BvhPrimitive], sah_threshold: usize) -> BvhTree {
    if primitives.is_empty() {
        return BvhTree::default();
    }

    let count = primitives.len();
    let mut nodes = Vec::with_capacity(2 * count - 1);

    nodes.extend(primitives.iter().map(BvhNode::leaf));

    let mut builder = SahBuilder {
        nodes,
        left_areas: vec![0.0; count],
        right_areas: vec![0.0; count],
        sah_threshold,
    };

    let root_id = builder.build(0, count);

    BvhTree::new(builder.nodes, Some(root_id))
}

struct SahBuilder {
    /// Leaves first, then internal nodes in order of allocation; the leaves
    /// get reordered in place while splitting.
    nodes: Vec<BvhNode>,

    /// Scratch space for the sweep: `left_areas[i]` is the area of the first
    /// `i + 1` nodes of the current range, `right_areas[i]` is the area of the
    /// nodes from `i` onwards.
    left_areas: Vec<f32>,
    right_areas: Vec<f32>,

    sah_threshold: usize,
}

/// Pending step of the construction; see [`SahBuilder::build()`].
enum Task {
    /// Split given range and schedule building both of its halves.
    Split { begin: usize, end: usize },

    /// Create parent of the two most recently built nodes.
    Join { bounds: BoundingBox },
}

impl SahBuilder {
    /// Builds the subtree over `begin..end` and returns its root.
    ///
    /// Coincident triangles yield a tree as deep as it is long, so instead of
    /// recursing this keeps its own stack of tasks. The left half gets built
    /// entirely before the right one, so children are still allocated before
    /// their parents.
    fn build(&mut self, begin: usize, end: usize) -> BvhNodeId {
        let mut tasks = vec![Task::Split { begin, end }];
        let mut built = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Split { begin, end } => {
                    debug_assert!(begin < end);

                    if end - begin == 1 {
                        built.push(BvhNodeId::new(begin as u32));
                        continue;
                    }

                    let bounds: BoundingBox = self.nodes[begin..end]
                        .iter()
                        .map(BvhNode::bounds)
                        .collect();

                    let mid = self.split(begin, end, bounds);

                    tasks.push(Task::Join { bounds });
                    tasks.push(Task::Split { begin: mid, end });
                    tasks.push(Task::Split { begin, end: mid });
                }

                Task::Join { bounds } => {
                    let (Some(right_id), Some(left_id)) =
                        (built.pop(), built.pop())
                    else {
                        unreachable!("Join scheduled without both children");
                    };

                    built.push(self.join(left_id, right_id, bounds));
                }
            }
        }

        debug_assert_eq!(1, built.len());

        built[0]
    }

    fn join(
        &mut self,
        mut left_id: BvhNodeId,
        mut right_id: BvhNodeId,
        bounds: BoundingBox,
    ) -> BvhNodeId {
        let left_bounds = self.node(left_id).bounds();
        let right_bounds = self.node(right_id).bounds();

        // Larger child goes first
        if right_bounds.area() > left_bounds.area() {
            mem::swap(&mut left_id, &mut right_id);
        }

        let node_bounds = left_bounds + right_bounds;

        debug_assert_eq!(bounds, node_bounds);

        let id = BvhNodeId::new(self.nodes.len() as u32);

        self.nodes.push(BvhNode::internal(node_bounds, left_id, right_id));

        self.node_mut(left_id).set_parent_id(id);
        self.node_mut(right_id).set_parent_id(id);

        id
    }

    /// Reorders nodes within `begin..end` and returns where to split them;
    /// the returned index always leaves both halves non-empty.
    fn split(
        &mut self,
        begin: usize,
        end: usize,
        bounds: BoundingBox,
    ) -> usize {
        let mid = if end - begin > self.sah_threshold {
            self.split_at_midpoint(begin, end, bounds)
        } else {
            self.split_by_sah(begin, end)
        };

        // Only reachable when no candidate had a finite cost
        if mid <= begin || mid >= end {
            log::trace!(
                "No split improved the cost of {}..{}; splitting in half",
                begin,
                end
            );

            return begin + (end - begin) / 2;
        }

        mid
    }

    fn split_by_sah(&mut self, begin: usize, end: usize) -> usize {
        let count = end - begin;
        let mut best_axis = Axis::X;
        let mut best_split = begin;
        let mut best_cost = f32::MAX;

        for axis in Axis::all() {
            self.sort(begin, end, axis);

            // ---

            let mut left_bb = BoundingBox::default();
            let mut right_bb = BoundingBox::default();

            for left_idx in 0..count {
                let right_idx = count - left_idx - 1;

                left_bb += self.nodes[begin + left_idx].bounds();
                right_bb += self.nodes[begin + right_idx].bounds();

                self.left_areas[left_idx] = left_bb.area();
                self.right_areas[right_idx] = right_bb.area();
            }

            // ---

            let mut axis_split = begin;
            let mut axis_cost = f32::MAX;

            for mid in (begin + 1)..end {
                let left_count = (mid - begin) as f32;
                let right_count = (end - mid) as f32;

                let cost = self.left_areas[mid - begin - 1] * left_count
                    + self.right_areas[mid - begin] * right_count;

                if cost < axis_cost {
                    axis_split = mid;
                    axis_cost = cost;
                }
            }

            if axis_cost < best_cost {
                best_axis = axis;
                best_split = axis_split;
                best_cost = axis_cost;
            }
        }

        // The sort is total, so re-sorting reproduces exactly the order the
        // costs were evaluated for; the last axis is already in place
        if best_axis != Axis::Z {
            self.sort(begin, end, best_axis);
        }

        best_split
    }

    fn split_at_midpoint(
        &mut self,
        begin: usize,
        end: usize,
        bounds: BoundingBox,
    ) -> usize {
        let axis = bounds.largest_axis();
        let split_at = (bounds.min()[axis] + bounds.max()[axis]) * 0.5;

        log::trace!(
            "Splitting {}..{} at {:?} = {} (midpoint)",
            begin,
            end,
            axis,
            split_at
        );

        self.sort(begin, end, axis);

        ((begin + 1)..end)
            .find(|&mid| self.nodes[mid].center()[axis] >= split_at)
            .unwrap_or(end - 1)
    }

    /// Sorts nodes by their center along given axis, breaking ties by the
    /// primitive id so that the order doesn't depend on the previous one.
    fn sort(&mut self, begin: usize, end: usize, axis: Axis) {
        self.nodes[begin..end].sort_unstable_by(|a, b| {
            a.center()[axis]
                .total_cmp(&b.center()[axis])
                .then_with(|| a.primitive_id().cmp(&b.primitive_id()))
        });
    }

    fn node(&self, id: BvhNodeId) -> &BvhNode {
        &self.nodes[id.get() as usize]
    }

    fn node_mut(&mut self, id: BvhNodeId) -> &mut BvhNode {
        &mut self.nodes[id.get() as usize]
    }
}
