use glam::Vec3;

use crate::{BvhRecordKind, BvhView, Hit, INVALID};

#[derive(Clone, Copy, Debug, Default)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: 1.0 / direction,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Traces this ray and returns its nearest hit.
    pub fn trace_nearest(self, bvh: BvhView) -> Hit {
        let mut hit = Hit::none();

        self.trace(bvh, TracingMode::Nearest, &mut hit);

        hit
    }

    /// Traces this ray and returns whether it hits anything up to the given
    /// distance; that's the shadow query.
    pub fn trace_any(self, bvh: BvhView, max_distance: f32) -> bool {
        let mut hit = Hit {
            distance: max_distance,
            ..Hit::none()
        };

        self.trace(bvh, TracingMode::Any, &mut hit);

        hit.distance < max_distance
    }

    /// Walks the tree without a stack and returns the number of visited nodes.
    ///
    /// Nodes are laid out in depth-first order, so an internal node's first
    /// child always sits right after it; on a miss (or after testing a leaf) we
    /// follow the node's `next` pointer, skipping the entire subtree.
    pub fn trace(self, bvh: BvhView, mode: TracingMode, hit: &mut Hit) -> u32 {
        let mut traversed_nodes = 0;

        let mut ptr = if bvh.is_empty() { INVALID } else { 0 };

        while ptr != INVALID {
            traversed_nodes += 1;

            match bvh.node(ptr) {
                BvhRecordKind::Internal {
                    bb_min,
                    bb_max,
                    next,
                } => {
                    if self.distance_to_node(bb_min, bb_max) < hit.distance {
                        ptr += 1;
                    } else {
                        ptr = next;
                    }
                }

                BvhRecordKind::Leaf {
                    edge0,
                    edge1,
                    primitive_id,
                    next,
                } => {
                    let vertex0 = bvh.vertex0(primitive_id);

                    if self.hit_triangle(vertex0, edge0, edge1, hit) {
                        hit.primitive_id = primitive_id;

                        if let TracingMode::Any = mode {
                            break;
                        }
                    }

                    ptr = next;
                }
            }
        }

        traversed_nodes
    }

    /// Möller-Trumbore intersection against a triangle given by its first
    /// vertex and two edges; updates `hit` only if the triangle is closer.
    pub fn hit_triangle(
        &self,
        vertex0: Vec3,
        edge0: Vec3,
        edge1: Vec3,
        hit: &mut Hit,
    ) -> bool {
        let pvec = self.direction.cross(edge1);
        let det = edge0.dot(pvec);

        if det.abs() < f32::EPSILON {
            return false;
        }

        // ---

        let inv_det = 1.0 / det;
        let tvec = self.origin - vertex0;
        let u = tvec.dot(pvec) * inv_det;
        let qvec = tvec.cross(edge0);
        let v = self.direction.dot(qvec) * inv_det;
        let distance = edge1.dot(qvec) * inv_det;

        if (u < 0.0)
            | (u > 1.0)
            | (v < 0.0)
            | (u + v > 1.0)
            | (distance <= 0.0)
            | (distance >= hit.distance)
        {
            return false;
        }

        hit.distance = distance;
        hit.u = u;
        hit.v = v;

        true
    }

    /// Returns distance to the entry point of given box or `f32::MAX` if the
    /// ray misses it.
    pub fn distance_to_node(&self, bb_min: Vec3, bb_max: Vec3) -> f32 {
        let hit_min = (bb_min - self.origin) * self.inv_direction;
        let hit_max = (bb_max - self.origin) * self.inv_direction;

        let tmin = hit_min.min(hit_max).max_element();
        let tmax = hit_min.max(hit_max).min_element();

        if tmax >= tmin && tmax >= 0.0 {
            tmin
        } else {
            f32::MAX
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingMode {
    Nearest,
    Any,
}
