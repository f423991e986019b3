use glam::Vec3;

use crate::{BvhRecord, INVALID};

/// Read-only view over a packed BVH buffer.
///
/// Pointers passed here are node pointers (i.e. visit orders), not record
/// indices - node `ptr` lives at records `2 * ptr` and `2 * ptr + 1`.
#[derive(Clone, Copy, Debug)]
pub struct BvhView<'a> {
    buffer: &'a [BvhRecord],
    node_count: u32,
}

impl<'a> BvhView<'a> {
    pub fn new(buffer: &'a [BvhRecord]) -> Self {
        // A full binary tree over `n` primitives has `2n - 1` nodes, so the
        // buffer holds `2 * (2n - 1) + n = 5n - 2` records
        let node_count = if buffer.is_empty() {
            0
        } else {
            2 * (buffer.len() as u32 + 2) / 5 - 1
        };

        Self { buffer, node_count }
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn primitive_count(&self) -> u32 {
        self.buffer.len() as u32 - 2 * self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn get(&self, ptr: u32) -> BvhRecord {
        self.buffer[ptr as usize]
    }

    pub fn node(&self, ptr: u32) -> BvhRecordKind {
        let d0 = self.get(2 * ptr);
        let d1 = self.get(2 * ptr + 1);

        if d0.w() == INVALID {
            BvhRecordKind::Internal {
                bb_min: d0.xyz(),
                bb_max: d1.xyz(),
                next: d1.w(),
            }
        } else {
            debug_assert!(d0.w() >= 2 * self.node_count);

            BvhRecordKind::Leaf {
                edge0: d0.xyz(),
                edge1: d1.xyz(),
                primitive_id: d0.w() - 2 * self.node_count,
                next: d1.w(),
            }
        }
    }

    /// Returns first vertex of given primitive's triangle.
    pub fn vertex0(&self, primitive_id: u32) -> Vec3 {
        self.get(2 * self.node_count + primitive_id).xyz()
    }
}

/// Decoded node; see [`BvhRecord`] for the underlying layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BvhRecordKind {
    Internal {
        bb_min: Vec3,
        bb_max: Vec3,
        next: u32,
    },

    Leaf {
        edge0: Vec3,
        edge1: Vec3,
        primitive_id: u32,
        next: u32,
    },
}

impl BvhRecordKind {
    pub fn next(&self) -> u32 {
        match self {
            BvhRecordKind::Internal { next, .. } => *next,
            BvhRecordKind::Leaf { next, .. } => *next,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhRecordKind::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    /// Root over two leaves, laid out by hand.
    fn buffer() -> Vec<BvhRecord> {
        vec![
            BvhRecord::new(vec3(0.0, 0.0, 0.0), INVALID),
            BvhRecord::new(vec3(2.0, 1.0, 0.0), INVALID),
            BvhRecord::new(vec3(1.0, 0.0, 0.0), 6),
            BvhRecord::new(vec3(0.0, 1.0, 0.0), 2),
            BvhRecord::new(vec3(1.0, 0.0, 0.0), 7),
            BvhRecord::new(vec3(0.0, 1.0, 0.0), INVALID),
            BvhRecord::new(vec3(0.0, 0.0, 0.0), 0),
            BvhRecord::new(vec3(1.0, 0.0, 0.0), 0),
        ]
    }

    #[test]
    fn counts() {
        let buffer = buffer();
        let target = BvhView::new(&buffer);

        assert_eq!(3, target.node_count());
        assert_eq!(2, target.primitive_count());

        assert!(BvhView::new(&[]).is_empty());
        assert_eq!(0, BvhView::new(&[]).node_count());
    }

    #[test]
    fn node() {
        let buffer = buffer();
        let target = BvhView::new(&buffer);

        assert_eq!(
            BvhRecordKind::Internal {
                bb_min: vec3(0.0, 0.0, 0.0),
                bb_max: vec3(2.0, 1.0, 0.0),
                next: INVALID,
            },
            target.node(0)
        );

        assert_eq!(
            BvhRecordKind::Leaf {
                edge0: vec3(1.0, 0.0, 0.0),
                edge1: vec3(0.0, 1.0, 0.0),
                primitive_id: 0,
                next: 2,
            },
            target.node(1)
        );

        let leaf = target.node(2);

        assert!(leaf.is_leaf());
        assert_eq!(INVALID, leaf.next());

        assert_eq!(vec3(0.0, 0.0, 0.0), target.vertex0(0));
        assert_eq!(vec3(1.0, 0.0, 0.0), target.vertex0(1));
    }
}
