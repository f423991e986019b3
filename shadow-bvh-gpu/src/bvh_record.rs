use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3};

/// Marks an absent pointer or primitive; as a `next` pointer it terminates the
/// traversal.
pub const INVALID: u32 = 0xffff_ffff;

/// High-bit leaf flag reserved by the layout.
///
/// Nothing sets it: leaves are told apart from internal nodes by the magnitude
/// of the first word's `w` component instead (see [`BvhView::node()`]).
///
/// [`BvhView::node()`]: crate::BvhView::node
pub const LEAF_MASK: u32 = 0x8000_0000;

/// One 16-byte word of the packed BVH buffer.
///
/// Every node occupies two consecutive words:
///
/// - internal node: `(bb_min, INVALID)`, `(bb_max, next)`,
/// - leaf: `(v1 - v0, primitive_id + 2 * node_count)`, `(v2 - v0, next)`.
///
/// Node words are followed by one `(v0, 0)` word per primitive, so a leaf's
/// tagged primitive id is also the index of its triangle's first vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BvhRecord {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl BvhRecord {
    pub fn new(xyz: Vec3, w: u32) -> Self {
        Self {
            a: xyz.x.to_bits(),
            b: xyz.y.to_bits(),
            c: xyz.z.to_bits(),
            d: w,
        }
    }

    pub fn xyz(&self) -> Vec3 {
        vec3(
            f32::from_bits(self.a),
            f32::from_bits(self.b),
            f32::from_bits(self.c),
        )
    }

    pub fn w(&self) -> u32 {
        self.d
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(16, mem::size_of::<BvhRecord>());
        assert_eq!(4, mem::align_of::<BvhRecord>());
    }

    #[test]
    fn keeps_bits() {
        let record = BvhRecord::new(vec3(-0.0, 1.5, f32::MAX), INVALID);

        assert_eq!((-0.0f32).to_bits(), record.a);
        assert_eq!(1.5f32.to_bits(), record.b);
        assert_eq!(vec3(-0.0, 1.5, f32::MAX), record.xyz());
        assert_eq!(INVALID, record.w());

        let bytes: &[u8] = bytemuck::bytes_of(&record);

        assert_eq!(&[0xff; 4], &bytes[12..16]);
    }
}
