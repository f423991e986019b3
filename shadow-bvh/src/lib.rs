//! Builds bounding volume hierarchies over triangle meshes and packs them into
//! a flat buffer that can be traversed without a stack, e.g. by a compute
//! shader casting shadow rays.
//!
//! The pipeline goes: [`MeshView`] → primitives → SAH-built tree → nodes in
//! depth-first order → packed [`BvhRecord`]s.

mod bvh;
mod mesh;
mod utils;

#[cfg(test)]
mod test_utils;

pub use shadow_bvh_gpu::{
    BvhRecord, BvhRecordKind, BvhView, Hit, Ray, TracingMode, INVALID,
    LEAF_MASK,
};

pub use self::bvh::*;
pub use self::mesh::*;
pub use self::utils::*;
