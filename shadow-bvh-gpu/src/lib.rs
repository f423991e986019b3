//! Binary layout of the packed BVH buffer, shared between the CPU-side builder
//! and whatever traverses the buffer (shaders or the reference tracer below).

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod bvh_record;
mod bvh_view;
mod hit;
mod ray;

pub use self::bvh_record::*;
pub use self::bvh_view::*;
pub use self::hit::*;
pub use self::ray::*;
