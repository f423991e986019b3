use std::fmt;

use glam::Vec3;

use crate::{BoundingBox, MeshView};

/// Triangle that survived extraction.
#[derive(Clone, Copy, Debug)]
pub struct BvhPrimitive {
    pub id: BvhPrimitiveId,
    pub triangle_id: u32,
    pub bounds: BoundingBox,
    pub center: Vec3,
    pub area: f32,
}

impl BvhPrimitive {
    pub fn new(
        id: BvhPrimitiveId,
        triangle_id: u32,
        vertices: [Vec3; 3],
    ) -> Self {
        let bounds: BoundingBox = vertices.into_iter().collect();
        let [v0, v1, v2] = vertices;

        Self {
            id,
            triangle_id,
            bounds,
            center: bounds.center(),
            area: (v1 - v0).cross(v2 - v0).length() * 0.5,
        }
    }
}

/// Converts mesh's triangles into primitives, skipping the ones with area not
/// larger than `min_area`.
///
/// Survivors get consecutive ids, in the mesh's order.
pub fn extract(mesh: &MeshView, min_area: f32) -> Vec<BvhPrimitive> {
    let mut primitives = Vec::with_capacity(mesh.triangle_count());

    for (triangle_id, vertices) in mesh.triangles() {
        let id = BvhPrimitiveId::new(primitives.len() as u32);
        let primitive = BvhPrimitive::new(id, triangle_id, vertices);

        if primitive.area > min_area {
            primitives.push(primitive);
        }
    }

    primitives
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BvhPrimitiveId(u32);

impl BvhPrimitiveId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BvhPrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
