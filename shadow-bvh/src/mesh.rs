use glam::Vec3;
use thiserror::Error;

/// Borrowed, validated view of an indexed triangle mesh.
///
/// Vertices are `stride` floats apart and start with a three-component
/// position; everything past the position (normals, uvs etc.) is ignored.
#[derive(Clone, Copy, Debug)]
pub struct MeshView<'a> {
    vertices: &'a [f32],
    stride: usize,
    indices: &'a [u32],
}

impl<'a> MeshView<'a> {
    pub fn new(
        vertices: &'a [f32],
        stride: usize,
        indices: &'a [u32],
    ) -> Result<Self, MeshError> {
        if stride < 3 {
            return Err(MeshError::StrideTooSmall { stride });
        }

        if indices.len() % 3 != 0 {
            return Err(MeshError::UnalignedIndices { len: indices.len() });
        }

        let this = Self {
            vertices,
            stride,
            indices,
        };

        let vertex_count = this.vertex_count();

        if let Some((idx, index)) = indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfBounds {
                triangle: idx / 3,
                index: *index,
                vertex_count,
            });
        }

        Ok(this)
    }

    /// Creates a view over tightly packed positions.
    pub fn from_positions(
        positions: &'a [[f32; 3]],
        indices: &'a [u32],
    ) -> Result<Self, MeshError> {
        Self::new(bytemuck::cast_slice(positions), 3, indices)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of addressable vertices; the last vertex only needs
    /// its position, not the whole stride.
    pub fn vertex_count(&self) -> usize {
        if self.vertices.len() < 3 {
            0
        } else {
            (self.vertices.len() - 3) / self.stride + 1
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, vertex_id: u32) -> Vec3 {
        let offset = self.stride * vertex_id as usize;

        Vec3::from_slice(&self.vertices[offset..offset + 3])
    }

    pub fn triangle(&self, triangle_id: u32) -> [Vec3; 3] {
        let offset = 3 * triangle_id as usize;

        [
            self.vertex(self.indices[offset]),
            self.vertex(self.indices[offset + 1]),
            self.vertex(self.indices[offset + 2]),
        ]
    }

    pub fn triangles(&self) -> impl Iterator<Item = (u32, [Vec3; 3])> + '_ {
        (0..self.triangle_count() as u32)
            .map(|triangle_id| (triangle_id, self.triangle(triangle_id)))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("vertex stride must hold at least a position, got {stride}")]
    StrideTooSmall { stride: usize },

    #[error("index count must be a multiple of three, got {len}")]
    UnalignedIndices { len: usize },

    #[error(
        "triangle {triangle} refers to vertex {index}, but there are only \
         {vertex_count} vertices"
    )]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}
