//! Meshes shared by tests.

use glam::{vec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::MeshView;

#[derive(Clone, Debug, Default)]
pub struct TestMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TestMesh {
    /// Square spanning `(0, 0, 0)..(1, 1, 0)`, made of two triangles.
    pub fn unit_square() -> Self {
        Self {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Bunch of randomly placed, randomly sized triangles; every seventh one
    /// is degenerate.
    pub fn random(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut this = Self::default();

        for idx in 0..count {
            let center = vec3(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );

            let mut offset = || {
                vec3(
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                )
            };

            let v0 = center + offset();
            let v1 = center + offset();
            let v2 = if idx % 7 == 3 { v0 } else { center + offset() };

            this.push([v0, v1, v2]);
        }

        this
    }

    pub fn push(&mut self, vertices: [Vec3; 3]) -> &mut Self {
        for vertex in vertices {
            self.indices.push(self.positions.len() as u32);
            self.positions.push(vertex.to_array());
        }

        self
    }

    /// Adds an axis-aligned right triangle with its corner at `at`.
    pub fn push_at(&mut self, at: Vec3, size: f32) -> &mut Self {
        self.push([at, at + vec3(size, 0.0, 0.0), at + vec3(0.0, size, 0.0)])
    }

    pub fn view(&self) -> MeshView<'_> {
        MeshView::from_positions(&self.positions, &self.indices).unwrap()
    }
}
