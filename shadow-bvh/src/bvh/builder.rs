use super::{linearize, primitive, sah, serialize, Bvh};
use crate::{measure, MeshView};

/// Configures and runs the BVH construction.
///
/// ```
/// use shadow_bvh::{BvhBuilder, MeshView};
///
/// let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
/// let mesh = MeshView::from_positions(&positions, &[0, 1, 2]).unwrap();
/// let bvh = BvhBuilder::default().build(&mesh);
///
/// assert_eq!(1, bvh.nodes().len());
/// assert_eq!(3, bvh.records().len());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BvhBuilder {
    degenerate_area: f32,
    sah_threshold: usize,
}

impl BvhBuilder {
    pub const DEFAULT_DEGENERATE_AREA: f32 = 1e-4;
    pub const DEFAULT_SAH_THRESHOLD: usize = 1_000_000;

    /// Triangles with area up to this value are dropped before construction.
    pub fn degenerate_area(mut self, area: f32) -> Self {
        self.degenerate_area = area;
        self
    }

    /// Ranges with more primitives than this get split at the midpoint of
    /// their longest axis instead of going through the full SAH sweep.
    pub fn sah_threshold(mut self, count: usize) -> Self {
        self.sah_threshold = count;
        self
    }

    pub fn build(&self, mesh: &MeshView) -> Bvh {
        log::info!("Building BVH; triangles={}", mesh.triangle_count());

        let primitives = measure("bvh.extract", || {
            primitive::extract(mesh, self.degenerate_area)
        });

        let degenerate_count = mesh.triangle_count() - primitives.len();

        if degenerate_count > 0 {
            log::debug!(
                "Skipped {} degenerate triangle(s) with area <= {}",
                degenerate_count,
                self.degenerate_area,
            );
        }

        if primitives.len() > self.sah_threshold {
            log::debug!(
                "Primitive count exceeds {}; top-level splits will use the \
                 midpoint",
                self.sah_threshold,
            );
        }

        let tree = measure("bvh.build", || {
            sah::build(&primitives, self.sah_threshold)
        });

        if cfg!(debug_assertions) {
            tree.validate();
        }

        let nodes = measure("bvh.linearize", || linearize::run(&tree));

        let records = measure("bvh.serialize", || {
            serialize::run(&nodes, &primitives, mesh)
        });

        log::info!(
            "BVH ready; primitives={}, nodes={}, records={}",
            primitives.len(),
            nodes.len(),
            records.len(),
        );

        Bvh {
            nodes,
            records,
            triangle_ids: primitives
                .iter()
                .map(|primitive| primitive.triangle_id)
                .collect(),
        }
    }
}

impl Default for BvhBuilder {
    fn default() -> Self {
        Self {
            degenerate_area: Self::DEFAULT_DEGENERATE_AREA,
            sah_threshold: Self::DEFAULT_SAH_THRESHOLD,
        }
    }
}
