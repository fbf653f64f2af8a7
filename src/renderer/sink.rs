use std::ops::Range;

use crate::math::mesh::{MeshBuffers, ShadedMesh, WireframeMesh};
use crate::math::params::SurfaceParameters;
use crate::math::tessellate::{MeshTessellator, RenderMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleStrip,
    LineStrip,
}

/// What the draw stage needs after an upload: the primitive topology and the
/// vertex ranges to issue, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawPlan {
    pub topology: Topology,
    pub ranges: Vec<Range<u32>>,
}

impl DrawPlan {
    pub fn shaded(mesh: &ShadedMesh) -> Self {
        Self {
            topology: Topology::TriangleStrip,
            ranges: vec![0..mesh.vertex_count() as u32],
        }
    }

    /// One range per horizontal strip, then one per vertical strip starting at
    /// `horizontal_vertex_count`.
    pub fn wireframe(mesh: &WireframeMesh) -> Self {
        let mut ranges = Vec::with_capacity(mesh.rows + mesh.columns);

        if mesh.rows > 0 {
            let row_len = (mesh.horizontal_vertex_count / mesh.rows) as u32;
            for row in 0..mesh.rows as u32 {
                let start = row * row_len;
                ranges.push(start..start + row_len);
            }
        }

        if mesh.columns > 0 {
            let offset = mesh.horizontal_vertex_count as u32;
            let column_len = (mesh.vertical_vertex_count() / mesh.columns) as u32;
            for column in 0..mesh.columns as u32 {
                let start = offset + column * column_len;
                ranges.push(start..start + column_len);
            }
        }

        Self {
            topology: Topology::LineStrip,
            ranges,
        }
    }

    pub fn for_mesh(mesh: &MeshBuffers) -> Self {
        match mesh {
            MeshBuffers::Shaded(mesh) => Self::shaded(mesh),
            MeshBuffers::Wireframe(mesh) => Self::wireframe(mesh),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.ranges.iter().map(|r| r.end - r.start).sum()
    }
}

/// Receives freshly generated buffers. The sink owns whatever copy it makes;
/// the caller drops its mesh after the call.
pub trait MeshSink {
    fn upload(&mut self, mesh: &MeshBuffers) -> DrawPlan;
}

/// One full regeneration: tessellate from `params` and hand the result to `sink`.
pub fn regenerate<S: MeshSink + ?Sized>(
    sink: &mut S,
    tessellator: &MeshTessellator,
    params: &SurfaceParameters,
    mode: RenderMode,
) -> DrawPlan {
    let mesh = tessellator.tessellate(params, mode);
    let plan = sink.upload(&mesh);
    tracing::info!(
        ?mode,
        vertices = mesh.vertex_count(),
        draws = plan.ranges.len(),
        "regenerated spindle surface"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<MeshBuffers>,
    }

    impl MeshSink for RecordingSink {
        fn upload(&mut self, mesh: &MeshBuffers) -> DrawPlan {
            self.uploads.push(mesh.clone());
            DrawPlan::for_mesh(mesh)
        }
    }

    #[test]
    fn wireframe_plan_splits_at_horizontal_count() {
        // 2 rows of 3 columns
        let mesh = WireframeMesh {
            positions: vec![0.0; 12 * 3],
            rows: 2,
            columns: 3,
            horizontal_vertex_count: 6,
        };
        let plan = DrawPlan::wireframe(&mesh);
        assert_eq!(plan.topology, Topology::LineStrip);
        assert_eq!(plan.ranges, vec![0..3, 3..6, 6..8, 8..10, 10..12]);
        assert_eq!(plan.vertex_count(), 12);
    }

    #[test]
    fn shaded_plan_is_a_single_strip() {
        let mesh = ShadedMesh {
            positions: vec![0.0; 8 * 3],
            normals: vec![0.0; 8 * 3],
        };
        let plan = DrawPlan::shaded(&mesh);
        assert_eq!(plan.topology, Topology::TriangleStrip);
        assert_eq!(plan.ranges, vec![0..8]);
    }

    #[test]
    fn regenerate_uploads_once_per_call() {
        let mut sink = RecordingSink::default();
        let tessellator = MeshTessellator::default();
        let params = SurfaceParameters::new(0.5, 1.5, 1.0, 0.5, 90.0).unwrap();

        let plan = regenerate(&mut sink, &tessellator, &params, RenderMode::Wireframe);
        assert_eq!(sink.uploads.len(), 1);
        assert_eq!(plan.ranges.len(), 10);
        assert_eq!(plan.ranges[5].start, 25);

        let plan = regenerate(&mut sink, &tessellator, &params, RenderMode::Shaded);
        assert_eq!(sink.uploads.len(), 2);
        assert_eq!(plan.ranges, vec![0..50]);
    }
}
