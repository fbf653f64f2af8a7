use glam::DVec3;

use crate::math::mesh::{MeshBuffers, ShadedMesh, WireframeMesh};
use crate::math::normals::NormalEstimator;
use crate::math::params::SurfaceParameters;
use crate::math::profile::{ParametricSurface, SpindleProfile};

/// Width of the ruled strip emitted per row in shaded mode, in units of `alpha`.
pub const STRIP_OFFSET: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Shaded,
    Wireframe,
}

/// Sweeps the `(alpha, beta)` lattice of a [`SurfaceParameters`] and packs the
/// samples for triangle-strip or line-strip drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTessellator {
    estimator: NormalEstimator,
    strip_offset: f64,
}

impl Default for MeshTessellator {
    fn default() -> Self {
        Self::new(NormalEstimator::default())
    }
}

impl MeshTessellator {
    pub fn new(estimator: NormalEstimator) -> Self {
        Self {
            estimator,
            strip_offset: STRIP_OFFSET,
        }
    }

    pub fn estimator(&self) -> &NormalEstimator {
        &self.estimator
    }

    pub fn tessellate(&self, params: &SurfaceParameters, mode: RenderMode) -> MeshBuffers {
        match mode {
            RenderMode::Shaded => MeshBuffers::Shaded(self.shaded(params)),
            RenderMode::Wireframe => MeshBuffers::Wireframe(self.wireframe(params)),
        }
    }

    /// Two vertices per lattice point, at `alpha` and `alpha + STRIP_OFFSET`,
    /// each paired with its estimated normal. Drawn as one triangle strip.
    pub fn shaded(&self, params: &SurfaceParameters) -> ShadedMesh {
        let profile = SpindleProfile::new(params);
        let grid = params.grid();
        let vertex_count = 2 * grid.len();

        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut normals = Vec::with_capacity(vertex_count * 3);

        for alpha in grid.alphas() {
            for beta in grid.betas() {
                for a in [alpha, alpha + self.strip_offset] {
                    let p = profile.position(a, beta);
                    let n = self.estimator.normal_at(&profile, a, beta, p);
                    push_vec3(&mut positions, p);
                    push_vec3(&mut normals, n);
                }
            }
        }

        tracing::debug!(
            rows = grid.rows,
            columns = grid.columns,
            vertices = positions.len() / 3,
            "tessellated shaded spindle"
        );

        ShadedMesh { positions, normals }
    }

    /// Horizontal strips (one per row) followed by vertical strips (one per
    /// column), all in a single position buffer.
    pub fn wireframe(&self, params: &SurfaceParameters) -> WireframeMesh {
        let profile = SpindleProfile::new(params);
        let grid = params.grid();

        let mut positions = Vec::with_capacity(2 * grid.len() * 3);

        let mut rows = 0;
        for alpha in grid.alphas() {
            for beta in grid.betas() {
                push_vec3(&mut positions, profile.position(alpha, beta));
            }
            rows += 1;
        }
        let horizontal_vertex_count = positions.len() / 3;

        let mut columns = 0;
        for beta in grid.betas() {
            for alpha in grid.alphas() {
                push_vec3(&mut positions, profile.position(alpha, beta));
            }
            columns += 1;
        }

        tracing::debug!(
            rows,
            columns,
            horizontal_vertex_count,
            vertices = positions.len() / 3,
            "tessellated wireframe spindle"
        );

        WireframeMesh {
            positions,
            rows,
            columns,
            horizontal_vertex_count,
        }
    }
}

#[inline]
fn push_vec3(out: &mut Vec<f32>, v: DVec3) {
    out.push(v.x as f32);
    out.push(v.y as f32);
    out.push(v.z as f32);
}
