use glam::Vec3;

/// Triangle-strip mesh with one normal per vertex. Normals are the raw
/// finite-difference cross products.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadedMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl ShadedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Unit-length copy of `normals`; degenerate normals become zero.
    pub fn normalized_normals(&self) -> Vec<f32> {
        self.normals
            .chunks_exact(3)
            .flat_map(|n| Vec3::new(n[0], n[1], n[2]).normalize_or_zero().to_array())
            .collect()
    }
}

/// Line-strip grid: `rows` horizontal strips of `columns` points, followed by
/// `columns` vertical strips of `rows` points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireframeMesh {
    pub positions: Vec<f32>,
    pub rows: usize,
    pub columns: usize,
    /// Points written by the horizontal pass; the vertical block starts here.
    pub horizontal_vertex_count: usize,
}

impl WireframeMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn vertical_vertex_count(&self) -> usize {
        self.vertex_count() - self.horizontal_vertex_count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeshBuffers {
    Shaded(ShadedMesh),
    Wireframe(WireframeMesh),
}

impl MeshBuffers {
    pub fn positions(&self) -> &[f32] {
        match self {
            MeshBuffers::Shaded(mesh) => &mesh.positions,
            MeshBuffers::Wireframe(mesh) => &mesh.positions,
        }
    }

    pub fn normals(&self) -> Option<&[f32]> {
        match self {
            MeshBuffers::Shaded(mesh) => Some(&mesh.normals),
            MeshBuffers::Wireframe(_) => None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions().len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalized_normals_have_unit_length() {
        let mesh = ShadedMesh {
            positions: vec![0.0; 6],
            normals: vec![0.0, 0.0, 5.0, 3.0, 4.0, 0.0],
        };
        let unit = mesh.normalized_normals();
        assert_eq!(unit.len(), 6);
        assert_abs_diff_eq!(unit[2], 1.0);
        assert_abs_diff_eq!(unit[3], 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(unit[4], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_normal_stays_zero() {
        let mesh = ShadedMesh {
            positions: vec![0.0; 3],
            normals: vec![0.0; 3],
        };
        assert_eq!(mesh.normalized_normals(), vec![0.0; 3]);
    }

    #[test]
    fn wireframe_carries_no_normals() {
        let buffers = MeshBuffers::Wireframe(WireframeMesh {
            positions: vec![0.0; 12],
            rows: 2,
            columns: 1,
            horizontal_vertex_count: 2,
        });
        assert!(buffers.normals().is_none());
        assert_eq!(buffers.vertex_count(), 4);
    }
}
