pub mod engine;
pub mod error;
pub mod mesh;
pub mod normals;
pub mod params;
pub mod profile;
pub mod tessellate;

pub use engine::{MeshEngine, MeshResult};
pub use error::ConfigurationError;
pub use mesh::{MeshBuffers, ShadedMesh, WireframeMesh};
pub use normals::NormalEstimator;
pub use params::{ParameterInput, SampleGrid, SurfaceParameters};
pub use profile::{ParametricSurface, SpindleProfile, deg2rad};
pub use tessellate::{MeshTessellator, RenderMode};
