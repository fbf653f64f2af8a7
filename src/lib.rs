//! Mesh generation for a parametric spindle: a surface of revolution whose
//! radius eases between two bounds along its axis.
//!
//! [`math`] evaluates the surface, estimates normals and packs triangle-strip
//! or line-strip buffers; [`renderer`] hands those buffers to an upload sink.

pub mod math;
pub mod renderer;

pub use math::{
    ConfigurationError, MeshBuffers, MeshEngine, MeshTessellator, NormalEstimator, RenderMode,
    SurfaceParameters,
};
pub use renderer::{DrawPlan, MeshSink, Topology};
