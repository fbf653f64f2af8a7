pub mod gpu;
pub mod sink;

pub use gpu::{GpuUpload, SurfaceBuffers, normal_layout, position_layout};
pub use sink::{DrawPlan, MeshSink, Topology, regenerate};
