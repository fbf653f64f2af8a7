use crate::math::mesh::MeshBuffers;
use crate::renderer::sink::{DrawPlan, MeshSink, Topology};

const INITIAL_VERTEX_CAPACITY: usize = 4096;
const FLOATS_PER_VERTEX: usize = 3;
const VERTEX_STRIDE: wgpu::BufferAddress =
    (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as wgpu::BufferAddress;

impl From<Topology> for wgpu::PrimitiveTopology {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        }
    }
}

/// GPU side of the spindle surface: one position buffer, one normal buffer and
/// the draw plan of the last upload. Pipelines and bind groups belong to the
/// caller.
pub struct SurfaceBuffers {
    position_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    normalize_normals: bool,
    plan: Option<DrawPlan>,
}

impl SurfaceBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            position_buffer: create_vertex_buffer(
                device,
                "Spindle Position Buffer",
                INITIAL_VERTEX_CAPACITY,
            ),
            normal_buffer: create_vertex_buffer(
                device,
                "Spindle Normal Buffer",
                INITIAL_VERTEX_CAPACITY,
            ),
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            normalize_normals: false,
            plan: None,
        }
    }

    /// Upload unit-length normals instead of the raw cross products.
    pub fn with_normalized_normals(mut self, normalize: bool) -> Self {
        self.normalize_normals = normalize;
        self
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &MeshBuffers,
    ) -> DrawPlan {
        let vertex_count = mesh.vertex_count();
        if vertex_count > self.vertex_capacity {
            let capacity = grown_capacity(self.vertex_capacity, vertex_count);
            tracing::debug!(
                from = self.vertex_capacity,
                to = capacity,
                "growing spindle vertex buffers"
            );
            self.position_buffer =
                create_vertex_buffer(device, "Spindle Position Buffer", capacity);
            self.normal_buffer = create_vertex_buffer(device, "Spindle Normal Buffer", capacity);
            self.vertex_capacity = capacity;
        }

        if vertex_count > 0 {
            queue.write_buffer(
                &self.position_buffer,
                0,
                bytemuck::cast_slice(mesh.positions()),
            );

            if let MeshBuffers::Shaded(shaded) = mesh {
                let normals = if self.normalize_normals {
                    shaded.normalized_normals()
                } else {
                    shaded.normals.clone()
                };
                queue.write_buffer(&self.normal_buffer, 0, bytemuck::cast_slice(&normals));
            }
        }

        let plan = DrawPlan::for_mesh(mesh);
        tracing::info!(
            vertices = vertex_count,
            topology = ?plan.topology,
            "uploaded spindle buffers"
        );
        self.plan = Some(plan.clone());
        plan
    }

    pub fn plan(&self) -> Option<&DrawPlan> {
        self.plan.as_ref()
    }

    /// Binds positions to slot 0 (and normals to slot 1 for triangle strips)
    /// and issues one draw per plan range. The pass must already use a
    /// pipeline with the matching primitive topology.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(plan) = &self.plan else {
            return;
        };

        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        if plan.topology == Topology::TriangleStrip {
            pass.set_vertex_buffer(1, self.normal_buffer.slice(..));
        }

        for range in &plan.ranges {
            pass.draw(range.clone(), 0..1);
        }
    }
}

/// Binds a device and queue to [`SurfaceBuffers`] for use as a [`MeshSink`].
pub struct GpuUpload<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub buffers: &'a mut SurfaceBuffers,
}

impl MeshSink for GpuUpload<'_> {
    fn upload(&mut self, mesh: &MeshBuffers) -> DrawPlan {
        self.buffers.upload(self.device, self.queue, mesh)
    }
}

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

pub fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, vertices: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: vertices as u64 * VERTEX_STRIDE,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.next_power_of_two().max(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_maps_to_wgpu() {
        assert_eq!(
            wgpu::PrimitiveTopology::from(Topology::TriangleStrip),
            wgpu::PrimitiveTopology::TriangleStrip
        );
        assert_eq!(
            wgpu::PrimitiveTopology::from(Topology::LineStrip),
            wgpu::PrimitiveTopology::LineStrip
        );
    }

    #[test]
    fn layouts_use_packed_triples() {
        assert_eq!(position_layout().array_stride, 12);
        assert_eq!(normal_layout().attributes[0].shader_location, 1);
    }

    #[test]
    fn capacity_grows_to_power_of_two() {
        // default spindle: 2 * 22 * 361 shaded vertices
        assert_eq!(grown_capacity(INITIAL_VERTEX_CAPACITY, 15_884), 16_384);
        assert_eq!(grown_capacity(32_768, 20_000), 32_768);
    }
}
