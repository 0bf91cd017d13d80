use wgpu::util::DeviceExt;

/// One vertex buffer of tightly packed positions, uploaded once at
/// construction and immutable afterwards.
///
/// Ownership of the GPU allocation is exclusive: the type is neither `Clone`
/// nor `Copy` (a duplicate would alias the buffer), and `Drop` releases it.
pub struct GpuMesh {
    label: &'static str,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, label: &'static str, vertices: &[f32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            label,
            vertex_buffer,
            vertex_count: (vertices.len() / 3) as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Issue one non-indexed triangle-list draw over all vertices. A
    /// degenerate empty mesh draws nothing.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        tracing::debug!("releasing mesh '{}' ({} vertices)", self.label, self.vertex_count);
        self.vertex_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_not_impl_any;

    // Duplicating a mesh would double-release the GPU buffer; creation and
    // release stay paired because the handle can only be moved.
    assert_not_impl_any!(GpuMesh: Clone, Copy);
}
