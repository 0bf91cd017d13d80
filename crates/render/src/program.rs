use crate::RenderError;
use glam::{Mat4, Vec3};

/// Value categories a uniform block field can hold, with their WGSL uniform
/// address-space layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Mat4,
    Vec3,
    F32,
}

impl UniformKind {
    fn align(self) -> u64 {
        match self {
            UniformKind::Mat4 | UniformKind::Vec3 => 16,
            UniformKind::F32 => 4,
        }
    }

    fn size(self) -> u64 {
        match self {
            UniformKind::Mat4 => 64,
            UniformKind::Vec3 => 12,
            UniformKind::F32 => 4,
        }
    }
}

/// Name -> byte-offset table for one program's uniform block.
///
/// This is the CPU-side mirror of looking up uniforms by name: field order
/// must match the WGSL struct declaration, and offsets follow WGSL uniform
/// layout (the struct size rounds up to its 16-byte alignment).
#[derive(Debug, Clone)]
pub struct UniformLayout {
    fields: Vec<(&'static str, UniformKind, u64)>,
    size: u64,
}

impl UniformLayout {
    pub fn new(fields: &[(&'static str, UniformKind)]) -> Self {
        let mut offset = 0u64;
        let mut resolved = Vec::with_capacity(fields.len());
        for &(name, kind) in fields {
            offset = offset.next_multiple_of(kind.align());
            resolved.push((name, kind, offset));
            offset += kind.size();
        }
        Self {
            fields: resolved,
            size: offset.next_multiple_of(16),
        }
    }

    /// Total block size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Byte offset of `name`, or None if the field is absent or declared
    /// with a different kind. A miss is the caller's cue to skip the write.
    pub fn offset_of(&self, name: &str, kind: UniformKind) -> Option<u64> {
        self.fields
            .iter()
            .find(|(n, k, _)| *n == name && *k == kind)
            .map(|&(_, _, offset)| offset)
    }
}

/// Construction inputs for a [`Program`]: two WGSL stage sources plus the
/// uniform block layout they declare.
pub struct ProgramDesc {
    pub label: &'static str,
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
    pub layout: UniformLayout,
}

/// One linked GPU program: a render pipeline with its own uniform buffer and
/// bind group. Uniform setters resolve fields by name and silently skip
/// unknown ones, mirroring by-name uniform lookup.
pub struct Program {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    layout: UniformLayout,
}

impl Program {
    /// Compile both stages and build the pipeline. Stage and pipeline
    /// failures are captured in validation scopes and logged; construction
    /// proceeds regardless, leaving rendering output undefined on failure.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        desc: ProgramDesc,
    ) -> Self {
        let vertex_module = compile_stage(device, desc.label, "vertex", desc.vertex_source);
        let fragment_module = compile_stage(device, desc.label, "fragment", desc.fragment_source);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(desc.label),
            size: desc.layout.size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(desc.label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(desc.label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 3 * std::mem::size_of::<f32>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The generators emit mixed winding per face; culling would
                // drop half the scene.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!(
                "{}",
                RenderError::PipelineCreation {
                    label: desc.label.to_string(),
                    message: err.to_string(),
                }
            );
        }

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            layout: desc.layout,
        }
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn set_mat4(&self, queue: &wgpu::Queue, name: &str, value: Mat4) {
        if let Some(offset) = self.layout.offset_of(name, UniformKind::Mat4) {
            queue.write_buffer(
                &self.uniform_buffer,
                offset,
                bytemuck::bytes_of(&value.to_cols_array()),
            );
        }
    }

    pub fn set_vec3(&self, queue: &wgpu::Queue, name: &str, value: Vec3) {
        if let Some(offset) = self.layout.offset_of(name, UniformKind::Vec3) {
            queue.write_buffer(
                &self.uniform_buffer,
                offset,
                bytemuck::bytes_of(&value.to_array()),
            );
        }
    }

    pub fn set_f32(&self, queue: &wgpu::Queue, name: &str, value: f32) {
        if let Some(offset) = self.layout.offset_of(name, UniformKind::F32) {
            queue.write_buffer(&self.uniform_buffer, offset, bytemuck::bytes_of(&value));
        }
    }
}

/// Compile one shader stage inside a validation scope. On failure the
/// diagnostic is logged with its stage name and the (broken) module is still
/// returned.
fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    stage: &'static str,
    source: &str,
) -> wgpu::ShaderModule {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        tracing::error!(
            "{}",
            RenderError::ShaderCompile {
                stage,
                message: err.to_string(),
            }
        );
    }
    module
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mvp() -> Vec<(&'static str, UniformKind)> {
        vec![
            ("model", UniformKind::Mat4),
            ("view", UniformKind::Mat4),
            ("projection", UniformKind::Mat4),
        ]
    }

    #[test]
    fn mvp_layout_is_three_packed_matrices() {
        let layout = UniformLayout::new(&mvp());
        assert_eq!(layout.offset_of("model", UniformKind::Mat4), Some(0));
        assert_eq!(layout.offset_of("view", UniformKind::Mat4), Some(64));
        assert_eq!(layout.offset_of("projection", UniformKind::Mat4), Some(128));
        assert_eq!(layout.size(), 192);
    }

    #[test]
    fn ground_layout_respects_vec3_alignment() {
        let mut fields = mvp();
        fields.push(("light_color", UniformKind::Vec3));
        fields.push(("dark_color", UniformKind::Vec3));
        fields.push(("grid_size", UniformKind::F32));
        let layout = UniformLayout::new(&fields);
        assert_eq!(layout.offset_of("light_color", UniformKind::Vec3), Some(192));
        assert_eq!(layout.offset_of("dark_color", UniformKind::Vec3), Some(208));
        assert_eq!(layout.offset_of("grid_size", UniformKind::F32), Some(220));
        assert_eq!(layout.size(), 224);

        // The curved variant appends the bend coefficient.
        fields.push(("curve_amount", UniformKind::F32));
        let layout = UniformLayout::new(&fields);
        assert_eq!(layout.offset_of("curve_amount", UniformKind::F32), Some(224));
        assert_eq!(layout.size(), 240);
    }

    #[test]
    fn unknown_name_and_kind_mismatch_miss() {
        let layout = UniformLayout::new(&mvp());
        assert_eq!(layout.offset_of("normal_matrix", UniformKind::Mat4), None);
        assert_eq!(layout.offset_of("model", UniformKind::Vec3), None);
        assert_eq!(layout.offset_of("model", UniformKind::F32), None);
    }
}
