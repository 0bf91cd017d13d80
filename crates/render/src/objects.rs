use crate::mesh::GpuMesh;
use crate::program::Program;
use crate::shaders;
use curveworld_scene::{DARK_COLOR, LIGHT_COLOR, SceneConfig};
use glam::Mat4;

/// A subdivided cube with its own program. The model matrix is not stored;
/// the caller computes it fresh each frame.
pub struct Cube {
    mesh: GpuMesh,
    program: Program,
    curve_amount: f32,
}

impl Cube {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        config: &SceneConfig,
    ) -> Self {
        let vertices = curveworld_mesh::subdivided_cube(config.cube_resolution);
        let mesh = GpuMesh::new(device, "cube", &vertices);
        let program = Program::new(device, surface_format, shaders::cube_program(config.mode));
        Self {
            mesh,
            program,
            curve_amount: config.curve_amount,
        }
    }

    pub fn push_uniforms(&self, queue: &wgpu::Queue, model: Mat4, view: Mat4, projection: Mat4) {
        self.program.set_mat4(queue, "model", model);
        self.program.set_mat4(queue, "view", view);
        self.program.set_mat4(queue, "projection", projection);
        // Flat-mode programs declare no such field; the write is a no-op there.
        self.program.set_f32(queue, "curve_amount", self.curve_amount);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(self.program.pipeline());
        pass.set_bind_group(0, self.program.bind_group(), &[]);
        self.mesh.draw(pass);
    }
}

/// The ground plane: a checker-patterned grid, bent into a bowl in curved
/// mode. Its model matrix is always the identity.
pub struct Ground {
    mesh: GpuMesh,
    program: Program,
    grid_size: f32,
    curve_amount: f32,
}

impl Ground {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        config: &SceneConfig,
    ) -> Self {
        let vertices =
            curveworld_mesh::ground_grid(config.ground_half_extent, config.ground_resolution);
        let mesh = GpuMesh::new(device, "ground", &vertices);
        let program = Program::new(device, surface_format, shaders::ground_program(config.mode));
        Self {
            mesh,
            program,
            grid_size: config.grid_size,
            curve_amount: config.curve_amount,
        }
    }

    pub fn push_uniforms(&self, queue: &wgpu::Queue, view: Mat4, projection: Mat4) {
        self.program.set_mat4(queue, "model", Mat4::IDENTITY);
        self.program.set_mat4(queue, "view", view);
        self.program.set_mat4(queue, "projection", projection);
        self.program.set_vec3(queue, "light_color", LIGHT_COLOR);
        self.program.set_vec3(queue, "dark_color", DARK_COLOR);
        self.program.set_f32(queue, "grid_size", self.grid_size);
        self.program.set_f32(queue, "curve_amount", self.curve_amount);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(self.program.pipeline());
        pass.set_bind_group(0, self.program.bind_group(), &[]);
        self.mesh.draw(pass);
    }
}
