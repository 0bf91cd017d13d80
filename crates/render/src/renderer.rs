use crate::objects::{Cube, Ground};
use curveworld_scene::{
    FlyCamera, SKY_COLOR, SceneConfig, cube_model, pillar_model, projection_matrix,
};

/// Owns every renderable in the scene plus the depth buffer, and submits one
/// frame per call: uniform writes, then a single clear-and-draw pass.
pub struct SceneRenderer {
    config: SceneConfig,
    ground: Ground,
    ring: Vec<Cube>,
    pillar: Option<Cube>,
    depth_texture: wgpu::TextureView,
    aspect: f32,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        config: SceneConfig,
        width: u32,
        height: u32,
    ) -> Self {
        tracing::info!(mode = ?config.mode, "building scene");
        let ground = Ground::new(device, surface_format, &config);
        let ring = (0..config.ring_count)
            .map(|_| Cube::new(device, surface_format, &config))
            .collect();
        let pillar = config
            .pillar
            .then(|| Cube::new(device, surface_format, &config));
        Self {
            config,
            ground,
            ring,
            pillar,
            depth_texture: create_depth_texture(device, width, height),
            aspect: width as f32 / height.max(1) as f32,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Render one frame to `view`. View and projection are computed once and
    /// shared; each renderable gets a freshly computed model matrix.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &FlyCamera,
        time: f32,
    ) {
        let view_matrix = camera.view_matrix();
        let projection = projection_matrix(self.aspect);

        self.ground.push_uniforms(queue, view_matrix, projection);
        for (i, cube) in self.ring.iter().enumerate() {
            let model = cube_model(&self.config, i as u32, time);
            cube.push_uniforms(queue, model, view_matrix, projection);
        }
        if let Some(pillar) = &self.pillar {
            pillar.push_uniforms(queue, pillar_model(), view_matrix, projection);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: SKY_COLOR[0],
                            g: SKY_COLOR[1],
                            b: SKY_COLOR[2],
                            a: SKY_COLOR[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.ground.draw(&mut pass);
            for cube in &self.ring {
                cube.draw(&mut pass);
            }
            if let Some(pillar) = &self.pillar {
                pillar.draw(&mut pass);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
