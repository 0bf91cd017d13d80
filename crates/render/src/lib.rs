//! wgpu scene renderer for the curved-world demo.
//!
//! Each renderable owns exactly one GPU mesh and one shader program for its
//! whole lifetime; per-frame work is uniform writes followed by one render
//! pass of sequential draws. Data flow is strictly CPU -> GPU.
//!
//! # Invariants
//! - GPU-owning types are move-only; duplication would alias the allocation.
//! - Shader compile and pipeline failures are logged and construction
//!   continues (rendering output is then undefined), never fatal.
//! - Uniform writes to names a program does not declare are silent no-ops.

mod mesh;
mod objects;
mod program;
mod renderer;
mod shaders;

pub use mesh::GpuMesh;
pub use objects::{Cube, Ground};
pub use program::{Program, ProgramDesc, UniformKind, UniformLayout};
pub use renderer::SceneRenderer;

/// Diagnostics captured from GPU validation scopes. Reported via tracing,
/// never propagated: the render policy is log-and-continue.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{stage} shader compilation failed: {message}")]
    ShaderCompile {
        stage: &'static str,
        message: String,
    },
    #[error("pipeline creation failed for '{label}': {message}")]
    PipelineCreation { label: String, message: String },
}
