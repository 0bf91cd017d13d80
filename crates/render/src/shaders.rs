//! WGSL sources for the per-object programs, one vertex/fragment pair per
//! renderable per world mode.
//!
//! The `Uniforms` struct in each source must match the [`UniformLayout`] the
//! paired descriptor declares, field for field. The ground fragment stage is
//! shared by both modes; it only reads fields both layouts have.

use crate::program::{ProgramDesc, UniformKind, UniformLayout};
use curveworld_scene::WorldMode;

pub const CUBE_VS_FLAT: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return u.projection * u.view * u.model * vec4<f32>(position, 1.0);
}
"#;

/// Bends view space upward by the squared horizontal distance from the
/// camera axis, turning the world into a bowl.
pub const CUBE_VS_CURVED: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    curve_amount: f32,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    var view_pos = u.view * u.model * vec4<f32>(position, 1.0);
    let dist_sq = view_pos.x * view_pos.x + view_pos.z * view_pos.z;
    view_pos.y += dist_sq * u.curve_amount;
    return u.projection * view_pos;
}
"#;

pub const CUBE_FS: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2, 1.0);
}
"#;

pub const GROUND_VS_FLAT: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_color: vec3<f32>,
    dark_color: vec3<f32>,
    grid_size: f32,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    let world = u.model * vec4<f32>(position, 1.0);
    var out: VertexOutput;
    out.world_pos = world.xyz;
    out.clip_position = u.projection * u.view * world;
    return out;
}
"#;

/// The bowl world needs a far wider apron than the flat one for the wall
/// effect to read, so x/z are stretched before the bend is applied.
pub const GROUND_VS_CURVED: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_color: vec3<f32>,
    dark_color: vec3<f32>,
    grid_size: f32,
    curve_amount: f32,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var stretched = position;
    stretched.x = stretched.x * 15.0;
    stretched.z = stretched.z * 15.0;
    let world = u.model * vec4<f32>(stretched, 1.0);

    var view_pos = u.view * world;
    let dist_sq = view_pos.x * view_pos.x + view_pos.z * view_pos.z;
    view_pos.y += dist_sq * u.curve_amount;

    var out: VertexOutput;
    out.world_pos = world.xyz;
    out.clip_position = u.projection * view_pos;
    return out;
}
"#;

/// Checkerboard with grid lines, computed per pixel from world-space xz.
pub const GROUND_FS: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_color: vec3<f32>,
    dark_color: vec3<f32>,
    grid_size: f32,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

@fragment
fn fs_main(@location(0) world_pos: vec3<f32>) -> @location(0) vec4<f32> {
    let grid_coord = world_pos.xz / u.grid_size;
    let grid_pos = floor(grid_coord);

    let pattern = abs(grid_pos.x + grid_pos.y) % 2.0;
    let base = mix(u.light_color, u.dark_color, pattern);

    let grid_lines = abs(fract(grid_coord) - 0.5) * 2.0;
    let line_width = 0.05;
    let lines = smoothstep(0.0, line_width, grid_lines.x)
        * smoothstep(0.0, line_width, grid_lines.y);

    let final_color = mix(vec3<f32>(0.2), base, lines);
    return vec4<f32>(final_color, 1.0);
}
"#;

const MVP_FIELDS: [(&str, UniformKind); 3] = [
    ("model", UniformKind::Mat4),
    ("view", UniformKind::Mat4),
    ("projection", UniformKind::Mat4),
];

const GRID_FIELDS: [(&str, UniformKind); 3] = [
    ("light_color", UniformKind::Vec3),
    ("dark_color", UniformKind::Vec3),
    ("grid_size", UniformKind::F32),
];

const CURVE_FIELD: (&str, UniformKind) = ("curve_amount", UniformKind::F32);

pub fn cube_program(mode: WorldMode) -> ProgramDesc {
    let mut fields = MVP_FIELDS.to_vec();
    let vertex_source = match mode {
        WorldMode::Flat => CUBE_VS_FLAT,
        WorldMode::Curved => {
            fields.push(CURVE_FIELD);
            CUBE_VS_CURVED
        }
    };
    ProgramDesc {
        label: "cube_program",
        vertex_source,
        fragment_source: CUBE_FS,
        layout: UniformLayout::new(&fields),
    }
}

pub fn ground_program(mode: WorldMode) -> ProgramDesc {
    let mut fields = MVP_FIELDS.to_vec();
    fields.extend(GRID_FIELDS);
    let vertex_source = match mode {
        WorldMode::Flat => GROUND_VS_FLAT,
        WorldMode::Curved => {
            fields.push(CURVE_FIELD);
            GROUND_VS_CURVED
        }
    };
    ProgramDesc {
        label: "ground_program",
        vertex_source,
        fragment_source: GROUND_FS,
        layout: UniformLayout::new(&fields),
    }
}
