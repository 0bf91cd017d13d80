//! Procedural mesh generation: subdivided cube faces and a subdivided ground
//! grid, emitted as flat position buffers.
//!
//! # Invariants
//! - Buffers are non-indexed triangle lists: every 9 floats is one triangle.
//! - Generators are pure CPU code; no GPU types leak in here.
//! - Curvature is never baked into vertex data. The ground is generated flat
//!   and bent in the vertex stage downstream.

use glam::Vec3;

/// Fixed height of the ground plane before any shader-side bending.
pub const GROUND_HEIGHT: f32 = -1.0;

/// Unit cube centered at the origin, each face tessellated into an
/// `resolution` x `resolution` grid of quads (two triangles each).
///
/// Vertex count is `6 * resolution^2 * 6`; every coordinate lies in
/// `[-0.5, 0.5]`. A resolution of 0 yields an empty buffer.
pub fn subdivided_cube(resolution: u32) -> Vec<f32> {
    let faces = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let mut vertices = Vec::with_capacity(6 * (resolution * resolution) as usize * 6 * 3);
    for normal in faces {
        add_face(&mut vertices, normal, resolution);
    }
    vertices
}

/// Tessellate one cube face. The two tangents spanning the face are derived
/// from the face normal: a component rotation plus a cross product, which
/// keeps winding consistent per face.
fn add_face(vertices: &mut Vec<f32>, normal: Vec3, resolution: u32) {
    let side1 = Vec3::new(normal.y, normal.z, normal.x);
    let side2 = normal.cross(side1);
    let step = 1.0 / resolution as f32;

    let point = |u: u32, v: u32| {
        normal * 0.5 + side1 * (u as f32 * step - 0.5) + side2 * (v as f32 * step - 0.5)
    };

    for i in 0..resolution {
        for j in 0..resolution {
            let p1 = point(i, j);
            let p2 = point(i + 1, j);
            let p3 = point(i, j + 1);
            let p4 = point(i + 1, j + 1);

            for p in [p1, p2, p3, p2, p4, p3] {
                vertices.extend_from_slice(&p.to_array());
            }
        }
    }
}

/// Flat square ground covering `[-half_extent, half_extent]^2` at
/// [`GROUND_HEIGHT`], tessellated into `resolution` x `resolution` cells of
/// two triangles each.
///
/// Resolution 1 is the single-quad flat-world ground; high resolutions give
/// the curved-world vertex stage enough geometry to bend smoothly. A
/// resolution of 0 yields an empty buffer.
pub fn ground_grid(half_extent: f32, resolution: u32) -> Vec<f32> {
    let step = half_extent * 2.0 / resolution as f32;
    let mut vertices = Vec::with_capacity((resolution * resolution) as usize * 18);

    for i in 0..resolution {
        for j in 0..resolution {
            let x = -half_extent + i as f32 * step;
            let z = -half_extent + j as f32 * step;

            #[rustfmt::skip]
            vertices.extend_from_slice(&[
                x,        GROUND_HEIGHT, z,
                x + step, GROUND_HEIGHT, z,
                x,        GROUND_HEIGHT, z + step,

                x + step, GROUND_HEIGHT, z,
                x + step, GROUND_HEIGHT, z + step,
                x,        GROUND_HEIGHT, z + step,
            ]);
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn min_max(values: impl Iterator<Item = f32>) -> (f32, f32) {
        values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    }

    #[test]
    fn cube_vertex_count() {
        for res in [1, 2, 10] {
            let verts = subdivided_cube(res);
            assert_eq!(verts.len() as u32, 6 * res * res * 6 * 3);
            assert_eq!(verts.len() % 9, 0);
        }
    }

    #[test]
    fn cube_vertices_within_unit_cube() {
        let verts = subdivided_cube(10);
        for v in &verts {
            assert!(v.abs() <= 0.5 + EPS, "coordinate {v} escapes the cube");
        }
    }

    #[test]
    fn cube_faces_touch_all_sides() {
        // Every axis must reach both -0.5 and +0.5, otherwise a face is missing.
        let verts = subdivided_cube(2);
        for axis in 0..3 {
            let (lo, hi) = min_max(verts.iter().skip(axis).step_by(3).copied());
            assert!((lo + 0.5).abs() < EPS);
            assert!((hi - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn cube_zero_resolution_is_empty() {
        assert!(subdivided_cube(0).is_empty());
    }

    #[test]
    fn ground_is_flat_at_fixed_height() {
        let verts = ground_grid(20.0, 8);
        for y in verts.iter().skip(1).step_by(3) {
            assert_eq!(*y, GROUND_HEIGHT);
        }
    }

    #[test]
    fn ground_single_quad() {
        let verts = ground_grid(20.0, 1);
        assert_eq!(verts.len(), 18);
        let (lo_x, hi_x) = min_max(verts.iter().step_by(3).copied());
        assert_eq!((lo_x, hi_x), (-20.0, 20.0));
    }

    #[test]
    fn ground_spans_extent() {
        let size = 20.0;
        let res = 500;
        let verts = ground_grid(size, res);
        assert_eq!(verts.len(), (res * res) as usize * 18);
        assert_eq!(verts.len(), 4_500_000);

        let step = size * 2.0 / res as f32;
        let (lo_x, hi_x) = min_max(verts.iter().step_by(3).copied());
        let (lo_z, hi_z) = min_max(verts.iter().skip(2).step_by(3).copied());
        assert!((lo_x + size).abs() <= step);
        assert!((hi_x - size).abs() <= step);
        assert!((lo_z + size).abs() <= step);
        assert!((hi_z - size).abs() <= step);
    }

    #[test]
    fn ground_zero_resolution_is_empty() {
        assert!(ground_grid(20.0, 0).is_empty());
    }
}
