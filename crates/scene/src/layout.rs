use glam::{Mat4, Quat, Vec3};
use std::f32::consts::TAU;

/// Checker pattern colors shared by both world modes.
pub const LIGHT_COLOR: Vec3 = Vec3::new(0.9, 0.9, 0.9);
pub const DARK_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Sky clear color (RGBA).
pub const SKY_COLOR: [f64; 4] = [0.53, 0.81, 0.92, 1.0];

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Axis the flat-world cubes spin around, normalized at use.
const SPIN_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);

/// Which of the two mutually exclusive rendering configurations a run uses.
/// Fixed at startup; never toggled mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldMode {
    Flat,
    Curved,
}

/// Fixed scene description for one world mode.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub mode: WorldMode,
    pub window_width: u32,
    pub window_height: u32,
    pub cube_resolution: u32,
    pub ring_count: u32,
    pub ring_radius: f32,
    pub ring_height: f32,
    /// Degrees per second; zero disables spinning.
    pub spin_speed: f32,
    pub pillar: bool,
    pub ground_half_extent: f32,
    pub ground_resolution: u32,
    pub grid_size: f32,
    /// Coefficient of the view-space bend; zero in flat mode.
    pub curve_amount: f32,
}

impl SceneConfig {
    /// Plain model-view-projection world: single-quad ground, spinning cubes.
    pub fn flat() -> Self {
        Self {
            mode: WorldMode::Flat,
            window_width: 800,
            window_height: 600,
            cube_resolution: 1,
            ring_count: 5,
            ring_radius: 5.0,
            ring_height: 0.0,
            spin_speed: 50.0,
            pillar: false,
            ground_half_extent: 20.0,
            ground_resolution: 1,
            grid_size: 1.0,
            curve_amount: 0.0,
        }
    }

    /// Bowl-shaped world: densely subdivided geometry bent in the vertex
    /// stage, static cubes, one tall pillar.
    pub fn curved() -> Self {
        Self {
            mode: WorldMode::Curved,
            window_width: 1600,
            window_height: 1200,
            cube_resolution: 10,
            ring_count: 5,
            ring_radius: 5.0,
            ring_height: 1.0,
            spin_speed: 0.0,
            pillar: true,
            ground_half_extent: 20.0,
            ground_resolution: 500,
            grid_size: 2.0,
            curve_amount: 0.2,
        }
    }
}

/// Slot `i` of `n` on a circle of the given radius in the ground plane.
pub fn ring_position(i: u32, n: u32, radius: f32) -> Vec3 {
    let angle = TAU * i as f32 / n as f32;
    Vec3::new(radius * angle.cos(), 0.0, -radius * angle.sin())
}

/// Model matrix for ring cube `i` at the given elapsed time.
pub fn cube_model(config: &SceneConfig, i: u32, time: f32) -> Mat4 {
    let slot = ring_position(i, config.ring_count, config.ring_radius)
        + Vec3::new(0.0, config.ring_height, 0.0);
    let rotation = if config.spin_speed != 0.0 {
        Mat4::from_axis_angle(
            SPIN_AXIS.normalize(),
            (time * config.spin_speed).to_radians(),
        )
    } else {
        Mat4::IDENTITY
    };
    Mat4::from_translation(slot) * rotation
}

/// Model matrix for the tall pillar cube: a unit cube stretched to 10 units
/// of height, standing at x = 3, z = 3.
pub fn pillar_model() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 10.0, 1.0),
        Quat::IDENTITY,
        Vec3::new(3.0, 0.0, 3.0),
    )
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn ring_positions_lie_on_circle() {
        for i in 0..5 {
            let p = ring_position(i, 5, 5.0);
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 5.0).abs() < EPS);
            assert_eq!(p.y, 0.0);
        }
        assert!(ring_position(0, 5, 5.0).abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn static_cube_model_is_pure_translation() {
        let config = SceneConfig::curved();
        let model = cube_model(&config, 0, 123.0);
        let expected = Mat4::from_translation(Vec3::new(5.0, 1.0, 0.0));
        assert!(model.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn spinning_cube_model_varies_with_time() {
        let config = SceneConfig::flat();
        let a = cube_model(&config, 0, 0.0);
        let b = cube_model(&config, 0, 1.0);
        assert!(!a.abs_diff_eq(b, EPS));
        // The translation column stays put while the cube spins in place.
        assert!(a.col(3).abs_diff_eq(b.col(3), EPS));
    }

    #[test]
    fn pillar_stretches_and_stands_off_center() {
        let m = pillar_model();
        let top = m.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(top.abs_diff_eq(Vec3::new(3.0, 5.0, 3.0), EPS));
        let base = m.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!(base.abs_diff_eq(Vec3::new(3.0, -5.0, 3.0), EPS));
    }

    #[test]
    fn mode_configs_differ_where_it_matters() {
        let flat = SceneConfig::flat();
        let curved = SceneConfig::curved();
        assert_eq!(flat.curve_amount, 0.0);
        assert_eq!(curved.curve_amount, 0.2);
        assert_eq!(flat.ground_resolution, 1);
        assert_eq!(curved.ground_resolution, 500);
        assert!(flat.spin_speed > 0.0);
        assert_eq!(curved.spin_speed, 0.0);
        assert!(!flat.pillar);
        assert!(curved.pillar);
    }
}
