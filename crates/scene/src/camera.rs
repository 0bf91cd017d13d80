use glam::{Mat4, Vec2, Vec3};

const UP: Vec3 = Vec3::Y;
const PITCH_LIMIT: f32 = 89.0;

/// Directions held down this frame, polled from the window's key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Free-fly camera driven by per-frame keyboard polling and cursor samples.
///
/// Yaw and pitch are kept in degrees; the cached `front` vector is recomputed
/// from them on every rotation so it is always unit length. Cursor tracking
/// owns its own baseline: the first sample after construction only records
/// the position, so a large initial jump never reaches the angles.
pub struct FlyCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    pub speed: f32,
    pub sensitivity: f32,
    last_cursor: Option<Vec2>,
}

impl Default for FlyCamera {
    fn default() -> Self {
        let yaw = -90.0;
        let pitch = 0.0;
        Self {
            position: Vec3::new(0.0, 0.0, 4.0),
            yaw,
            pitch,
            front: front_from_angles(yaw, pitch),
            speed: 2.5,
            sensitivity: 0.1,
            last_cursor: None,
        }
    }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

impl FlyCamera {
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn right(&self) -> Vec3 {
        self.front.cross(UP).normalize()
    }

    /// Move along the camera basis vectors, scaled by `speed * dt`.
    pub fn process_keyboard(&mut self, input: &MoveInput, dt: f32) {
        let velocity = self.speed * dt;
        if input.forward {
            self.position += self.front * velocity;
        }
        if input.back {
            self.position -= self.front * velocity;
        }
        if input.left {
            self.position -= self.right() * velocity;
        }
        if input.right {
            self.position += self.right() * velocity;
        }
        if input.up {
            self.position += UP * velocity;
        }
        if input.down {
            self.position -= UP * velocity;
        }
    }

    /// Apply a raw cursor delta: scale by sensitivity, accumulate into
    /// yaw/pitch, clamp pitch, recompute the forward vector.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    /// Feed an absolute cursor position from the window. The first sample
    /// only sets the baseline; later samples turn into deltas, with screen y
    /// flipped (screen coordinates grow downward).
    pub fn track_cursor(&mut self, x: f32, y: f32) {
        let current = Vec2::new(x, y);
        if let Some(last) = self.last_cursor {
            self.process_mouse_movement(current.x - last.x, last.y - current.y);
        }
        self.last_cursor = Some(current);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_front_is_unit_and_points_down_negative_z() {
        let cam = FlyCamera::default();
        assert!((cam.front().length() - 1.0).abs() < EPS);
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn mouse_movement_accumulates_yaw() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(100.0, 0.0);
        assert!((cam.yaw() - -80.0).abs() < EPS);
        assert_eq!(cam.pitch(), 0.0);
        assert!((cam.front().length() - 1.0).abs() < EPS);
        // Turned to the right, so front picks up a +x component.
        assert!(cam.front().x > 0.0);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 1e6);
        assert_eq!(cam.pitch(), 89.0);
        cam.process_mouse_movement(0.0, -1e7);
        assert_eq!(cam.pitch(), -89.0);
        for i in 0..100 {
            cam.process_mouse_movement((i % 7) as f32 * 31.0, (i % 13) as f32 * -97.0);
            assert!(cam.pitch().abs() <= 89.0);
            assert!((cam.front().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn first_cursor_sample_is_discarded() {
        let mut cam = FlyCamera::default();
        let front = cam.front();
        cam.track_cursor(812.0, 455.0);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.front(), front);

        // Second sample produces a delta; screen y is flipped.
        cam.track_cursor(912.0, 455.0);
        assert!((cam.yaw() - -80.0).abs() < EPS);
        cam.track_cursor(912.0, 465.0);
        assert!((cam.pitch() - -1.0).abs() < EPS);
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut cam = FlyCamera::default();
        let input = MoveInput {
            forward: true,
            ..MoveInput::default()
        };
        cam.process_keyboard(&input, 1.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0 - 2.5), EPS));

        let input = MoveInput {
            right: true,
            up: true,
            ..MoveInput::default()
        };
        cam.process_keyboard(&input, 0.4);
        assert!(cam.position.abs_diff_eq(Vec3::new(1.0, 1.0, 1.5), EPS));
    }

    #[test]
    fn view_matrix_is_look_at_from_state() {
        let cam = FlyCamera::default();
        let expected =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, EPS));
    }
}
