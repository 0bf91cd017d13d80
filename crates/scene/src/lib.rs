//! CPU-side scene state: the free-fly camera and the fixed scene layout for
//! the flat- and curved-world configurations.
//!
//! # Invariants
//! - Camera pitch stays within [-89, 89] degrees; the forward vector is unit
//!   length after every update.
//! - Scene layout is fixed at startup; model matrices are recomputed every
//!   frame, never stored.

mod camera;
mod layout;

pub use camera::{FlyCamera, MoveInput};
pub use layout::{
    DARK_COLOR, FOV_Y_DEGREES, LIGHT_COLOR, SKY_COLOR, SceneConfig, WorldMode, Z_FAR, Z_NEAR,
    cube_model, pillar_model, projection_matrix, ring_position,
};
