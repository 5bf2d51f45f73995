//! Flappy - side-scrolling obstacle game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipe pool, collisions, game phases)
//! - `scene`: Glue between the simulation and the host engine
//! - `platform`: Host engine abstraction (transforms, sprites, input, animation)
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use scene::GameScene;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Logical screen dimensions (y points up, origin bottom-left)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Bird physics
    pub const GRAVITY: f32 = 660.0;
    pub const TAP_IMPULSE: f32 = 280.0;
    /// Vertical speed past which the bird starts tilting
    pub const ROT_TRIGGER: f32 = 200.0;
    pub const MAX_ANGLE: f32 = std::f32::consts::PI / 6.0;
    pub const MIN_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
    /// Tilt rate (radians/sec)
    pub const ANGULAR_VELOCITY: f32 = std::f32::consts::PI * 4.0;

    /// Bird defaults
    pub const BIRD_START_X: f32 = 80.0;
    pub const BIRD_START_Y: f32 = 240.0;
    pub const BIRD_WIDTH: f32 = 48.0;
    pub const BIRD_HEIGHT: f32 = 32.0;
    /// Top of the ground strip; falling below it ends the run
    pub const FLOOR_Y: f32 = 100.0;
    /// Sky limit; the bird is held here instead of dying
    pub const CEILING_Y: f32 = SCREEN_HEIGHT;
    /// Shrink applied to the bird box before pipe tests (forgiving hits)
    pub const HIT_TOLERANCE: f32 = 8.0;

    /// Horizontal scroll speed shared by ground and pipes (pixels/s)
    pub const SCROLL_VELOCITY: f32 = 150.0;

    /// Ground strip
    pub const GROUND_WIDTH: f32 = 420.0;
    pub const GROUND_HEIGHT: f32 = 140.0;
    pub const GROUND_WRAP_LIMIT: f32 = -100.0;
    /// One stripe period of the ground texture, so the nudge is seamless
    pub const GROUND_WRAP_OFFSET: f32 = 84.0;

    /// Pipe sprite dimensions (from the pipe texture)
    pub const PIPE_WIDTH: f32 = 65.0;
    pub const PIPE_HEIGHT: f32 = 400.0;
    pub const PIPE_HALF_WIDTH: f32 = 32.0;
    /// Pipes left of this are retired
    pub const PIPE_CULL_X: f32 = -50.0;
    /// Parking spot for pipes that are not in play
    pub const PIPE_PARK_X: f32 = -100.0;
    pub const PIPE_PARK_TOP_Y: f32 = 210.0;
    pub const PIPE_PARK_BOTTOM_Y: f32 = 160.0;
    /// New pipes appear just past the right edge
    pub const PIPE_RESPAWN_X: f32 = SCREEN_WIDTH + 20.0;

    /// Pipe system defaults
    pub const PIPE_CAPACITY: usize = 6;
    pub const PIPE_GAP: f32 = 120.0;
    pub const PIPE_MIN_HEIGHT: f32 = 150.0;
    pub const PIPE_MAX_HEIGHT: f32 = 300.0;
    pub const PIPE_RATE: f32 = 1.2;
    pub const PIPE_DELAY: f32 = 1.5;
}

/// Lower-left corner of a `size` box centred on `center`
#[inline]
pub fn centered_corner(center: Vec2, size: Vec2) -> Vec2 {
    center - size / 2.0
}

/// Step `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}
