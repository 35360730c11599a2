//! Slime Hoops - A two-player slime basketball arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (slime motion, shots, star bursts, scoring)
//! - `tuning`: Designer-facing physics parameters
//! - `platform`: Key mapping, the per-frame driver with pause, and draw data
//! - `persistence`: JSON snapshots of game state for logging/export

pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tunables;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size in pixels (16:9)
    pub const CANVAS_WIDTH: f32 = 1280.0;
    pub const CANVAS_HEIGHT: f32 = 720.0;

    /// Horizontal play bounds (fraction of canvas width)
    pub const MIN_X: f32 = 0.05;
    pub const MAX_X: f32 = 0.95;

    /// Resting y of a slime (fraction of canvas height)
    pub const GROUND_Y: f32 = 0.75;

    /// Starting x positions
    pub const SINGLE_PLAYER_X: f32 = 0.2;
    pub const LEFT_PLAYER_X: f32 = 0.3;
    pub const RIGHT_PLAYER_X: f32 = 0.7;

    /// Net positions (fractions of canvas size)
    pub const LEFT_NET: (f32, f32) = (0.1, 0.35);
    pub const RIGHT_NET: (f32, f32) = (0.9, 0.35);

    /// Tunable rescaling into simulation units
    pub const GRAVITY_SCALE: f32 = 0.003;
    pub const JUMP_VELOCITY_SCALE: f32 = 0.05;
    pub const MOVE_SPEED_SCALE: f32 = 0.02;

    /// Time to full charge at charge_speed = 1 (ms)
    pub const BASE_CHARGE_TIME_MS: f64 = 2000.0;

    /// Hit sprite: 6 frames at 12 fps
    pub const HIT_FRAME_COUNT: u32 = 6;
    pub const ANIMATION_FPS: f64 = 12.0;
    pub const HIT_ANIMATION_MS: f64 = HIT_FRAME_COUNT as f64 * 1000.0 / ANIMATION_FPS;

    /// Shot flight time: 1500ms at zero charge, 500ms at full charge
    pub const SHOT_BASE_DURATION_MS: f64 = 1500.0;
    pub const SHOT_CHARGE_DURATION_MS: f64 = 1000.0;
    /// Arc height relative to start-target distance
    pub const ARC_HEIGHT_RATIO: f32 = 0.5;
    /// Below this distance (pixels) a trajectory is degenerate
    pub const MIN_TRAJECTORY_DISTANCE: f32 = 1e-3;

    /// Post-bounce physics (per frame)
    pub const BOUNCE_LIFETIME_MS: f64 = 1000.0;
    pub const BOUNCE_GRAVITY: f32 = 20.0;
    pub const BOUNCE_STEP: f32 = 0.05;
    pub const BOUNCE_SQUISH: f32 = 0.7;
    pub const SQUISH_RECOVERY_MS: f64 = 200.0;

    /// Star burst on score
    pub const STAR_BURST_COUNT: usize = 15;
    /// Downward pull on stars (pixels/frame²)
    pub const STAR_GRAVITY: f32 = 0.1;
    pub const STAR_MIN_LIFESPAN_MS: f64 = 500.0;
    pub const STAR_MAX_LIFESPAN_MS: f64 = 1000.0;
}

/// Convert a normalized canvas position into pixels
#[inline]
pub fn to_pixels(normalized: glam::Vec2, canvas: glam::Vec2) -> glam::Vec2 {
    normalized * canvas
}
