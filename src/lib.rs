//! Vector Rocks - a single-screen vector space shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, spawning, game state)
//! - `renderer`: Renderer interface and scene drawing
//! - `platform`: Input and frame-clock abstraction
//! - `audio`: Sound cue dispatch
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Duration of one simulation frame (60 Hz host refresh)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum frames stepped per host callback to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Ship outline scale for the player (and the life indicators)
    pub const PLAYER_SIZE: f32 = 1.5;
    /// Saucer outline scales
    pub const BIG_SAUCER: f32 = 5.0;
    pub const SMALL_SAUCER: f32 = 2.5;

    /// Asteroid outline scales (diameter classes)
    pub const BIG_ASTEROID: f32 = 12.0;
    pub const MED_ASTEROID: f32 = 6.0;
    pub const SMALL_ASTEROID: f32 = 3.0;

    /// Fastest an asteroid may drift (px per frame)
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;

    /// Max turn per frame (radians), shared by player input and saucer AI
    pub const ROTATION_SPEED: f32 = 0.08;
    /// How far a player shot travels before expiring; also the saucer's firing range
    pub const SHOT_DISTANCE: f32 = 600.0;
    /// Shot muzzle speed (px per frame)
    pub const SHOT_SPEED: f32 = 10.0;
    /// Minimum time between player shots (ms)
    pub const SHOT_INTERVAL: f32 = 150.0;
    /// Player top speed (px per frame)
    pub const MAX_SPEED: f32 = 7.0;
    /// Thrust acceleration (px per frame²)
    pub const THRUSTERS_ACCELERATION: f32 = 0.15;
    /// Explosion particle spread radius
    pub const BLAST_SIZE: f32 = 24.0;
    /// Frames an explosion stays on screen before the entity is `done`
    pub const EXPLOSION_FRAMES: u32 = 30;

    /// Placement draws before a spawn falls back to a fixed position
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

    /// Footer text
    pub const FOOTER_TEXT: &str = "1979 Atari Inc";
    pub const FOOTER_Y: f32 = 660.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}
