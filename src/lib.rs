//! Delta Defense - A fixed-timestep arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation kernel (entities, input, spawning, collisions, loop driver)
//! - `renderer`: Shape generation and the drawing surface interface
//! - `hud`: Health and game-over stat display interface
//! - `platform`: Browser glue (canvas, DOM, keyboard)
//! - `settings`: Tunables and key bindings

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::{GameOverStats, Hud};
pub use settings::{Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Canvas dimensions (simulation units == CSS pixels)
    pub const CANVAS_WIDTH: f32 = 300.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 150.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SPEED: f32 = 7.0; // units per step
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Seconds between fire-gate openings
    pub const FIRE_PERIOD: f32 = 0.3;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 2.0; // units per step, downward
    pub const ENEMY_SIZE: f32 = 20.0;
    /// Seconds between enemy spawns
    pub const SPAWN_PERIOD: f32 = 0.7;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0; // units per step, upward
    /// Spawn offset above the player
    pub const PROJECTILE_OFFSET: f32 = 25.0;
    pub const PROJECTILE_LENGTH: f32 = 10.0;

    /// Health every body starts with
    pub const DEFAULT_HEALTH: f32 = 100.0;

    /// Collision box half-extent, shared by every entity regardless of size
    pub const COLLISION_HALF_EXTENT: f32 = 12.0;
    /// Health lost by the player per colliding pair
    pub const COLLISION_DAMAGE: f32 = 50.0;

    /// Score points per enemy hit
    pub const HIT_SCORE: f64 = 30.0;
}
