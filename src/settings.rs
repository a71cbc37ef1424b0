//! Game settings and tunables
//!
//! Defaults come from `crate::consts`. The web platform may override any of
//! them with a JSON blob; nothing is persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::input::KeyBindings;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Numeric gameplay constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_start: Vec2,
    /// Units per step
    pub player_speed: f32,
    /// Seconds
    pub fire_period: f32,
    /// Units per step, downward
    pub enemy_speed: f32,
    /// Seconds
    pub spawn_period: f32,
    /// Units per step, upward
    pub projectile_speed: f32,
    pub projectile_offset: f32,
    pub collision_half_extent: f32,
    pub collision_damage: f32,
    pub default_health: f32,
    /// Points per enemy destroyed
    pub hit_score: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_speed: PLAYER_SPEED,
            fire_period: FIRE_PERIOD,
            enemy_speed: ENEMY_SPEED,
            spawn_period: SPAWN_PERIOD,
            projectile_speed: PROJECTILE_SPEED,
            projectile_offset: PROJECTILE_OFFSET,
            collision_half_extent: COLLISION_HALF_EXTENT,
            collision_damage: COLLISION_DAMAGE,
            default_health: DEFAULT_HEALTH,
            hit_score: HIT_SCORE,
        }
    }
}

impl Tuning {
    /// Playfield upper corner; the lower corner is the origin
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(SettingsError::Invalid("canvas must have a positive size"));
        }
        if self.fire_period <= 0.0 || self.spawn_period <= 0.0 {
            return Err(SettingsError::Invalid("timer periods must be positive"));
        }
        Ok(())
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub bindings: KeyBindings,
    /// Seed for the first session's enemy placement
    pub seed: u64,
    /// Optional cap on fixed steps per frame (None = always catch up)
    pub max_substeps: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            bindings: KeyBindings::default(),
            seed: 0x5EED,
            max_substeps: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
