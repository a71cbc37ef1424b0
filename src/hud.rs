//! HUD interface
//!
//! The simulation never touches the DOM; the platform implements `Hud` and
//! `present_hud` feeds it once per step.

use crate::sim::{Mode, SessionStats, World};

/// Stats shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverStats {
    pub hits: f64,
    pub elapsed_secs: f64,
    pub enemies_spawned: u32,
    pub score: u64,
}

impl From<&SessionStats> for GameOverStats {
    fn from(stats: &SessionStats) -> Self {
        Self {
            hits: stats.hits(),
            elapsed_secs: stats.elapsed_alive,
            enemies_spawned: stats.enemies_spawned,
            score: stats.score,
        }
    }
}

impl GameOverStats {
    /// The three stat lines, in display order
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Enemies hit: {}", self.hits),
            format!("Time alive: {:.1}s", self.elapsed_secs),
            format!("Enemies spawned: {}", self.enemies_spawned),
        ]
    }

    pub fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Text display outside the canvas
pub trait Hud {
    fn set_health(&mut self, health: f32);
    fn show_game_over(&mut self, stats: &GameOverStats);
    fn hide_game_over(&mut self);
}

/// Push the current world state to the HUD
pub fn present_hud(world: &World, hud: &mut impl Hud) {
    hud.set_health(world.player_health());
    match world.mode() {
        Mode::GameOver => hud.show_game_over(&GameOverStats::from(&world.stats)),
        Mode::Running => hud.hide_game_over(),
    }
}
