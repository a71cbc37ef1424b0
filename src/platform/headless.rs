//! Headless platform: counts what would be drawn and logs the HUD

use crate::hud::{GameOverStats, Hud};
use crate::renderer::{Shape, Surface, TextLine};

/// Surface that only keeps per-frame counts
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub frames: u64,
    pub shapes_last_frame: usize,
    pub text_last_frame: Vec<String>,
}

impl Surface for HeadlessSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
        self.shapes_last_frame = 0;
        self.text_last_frame.clear();
    }

    fn draw_shape(&mut self, _shape: &Shape) {
        self.shapes_last_frame += 1;
    }

    fn draw_text(&mut self, line: &TextLine) {
        self.text_last_frame.push(line.text.clone());
    }
}

/// HUD that logs health changes and the game-over screen once
#[derive(Debug, Default)]
pub struct LogHud {
    health: Option<f32>,
    game_over: Option<GameOverStats>,
}

impl LogHud {
    pub fn game_over(&self) -> Option<&GameOverStats> {
        self.game_over.as_ref()
    }
}

impl Hud for LogHud {
    fn set_health(&mut self, health: f32) {
        if self.health != Some(health) {
            log::info!("Health: {}", health);
            self.health = Some(health);
        }
    }

    fn show_game_over(&mut self, stats: &GameOverStats) {
        if self.game_over.is_none() {
            for line in stats.lines() {
                log::info!("{}", line);
            }
            log::info!("{}", stats.score_line());
        }
        self.game_over = Some(*stats);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}
