//! Rendering interface
//!
//! The core describes what to draw; a `Surface` implementation paints it.
//! `draw_frame` runs once per fixed step, after the update.

pub mod shapes;

pub use shapes::{Shape, Style, TextLine, TextSize, entity_shapes, game_over_overlay};

use crate::hud::GameOverStats;
use crate::sim::{Mode, World};

/// A 2D drawing target
pub trait Surface {
    /// Clear the whole playfield
    fn clear(&mut self, width: f32, height: f32);
    fn draw_shape(&mut self, shape: &Shape);
    fn draw_text(&mut self, line: &TextLine);
}

/// Paint every entity, plus the game-over overlay when the player is dead
pub fn draw_frame(world: &World, surface: &mut impl Surface) {
    let bounds = world.tuning().bounds();
    surface.clear(bounds.x, bounds.y);

    for entity in world.registry.iter() {
        for shape in entity_shapes(entity) {
            surface.draw_shape(&shape);
        }
    }

    if world.mode() == Mode::GameOver {
        let stats = GameOverStats::from(&world.stats);
        for line in game_over_overlay(&stats, bounds) {
            surface.draw_text(&line);
        }
    }
}
