//! Shape generation for entities and overlays
//!
//! Output is backend-agnostic geometry in simulation units; a `Surface`
//! decides colors and stroke widths from the semantic `Style`.

use glam::Vec2;

use crate::hud::GameOverStats;
use crate::sim::{Body, Entity, EntityKind};

/// Velocity indicator length per unit of per-step velocity
pub const VELOCITY_INDICATOR_SCALE: f32 = 4.0;

/// Semantic drawing style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Player ship
    Outline,
    /// Enemy ship
    Filled,
    /// Projectile
    Stroke,
    /// Velocity overlay shared by every entity
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Triangle { points: [Vec2; 3], style: Style },
    Line { from: Vec2, to: Vec2, style: Style },
}

/// Text sizes used by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Body,
}

/// A line of centered overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub center: Vec2,
    pub size: TextSize,
}

/// Triangle pointing up (toward the enemies)
fn upward_triangle(body: &Body) -> [Vec2; 3] {
    let half = body.half_size();
    [
        body.pos + Vec2::new(0.0, -half.y),
        body.pos + Vec2::new(-half.x, half.y),
        body.pos + Vec2::new(half.x, half.y),
    ]
}

/// Triangle pointing down (toward the player)
fn downward_triangle(body: &Body) -> [Vec2; 3] {
    let half = body.half_size();
    [
        body.pos + Vec2::new(0.0, half.y),
        body.pos + Vec2::new(half.x, -half.y),
        body.pos + Vec2::new(-half.x, -half.y),
    ]
}

fn velocity_indicator(body: &Body) -> Option<Shape> {
    if body.vel == Vec2::ZERO {
        return None;
    }
    Some(Shape::Line {
        from: body.pos,
        to: body.pos + body.vel * VELOCITY_INDICATOR_SCALE,
        style: Style::Indicator,
    })
}

/// The entity's own shape followed by its velocity indicator
pub fn entity_shapes(entity: &Entity) -> Vec<Shape> {
    let body = &entity.body;
    let own = match entity.kind {
        EntityKind::Player(_) => Shape::Triangle {
            points: upward_triangle(body),
            style: Style::Outline,
        },
        EntityKind::Enemy(_) => Shape::Triangle {
            points: downward_triangle(body),
            style: Style::Filled,
        },
        EntityKind::Projectile(_) => {
            let half = body.half_size();
            Shape::Line {
                from: body.pos - Vec2::new(0.0, half.y),
                to: body.pos + Vec2::new(0.0, half.y),
                style: Style::Stroke,
            }
        }
    };

    let mut shapes = vec![own];
    shapes.extend(velocity_indicator(body));
    shapes
}

/// Title, three stat lines, score and restart prompt, stacked around the
/// middle of the canvas
pub fn game_over_overlay(stats: &GameOverStats, bounds: Vec2) -> Vec<TextLine> {
    let center = bounds / 2.0;
    let spacing = 24.0;
    let [hits, time, spawned] = stats.lines();

    let body_lines = [
        hits,
        time,
        spawned,
        stats.score_line(),
        "Press Space to restart".to_string(),
    ];

    let mut lines = Vec::with_capacity(body_lines.len() + 1);
    lines.push(TextLine {
        text: "Game Over".to_string(),
        center: center - Vec2::new(0.0, spacing * 3.0),
        size: TextSize::Title,
    });
    for (i, text) in body_lines.into_iter().enumerate() {
        lines.push(TextLine {
            text,
            center: center + Vec2::new(0.0, spacing * (i as f32 - 1.5)),
            size: TextSize::Body,
        });
    }
    lines
}
