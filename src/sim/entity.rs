//! Bodies and per-variant behavior
//!
//! Every simulated object is an `Entity`: a shared `Body` plus one variant
//! of the closed `EntityKind` set. Variants implement `Behavior`, and
//! `Entity::update` dispatches to them with the body borrowed separately.

use std::f32::consts::SQRT_2;

use glam::Vec2;

use super::input::Controller;
use crate::consts::{ENEMY_SIZE, PLAYER_SIZE, PROJECTILE_LENGTH};
use crate::settings::Tuning;

/// Entity identifier, assigned from the session counter
pub type EntityId = u32;

/// The player is always the first entity created in a session
pub const PLAYER_ID: EntityId = 0;

/// State shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height
    pub size: Vec2,
    pub health: f32,
}

impl Body {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, health: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            health,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Advance position by one step of velocity (velocities are per step)
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Read-only context handed to every behavior for one step
#[derive(Debug, Clone, Copy)]
pub struct StepEnv<'a> {
    pub dt: f32,
    pub tuning: &'a Tuning,
}

/// Requests a behavior makes of the world; applied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Queue this entity for removal
    pub remove: bool,
    /// Spawn a projectile from the player
    pub fire: bool,
}

/// Per-variant update logic
pub trait Behavior {
    fn update(&mut self, body: &mut Body, env: &StepEnv) -> StepOutcome;
}

/// The player-controlled ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub controller: Controller,
    pub fire_timer: f32,
    pub fire_period: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            controller: Controller::default(),
            fire_timer: 0.0,
            fire_period: tuning.fire_period,
            speed: tuning.player_speed,
        }
    }

    fn step_movement(&self, body: &mut Body, bounds: Vec2) {
        let move_x = self.controller.move_x as f32;
        let move_y = self.controller.move_y as f32;

        if self.controller.move_x == 0 {
            body.vel.y = self.speed * move_y;
            body.integrate();
        } else if self.controller.move_y == 0 {
            body.vel.x = self.speed * move_x;
            body.integrate();
        } else {
            // Diagonal: per-axis delta is speed/sqrt(2)
            let raw = self.speed * SQRT_2;
            body.vel = Vec2::new(raw * move_x, raw * move_y);
            body.pos += body.vel / 2.0;
        }

        body.pos = body.pos.clamp(Vec2::ZERO, bounds);
        body.vel = Vec2::ZERO;
    }
}

impl Behavior for Player {
    fn update(&mut self, body: &mut Body, env: &StepEnv) -> StepOutcome {
        self.step_movement(body, env.tuning.bounds());

        // Periodic gate: the trigger is only sampled when the period elapses
        let mut fire = false;
        self.fire_timer += env.dt;
        if self.fire_timer >= self.fire_period {
            self.fire_timer = 0.0;
            fire = self.controller.action_1;
        }

        StepOutcome {
            remove: false,
            fire,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub speed: f32,
}

impl Behavior for Enemy {
    fn update(&mut self, body: &mut Body, env: &StepEnv) -> StepOutcome {
        body.vel.y = self.speed;
        // Checked before integration, against this step's starting position
        let below_field = body.pos.y.clamp(0.0, env.tuning.canvas_height) < body.pos.y;
        body.integrate();
        StepOutcome {
            remove: below_field,
            fire: false,
        }
    }
}

/// A player shot travelling up the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub speed: f32,
}

impl Behavior for Projectile {
    fn update(&mut self, body: &mut Body, env: &StepEnv) -> StepOutcome {
        body.vel.y = -self.speed;
        body.pos += body.vel;
        let above_field = body.pos.y.clamp(0.0, env.tuning.canvas_height) > body.pos.y;
        StepOutcome {
            remove: above_field,
            fire: false,
        }
    }
}

/// Closed set of entity variants
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Player(Player),
    Enemy(Enemy),
    Projectile(Projectile),
}

/// A simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn player(id: EntityId, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                id,
                tuning.player_start,
                Vec2::splat(PLAYER_SIZE),
                tuning.default_health,
            ),
            kind: EntityKind::Player(Player::new(tuning)),
        }
    }

    pub fn enemy(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(id, pos, Vec2::splat(ENEMY_SIZE), tuning.default_health),
            kind: EntityKind::Enemy(Enemy {
                speed: tuning.enemy_speed,
            }),
        }
    }

    pub fn projectile(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                id,
                pos,
                Vec2::new(0.0, PROJECTILE_LENGTH),
                tuning.default_health,
            ),
            kind: EntityKind::Projectile(Projectile {
                speed: tuning.projectile_speed,
            }),
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Run this entity's behavior for one step
    pub fn update(&mut self, env: &StepEnv) -> StepOutcome {
        match &mut self.kind {
            EntityKind::Player(player) => player.update(&mut self.body, env),
            EntityKind::Enemy(enemy) => enemy.update(&mut self.body, env),
            EntityKind::Projectile(projectile) => projectile.update(&mut self.body, env),
        }
    }
}
