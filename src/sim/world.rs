//! Session context
//!
//! `World` owns everything a play-through mutates: the entity arena, the
//! spawner, the collision system, input state and counters. `restart`
//! rebuilds all of it with a fresh spawner seed.

use glam::Vec2;

use super::collision::CollisionSystem;
use super::entity::{Entity, EntityId, PLAYER_ID, Player};
use super::error::SimError;
use super::input::{Controller, InputSource};
use super::registry::EntityRegistry;
use super::spawner::Spawner;
use super::stats::SessionStats;
use crate::settings::{Settings, Tuning};

/// Top-level simulation mode, derived from player health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct World {
    pub registry: EntityRegistry,
    pub input: InputSource,
    pub stats: SessionStats,
    pub(crate) spawner: Spawner,
    pub(crate) collisions: CollisionSystem,
    pub(crate) tuning: Tuning,
    /// Seed of the running session
    seed: u64,
    /// Seed queued by the platform for the next restart
    next_seed: Option<u64>,
}

impl World {
    /// Create a world and start the first session
    pub fn new(settings: &Settings) -> Self {
        let mut world = Self {
            registry: EntityRegistry::new(),
            input: InputSource::new(settings.bindings.clone()),
            stats: SessionStats::default(),
            spawner: Spawner::new(&settings.tuning, settings.seed),
            collisions: CollisionSystem::new(&settings.tuning),
            tuning: settings.tuning.clone(),
            seed: settings.seed,
            next_seed: None,
        };
        world.restart(settings.seed);
        world
    }

    /// Reset every session counter and rebuild player, spawner and
    /// collision system with the spawner seeded from `seed`. Held keys
    /// survive.
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.registry.clear();
        self.stats = SessionStats::default();
        let tuning = &self.tuning;
        let player_id = self.registry.spawn(|id| Entity::player(id, tuning));
        debug_assert_eq!(player_id, PLAYER_ID);
        self.spawner = Spawner::new(&self.tuning, self.seed);
        self.collisions = CollisionSystem::new(&self.tuning);
        log::info!("Session started (seed {})", self.seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Use `seed` for the next restart triggered from inside the step
    pub fn set_next_seed(&mut self, seed: u64) {
        self.next_seed = Some(seed);
    }

    /// Seed for the restart about to happen: the queued one, otherwise a
    /// draw from the ending session's spawner
    pub(crate) fn take_next_seed(&mut self) -> u64 {
        match self.next_seed.take() {
            Some(seed) => seed,
            None => self.spawner.next_seed(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> Option<&Entity> {
        self.registry.get(PLAYER_ID)
    }

    pub fn player_state(&self) -> Option<&Player> {
        self.player().and_then(Entity::as_player)
    }

    /// The player's controller as of the last poll
    pub fn controller(&self) -> Controller {
        self.player_state()
            .map(|p| p.controller)
            .unwrap_or_default()
    }

    /// Current player health (0 if the player is missing)
    pub fn player_health(&self) -> f32 {
        self.player().map_or(0.0, |p| p.body.health)
    }

    pub fn is_player_dead(&self) -> bool {
        self.player().is_none_or(|p| p.body.is_dead())
    }

    pub fn mode(&self) -> Mode {
        if self.is_player_dead() {
            Mode::GameOver
        } else {
            Mode::Running
        }
    }

    pub fn spawner_enabled(&self) -> bool {
        self.spawner.is_enabled()
    }

    /// Rebuild the player's controller from the current key set
    pub fn poll_input(&mut self) {
        if let Some(player) = self
            .registry
            .get_mut(PLAYER_ID)
            .and_then(Entity::as_player_mut)
        {
            self.input.poll_controller(&mut player.controller);
        }
    }

    /// Spawn a projectile just above the player
    pub fn spawn_projectile(&mut self) -> Result<EntityId, SimError> {
        spawn_projectile(&mut self.registry, &self.tuning)
    }
}

/// Spawn a projectile offset upward from the player's current position.
/// Fails without touching the registry if there is no player.
pub(crate) fn spawn_projectile(
    registry: &mut EntityRegistry,
    tuning: &Tuning,
) -> Result<EntityId, SimError> {
    let origin = registry
        .get(PLAYER_ID)
        .ok_or(SimError::EntityNotFound(PLAYER_ID))?
        .body
        .pos;
    let pos = origin - Vec2::new(0.0, tuning.projectile_offset);
    Ok(registry.spawn(|id| Entity::projectile(id, pos, tuning)))
}
