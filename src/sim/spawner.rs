//! Timer-driven enemy spawner

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId};
use super::registry::EntityRegistry;
use super::stats::SessionStats;
use crate::settings::Tuning;

#[derive(Debug, Clone)]
pub struct Spawner {
    timer: f32,
    period: f32,
    enabled: bool,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            timer: 0.0,
            period: tuning.spawn_period,
            enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Draw a seed for the next session from this session's stream
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Stop spawning for the rest of the session
    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("Spawner disabled");
        }
        self.enabled = false;
    }

    /// Advance the timer; spawns one enemy along the top edge each period
    pub fn update(
        &mut self,
        dt: f32,
        registry: &mut EntityRegistry,
        stats: &mut SessionStats,
        tuning: &Tuning,
    ) -> Option<EntityId> {
        if !self.enabled {
            return None;
        }

        self.timer += dt;
        if self.timer < self.period {
            return None;
        }
        self.timer = 0.0;

        let x = self.rng.random_range(0.0..=tuning.canvas_width);
        let id = registry.spawn(|id| Entity::enemy(id, Vec2::new(x, 0.0), tuning));
        stats.enemies_spawned += 1;
        log::debug!("Spawned enemy {} at x={:.1}", id, x);
        Some(id)
    }
}
