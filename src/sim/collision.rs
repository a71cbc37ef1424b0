//! Pairwise collision detection and resolution
//!
//! Every ordered pair of live entities is tested against a fixed-size box
//! centred on each position; per-entity `size` is not consulted. Because
//! both (a, b) and (b, a) are visited, a physical enemy/projectile overlap
//! is resolved twice, and the hit counter moves by two. Resolution only
//! queues removals, so every pair in the step sees the same registry.

use glam::Vec2;

use super::entity::{EntityId, PLAYER_ID};
use super::registry::EntityRegistry;
use super::stats::SessionStats;
use crate::settings::Tuning;

/// Box overlap for two boxes of the same half-extent
#[inline]
pub fn aabb_overlap(a: Vec2, b: Vec2, half_extent: f32) -> bool {
    let reach = 2.0 * half_extent;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}

/// Outcome of one colliding ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Player was `entity1`: it took damage and `other` was queued
    PlayerStruck { other: EntityId },
    /// Player was `entity2`: only `entity` was queued
    TouchedPlayer { entity: EntityId },
    /// Neither side is the player: both queued, hit counted
    Destroyed { first: EntityId, second: EntityId },
}

/// Everything resolved in one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub resolutions: Vec<Resolution>,
    pub player_damage: f32,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CollisionSystem {
    half_extent: f32,
    damage: f32,
}

impl CollisionSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            half_extent: tuning.collision_half_extent,
            damage: tuning.collision_damage,
        }
    }

    /// Test all ordered pairs of the current registry and apply the
    /// damage/removal rules
    pub fn update(
        &self,
        registry: &mut EntityRegistry,
        stats: &mut SessionStats,
    ) -> CollisionReport {
        let snapshot: Vec<(EntityId, Vec2)> =
            registry.iter().map(|e| (e.id(), e.body.pos)).collect();
        let mut report = CollisionReport::default();

        for &(id1, pos1) in &snapshot {
            for &(id2, pos2) in &snapshot {
                if id1 == id2 || !aabb_overlap(pos1, pos2, self.half_extent) {
                    continue;
                }

                let resolution = if id1 == PLAYER_ID {
                    if let Some(player) = registry.get_mut(id1) {
                        player.body.health -= self.damage;
                        report.player_damage += self.damage;
                    }
                    registry.remove(id2);
                    Resolution::PlayerStruck { other: id2 }
                } else if id2 == PLAYER_ID {
                    registry.remove(id1);
                    Resolution::TouchedPlayer { entity: id1 }
                } else {
                    stats.hit_counter += 1;
                    registry.remove(id1);
                    registry.remove(id2);
                    Resolution::Destroyed {
                        first: id1,
                        second: id2,
                    }
                };
                report.resolutions.push(resolution);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;
    use proptest::prelude::*;

    struct Fixture {
        tuning: Tuning,
        registry: EntityRegistry,
        stats: SessionStats,
    }

    impl Fixture {
        fn with_player() -> Self {
            let tuning = Tuning::default();
            let mut registry = EntityRegistry::new();
            registry.spawn(|id| Entity::player(id, &tuning));
            Self {
                tuning,
                registry,
                stats: SessionStats::default(),
            }
        }

        fn enemy_at(&mut self, x: f32, y: f32) -> EntityId {
            let tuning = &self.tuning;
            self.registry
                .spawn(|id| Entity::enemy(id, Vec2::new(x, y), tuning))
        }

        fn projectile_at(&mut self, x: f32, y: f32) -> EntityId {
            let tuning = &self.tuning;
            self.registry
                .spawn(|id| Entity::projectile(id, Vec2::new(x, y), tuning))
        }

        fn resolve(&mut self) -> CollisionReport {
            CollisionSystem::new(&self.tuning).update(&mut self.registry, &mut self.stats)
        }
    }

    #[test]
    fn test_aabb_overlap() {
        assert!(aabb_overlap(Vec2::ZERO, Vec2::new(23.9, -23.9), 12.0));
        assert!(!aabb_overlap(Vec2::ZERO, Vec2::new(24.0, 0.0), 12.0));
        assert!(!aabb_overlap(Vec2::ZERO, Vec2::new(0.0, 30.0), 12.0));
    }

    #[test]
    fn test_player_enemy_collision() {
        let mut fx = Fixture::with_player();
        let enemy = fx.enemy_at(160.0, 390.0);

        let report = fx.resolve();
        assert_eq!(
            report.resolutions,
            vec![
                Resolution::PlayerStruck { other: enemy },
                Resolution::TouchedPlayer { entity: enemy },
            ]
        );
        assert_eq!(report.player_damage, 50.0);
        assert_eq!(fx.registry.get(PLAYER_ID).unwrap().body.health, 50.0);
        assert_eq!(fx.stats.hit_counter, 0);

        // Player is never queued; enemy is removed on flush
        assert!(!fx.registry.is_pending_removal(PLAYER_ID));
        fx.registry.flush_removals();
        assert!(!fx.registry.contains(enemy));
        assert!(fx.registry.contains(PLAYER_ID));
    }

    #[test]
    fn test_two_enemies_on_player_cost_double() {
        let mut fx = Fixture::with_player();
        fx.enemy_at(150.0, 390.0);
        fx.enemy_at(140.0, 410.0);
        fx.resolve();
        assert!(fx.registry.get(PLAYER_ID).unwrap().body.is_dead());
    }

    #[test]
    fn test_enemy_projectile_counts_twice() {
        let mut fx = Fixture::with_player();
        let enemy = fx.enemy_at(50.0, 100.0);
        let shot = fx.projectile_at(55.0, 110.0);

        let report = fx.resolve();
        assert_eq!(report.resolutions.len(), 2);
        assert_eq!(fx.stats.hit_counter, 2);
        assert_eq!(fx.stats.hits(), 1.0);
        assert_eq!(fx.registry.get(PLAYER_ID).unwrap().body.health, 100.0);

        fx.registry.flush_removals();
        assert!(!fx.registry.contains(enemy));
        assert!(!fx.registry.contains(shot));
    }

    #[test]
    fn test_fresh_projectile_clears_player() {
        let mut fx = Fixture::with_player();
        // Spawned 25 units above the player: just outside the 24-unit reach
        fx.projectile_at(150.0, 375.0);
        assert!(fx.resolve().is_empty());
    }

    #[test]
    fn test_doomed_entity_still_collides() {
        let mut fx = Fixture::with_player();
        let enemy = fx.enemy_at(50.0, 100.0);
        fx.projectile_at(50.0, 105.0);
        fx.projectile_at(50.0, 95.0);
        fx.registry.remove(enemy);

        fx.resolve();
        // Three overlapping pairs (the shots overlap too), each visited twice
        assert_eq!(fx.stats.hit_counter, 6);
    }

    proptest! {
        #[test]
        fn prop_non_player_resolution_is_symmetric(
            ax in 0.0f32..300.0, ay in 0.0f32..200.0,
            bx in 0.0f32..300.0, by in 0.0f32..200.0,
        ) {
            let mut fx = Fixture::with_player();
            let a = fx.enemy_at(ax, ay);
            let b = fx.projectile_at(bx, by);
            fx.resolve();

            let overlapping = aabb_overlap(Vec2::new(ax, ay), Vec2::new(bx, by), 12.0);
            prop_assert_eq!(fx.stats.hit_counter, if overlapping { 2 } else { 0 });
            prop_assert_eq!(fx.registry.is_pending_removal(a), overlapping);
            prop_assert_eq!(fx.registry.is_pending_removal(b), overlapping);
        }
    }
}
