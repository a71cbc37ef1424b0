//! Fixed timestep simulation tick
//!
//! `tick` advances a `World` by exactly one step in a fixed order:
//! input, entity updates, collisions, removal flush, spawner, restart check,
//! bookkeeping. `SimulationLoop` turns variable frame times into whole steps.

use super::collision::CollisionReport;
use super::entity::{EntityId, StepEnv};
use super::stats::SessionStats;
use super::world::{World, spawn_projectile};

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub collisions: CollisionReport,
    /// Projectiles fired this step
    pub fired: Vec<EntityId>,
    /// Entities removed by the end-of-step flush
    pub removed: usize,
    pub spawned: Option<EntityId>,
    /// The player died during this step
    pub entered_game_over: bool,
    /// The session was reset during this step
    pub restarted: bool,
    /// Counters of the session that a restart just ended
    pub finished: Option<SessionStats>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, dt: f32) -> StepReport {
    let mut report = StepReport::default();

    world.poll_input();

    // Entities spawned below are inserted immediately but first updated
    // on the next step
    let env = StepEnv {
        dt,
        tuning: &world.tuning,
    };
    for id in world.registry.ids() {
        let Some(entity) = world.registry.get_mut(id) else {
            continue;
        };
        let outcome = entity.update(&env);
        if outcome.remove {
            world.registry.remove(id);
        }
        if outcome.fire {
            match spawn_projectile(&mut world.registry, env.tuning) {
                Ok(shot) => {
                    log::debug!("Player fired projectile {}", shot);
                    report.fired.push(shot);
                }
                Err(e) => log::warn!("Cannot fire: {}", e),
            }
        }
    }

    report.collisions = world.collisions.update(&mut world.registry, &mut world.stats);
    report.removed = world.registry.flush_removals();

    let dead = world.is_player_dead();
    if dead && world.spawner.is_enabled() {
        world.spawner.disable();
        report.entered_game_over = true;
        log::info!(
            "Game over: {} hits, {:.1}s alive, {} spawned, score {}",
            world.stats.hits(),
            world.stats.elapsed_alive,
            world.stats.enemies_spawned,
            world.stats.score
        );
    }
    report.spawned = world
        .spawner
        .update(dt, &mut world.registry, &mut world.stats, &world.tuning);

    if dead && world.controller().action_1 {
        report.finished = Some(world.stats.clone());
        let seed = world.take_next_seed();
        world.restart(seed);
        report.restarted = true;
        return report;
    }

    if !dead {
        world.stats.elapsed_alive += dt as f64;
    }
    world.stats.refresh_score(world.tuning.hit_score);

    report
}

/// Accumulator-driven fixed-step driver
#[derive(Debug, Clone)]
pub struct SimulationLoop {
    step: f32,
    accumulator: f32,
    /// Optional cap on steps per `advance`; the backlog beyond it is dropped
    max_substeps: Option<u32>,
}

impl SimulationLoop {
    pub fn new(step: f32, max_substeps: Option<u32>) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps,
        }
    }

    /// Unconsumed time carried to the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add `elapsed` seconds and run every whole step that fits.
    /// `on_step` runs after each step (redraw/HUD). Returns the step count.
    pub fn advance(
        &mut self,
        world: &mut World,
        elapsed: f32,
        mut on_step: impl FnMut(&World, &StepReport),
    ) -> u32 {
        self.accumulator += elapsed.max(0.0);

        let mut steps = 0;
        while self.accumulator > self.step {
            if self.max_substeps.is_some_and(|max| steps >= max) {
                log::debug!(
                    "Dropping {:.3}s of simulation backlog",
                    self.accumulator - self.accumulator % self.step
                );
                self.accumulator %= self.step;
                break;
            }
            let report = tick(world, self.step);
            self.accumulator -= self.step;
            steps += 1;
            on_step(world, &report);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::entity::{Entity, EntityKind, PLAYER_ID};
    use crate::sim::world::Mode;
    use glam::Vec2;

    fn world() -> World {
        World::new(&Settings::default())
    }

    fn place_enemy(world: &mut World, pos: Vec2) -> EntityId {
        let tuning = world.tuning().clone();
        world
            .registry
            .spawn(|id| Entity::enemy(id, pos, &tuning))
    }

    #[test]
    fn test_enemy_contact_costs_fifty() {
        let mut world = world();
        // Enemy moves 2 down during the update, still within reach afterwards
        let enemy = place_enemy(&mut world, Vec2::new(155.0, 390.0));

        let report = tick(&mut world, SIM_DT);
        assert_eq!(report.collisions.player_damage, 50.0);
        assert_eq!(world.player_health(), 50.0);
        assert!(!world.registry.contains(enemy));
        assert_eq!(report.removed, 1);
        assert_eq!(world.mode(), Mode::Running);
    }

    #[test]
    fn test_death_disables_spawner_and_enters_game_over() {
        let mut world = world();
        world.registry.get_mut(PLAYER_ID).unwrap().body.health = 50.0;
        place_enemy(&mut world, Vec2::new(150.0, 395.0));

        let report = tick(&mut world, SIM_DT);
        assert!(report.entered_game_over);
        assert_eq!(world.mode(), Mode::GameOver);
        assert!(!world.spawner_enabled());

        // Elapsed time freezes after death
        let elapsed = world.stats.elapsed_alive;
        for _ in 0..120 {
            let report = tick(&mut world, SIM_DT);
            assert!(!report.entered_game_over);
            assert_eq!(report.spawned, None);
        }
        assert_eq!(world.stats.elapsed_alive, elapsed);
        // Dead player is never removed
        assert!(world.registry.contains(PLAYER_ID));
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut world = world();
        for _ in 0..50 {
            tick(&mut world, SIM_DT);
        }
        assert!(world.stats.enemies_spawned > 0);
        world.registry.get_mut(PLAYER_ID).unwrap().body.health = 0.0;
        tick(&mut world, SIM_DT);
        assert_eq!(world.mode(), Mode::GameOver);

        let before = world.stats.clone();
        world.input.key_down("Space");
        let report = tick(&mut world, SIM_DT);
        assert!(report.restarted);
        assert_eq!(report.finished, Some(before));
        assert_eq!(world.mode(), Mode::Running);
        assert_eq!(world.registry.ids(), vec![PLAYER_ID]);
        assert_eq!(world.stats.enemies_spawned, 0);
        assert_eq!(world.stats.elapsed_alive, 0.0);
        assert!(world.spawner_enabled());
    }

    fn enemy_xs(world: &mut World, steps: usize) -> Vec<f32> {
        let mut xs = Vec::new();
        for _ in 0..steps {
            if let Some(id) = tick(world, SIM_DT).spawned {
                xs.push(world.registry.get(id).unwrap().body.pos.x);
            }
        }
        xs
    }

    #[test]
    fn test_each_session_gets_new_enemy_positions() {
        let mut world = world();
        let first = enemy_xs(&mut world, 43);
        assert_eq!(first.len(), 1);

        world.registry.get_mut(PLAYER_ID).unwrap().body.health = 0.0;
        world.input.key_down("Space");
        assert!(tick(&mut world, SIM_DT).restarted);
        world.input.key_up("Space");
        assert_ne!(world.seed(), Settings::default().seed);

        assert_ne!(enemy_xs(&mut world, 43), first);
    }

    #[test]
    fn test_queued_seed_is_used_on_restart() {
        let mut world = world();
        world.registry.get_mut(PLAYER_ID).unwrap().body.health = 0.0;
        world.set_next_seed(1234);
        world.input.key_down("Space");
        assert!(tick(&mut world, SIM_DT).restarted);
        assert_eq!(world.seed(), 1234);
    }

    #[test]
    fn test_action_while_alive_does_not_restart() {
        let mut world = world();
        world.input.key_down("Space");
        for _ in 0..30 {
            assert!(!tick(&mut world, SIM_DT).restarted);
        }
        assert!(world.stats.elapsed_alive > 0.0);
    }

    #[test]
    fn test_holding_fire_spawns_projectiles() {
        let mut world = world();
        world.input.key_down("Space");
        let mut shots = Vec::new();
        for _ in 0..18 {
            shots.extend(tick(&mut world, SIM_DT).fired);
        }
        assert_eq!(shots.len(), 1);
        let shot = world.registry.get(shots[0]).unwrap();
        assert!(matches!(shot.kind, EntityKind::Projectile(_)));
        // Not updated on the step it was fired
        assert_eq!(shot.body.pos, Vec2::new(150.0, 375.0));

        tick(&mut world, SIM_DT);
        assert_eq!(world.registry.get(shots[0]).unwrap().body.pos.y, 367.0);
    }

    #[test]
    fn test_projectile_destroys_enemy() {
        let mut world = world();
        let shot = world.spawn_projectile().unwrap();
        let enemy = place_enemy(&mut world, Vec2::new(150.0, 360.0));

        let report = tick(&mut world, SIM_DT);
        assert_eq!(world.stats.hit_counter, 2);
        assert_eq!(world.stats.hits(), 1.0);
        assert!(!world.registry.contains(shot));
        assert!(!world.registry.contains(enemy));
        assert_eq!(report.removed, 2);
        // 30 points for the hit plus one step of survival, floored
        assert_eq!(world.stats.score, 30);
    }

    #[test]
    fn test_ids_only_shrink_within_step() {
        let mut world = world();
        world.input.key_down("Space");
        for _ in 0..300 {
            let before = world.registry.ids();
            let report = tick(&mut world, SIM_DT);
            let mut new_ids = report.fired.clone();
            new_ids.extend(report.spawned);
            for id in world.registry.ids() {
                assert!(before.contains(&id) || new_ids.contains(&id));
            }
        }
    }

    #[test]
    fn test_loop_runs_whole_steps() {
        let mut world = world();
        let mut sim = SimulationLoop::new(SIM_DT, None);
        let mut redraws = 0;
        let steps = sim.advance(&mut world, 0.05, |_, _| redraws += 1);
        assert_eq!(steps, 2);
        assert_eq!(redraws, 2);
        assert!(sim.accumulator() < SIM_DT);
        assert!(sim.accumulator() > 0.0);
    }

    #[test]
    fn test_loop_carries_remainder() {
        let mut world = world();
        let mut sim = SimulationLoop::new(SIM_DT, None);
        assert_eq!(sim.advance(&mut world, 0.01, |_, _| {}), 0);
        assert_eq!(world.stats.elapsed_alive, 0.0);
        assert_eq!(sim.advance(&mut world, 0.01, |_, _| {}), 1);
    }

    #[test]
    fn test_loop_catches_up_after_stall() {
        let mut world = world();
        let mut sim = SimulationLoop::new(SIM_DT, None);
        let steps = sim.advance(&mut world, 1.0, |_, _| {});
        assert!((59..=60).contains(&steps));
        assert!(sim.accumulator() <= SIM_DT);
    }

    #[test]
    fn test_loop_substep_cap_drops_backlog() {
        let mut world = world();
        let mut sim = SimulationLoop::new(SIM_DT, Some(4));
        assert_eq!(sim.advance(&mut world, 1.0, |_, _| {}), 4);
        assert!(sim.accumulator() < SIM_DT);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut world = world();
            world.input.key_down("Space");
            world.input.key_down("ArrowLeft");
            for _ in 0..600 {
                tick(&mut world, SIM_DT);
            }
            (world.stats.clone(), world.registry.ids())
        };
        assert_eq!(run(), run());
    }
}
