//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod error;
pub mod input;
pub mod registry;
pub mod spawner;
pub mod stats;
pub mod tick;
pub mod world;

pub use collision::{CollisionReport, CollisionSystem, Resolution, aabb_overlap};
pub use entity::{Behavior, Body, Entity, EntityId, EntityKind, PLAYER_ID, StepOutcome};
pub use error::SimError;
pub use input::{Controller, InputSource, KeyBindings};
pub use registry::EntityRegistry;
pub use spawner::Spawner;
pub use stats::{SessionStats, score};
pub use tick::{SimulationLoop, StepReport, tick};
pub use world::{Mode, World};
