//! Simulation error types

use thiserror::Error;

use super::entity::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A spawn needed an entity (the player) that is not in the registry
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
}
