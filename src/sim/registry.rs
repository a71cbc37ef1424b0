//! Entity arena with deferred removal
//!
//! Ids come from a monotonically increasing counter and double as slot
//! indices, so lookup is a bounds check plus an `Option` test. Removal is
//! never immediate: `remove` queues an id and `flush_removals` tombstones
//! the queued slots once per step. Iteration walks a dense list of live ids,
//! so its cost follows the live population, not how many ids were issued.

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    /// Slot `i` holds entity id `i` until it is tombstoned
    slots: Vec<Option<Entity>>,
    /// Live ids, ascending
    live: Vec<EntityId>,
    /// Ids waiting for the end-of-step flush (may contain duplicates)
    removal_queue: Vec<EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next spawned entity will receive
    pub fn next_id(&self) -> EntityId {
        self.slots.len() as EntityId
    }

    /// Allocate an id, build the entity with it, and insert it immediately
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id();
        let entity = build(id);
        debug_assert_eq!(entity.id(), id, "entity built with a foreign id");
        self.slots.push(Some(entity));
        // Ids only grow, so pushing keeps `live` sorted
        self.live.push(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Live ids in ascending order
    pub fn live_ids(&self) -> &[EntityId] {
        &self.live
    }

    /// Owned snapshot of `live_ids`, for loops that mutate the registry
    pub fn ids(&self) -> Vec<EntityId> {
        self.live.clone()
    }

    /// Live entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter().filter_map(|&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Queue an entity for removal at the end of the step
    pub fn remove(&mut self, id: EntityId) {
        self.removal_queue.push(id);
    }

    pub fn pending_removals(&self) -> &[EntityId] {
        &self.removal_queue
    }

    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.removal_queue.contains(&id)
    }

    /// Drain the removal queue. Returns how many entities were removed;
    /// duplicates and already-removed ids are skipped.
    pub fn flush_removals(&mut self) -> usize {
        let mut removed = 0;
        for id in self.removal_queue.drain(..) {
            if let Some(slot) = self.slots.get_mut(id as usize) {
                if slot.take().is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            let slots = &self.slots;
            self.live
                .retain(|&id| slots.get(id as usize).is_some_and(Option::is_some));
        }
        removed
    }

    /// Empty the arena and restart ids from zero
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live.clear();
        self.removal_queue.clear();
    }
}
