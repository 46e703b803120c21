//! Ordered entity registries with deferred removal.
//!
//! Entities are staged for removal while collision callbacks run and only
//! despawned when the registry is flushed at the start of the next tick.
//! A staged entity stays in both the registry and the world until then.

use hecs::{Entity, World};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    live: Vec<Entity>,
    staged: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly spawned entity.
    pub fn insert(&mut self, entity: Entity) {
        self.live.push(entity);
    }

    /// Live entities in insertion order, staged ones included.
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    /// Mark an entity for removal at the next flush.
    ///
    /// Returns `false` if the entity is not in the registry or is already staged.
    pub fn stage(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) || self.is_staged(entity) {
            return false;
        }
        self.staged.push(entity);
        true
    }

    pub fn is_staged(&self, entity: Entity) -> bool {
        self.staged.contains(&entity)
    }

    pub fn staged(&self) -> &[Entity] {
        &self.staged
    }

    /// Despawn every staged entity, drop it from the registry, and empty the
    /// staging buffer. Returns the number of entities removed.
    pub fn flush(&mut self, world: &mut World) -> usize {
        if self.staged.is_empty() {
            return 0;
        }
        self.live.retain(|entity| !self.staged.contains(entity));
        let removed = self.staged.len();
        for entity in self.staged.drain(..) {
            let _ = world.despawn(entity);
        }
        removed
    }

    /// Despawn everything immediately. Only safe outside a collision pass.
    pub fn clear(&mut self, world: &mut World) {
        self.staged.clear();
        for entity in self.live.drain(..) {
            let _ = world.despawn(entity);
        }
    }
}
