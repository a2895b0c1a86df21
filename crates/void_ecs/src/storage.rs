//! ComponentStorage - Dense per-type component arena
//!
//! Values are packed in a `Vec` with a parallel entity column and an
//! entity→slot map. Removal swaps the last value into the freed slot, so
//! iteration order is unspecified.

use std::collections::HashMap;

use crate::Entity;

/// Dense storage for one component type
#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    values: Vec<T>,
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a value, returning the previous one if present
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(&slot) = self.index.get(&entity) {
            return Some(core::mem::replace(&mut self.values[slot], value));
        }

        self.index.insert(entity, self.values.len());
        self.values.push(value);
        self.entities.push(entity);
        None
    }

    /// Remove the value for an entity
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        let value = self.values.swap_remove(slot);
        self.entities.swap_remove(slot);

        if let Some(&moved) = self.entities.get(slot) {
            self.index.insert(moved, slot);
        }

        Some(value)
    }

    /// Get the value for an entity
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).map(|&slot| &self.values[slot])
    }

    /// Get the value for an entity mutably
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.index.get(&entity) {
            Some(&slot) => Some(&mut self.values[slot]),
            None => None,
        }
    }

    /// Check if an entity has a value
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Number of stored values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entities with a value, in storage order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over `(entity, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterate mutably over `(entity, value)` pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.values.clear();
        self.entities.clear();
        self.index.clear();
    }
}
