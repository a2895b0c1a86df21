//! Entity - Unique identifiers for scene objects
//!
//! Entities are plain 32-bit handles issued from a monotonically increasing
//! counter. Zero is reserved as the invalid handle and ids are never reused
//! during a run, so a stale handle simply resolves to nothing.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Entity identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The reserved invalid entity
    pub const INVALID: Self = Self(0);

    /// Create an entity from a raw id
    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Check if this entity is a valid handle
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// Widen to the user-data slot used by the physics engine
    #[inline]
    pub const fn to_user_data(&self) -> u128 {
        self.0 as u128
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Entity({})", self.0)
        } else {
            write!(f, "Entity(invalid)")
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic entity allocator
///
/// One allocator belongs to one scene context. Deallocation only updates the
/// live count; the id itself is retired for the rest of the run.
#[derive(Debug)]
pub struct EntityAllocator {
    /// Next id to hand out
    next: u32,
    /// Number of alive entities
    alive_count: usize,
}

impl EntityAllocator {
    /// Create a new entity allocator
    pub fn new() -> Self {
        Self {
            next: 1,
            alive_count: 0,
        }
    }

    /// Allocate a new entity
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity(self.next);
        self.next += 1;
        self.alive_count += 1;
        entity
    }

    /// Mark an entity as released
    pub fn release(&mut self, entity: Entity) -> bool {
        if !self.was_issued(entity) || self.alive_count == 0 {
            return false;
        }
        self.alive_count -= 1;
        true
    }

    /// Record that a previously released entity is alive again
    ///
    /// Used when an undone deletion brings the same object back.
    pub fn revive(&mut self, entity: Entity) -> bool {
        if !self.was_issued(entity) {
            return false;
        }
        self.alive_count += 1;
        true
    }

    /// Check whether this allocator issued the entity
    #[inline]
    pub fn was_issued(&self, entity: Entity) -> bool {
        entity.is_valid() && entity.0 < self.next
    }

    /// Get the number of alive entities
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
