//! # void_ecs - Entity handles and component storage
//!
//! The building blocks the editor's component store is assembled from:
//! - Monotonic entity ids that are never reused within a run
//! - Dense per-type component arenas with O(1) entity lookup
//!
//! ## Example
//!
//! ```
//! use void_ecs::{ComponentStorage, EntityAllocator};
//!
//! #[derive(Debug, PartialEq)]
//! struct Health(u32);
//!
//! let mut entities = EntityAllocator::new();
//! let mut health = ComponentStorage::new();
//!
//! let player = entities.allocate();
//! health.insert(player, Health(100));
//!
//! assert_eq!(health.get(player), Some(&Health(100)));
//! ```

pub mod entity;
pub mod storage;

pub use entity::{Entity, EntityAllocator};
pub use storage::ComponentStorage;

pub mod prelude {
    //! Common imports
    pub use crate::entity::{Entity, EntityAllocator};
    pub use crate::storage::ComponentStorage;
}
