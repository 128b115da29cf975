//! # Entity — Opaque Identifiers
//!
//! An [`Entity`] is just a number. It carries no data of its own; the
//! [`World`](super::world::World) maps it to components stored per type.
//!
//! ## Design: Monotonic IDs
//!
//! Ids come from a counter that only ever goes up, starting at 1. Entities are
//! never despawned in this engine (a world lives as long as its scene), so
//! there is nothing to recycle and no need for generational indices:
//!
//! ```text
//! create → Entity(1)
//! create → Entity(2)
//! create → Entity(3)   ← a handle, once issued, always means the same entity
//! ```
//!
//! Ordering follows creation order, which gives queries a deterministic
//! iteration order for free.

use std::fmt;

/// A lightweight handle to an entity in a [`World`](super::world::World).
///
/// Created via [`World::create_entity`](super::world::World::create_entity).
/// Only meaningful for the world that created it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(pub(crate) u64);

impl Entity {
    /// Returns the raw id. Useful for diagnostics and logging.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids. Never reuses one.
pub(crate) struct EntityAllocator {
    /// The most recently issued id (0 = none yet).
    last: u64,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocate the next [`Entity`].
    pub fn allocate(&mut self) -> Entity {
        self.last += 1;
        Entity(self.last)
    }

    /// Whether this allocator has issued `entity`.
    pub fn is_issued(&self, entity: Entity) -> bool {
        entity.0 != 0 && entity.0 <= self.last
    }

    /// Number of entities issued so far.
    pub fn count(&self) -> usize {
        self.last as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential_from_one() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(e1.id(), 1);
        assert_eq!(e2.id(), 2);
        assert!(e1 < e2);
    }

    #[test]
    fn issued_tracks_allocations() {
        let mut alloc = EntityAllocator::new();
        assert!(!alloc.is_issued(Entity(1)));
        let e = alloc.allocate();
        assert!(alloc.is_issued(e));
        assert!(!alloc.is_issued(Entity(0)));
        assert!(!alloc.is_issued(Entity(2)));
        assert_eq!(alloc.count(), 1);
    }

    #[test]
    fn formatting() {
        assert_eq!(format!("{:?}", Entity(7)), "Entity(7)");
        assert_eq!(Entity(7).to_string(), "#7");
    }
}
