//! # Aspect — Cached Component Queries
//!
//! An [`Aspect`] describes a set of entities by the component types they carry:
//!
//! - `all`: the entity must have every one of these.
//! - `any`: the entity must have at least one of these.
//! - `exclude`: the entity must have none of these.
//!
//! An empty mask in any position means "no constraint", so `Aspect::default()`
//! matches every entity, including ones with no components at all.
//!
//! ## Caching
//!
//! The world keeps one [`AspectCache`] entry per aspect that has ever been
//! queried. The first query pays for a scan of every entity's mask; after that
//! the set is maintained incrementally: each time a component is added, the
//! world hands the entity's new mask to [`AspectCache::refresh`], which adds
//! or removes the entity from every cached set. Queries then just read the
//! set.
//!
//! ```text
//! add_component(#7, Movable)
//!   mask(#7) = 0b0011 → 0b0111
//!   for each cached aspect:
//!     is_interested(0b0111)?  yes → insert #7   no → remove #7
//! ```
//!
//! Sets are `BTreeSet<Entity>`, so members come out in ascending entity order
//! (creation order), which keeps system iteration deterministic.

use std::collections::{BTreeSet, HashMap};

use super::component::ComponentMask;
use super::entity::Entity;

/// A predicate over component masks: all-of, any-of, none-of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aspect {
    all: ComponentMask,
    any: ComponentMask,
    exclude: ComponentMask,
}

impl Aspect {
    /// Entities that have every component in `mask`.
    pub const fn all_of(mask: ComponentMask) -> Self {
        Self {
            all: mask,
            any: ComponentMask::EMPTY,
            exclude: ComponentMask::EMPTY,
        }
    }

    /// Entities that have at least one component in `mask`.
    pub const fn any_of(mask: ComponentMask) -> Self {
        Self {
            all: ComponentMask::EMPTY,
            any: mask,
            exclude: ComponentMask::EMPTY,
        }
    }

    /// Also require at least one component in `mask`.
    pub const fn with_any(mut self, mask: ComponentMask) -> Self {
        self.any = mask;
        self
    }

    /// Also reject entities that have any component in `mask`.
    pub const fn with_exclude(mut self, mask: ComponentMask) -> Self {
        self.exclude = mask;
        self
    }

    pub const fn all(&self) -> ComponentMask {
        self.all
    }

    pub const fn any(&self) -> ComponentMask {
        self.any
    }

    pub const fn exclude(&self) -> ComponentMask {
        self.exclude
    }

    /// Does an entity with component mask `mask` belong to this aspect?
    pub const fn is_interested(&self, mask: ComponentMask) -> bool {
        let has_all = self.all.is_empty() || mask.contains_all(self.all);
        let has_any = self.any.is_empty() || mask.intersects(self.any);
        let has_none = self.exclude.is_empty() || !mask.intersects(self.exclude);
        has_all && has_any && has_none
    }
}

/// Entity sets for every aspect queried so far.
#[derive(Default)]
pub(crate) struct AspectCache {
    sets: HashMap<Aspect, BTreeSet<Entity>>,
}

impl AspectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The members of `aspect`, scanning `entities` the first time it is seen.
    pub fn members(
        &mut self,
        aspect: Aspect,
        entities: impl Iterator<Item = (Entity, ComponentMask)>,
    ) -> &BTreeSet<Entity> {
        self.sets.entry(aspect).or_insert_with(|| {
            let set: BTreeSet<Entity> = entities
                .filter(|&(_, mask)| aspect.is_interested(mask))
                .map(|(entity, _)| entity)
                .collect();
            log::trace!("cached new aspect {:?} with {} members", aspect, set.len());
            set
        })
    }

    /// Re-evaluate `entity` against every cached aspect after its mask changed.
    pub fn refresh(&mut self, entity: Entity, mask: ComponentMask) {
        for (aspect, set) in &mut self.sets {
            if aspect.is_interested(mask) {
                set.insert(entity);
            } else {
                set.remove(&entity);
            }
        }
    }

    /// Number of distinct aspects cached.
    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ComponentMask = ComponentMask::from_bits(0b001);
    const B: ComponentMask = ComponentMask::from_bits(0b010);
    const C: ComponentMask = ComponentMask::from_bits(0b100);

    #[test]
    fn empty_aspect_matches_everything() {
        let aspect = Aspect::default();
        assert!(aspect.is_interested(ComponentMask::EMPTY));
        assert!(aspect.is_interested(A | B | C));
    }

    #[test]
    fn all_requires_every_bit() {
        let aspect = Aspect::all_of(A | B);
        assert!(aspect.is_interested(A | B));
        assert!(aspect.is_interested(A | B | C));
        assert!(!aspect.is_interested(A));
        assert!(!aspect.is_interested(ComponentMask::EMPTY));
    }

    #[test]
    fn any_requires_one_bit() {
        let aspect = Aspect::any_of(A | C);
        assert!(aspect.is_interested(A));
        assert!(aspect.is_interested(C | B));
        assert!(!aspect.is_interested(B));
        assert!(!aspect.is_interested(ComponentMask::EMPTY));
    }

    #[test]
    fn exclude_rejects_any_bit() {
        let aspect = Aspect::all_of(A).with_exclude(B | C);
        assert!(aspect.is_interested(A));
        assert!(!aspect.is_interested(A | B));
        assert!(!aspect.is_interested(A | C));
    }

    #[test]
    fn combined_constraints() {
        let aspect = Aspect::all_of(A).with_any(B).with_exclude(C);
        assert!(aspect.is_interested(A | B));
        assert!(!aspect.is_interested(A));
        assert!(!aspect.is_interested(A | B | C));
        assert_eq!(aspect.all(), A);
        assert_eq!(aspect.any(), B);
        assert_eq!(aspect.exclude(), C);
    }

    #[test]
    fn cache_scans_once_then_refreshes() {
        let mut cache = AspectCache::new();
        let entities = [(Entity(1), A), (Entity(2), A | B), (Entity(3), B)];
        let aspect = Aspect::all_of(A);

        let members: Vec<_> = cache.members(aspect, entities.into_iter()).iter().copied().collect();
        assert_eq!(members, vec![Entity(1), Entity(2)]);

        cache.refresh(Entity(3), A | B);
        cache.refresh(Entity(1), B);
        // The iterator is ignored once the aspect is cached.
        let members: Vec<_> = cache.members(aspect, std::iter::empty()).iter().copied().collect();
        assert_eq!(members, vec![Entity(2), Entity(3)]);
        assert_eq!(cache.len(), 1);
    }
}
