//! # World — The Central Container
//!
//! The [`World`] owns all entities, their components and the aspect cache.
//! It's the single source of truth for a scene.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ World                                               │
//! │                                                     │
//! │  EntityAllocator: hands out ids 1, 2, 3, ...        │
//! │                                                     │
//! │  masks: Vec<ComponentMask>                          │
//! │    index = entity id - 1, one bit per component     │
//! │                                                     │
//! │  registry: ComponentRegistry                        │
//! │    TypeId → ComponentId (1..=64)                    │
//! │                                                     │
//! │  pools: HashMap<TypeId, Box<dyn Any>>               │
//! │    each value is a ComponentPool<T>                 │
//! │                                                     │
//! │  aspects: AspectCache                               │
//! │    Aspect → BTreeSet<Entity>, kept current on add   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation is immediate
//!
//! `add_component` updates the pool, the entity's mask, and every cached
//! aspect before it returns. A system that adds a component and then queries
//! sees the new membership straight away; there is no command buffer.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::aspect::{Aspect, AspectCache};
use super::component::{ComponentMask, ComponentPool, ComponentRegistry, ComponentSet};
use super::entity::{Entity, EntityAllocator};

/// The central container for all scene state.
pub struct World {
    allocator: EntityAllocator,
    /// Component mask per entity, indexed by `id - 1`.
    masks: Vec<ComponentMask>,
    registry: ComponentRegistry,
    /// One `ComponentPool<T>` per component type, keyed by `TypeId::of::<T>()`.
    pools: HashMap<TypeId, Box<dyn Any>>,
    aspects: AspectCache,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            masks: Vec::new(),
            registry: ComponentRegistry::new(),
            pools: HashMap::new(),
            aspects: AspectCache::new(),
        }
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Create a new entity with no components.
    ///
    /// The entity immediately belongs to every cached aspect that an empty
    /// mask satisfies.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.masks.push(ComponentMask::EMPTY);
        self.aspects.refresh(entity, ComponentMask::EMPTY);
        entity
    }

    /// Create an entity and return an [`EntityBuilder`] for adding components.
    ///
    /// ```ignore
    /// let paddle = world
    ///     .spawn()
    ///     .insert(Body::new(Shape::rectangle(350.0, 440.0, 100.0, 20.0)))
    ///     .insert(Controllable)
    ///     .id();
    /// ```
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let entity = self.create_entity();
        EntityBuilder { world: self, entity }
    }

    /// Number of entities created so far.
    pub fn entity_count(&self) -> usize {
        self.allocator.count()
    }

    /// Whether `entity` was created by this world.
    pub fn contains(&self, entity: Entity) -> bool {
        self.allocator.is_issued(entity)
    }

    /// The component mask of `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` was not created by this world.
    pub fn mask(&self, entity: Entity) -> ComponentMask {
        self.assert_issued(entity);
        self.masks[entity.0 as usize - 1]
    }

    /// All entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        (1..=self.allocator.count() as u64).map(Entity)
    }

    fn assert_issued(&self, entity: Entity) {
        if !self.allocator.is_issued(entity) {
            panic!("Entity {} was not created by this world", entity);
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach `component` to `entity`, overwriting any existing `T`.
    ///
    /// The first time a type is seen it is assigned a component id. The
    /// entity's mask and every cached aspect are updated before this returns.
    ///
    /// # Panics
    ///
    /// Panics if `entity` was not created by this world, or if `T` would be
    /// the 65th distinct component type.
    pub fn add_component<T: 'static>(&mut self, entity: Entity, component: T) {
        self.assert_issued(entity);
        let id = self
            .registry
            .register::<T>()
            .unwrap_or_else(|err| panic!("Cannot add `{}`: {}", std::any::type_name::<T>(), err));

        self.pool_mut_or_insert::<T>().insert(entity, component);

        let slot = entity.0 as usize - 1;
        let old = self.masks[slot];
        let mask = old | id.mask();
        if mask != old {
            self.masks[slot] = mask;
            self.aspects.refresh(entity, mask);
        }
    }

    /// Get a shared reference to a component.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no `T`.
    pub fn component<T: 'static>(&self, entity: Entity) -> &T {
        self.try_component::<T>(entity)
            .unwrap_or_else(|| panic!("{} is missing component `{}`", entity, std::any::type_name::<T>()))
    }

    /// Get a mutable reference to a component.
    ///
    /// # Panics
    ///
    /// Panics if `entity` has no `T`.
    pub fn component_mut<T: 'static>(&mut self, entity: Entity) -> &mut T {
        self.try_component_mut::<T>(entity)
            .unwrap_or_else(|| panic!("{} is missing component `{}`", entity, std::any::type_name::<T>()))
    }

    /// Get a shared reference to a component. Returns `None` if absent.
    pub fn try_component<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.pool::<T>().and_then(|pool| pool.get(entity))
    }

    /// Get a mutable reference to a component. Returns `None` if absent.
    pub fn try_component_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.pools
            .get_mut(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_mut::<ComponentPool<T>>())
            .and_then(|pool| pool.get_mut(entity))
    }

    /// Check whether `entity` has a `T`.
    pub fn has_component<T: 'static>(&self, entity: Entity) -> bool {
        self.pool::<T>().is_some_and(|pool| pool.contains(entity))
    }

    /// Number of entities that have a `T`.
    pub fn component_count<T: 'static>(&self) -> usize {
        self.pool::<T>().map_or(0, |pool| pool.len())
    }

    /// Iterate every `(entity, &T)` pair in insertion order.
    pub fn iter_components<T: 'static>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.pool::<T>().into_iter().flat_map(|pool| pool.iter())
    }

    /// The component registry, for inspecting ids and names.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    fn pool<T: 'static>(&self) -> Option<&ComponentPool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_ref::<ComponentPool<T>>())
    }

    fn pool_mut_or_insert<T: 'static>(&mut self) -> &mut ComponentPool<T> {
        self.pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentPool::<T>::new()))
            .downcast_mut::<ComponentPool<T>>()
            .unwrap_or_else(|| panic!("component pool for `{}` has the wrong type", std::any::type_name::<T>()))
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The combined mask for a tuple of component types, registering any the
    /// world hasn't seen yet.
    ///
    /// # Panics
    ///
    /// Panics if registering would exceed the component type limit.
    pub fn mask_of<S: ComponentSet>(&mut self) -> ComponentMask {
        let mut mask = ComponentMask::EMPTY;
        for (type_id, name) in S::types() {
            let id = self
                .registry
                .register_raw(type_id, name)
                .unwrap_or_else(|err| panic!("Cannot query `{}`: {}", name, err));
            mask |= id.mask();
        }
        mask
    }

    /// Entities that have every component in `S`, in ascending order.
    ///
    /// ```ignore
    /// for entity in world.entities_matching_all::<(Body, Movable)>() {
    ///     let velocity = world.component::<Movable>(entity).velocity;
    ///     world.component_mut::<Body>(entity).translate(velocity * dt);
    /// }
    /// ```
    pub fn entities_matching_all<S: ComponentSet>(&mut self) -> Vec<Entity> {
        let mask = self.mask_of::<S>();
        self.entities_matching(Aspect::all_of(mask))
    }

    /// Entities matching an arbitrary aspect, in ascending order.
    ///
    /// The first call for a given aspect scans every entity; later calls read
    /// the maintained set.
    pub fn entities_matching(&mut self, aspect: Aspect) -> Vec<Entity> {
        let masks = &self.masks;
        let entities = masks
            .iter()
            .enumerate()
            .map(|(index, &mask)| (Entity(index as u64 + 1), mask));
        self.aspects.members(aspect, entities).iter().copied().collect()
    }

    /// Number of aspects currently cached.
    pub fn cached_aspect_count(&self) -> usize {
        self.aspects.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── EntityBuilder ────────────────────────────────────────────────────────

/// Builder for adding components to a freshly created entity.
///
/// Returned by [`World::spawn`]. Chain `.insert()` calls, then take the
/// handle with `.id()`.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    /// Add a component to this entity.
    pub fn insert<T: 'static>(self, component: T) -> Self {
        self.world.add_component(self.entity, component);
        self
    }

    /// Get the entity ID.
    pub fn id(&self) -> Entity {
        self.entity
    }
}
