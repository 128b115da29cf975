//! # Component — Ids, Masks, and Typed Pools
//!
//! Components are plain data: a `Body`, a `Movable`, a `Colored`. Each Rust
//! type used as a component gets a small integer [`ComponentId`] the first time
//! a world sees it, and that id names one bit of a 64-bit [`ComponentMask`].
//! Every entity carries a mask of the component types it currently has, so
//! "does this entity match the query?" is a couple of bitwise operations.
//!
//! ## Storage
//!
//! Values live in one [`ComponentPool<T>`] per type: a dense `Vec<T>` plus a
//! map from entity to slot. The world holds the pools type-erased
//! (`Box<dyn Any>`) and downcasts back to the concrete pool at the typed
//! call sites, so there is no per-component boxing.
//!
//! ```text
//! ComponentPool<Movable>
//!   dense:  [ Movable{..}, Movable{..}, Movable{..} ]
//!   owners: [ #3,          #7,          #12         ]
//!   slots:  { #3 → 0, #7 → 1, #12 → 2 }
//! ```
//!
//! ## The 64-type ceiling
//!
//! A mask is a `u64`, so a world can register at most
//! [`MAX_COMPONENT_TYPES`] distinct component types. The 65th registration is
//! a configuration error. Widening the mask to a multi-word bitset would lift
//! the limit; nothing here needs it yet.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use super::entity::Entity;
use crate::error::EngineError;

/// Hard limit on distinct component types per world (one bit each in a `u64`).
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Small integer tag for a component type, in `1..=64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u8);

impl ComponentId {
    /// The raw id (1-based).
    pub fn get(self) -> u8 {
        self.0
    }

    /// The single-bit mask for this id. Id `n` owns bit `n - 1`.
    pub fn mask(self) -> ComponentMask {
        ComponentMask(1u64 << (self.0 - 1))
    }
}

/// One bit per registered component type.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentMask(u64);

impl ComponentMask {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is set in `self`.
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if `self` and `other` share at least one bit.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for ComponentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ComponentMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ComponentMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentMask({:#b})", self.0)
    }
}

/// Assigns [`ComponentId`]s to Rust types on first use.
///
/// Ids are handed out in registration order starting at 1 and are stable for
/// the lifetime of the registry.
#[derive(Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
    /// Type names indexed by `id - 1`, for diagnostics.
    names: Vec<&'static str>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `T`, registering it if this is the first time.
    ///
    /// Fails with [`EngineError::TooManyComponentTypes`] when `T` would be the
    /// 65th distinct type.
    pub fn register<T: 'static>(&mut self) -> Result<ComponentId, EngineError> {
        self.register_raw(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    pub(crate) fn register_raw(
        &mut self,
        type_id: TypeId,
        name: &'static str,
    ) -> Result<ComponentId, EngineError> {
        if let Some(&id) = self.ids.get(&type_id) {
            return Ok(id);
        }
        if self.names.len() >= MAX_COMPONENT_TYPES {
            return Err(EngineError::too_many_component_types());
        }
        self.names.push(name);
        let id = ComponentId(self.names.len() as u8);
        self.ids.insert(type_id, id);
        log::trace!("registered component {} as id {}", short_type_name(name), id.0);
        Ok(id)
    }

    /// The id for `T`, if it has been registered.
    pub fn id_of<T: 'static>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Short type name for a registered id.
    pub fn name(&self, id: ComponentId) -> &'static str {
        short_type_name(self.names[id.0 as usize - 1])
    }
}

/// Dense storage for every `T` in a world, keyed by entity.
pub(crate) struct ComponentPool<T> {
    dense: Vec<T>,
    owners: Vec<Entity>,
    slots: HashMap<Entity, usize>,
}

impl<T> ComponentPool<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            owners: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Insert or overwrite. Returns the previous value if there was one.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(&slot) = self.slots.get(&entity) {
            return Some(std::mem::replace(&mut self.dense[slot], value));
        }
        self.slots.insert(entity, self.dense.len());
        self.dense.push(value);
        self.owners.push(entity);
        None
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(&entity).map(|&slot| &self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots.get(&entity).map(|&slot| &mut self.dense[slot])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Iterate `(owner, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }
}

/// A set of component types named by a tuple, e.g. `(Body, Collidable)`.
///
/// Used by [`World::entities_matching_all`](super::world::World::entities_matching_all)
/// to build an all-of query. Implemented for `()` and tuples of up to eight
/// types.
pub trait ComponentSet {
    /// `(TypeId, type name)` for each member.
    fn types() -> Vec<(TypeId, &'static str)>;
}

impl ComponentSet for () {
    fn types() -> Vec<(TypeId, &'static str)> {
        Vec::new()
    }
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: 'static),+> ComponentSet for ($($T,)+) {
            fn types() -> Vec<(TypeId, &'static str)> {
                vec![$((TypeId::of::<$T>(), std::any::type_name::<$T>())),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Strip the module path from a fully-qualified type name
/// (e.g. `kiln::shape::Body` → `Body`).
pub(crate) fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
