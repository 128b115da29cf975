//! # Bitmask ECS with Cached Aspects
//!
//! A deliberately simple Entity Component System. Components live in one dense
//! pool per type; each entity carries a 64-bit mask of which component types it
//! has; and queries are [`Aspect`]s whose member sets are cached and kept
//! current as components are added.
//!
//! ## Module Overview
//!
//! - [`entity`] — Monotonic entity ids
//! - [`component`] — Component ids, masks, and typed pools
//! - [`aspect`] — All/any/exclude predicates and the membership cache
//! - [`world`] — Central container (entities + components + aspects)
//! - [`system`] — System trait and schedule runner

pub mod aspect;
pub mod component;
pub mod entity;
pub mod system;
pub mod world;

pub use aspect::Aspect;
pub use component::{ComponentId, ComponentMask, ComponentRegistry, ComponentSet, MAX_COMPONENT_TYPES};
pub use entity::Entity;
pub use system::{Schedule, System};
#[cfg(feature = "diagnostics")]
pub use system::SystemTiming;
pub use world::{EntityBuilder, World};
