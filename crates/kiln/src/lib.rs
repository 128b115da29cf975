//! # Kiln — Minimal 2D Game Engine
//!
//! A small engine for arcade-style 2D games: a bitmask ECS with cached aspect
//! queries, a fixed-timestep simulation scheduler, typed in-process messaging,
//! and circle/rectangle collision geometry.
//!
//! Kiln doesn't open windows or talk to the GPU. A host feeds it an
//! [`InputSnapshot`](input::InputSnapshot) and a frame delta, and reads back
//! [`DrawCommand`](render::DrawCommand)s for whatever
//! [`ShapeRenderer`](render::ShapeRenderer) it has.
//!
//! Start with `use kiln::prelude::*`.

pub mod collision;
pub mod config;
pub mod debug;
pub mod ecs;
pub mod error;
pub mod input;
pub mod math;
pub mod message;
pub mod prelude;
pub mod render;
pub mod shape;
pub mod simulation;
pub mod time;

pub use error::EngineError;
