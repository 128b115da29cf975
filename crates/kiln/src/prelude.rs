//! Convenience re-exports — `use kiln::prelude::*` for the common items.

pub use crate::collision::{intersects, penetration_vector};
pub use crate::config::{DisplayMode, EngineSettings};
pub use crate::debug::{DebugDraw, ResetDebugDraw};
pub use crate::ecs::{Aspect, ComponentMask, Entity, Schedule, System, World};
pub use crate::error::EngineError;
pub use crate::input::{ActionState, CursorPosition, InputSnapshot, KeyCode, KeyEvent, KeyMap};
pub use crate::math::{Vec2, reflect};
pub use crate::message::{MessageContext, MessageHub, Outbox};
pub use crate::render::{Color, DrawCommand, DrawKind, ShapeRenderer};
pub use crate::shape::{Body, Bounds, Circle, Rectangle, Shape};
pub use crate::simulation::{Simulation, SimulationContext, SimulationState};
pub use crate::time::Time;
