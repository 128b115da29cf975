//! # Breakout Systems
//!
//! Each system is a unit struct implementing [`System<BreakoutContext>`]. They
//! run once per fixed tick in this order:
//!
//! | System            | Reads                        | Writes                        |
//! |-------------------|------------------------------|-------------------------------|
//! | [`PaddleSystem`]  | Left / Right actions         | paddle velocity               |
//! | [`GameSystem`]    | any action, game state       | game state, ball velocity     |
//! | [`SpeedSystem`]   | speed actions                | `SetSimulationSpeed` requests |
//! | [`MovementSystem`]| velocity, bounds response    | body positions, velocity      |
//! | [`CollisionSystem`]| every collidable body       | ball position and velocity    |
//!
//! Rendering is not a system: [`render::collect_draw_commands`] runs once per
//! host frame, after the simulation has advanced.
//!
//! [`System<BreakoutContext>`]: kiln::ecs::System
//! [`BreakoutContext`]: crate::context::BreakoutContext

pub mod collision;
pub mod game;
pub mod movement;
pub mod paddle;
pub mod render;
pub mod speed;

pub use collision::CollisionSystem;
pub use game::GameSystem;
pub use movement::MovementSystem;
pub use paddle::PaddleSystem;
pub use speed::SpeedSystem;
