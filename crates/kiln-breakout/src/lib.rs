//! # Kiln Breakout
//!
//! Breakout on the kiln engine: a 10×10 brick grid, a paddle steered with the
//! arrow keys, and a ball that bounces off walls, bricks, and the paddle
//! (picking up the paddle's velocity when it does).
//!
//! ## Module Overview
//!
//! - [`components`] — Movable, Collidable, and the marker components
//! - [`state`] — Shared game state and the action enum
//! - [`settings`] — Tuning and key bindings, loaded from JSON
//! - [`context`] — The context every system receives
//! - [`messages`] — Speed and stop requests with their handlers
//! - [`scene`] — Level construction
//! - [`systems`] — Paddle, game, speed, movement, collision, and draw collection
//! - [`game`] — [`BreakoutGame`], the wrapper a host loop drives

pub mod components;
pub mod context;
pub mod game;
pub mod messages;
pub mod scene;
pub mod settings;
pub mod state;
pub mod systems;

pub use game::{BreakoutGame, FrameStats};
pub use settings::BreakoutSettings;
