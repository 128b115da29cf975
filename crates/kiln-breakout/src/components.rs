//! Breakout's components.
//!
//! Position and shape live in [`kiln::shape::Body`]; everything here is
//! game-specific data or a marker.

use glam::Vec2;
use kiln::render::Color;
use serde::{Deserialize, Serialize};

/// Anything with a velocity, in pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Movable {
    pub velocity: Vec2,
}

impl Movable {
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// What an entity is, as far as collision response is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    Ball,
    Paddle,
    Brick,
}

/// How the movement system treats an entity leaving the play area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsResponse {
    /// No boundary check.
    #[default]
    Ignore,
    /// Shift back so the offending edge sits on the boundary.
    Stop,
    /// Negate the velocity component along the crossed axis.
    Bounce,
}

/// Takes part in the collision scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collidable {
    pub kind: CollisionKind,
    pub bounds: BoundsResponse,
}

impl Collidable {
    pub fn new(kind: CollisionKind) -> Self {
        Self {
            kind,
            bounds: BoundsResponse::Ignore,
        }
    }

    pub fn with_bounds(mut self, bounds: BoundsResponse) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Fill colour for entities that get drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colored(pub Color);

/// Steered by the Left/Right actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Controllable;

/// Launched when play starts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ball;
