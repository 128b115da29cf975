//! Game-wide state that isn't attached to any entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Before or after the ball has been launched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Initial,
    Playing,
}

/// Logical inputs. Physical keys are mapped onto these by
/// [`BreakoutSettings::key_bindings`](crate::settings::BreakoutSettings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    Left,
    Right,
    IncreaseSpeed,
    DecreaseSpeed,
    ResetSpeed,
    Quit,
}

/// State every system can read through the context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedState {
    pub game_state: GameState,
    /// Play area in pixels; the origin is the top-left corner.
    pub game_size: Vec2,
    /// Simulation speed multiplier. The scheduler picks it up at the start
    /// of each frame.
    pub speed: f32,
}

impl SharedState {
    pub fn new(game_size: Vec2) -> Self {
        Self {
            game_state: GameState::Initial,
            game_size,
            speed: 1.0,
        }
    }
}
