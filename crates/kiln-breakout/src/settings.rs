//! Breakout settings: engine settings, game tuning, and key bindings.
//!
//! Loaded the same way as [`EngineSettings`]: in-code defaults overlaid by an
//! optional JSON file that only names what it changes.
//!
//! ```json
//! {
//!   "engine": { "updates_per_second": 120 },
//!   "paddle_speed": 400.0,
//!   "key_bindings": [{ "key": "KeyJ", "action": "Left" }]
//! }
//! ```
//!
//! A `key_bindings` list replaces the default bindings wholesale.

use std::path::Path;

use glam::Vec2;
use kiln::config::{EngineSettings, load_layered};
use kiln::input::{KeyCode, KeyMap};
use kiln::EngineError;
use serde::{Deserialize, Serialize};

use crate::state::GameAction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutSettings {
    pub engine: EngineSettings,
    /// Play area in pixels.
    pub game_size: Vec2,
    pub brick_rows: u32,
    pub brick_cols: u32,
    /// Paddle speed in pixels per second.
    pub paddle_speed: f32,
    /// Ball velocity on launch, pixels per second.
    pub launch_velocity: Vec2,
    pub ball_radius: f32,
    pub key_bindings: KeyMap<GameAction>,
}

impl Default for BreakoutSettings {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            game_size: Vec2::new(engine.width as f32, engine.height as f32),
            engine,
            brick_rows: 10,
            brick_cols: 10,
            paddle_speed: 300.0,
            launch_velocity: Vec2::new(120.0, -120.0),
            ball_radius: 10.0,
            key_bindings: default_key_bindings(),
        }
    }
}

impl BreakoutSettings {
    /// Defaults overlaid by the JSON file at `path`, if it exists.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let settings: Self = load_layered(path)?;
        log::debug!(
            "breakout: {}x{} bricks in {}x{}, {} key bindings",
            settings.brick_cols,
            settings.brick_rows,
            settings.game_size.x,
            settings.game_size.y,
            settings.key_bindings.len()
        );
        Ok(settings)
    }
}

/// Arrows or A/D steer, +/- change speed, 0 resets it, Escape quits.
pub fn default_key_bindings() -> KeyMap<GameAction> {
    [
        (KeyCode::ArrowLeft, GameAction::Left),
        (KeyCode::KeyA, GameAction::Left),
        (KeyCode::ArrowRight, GameAction::Right),
        (KeyCode::KeyD, GameAction::Right),
        (KeyCode::Equal, GameAction::IncreaseSpeed),
        (KeyCode::NumpadAdd, GameAction::IncreaseSpeed),
        (KeyCode::Minus, GameAction::DecreaseSpeed),
        (KeyCode::NumpadSubtract, GameAction::DecreaseSpeed),
        (KeyCode::Digit0, GameAction::ResetSpeed),
        (KeyCode::Escape, GameAction::Quit),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_classic_layout() {
        let settings = BreakoutSettings::default();
        assert_eq!(settings.game_size, Vec2::new(800.0, 480.0));
        assert_eq!((settings.brick_rows, settings.brick_cols), (10, 10));
        assert_eq!(settings.key_bindings.action_for(KeyCode::KeyA), Some(GameAction::Left));
        assert_eq!(settings.key_bindings.action_for(KeyCode::Space), None);
    }

    #[test]
    fn nested_engine_overrides_are_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "engine": {{ "updates_per_second": 120 }}, "paddle_speed": 400.0, "launch_velocity": [0.0, -200.0] }}"#
        )
        .unwrap();

        let settings = BreakoutSettings::load(file.path()).unwrap();
        assert_eq!(settings.engine.updates_per_second, 120);
        assert_eq!(settings.engine.max_skipped_updates, 5);
        assert_eq!(settings.paddle_speed, 400.0);
        assert_eq!(settings.launch_velocity, Vec2::new(0.0, -200.0));
        assert_eq!(settings.key_bindings, default_key_bindings());
    }

    #[test]
    fn key_bindings_replace_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "key_bindings": [{{ "key": "KeyJ", "action": "Left" }}] }}"#).unwrap();

        let settings = BreakoutSettings::load(file.path()).unwrap();
        assert_eq!(settings.key_bindings.len(), 1);
        assert_eq!(settings.key_bindings.action_for(KeyCode::KeyJ), Some(GameAction::Left));
        assert_eq!(settings.key_bindings.action_for(KeyCode::ArrowLeft), None);
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "key_bindings": [{{ "key": "KeyJ", "action": "Jump" }}] }}"#).unwrap();
        let err = BreakoutSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::SettingsParse { .. }));
    }
}
