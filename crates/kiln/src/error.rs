//! Engine error type.
//!
//! Configuration problems that a host can report and recover from at startup
//! are returned as [`EngineError`]. Programmer mistakes (reading a component an
//! entity doesn't have, sending a request nobody handles) panic instead, the
//! same way [`World::component`](crate::ecs::World::component) does.

use std::path::PathBuf;

use crate::ecs::component::MAX_COMPONENT_TYPES;

/// Errors raised while configuring the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A simulation was configured with zero updates per second.
    #[error("updates per second must be non-zero")]
    ZeroUpdateRate,

    /// More distinct component types than fit in a [`ComponentMask`](crate::ecs::ComponentMask).
    #[error("too many component types: at most {limit} may be registered")]
    TooManyComponentTypes { limit: usize },

    /// A speed multiplier that is not a finite, positive number.
    #[error("invalid simulation speed {0}: must be finite and greater than zero")]
    InvalidSpeed(f32),

    /// A settings file exists but couldn't be read.
    #[error("failed to read settings from {}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings file was read but isn't valid JSON for the settings type.
    #[error("failed to parse settings from {}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl EngineError {
    pub(crate) fn too_many_component_types() -> Self {
        Self::TooManyComponentTypes {
            limit: MAX_COMPONENT_TYPES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            EngineError::ZeroUpdateRate.to_string(),
            "updates per second must be non-zero"
        );
        assert_eq!(
            EngineError::too_many_component_types().to_string(),
            "too many component types: at most 64 may be registered"
        );
    }
}
