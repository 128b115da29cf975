//! The context every Breakout system receives.
//!
//! There are no globals: the world, the input actions, the shared game state,
//! and the debug overlay all hang off [`BreakoutContext`], which the
//! simulation passes explicitly to each system.

use glam::Vec2;
use kiln::debug::DebugDraw;
use kiln::ecs::World;
use kiln::input::ActionState;
use kiln::message::{MessageContext, Outbox};
use kiln::simulation::SimulationContext;

use crate::scene::{self, Scene};
use crate::settings::BreakoutSettings;
use crate::state::{GameAction, SharedState};

/// Gameplay numbers systems read every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub paddle_speed: f32,
    pub launch_velocity: Vec2,
}

pub struct BreakoutContext {
    pub world: World,
    pub actions: ActionState<GameAction>,
    pub shared: SharedState,
    pub debug: DebugDraw,
    pub tuning: Tuning,
    outbox: Outbox,
    stopping: bool,
}

impl BreakoutContext {
    pub fn new(settings: &BreakoutSettings) -> Self {
        Self {
            world: World::new(),
            actions: ActionState::new(),
            shared: SharedState::new(settings.game_size),
            debug: DebugDraw::new(),
            tuning: Tuning {
                paddle_speed: settings.paddle_speed,
                launch_velocity: settings.launch_velocity,
            },
            outbox: Outbox::new(),
            stopping: false,
        }
    }

    /// A fresh context with the level already built.
    pub fn with_scene(settings: &BreakoutSettings) -> (Self, Scene) {
        let mut ctx = Self::new(settings);
        let scene = scene::build(&mut ctx.world, &mut ctx.shared, settings);
        (ctx, scene)
    }

    /// Ask the simulation to stop before its next tick.
    pub fn request_stop(&mut self) {
        self.stopping = true;
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping
    }
}

impl MessageContext for BreakoutContext {
    fn outbox(&mut self) -> &mut Outbox {
        &mut self.outbox
    }
}

impl SimulationContext for BreakoutContext {
    fn speed(&self) -> f32 {
        self.shared.speed
    }

    fn keep_running(&self) -> bool {
        !self.stopping
    }
}
