//! # BreakoutGame — the Host-Facing Wrapper
//!
//! Owns the context and the simulation and exposes the three things a host
//! loop needs:
//!
//! ```ignore
//! let mut game = BreakoutGame::new(BreakoutSettings::load("breakout.json")?)?;
//! while !game.is_stopped() {
//!     let stats = game.frame(&snapshot, frame_delta);   // input + fixed ticks
//!     game.render(&mut renderer);                        // scene + debug overlay
//! }
//! ```
//!
//! Input is folded into the action state once per frame, before any ticks run,
//! so every tick of a frame sees the same actions. Frames that run no tick
//! (a display refreshing faster than the update rate) keep their key edges
//! for the next frame that does.

use std::time::Duration;

use kiln::EngineError;
use kiln::ecs::World;
use kiln::input::{InputSnapshot, KeyMap};
use kiln::render::{DrawCommand, ShapeRenderer, draw};
use kiln::simulation::{Simulation, SimulationState};
use kiln::time::Time;

use crate::context::BreakoutContext;
use crate::messages;
use crate::scene::Scene;
use crate::settings::BreakoutSettings;
use crate::state::{GameAction, GameState, SharedState};
use crate::systems::render::collect_draw_commands;
use crate::systems::{CollisionSystem, GameSystem, MovementSystem, PaddleSystem, SpeedSystem};

/// What happened during one [`BreakoutGame::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Fixed ticks run this frame.
    pub ticks: u32,
    /// Fraction of a step left banked, for render extrapolation.
    pub interpolation: f32,
    pub speed: f32,
    pub game_state: GameState,
    pub simulation: SimulationState,
}

pub struct BreakoutGame {
    ctx: BreakoutContext,
    simulation: Simulation<BreakoutContext>,
    key_bindings: KeyMap<GameAction>,
    scene: Scene,
    time: Time,
    interpolation: f32,
}

impl BreakoutGame {
    /// Build the level and the simulation. Fails only on invalid engine
    /// settings, such as a zero update rate.
    pub fn new(settings: BreakoutSettings) -> Result<Self, EngineError> {
        let mut simulation = Simulation::from_settings(&settings.engine)?;
        messages::register(simulation.hub_mut());
        simulation
            .add_system(PaddleSystem)
            .add_system(GameSystem)
            .add_system(SpeedSystem)
            .add_system(MovementSystem)
            .add_system(CollisionSystem);

        let (ctx, scene) = BreakoutContext::with_scene(&settings);

        Ok(Self {
            ctx,
            simulation,
            key_bindings: settings.key_bindings,
            scene,
            time: Time::new(),
            interpolation: 0.0,
        })
    }

    /// Apply this frame's input, then run every tick that is due.
    pub fn frame(&mut self, snapshot: &InputSnapshot, delta: Duration) -> FrameStats {
        self.time.update(delta);
        self.ctx.actions.apply(snapshot, &self.key_bindings);

        let ticks = self.simulation.advance(&mut self.ctx, delta);
        if ticks > 0 {
            self.ctx.actions.mark_consumed();
        }
        self.interpolation = self.simulation.interpolation();

        #[cfg(feature = "diagnostics")]
        self.log_timings(ticks);

        FrameStats {
            ticks,
            interpolation: self.interpolation,
            speed: self.ctx.shared.speed,
            game_state: self.ctx.shared.game_state,
            simulation: self.simulation.state(),
        }
    }

    #[cfg(feature = "diagnostics")]
    fn log_timings(&self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        for timing in self.simulation.schedule().timings() {
            log::trace!("{}: {:.1}µs", timing.name, timing.duration_us);
        }
    }

    /// The scene as draw commands, extrapolated by the banked interpolation.
    pub fn draw_commands(&mut self) -> Vec<DrawCommand> {
        let step = self.simulation.step();
        collect_draw_commands(&mut self.ctx.world, self.interpolation, step)
    }

    /// Draw the scene, then the debug overlay on top.
    pub fn render(&mut self, renderer: &mut impl ShapeRenderer) {
        let commands = self.draw_commands();
        draw(&commands, renderer);
        self.ctx.debug.render(renderer);
    }

    /// Stop from the host side, as if [`StopGame`](crate::messages::StopGame)
    /// had been handled.
    pub fn stop(&mut self) {
        self.ctx.request_stop();
        self.simulation.set_running(false);
    }

    /// Whether the game has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.ctx.is_stopping()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    pub fn shared(&self) -> &SharedState {
        &self.ctx.shared
    }

    pub fn context(&self) -> &BreakoutContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut BreakoutContext {
        &mut self.ctx
    }

    pub fn simulation(&self) -> &Simulation<BreakoutContext> {
        &self.simulation
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}
