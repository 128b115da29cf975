//! # Simulation — Fixed-Timestep Scheduling
//!
//! Rendering runs at whatever rate the host manages; gameplay runs at a fixed
//! rate so physics behaves the same on every machine. The [`FixedStep`] clock
//! converts variable wall-clock frame deltas into a whole number of fixed
//! ticks, and [`Simulation`] runs the system [`Schedule`] once per tick.
//!
//! ## The accumulator
//!
//! ```text
//! frame delta ──× speed──▶ accumulator
//!                            │
//!           ticks = floor(accumulator / step), capped at max_skipped_updates
//!                            │
//!           accumulator -= ticks × step
//!                            │
//!           interpolation = accumulator / step, clamped to [0, 1]
//! ```
//!
//! The leftover fraction is handed to the renderer as the interpolation
//! factor so it can draw moving bodies partway to their next position.
//!
//! ## Spiral of death
//!
//! If a frame takes longer than the ticks it triggers, the backlog grows every
//! frame. `max_skipped_updates` caps the ticks per `advance` call so one frame
//! never does unbounded work. Steps beyond the cap stay in the accumulator and
//! are worked off by later frames, so simulated time catches back up with wall
//! time once the host recovers. A cap of `0` means unbounded.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──first advance──▶ Running ◀──set_running──▶ Paused
//! ```
//!
//! There is no terminal state. Pausing never interrupts a tick in progress; it
//! takes effect before the next one.

use std::time::Duration;

use crate::config::EngineSettings;
use crate::debug::ResetDebugDraw;
use crate::ecs::system::{Schedule, System};
use crate::error::EngineError;
use crate::message::{MessageContext, MessageHub};

/// What a context must provide to be driven by a [`Simulation`].
pub trait SimulationContext: MessageContext {
    /// Multiplier applied to wall-clock time before it reaches the clock.
    fn speed(&self) -> f32 {
        1.0
    }

    /// Checked before every tick. Returning `false` pauses the simulation.
    fn keep_running(&self) -> bool {
        true
    }
}

/// Converts frame deltas into fixed ticks.
#[derive(Clone, Debug)]
pub struct FixedStep {
    step: Duration,
    max_skipped_updates: u32,
    speed: f32,
    accumulator: Duration,
    simulated: Duration,
    interpolation: f32,
}

impl FixedStep {
    /// A clock ticking `updates_per_second` times per simulated second, running
    /// at most `max_skipped_updates` ticks per [`advance`](Self::advance)
    /// (`0` = unbounded).
    pub fn new(updates_per_second: u32, max_skipped_updates: u32) -> Result<Self, EngineError> {
        if updates_per_second == 0 {
            return Err(EngineError::ZeroUpdateRate);
        }
        Ok(Self {
            step: Duration::from_nanos(1_000_000_000 / u64::from(updates_per_second)),
            max_skipped_updates,
            speed: 1.0,
            accumulator: Duration::ZERO,
            simulated: Duration::ZERO,
            interpolation: 0.0,
        })
    }

    /// The fixed tick length.
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the wall-clock multiplier. Must be finite and positive.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), EngineError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(EngineError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Fraction of a step left over after the last `advance`, in `[0, 1]`.
    pub fn interpolation(&self) -> f32 {
        self.interpolation
    }

    /// Total simulated time across all ticks handed out.
    pub fn simulated_time(&self) -> Duration {
        self.simulated
    }

    /// Feed a wall-clock delta and return how many ticks to run now.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta.mul_f64(f64::from(self.speed));

        let due = u32::try_from(self.accumulator.as_nanos() / self.step.as_nanos()).unwrap_or(u32::MAX);
        let ticks = if self.max_skipped_updates == 0 {
            due
        } else {
            due.min(self.max_skipped_updates)
        };
        if due > ticks {
            log::debug!("simulation behind by {} ticks, running {} this frame", due - ticks, ticks);
        }

        self.accumulator -= self.step * ticks;
        self.simulated += self.step * ticks;
        self.interpolation = (self.accumulator.as_secs_f32() / self.step.as_secs_f32()).clamp(0.0, 1.0);
        ticks
    }
}

/// Where a [`Simulation`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Idle,
    Running,
    Paused,
}

/// Runs a schedule of systems at a fixed rate against a context `C`.
pub struct Simulation<C> {
    clock: FixedStep,
    schedule: Schedule<C>,
    hub: MessageHub<C>,
    state: SimulationState,
    ticks: u64,
}

impl<C: SimulationContext> Simulation<C> {
    pub fn new(updates_per_second: u32, max_skipped_updates: u32) -> Result<Self, EngineError> {
        let clock = FixedStep::new(updates_per_second, max_skipped_updates)?;
        log::debug!(
            "simulation: {} updates/s ({:?} step), max {} per frame",
            updates_per_second,
            clock.step(),
            max_skipped_updates
        );
        Ok(Self {
            clock,
            schedule: Schedule::new(),
            hub: MessageHub::new(),
            state: SimulationState::Idle,
            ticks: 0,
        })
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self, EngineError> {
        Self::new(settings.updates_per_second, settings.max_skipped_updates)
    }

    /// Append a system; systems run in the order they were added.
    pub fn add_system<S: System<C> + 'static>(&mut self, system: S) -> &mut Self {
        self.schedule.add_system(system);
        self
    }

    /// The message hub, for registering handlers and subscribers.
    pub fn hub_mut(&mut self) -> &mut MessageHub<C> {
        &mut self.hub
    }

    pub fn schedule(&self) -> &Schedule<C> {
        &self.schedule
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != SimulationState::Paused
    }

    /// Pause or resume. A paused simulation ignores `advance`.
    pub fn set_running(&mut self, running: bool) {
        let next = match (self.state, running) {
            (SimulationState::Paused, true) => SimulationState::Running,
            (_, false) => SimulationState::Paused,
            (state, true) => state,
        };
        if next != self.state {
            log::info!("simulation {:?} → {:?}", self.state, next);
            self.state = next;
        }
    }

    /// The renderer's interpolation factor after the last `advance`.
    pub fn interpolation(&self) -> f32 {
        self.clock.interpolation()
    }

    /// The fixed step systems receive.
    pub fn step(&self) -> Duration {
        self.clock.step()
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed one frame's wall-clock delta and run every tick that is due.
    /// Returns the number of ticks actually run.
    pub fn advance(&mut self, ctx: &mut C, delta: Duration) -> u32 {
        match self.state {
            SimulationState::Paused => return 0,
            SimulationState::Idle => {
                log::info!("simulation started");
                self.state = SimulationState::Running;
            }
            SimulationState::Running => {}
        }

        let speed = ctx.speed();
        if speed != self.clock.speed() {
            match self.clock.set_speed(speed) {
                Ok(()) => log::debug!("simulation speed set to {:.2}", speed),
                Err(err) => log::warn!("{}; keeping {:.2}", err, self.clock.speed()),
            }
        }

        let due = self.clock.advance(delta);
        let mut ran = 0;
        for _ in 0..due {
            if !ctx.keep_running() {
                self.set_running(false);
                break;
            }
            self.tick(ctx);
            ran += 1;
        }
        log::trace!("frame: {} of {} ticks, interpolation {:.3}", ran, due, self.interpolation());
        ran
    }

    fn tick(&mut self, ctx: &mut C) {
        ctx.outbox().publish(ResetDebugDraw);
        self.hub.dispatch(ctx);

        let hub = &mut self.hub;
        self.schedule.run_with(ctx, self.clock.step(), |ctx| {
            hub.dispatch(ctx);
        });
        self.ticks += 1;
    }
}
