//! Requests systems send to the game, and the handlers that serve them.

use kiln::debug::ResetDebugDraw;
use kiln::message::MessageHub;

use crate::context::BreakoutContext;

/// Lowest and highest simulation speed the game accepts.
pub const SPEED_RANGE: (f32, f32) = (0.1, 10.0);

/// Change the simulation speed multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetSimulationSpeed(pub f32);

/// Stop the game. The simulation pauses before its next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopGame;

/// Install Breakout's request handlers and notification subscribers.
pub fn register(hub: &mut MessageHub<BreakoutContext>) {
    hub.handle(|ctx: &mut BreakoutContext, SetSimulationSpeed(speed): SetSimulationSpeed| {
        let speed = speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        if speed != ctx.shared.speed {
            log::debug!("game speed {:.2} → {:.2}", ctx.shared.speed, speed);
            ctx.shared.speed = speed;
        }
    });

    hub.handle(|ctx: &mut BreakoutContext, _: StopGame| {
        if !ctx.is_stopping() {
            log::info!("stop requested");
        }
        ctx.request_stop();
    });

    hub.subscribe(|ctx: &mut BreakoutContext, _: &ResetDebugDraw| {
        ctx.debug.clear();
    });
}
