use std::time::Duration;

use kiln::ecs::System;
use kiln::message::MessageContext;

use crate::context::BreakoutContext;
use crate::messages::{SPEED_RANGE, SetSimulationSpeed};
use crate::state::GameAction;

/// Holding +/- ramps the simulation speed by one unit per simulated second;
/// reset puts it back to 1.
///
/// The new speed goes out as a [`SetSimulationSpeed`] request and lands in
/// [`SharedState::speed`](crate::state::SharedState) when the handler runs.
pub struct SpeedSystem;

impl System<BreakoutContext> for SpeedSystem {
    fn run(&mut self, ctx: &mut BreakoutContext, step: Duration) {
        let current = ctx.shared.speed;
        let mut speed = current;
        let elapsed = step.as_secs_f32();

        if ctx.actions.pressed(GameAction::IncreaseSpeed) {
            speed += elapsed;
        }
        if ctx.actions.pressed(GameAction::DecreaseSpeed) {
            speed -= elapsed;
        }
        if ctx.actions.pressed(GameAction::ResetSpeed) {
            speed = 1.0;
        }

        let speed = speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        if speed != current {
            ctx.outbox().send(SetSimulationSpeed(speed));
        }
    }
}
