use std::time::Duration;

use kiln::ecs::System;
use kiln::message::MessageContext;

use crate::components::{Ball, Movable};
use crate::context::BreakoutContext;
use crate::messages::StopGame;
use crate::state::{GameAction, GameState};

/// Launches the ball on the first input and forwards Quit as [`StopGame`].
pub struct GameSystem;

impl System<BreakoutContext> for GameSystem {
    fn run(&mut self, ctx: &mut BreakoutContext, _step: Duration) {
        if ctx.actions.just_pressed(GameAction::Quit) {
            ctx.outbox().send(StopGame);
        }

        if ctx.shared.game_state != GameState::Initial || !ctx.actions.any_pressed() {
            return;
        }

        ctx.shared.game_state = GameState::Playing;
        let launch = ctx.tuning.launch_velocity;
        for entity in ctx.world.entities_matching_all::<(Ball, Movable)>() {
            ctx.world.component_mut::<Movable>(entity).velocity = launch;
        }
        log::info!("game state {:?} → {:?}", GameState::Initial, GameState::Playing);
    }
}
