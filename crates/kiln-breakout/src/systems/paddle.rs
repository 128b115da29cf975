use std::time::Duration;

use glam::Vec2;
use kiln::ecs::System;

use crate::components::{Controllable, Movable};
use crate::context::BreakoutContext;
use crate::state::GameAction;

/// Left/Right actions set the paddle's horizontal velocity.
pub struct PaddleSystem;

impl System<BreakoutContext> for PaddleSystem {
    fn run(&mut self, ctx: &mut BreakoutContext, _step: Duration) {
        let mut direction = 0.0;
        if ctx.actions.pressed(GameAction::Left) {
            direction -= 1.0;
        }
        if ctx.actions.pressed(GameAction::Right) {
            direction += 1.0;
        }
        let velocity = Vec2::new(direction * ctx.tuning.paddle_speed, 0.0);

        for entity in ctx.world.entities_matching_all::<(Controllable, Movable)>() {
            ctx.world.component_mut::<Movable>(entity).velocity = velocity;
        }
    }
}
