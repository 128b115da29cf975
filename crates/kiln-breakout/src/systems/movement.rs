use std::time::Duration;

use glam::Vec2;
use kiln::ecs::System;
use kiln::shape::Body;

use crate::components::{BoundsResponse, Collidable, Movable};
use crate::context::BreakoutContext;

/// Integrates velocity and applies each entity's [`BoundsResponse`] against
/// the play area.
pub struct MovementSystem;

impl System<BreakoutContext> for MovementSystem {
    fn run(&mut self, ctx: &mut BreakoutContext, step: Duration) {
        let dt = step.as_secs_f32();
        let area = ctx.shared.game_size;

        for entity in ctx.world.entities_matching_all::<(Movable, Body)>() {
            let mut velocity = ctx.world.component::<Movable>(entity).velocity;
            let response = ctx
                .world
                .try_component::<Collidable>(entity)
                .map_or(BoundsResponse::Ignore, |collidable| collidable.bounds);

            let body = ctx.world.component_mut::<Body>(entity);
            body.translate(velocity * dt);
            if response != BoundsResponse::Ignore {
                keep_inside(body, &mut velocity, area, response);
            }

            ctx.world.component_mut::<Movable>(entity).velocity = velocity;
        }
    }
}

/// Check the left, right, top, and bottom edges in turn.
fn keep_inside(body: &mut Body, velocity: &mut Vec2, area: Vec2, response: BoundsResponse) {
    let bounds = body.bounds();
    if bounds.left() < 0.0 {
        respond(body, velocity, Vec2::new(-bounds.left(), 0.0), response);
    }
    let bounds = body.bounds();
    if bounds.right() > area.x {
        respond(body, velocity, Vec2::new(area.x - bounds.right(), 0.0), response);
    }
    let bounds = body.bounds();
    if bounds.top() < 0.0 {
        respond(body, velocity, Vec2::new(0.0, -bounds.top()), response);
    }
    let bounds = body.bounds();
    if bounds.bottom() > area.y {
        respond(body, velocity, Vec2::new(0.0, area.y - bounds.bottom()), response);
    }
}

/// `correction` is the shift that puts the offending edge on the boundary.
fn respond(body: &mut Body, velocity: &mut Vec2, correction: Vec2, response: BoundsResponse) {
    match response {
        BoundsResponse::Ignore => {}
        BoundsResponse::Stop => body.translate(correction),
        BoundsResponse::Bounce => {
            if correction.x != 0.0 {
                velocity.x = -velocity.x;
            }
            if correction.y != 0.0 {
                velocity.y = -velocity.y;
            }
        }
    }
}
