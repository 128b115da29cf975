use std::time::Duration;

use glam::Vec2;
use kiln::collision::penetration_vector;
use kiln::ecs::{Entity, System};
use kiln::math::reflect;
use kiln::render::Color;
use kiln::shape::Body;

use crate::components::{Collidable, CollisionKind, Movable};
use crate::context::BreakoutContext;

/// Penetration vectors are tiny; scale them up on the overlay.
const DEBUG_VECTOR_SCALE: f32 = 10.0;

/// Checks every collidable pair and resolves ball collisions.
///
/// The scan is all-pairs, which is fine at Breakout's scale. Each pair is
/// resolved from both sides: `a` against `b` with the penetration `p`, then
/// `b` against `a` with `-p`. Only balls respond; everything else is
/// immovable as far as collisions go.
pub struct CollisionSystem;

impl System<BreakoutContext> for CollisionSystem {
    fn run(&mut self, ctx: &mut BreakoutContext, _step: Duration) {
        let entities = ctx.world.entities_matching_all::<(Collidable, Body)>();

        for (i, &a) in entities.iter().enumerate() {
            for &b in &entities[i + 1..] {
                // Re-read shapes; an earlier pair may have moved either one.
                let shape_a = ctx.world.component::<Body>(a).shape;
                let shape_b = ctx.world.component::<Body>(b).shape;
                let penetration = penetration_vector(&shape_a, &shape_b);
                if penetration == Vec2::ZERO {
                    continue;
                }

                ctx.debug
                    .vector(shape_a.center(), penetration * DEBUG_VECTOR_SCALE, Color::MAGENTA);
                respond(ctx, a, b, penetration);
                respond(ctx, b, a, -penetration);
            }
        }
    }
}

/// Resolve `entity`'s side of a collision with `other`.
fn respond(ctx: &mut BreakoutContext, entity: Entity, other: Entity, penetration: Vec2) {
    if ctx.world.component::<Collidable>(entity).kind != CollisionKind::Ball {
        return;
    }

    ctx.world.component_mut::<Body>(entity).translate(-penetration);

    let other_kind = ctx.world.component::<Collidable>(other).kind;
    let carried = match other_kind {
        CollisionKind::Paddle => ctx.world.try_component::<Movable>(other).map(|m| m.velocity),
        _ => None,
    };

    if let Some(movable) = ctx.world.try_component_mut::<Movable>(entity) {
        let before = movable.velocity;
        movable.velocity = reflect(movable.velocity, penetration.normalize());
        if let Some(paddle_velocity) = carried {
            movable.velocity += paddle_velocity;
        }
        log::trace!(
            "{} hit {:?} {}: velocity {} → {}",
            entity,
            other_kind,
            other,
            before,
            movable.velocity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Ball;
    use crate::settings::BreakoutSettings;
    use kiln::shape::Shape;

    fn context() -> BreakoutContext {
        BreakoutContext::new(&BreakoutSettings::default())
    }

    fn ball(ctx: &mut BreakoutContext, x: f32, y: f32, velocity: Vec2) -> Entity {
        ctx.world
            .spawn()
            .insert(Body::new(Shape::circle(x, y, 10.0)))
            .insert(Movable::new(velocity))
            .insert(Ball)
            .insert(Collidable::new(CollisionKind::Ball))
            .id()
    }

    fn block(ctx: &mut BreakoutContext, kind: CollisionKind, bounds: (f32, f32, f32, f32)) -> Entity {
        ctx.world
            .spawn()
            .insert(Body::new(Shape::rectangle(bounds.0, bounds.1, bounds.2, bounds.3)))
            .insert(Collidable::new(kind))
            .id()
    }

    #[test]
    fn ball_bounces_off_a_wall() {
        let mut ctx = context();
        // Ball 4px into the top of a floor.
        let b = ball(&mut ctx, 100.0, 94.0, Vec2::new(30.0, 50.0));
        let floor = block(&mut ctx, CollisionKind::Wall, (0.0, 100.0, 800.0, 20.0));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));

        let body = ctx.world.component::<Body>(b);
        assert_eq!(body.center(), Vec2::new(100.0, 90.0));
        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(30.0, -50.0));
        // The floor never moves.
        assert_eq!(ctx.world.component::<Body>(floor).position(), Vec2::new(0.0, 100.0));
        assert!(!ctx.debug.is_empty());
    }

    #[test]
    fn ball_listed_second_resolves_too() {
        let mut ctx = context();
        let floor = block(&mut ctx, CollisionKind::Wall, (0.0, 100.0, 800.0, 20.0));
        let b = ball(&mut ctx, 100.0, 94.0, Vec2::new(0.0, 50.0));
        assert!(floor < b);

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));
        assert_eq!(ctx.world.component::<Body>(b).center(), Vec2::new(100.0, 90.0));
        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(0.0, -50.0));
    }

    #[test]
    fn paddle_velocity_is_added() {
        let mut ctx = context();
        let b = ball(&mut ctx, 400.0, 435.0, Vec2::new(0.0, 100.0));
        let paddle = block(&mut ctx, CollisionKind::Paddle, (350.0, 440.0, 100.0, 20.0));
        ctx.world.add_component(paddle, Movable::new(Vec2::new(50.0, 0.0)));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));

        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(50.0, -100.0));
        assert_eq!(ctx.world.component::<Movable>(paddle).velocity, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn paddle_velocity_is_added_from_below() {
        let mut ctx = context();
        let paddle = block(&mut ctx, CollisionKind::Paddle, (350.0, 440.0, 100.0, 20.0));
        ctx.world.add_component(paddle, Movable::new(Vec2::new(50.0, 0.0)));
        let b = ball(&mut ctx, 400.0, 465.0, Vec2::new(0.0, -100.0));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));

        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(50.0, 100.0));
        assert_eq!(ctx.world.component::<Body>(b).center(), Vec2::new(400.0, 470.0));
    }

    #[test]
    fn brick_velocity_is_not_added() {
        let mut ctx = context();
        let b = ball(&mut ctx, 400.0, 435.0, Vec2::new(0.0, 100.0));
        let brick = block(&mut ctx, CollisionKind::Brick, (350.0, 440.0, 100.0, 20.0));
        ctx.world.add_component(brick, Movable::new(Vec2::new(50.0, 0.0)));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));
        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(0.0, -100.0));
    }

    #[test]
    fn non_balls_pass_through_each_other() {
        let mut ctx = context();
        let paddle = block(&mut ctx, CollisionKind::Paddle, (0.0, 0.0, 100.0, 20.0));
        let wall = block(&mut ctx, CollisionKind::Wall, (90.0, 0.0, 100.0, 20.0));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));
        assert_eq!(ctx.world.component::<Body>(paddle).position(), Vec2::ZERO);
        assert_eq!(ctx.world.component::<Body>(wall).position(), Vec2::new(90.0, 0.0));
        // Still recorded on the overlay.
        assert!(!ctx.debug.is_empty());
    }

    #[test]
    fn touching_is_not_a_collision() {
        let mut ctx = context();
        let b = ball(&mut ctx, 100.0, 90.0, Vec2::new(0.0, 50.0));
        block(&mut ctx, CollisionKind::Wall, (0.0, 100.0, 800.0, 20.0));

        CollisionSystem.run(&mut ctx, Duration::from_millis(16));
        assert_eq!(ctx.world.component::<Movable>(b).velocity, Vec2::new(0.0, 50.0));
        assert!(ctx.debug.is_empty());
    }
}
