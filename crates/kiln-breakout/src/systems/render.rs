//! Turning the world into draw commands.
//!
//! Runs once per host frame rather than per tick. Moving bodies are drawn
//! slightly ahead of their simulated position, by the fraction of a step the
//! scheduler has banked, so motion stays smooth when the frame rate and the
//! tick rate disagree.

use std::time::Duration;

use glam::Vec2;
use kiln::ecs::World;
use kiln::render::{DrawCommand, DrawKind};
use kiln::shape::{Body, Shape};

use crate::components::{Colored, Movable};

/// One command per `Body + Colored` entity, in entity order.
pub fn collect_draw_commands(world: &mut World, interpolation: f32, step: Duration) -> Vec<DrawCommand> {
    let lead = step.as_secs_f32() * interpolation;

    world
        .entities_matching_all::<(Body, Colored)>()
        .into_iter()
        .map(|entity| {
            let body = world.component::<Body>(entity);
            let offset = world
                .try_component::<Movable>(entity)
                .map_or(Vec2::ZERO, |movable| movable.velocity * lead);

            let mut bounds = body.bounds();
            bounds.x += offset.x;
            bounds.y += offset.y;

            let kind = match body.shape {
                Shape::Rectangle(_) => DrawKind::Rectangle,
                Shape::Circle(circle) => DrawKind::Circle { radius: circle.radius },
            };

            DrawCommand {
                entity,
                kind,
                bounds,
                color: world.component::<Colored>(entity).0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln::render::{Color, RecordingRenderer, draw};

    #[test]
    fn moving_bodies_are_extrapolated() {
        let mut world = World::new();
        let ball = world
            .spawn()
            .insert(Body::new(Shape::circle(50.0, 50.0, 10.0)))
            .insert(Colored(Color::WHITE))
            .insert(Movable::new(Vec2::new(100.0, 0.0)))
            .id();
        let brick = world
            .spawn()
            .insert(Body::new(Shape::rectangle(0.0, 0.0, 40.0, 20.0)))
            .insert(Colored(Color::GOLD))
            .id();
        // Not drawn.
        world.spawn().insert(Body::new(Shape::rectangle(0.0, 0.0, 1.0, 1.0)));

        let commands = collect_draw_commands(&mut world, 0.5, Duration::from_millis(100));
        assert_eq!(commands.len(), 2);

        assert_eq!(commands[0].entity, ball);
        assert_eq!(commands[0].kind, DrawKind::Circle { radius: 10.0 });
        assert_eq!(commands[0].bounds.center(), Vec2::new(55.0, 50.0));

        assert_eq!(commands[1].entity, brick);
        assert_eq!(commands[1].kind, DrawKind::Rectangle);
        assert_eq!(commands[1].bounds.position(), Vec2::ZERO);
        assert_eq!(commands[1].color, Color::GOLD);

        let mut renderer = RecordingRenderer::new();
        draw(&commands, &mut renderer);
        assert_eq!(renderer.filled_rectangles(), 1);
        assert_eq!(renderer.lines(), kiln::render::CIRCLE_SEGMENTS as usize);
    }
}
