//! The level: a brick grid, the paddle, the ball, and four walls.
//!
//! ```text
//!            wall (0, -h)
//!        ┌──────────────────┐
//!        │  ▭▭▭▭▭▭▭▭▭▭      │
//! wall   │  ▭▭▭▭▭▭▭▭▭▭      │   wall
//! (-w,0) │       ●          │  (w, 0)
//!        │     ▬▬▬▬▬        │
//!        └──────────────────┘
//!            wall (0, h)
//! ```

use glam::Vec2;
use kiln::ecs::{Entity, World};
use kiln::render::Color;
use kiln::shape::{Body, Shape};

use crate::components::{Ball, BoundsResponse, Collidable, CollisionKind, Colored, Controllable, Movable};
use crate::settings::BreakoutSettings;
use crate::state::{GameState, SharedState};

pub const BRICK_SIZE: Vec2 = Vec2::new(40.0, 20.0);
pub const BRICK_PADDING: f32 = 2.0;
pub const BRICK_TOP: f32 = 50.0;
pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
/// Distance from the paddle's top edge to the bottom of the play area.
pub const PADDLE_BOTTOM_MARGIN: f32 = 40.0;
/// How far above the paddle centre the ball starts.
pub const BALL_LIFT: f32 = 20.0;

/// Handles to everything the scene created.
#[derive(Clone, Debug)]
pub struct Scene {
    pub paddle: Entity,
    pub ball: Entity,
    pub walls: [Entity; 4],
    pub bricks: Vec<Entity>,
}

/// Populate `world` and put the game back in [`GameState::Initial`].
pub fn build(world: &mut World, shared: &mut SharedState, settings: &BreakoutSettings) -> Scene {
    let size = shared.game_size;

    let bricks = spawn_bricks(world, size, settings.brick_rows, settings.brick_cols);

    let paddle_position = Vec2::new((size.x - PADDLE_SIZE.x) / 2.0, size.y - PADDLE_BOTTOM_MARGIN);
    let paddle = world
        .spawn()
        .insert(Body::new(Shape::rectangle(
            paddle_position.x,
            paddle_position.y,
            PADDLE_SIZE.x,
            PADDLE_SIZE.y,
        )))
        .insert(Colored(Color::RED))
        .insert(Controllable)
        .insert(Movable::default())
        .insert(Collidable::new(CollisionKind::Paddle).with_bounds(BoundsResponse::Stop))
        .id();

    let ball_center = paddle_position + PADDLE_SIZE / 2.0 - Vec2::new(0.0, BALL_LIFT);
    let ball = world
        .spawn()
        .insert(Body::new(Shape::circle(ball_center.x, ball_center.y, settings.ball_radius)))
        .insert(Colored(Color::WHITE))
        .insert(Movable::default())
        .insert(Ball)
        .insert(Collidable::new(CollisionKind::Ball))
        .id();

    // Walls are the size of the play area and sit just outside each edge.
    let walls = [
        Vec2::new(-size.x, 0.0),
        Vec2::new(size.x, 0.0),
        Vec2::new(0.0, -size.y),
        Vec2::new(0.0, size.y),
    ]
    .map(|position| {
        world
            .spawn()
            .insert(Body::new(Shape::rectangle(position.x, position.y, size.x, size.y)))
            .insert(Collidable::new(CollisionKind::Wall))
            .id()
    });

    shared.game_state = GameState::Initial;
    log::info!(
        "scene built: {} bricks, paddle {}, ball {}",
        bricks.len(),
        paddle,
        ball
    );

    Scene {
        paddle,
        ball,
        walls,
        bricks,
    }
}

fn spawn_bricks(world: &mut World, size: Vec2, rows: u32, cols: u32) -> Vec<Entity> {
    let offset = Vec2::new(
        (size.x - cols as f32 * BRICK_SIZE.x - BRICK_PADDING * cols as f32) / 2.0,
        BRICK_TOP,
    );
    let stride = BRICK_SIZE + Vec2::splat(BRICK_PADDING);

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let position = offset + Vec2::new(col as f32, row as f32) * stride;
            let brick = world
                .spawn()
                .insert(Body::new(Shape::rectangle(
                    position.x,
                    position.y,
                    BRICK_SIZE.x,
                    BRICK_SIZE.y,
                )))
                .insert(Colored(Color::GOLD))
                .insert(Collidable::new(CollisionKind::Brick))
                .id();
            bricks.push(brick);
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built() -> (World, SharedState, Scene) {
        let settings = BreakoutSettings::default();
        let mut world = World::new();
        let mut shared = SharedState::new(settings.game_size);
        shared.game_state = GameState::Playing;
        let scene = build(&mut world, &mut shared, &settings);
        (world, shared, scene)
    }

    #[test]
    fn composition() {
        let (mut world, shared, scene) = built();
        assert_eq!(shared.game_state, GameState::Initial);
        assert_eq!(scene.bricks.len(), 100);
        assert_eq!(world.entity_count(), 100 + 1 + 1 + 4);
        assert_eq!(world.entities_matching_all::<(Collidable, Body)>().len(), 106);
        assert_eq!(world.entities_matching_all::<(Colored, Body)>().len(), 102);
        assert_eq!(world.entities_matching_all::<(Controllable, Movable)>(), vec![scene.paddle]);
        assert_eq!(world.entities_matching_all::<(Ball, Movable)>(), vec![scene.ball]);
    }

    #[test]
    fn layout() {
        let (world, _, scene) = built();
        let first = world.component::<Body>(scene.bricks[0]);
        assert_eq!(first.position(), Vec2::new(190.0, 50.0));
        let last = world.component::<Body>(scene.bricks[99]);
        assert_eq!(last.position(), Vec2::new(190.0 + 9.0 * 42.0, 50.0 + 9.0 * 22.0));

        let paddle = world.component::<Body>(scene.paddle);
        assert_eq!(paddle.position(), Vec2::new(350.0, 440.0));
        let ball = world.component::<Body>(scene.ball);
        assert_eq!(ball.center(), Vec2::new(400.0, 430.0));

        let top_wall = world.component::<Body>(scene.walls[2]).bounds();
        assert_eq!(top_wall.bottom(), 0.0);
        assert_eq!(top_wall.size(), Vec2::new(800.0, 480.0));
    }

    #[test]
    fn non_square_grid_is_centred_on_its_columns() {
        let settings = BreakoutSettings {
            brick_rows: 2,
            brick_cols: 5,
            ..BreakoutSettings::default()
        };
        let mut world = World::new();
        let mut shared = SharedState::new(settings.game_size);
        let scene = build(&mut world, &mut shared, &settings);

        assert_eq!(scene.bricks.len(), 10);
        let first = world.component::<Body>(scene.bricks[0]).bounds();
        let last = world.component::<Body>(scene.bricks[9]).bounds();
        assert_eq!(first.position(), Vec2::new(295.0, 50.0));
        assert_eq!(last.position(), Vec2::new(295.0 + 4.0 * 42.0, 72.0));
        // Equal margins either side, give or take the trailing padding.
        assert_eq!(first.left() + last.right() + BRICK_PADDING, 800.0);
    }

    #[test]
    fn ball_starts_clear_of_the_paddle() {
        let (world, _, scene) = built();
        let ball = world.component::<Body>(scene.ball).shape;
        let paddle = world.component::<Body>(scene.paddle).shape;
        assert!(!kiln::collision::intersects(&ball, &paddle));
    }
}
