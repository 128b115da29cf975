//! # Render — What to Draw, Not How
//!
//! The engine doesn't own a GPU. It reduces a scene to a flat list of
//! [`DrawCommand`]s (shape kind, on-screen bounds, colour) and hands them to
//! whatever implements [`ShapeRenderer`]: a wgpu batcher, a software
//! rasteriser, or the [`RecordingRenderer`] used by tests and the headless
//! runner.
//!
//! ```text
//! World ──collect──▶ [DrawCommand] ──draw()──▶ impl ShapeRenderer
//! ```

use serde::{Deserialize, Serialize};

use crate::ecs::Entity;
use crate::math::Vec2;
use crate::shape::Bounds;

/// Segments used when outlining circles.
pub const CIRCLE_SEGMENTS: u32 = 32;

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const GOLD: Self = Self::rgb(1.0, 0.843, 0.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(0.392, 0.584, 0.929);

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Which primitive a [`DrawCommand`] describes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawKind {
    Rectangle,
    Circle { radius: f32 },
}

/// One drawable entity, already resolved to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    pub kind: DrawKind,
    pub bounds: Bounds,
    pub color: Color,
}

/// The primitives a backend must provide.
///
/// Only filled rectangles and lines are required; everything else has a
/// default built from those.
pub trait ShapeRenderer {
    fn fill_rectangle(&mut self, bounds: Bounds, color: Color);

    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color);

    /// Outline a circle as a closed polygon of `segments` edges.
    fn draw_circle(&mut self, center: Vec2, radius: f32, segments: u32, color: Color) {
        let segments = segments.max(3);
        let point = |i: u32| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        };
        for i in 0..segments {
            self.draw_line(point(i), point(i + 1), color);
        }
    }

    fn draw_rectangle(&mut self, bounds: Bounds, color: Color) {
        let top_left = bounds.position();
        let top_right = Vec2::new(bounds.right(), bounds.top());
        let bottom_right = Vec2::new(bounds.right(), bounds.bottom());
        let bottom_left = Vec2::new(bounds.left(), bounds.bottom());
        self.draw_line(top_left, top_right, color);
        self.draw_line(top_right, bottom_right, color);
        self.draw_line(bottom_right, bottom_left, color);
        self.draw_line(bottom_left, top_left, color);
    }

    fn draw_point(&mut self, position: Vec2, size: f32, color: Color) {
        self.fill_rectangle(Bounds::from_center(position, Vec2::splat(size)), color);
    }
}

/// Hand every command to `renderer`, in order.
pub fn draw(commands: &[DrawCommand], renderer: &mut impl ShapeRenderer) {
    for command in commands {
        match command.kind {
            DrawKind::Rectangle => renderer.fill_rectangle(command.bounds, command.color),
            DrawKind::Circle { radius } => {
                renderer.draw_circle(command.bounds.center(), radius, CIRCLE_SEGMENTS, command.color)
            }
        }
    }
}

/// A primitive call captured by [`RecordingRenderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderCall {
    FillRectangle { bounds: Bounds, color: Color },
    Line { start: Vec2, end: Vec2, color: Color },
}

/// A [`ShapeRenderer`] that just remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn filled_rectangles(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::FillRectangle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Line { .. }))
            .count()
    }
}

impl ShapeRenderer for RecordingRenderer {
    fn fill_rectangle(&mut self, bounds: Bounds, color: Color) {
        self.calls.push(RenderCall::FillRectangle { bounds, color });
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.calls.push(RenderCall::Line { start, end, color });
    }
}
