//! Debug overlay.
//!
//! Systems scribble diagnostic geometry (collision normals, bounds, points)
//! into a [`DebugDraw`] buffer during a tick; the host renders it on top of the
//! scene. The simulation publishes [`ResetDebugDraw`] at the start of every
//! tick, and a game subscribes to it to clear the buffer, so the overlay
//! always shows the most recent tick only.

use crate::math::Vec2;
use crate::render::{Color, ShapeRenderer};
use crate::shape::Bounds;

/// Published by the simulation before each tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetDebugDraw;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugPoint {
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugRectangle {
    pub bounds: Bounds,
    pub color: Color,
}

/// Overlay geometry collected during the current tick.
#[derive(Debug, Default)]
pub struct DebugDraw {
    pub points: Vec<DebugPoint>,
    pub lines: Vec<DebugLine>,
    pub rectangles: Vec<DebugRectangle>,
}

impl DebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(&mut self, position: Vec2, size: f32, color: Color) {
        self.points.push(DebugPoint { position, size, color });
    }

    pub fn line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.lines.push(DebugLine { start, end, color });
    }

    /// A line from `origin` along `vector`.
    pub fn vector(&mut self, origin: Vec2, vector: Vec2, color: Color) {
        self.line(origin, origin + vector, color);
    }

    pub fn rectangle(&mut self, bounds: Bounds, color: Color) {
        self.rectangles.push(DebugRectangle { bounds, color });
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.rectangles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.rectangles.is_empty()
    }

    /// Draw the overlay with `renderer`: rectangles, then lines, then points.
    pub fn render(&self, renderer: &mut impl ShapeRenderer) {
        for rect in &self.rectangles {
            renderer.draw_rectangle(rect.bounds, rect.color);
        }
        for line in &self.lines {
            renderer.draw_line(line.start, line.end, line.color);
        }
        for point in &self.points {
            renderer.draw_point(point.position, point.size, point.color);
        }
    }
}
