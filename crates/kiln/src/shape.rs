//! # Shapes — Rectangles, Circles, and Bodies
//!
//! Two shape kinds exist and the set is closed, so [`Shape`] is an enum and
//! every algorithm over shapes matches on it exhaustively.
//!
//! | Kind        | `position` means | `size`          |
//! |-------------|------------------|-----------------|
//! | `Rectangle` | top-left corner  | width × height  |
//! | `Circle`    | centre           | 2r × 2r         |
//!
//! Both expose the same four queries: position, size, axis-aligned
//! [`Bounds`], and centre. Coordinates are screen-style: +X right, +Y down.

use crate::math::Vec2;

/// An axis-aligned box: top-left corner plus extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A box of `size` centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let min = center - size * 0.5;
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Edges touching counts as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// The overlap of two boxes, or [`Bounds::EMPTY`] if they don't overlap.
    pub fn intersection(&self, other: &Bounds) -> Bounds {
        let min = self.position().max(other.position());
        let max = Vec2::new(self.right(), self.bottom()).min(Vec2::new(other.right(), other.bottom()));
        if max.x < min.x || max.y < min.y {
            return Bounds::EMPTY;
        }
        Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// The point inside (or on the edge of) this box nearest to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.position(), Vec2::new(self.right(), self.bottom()))
    }

    /// Whether `point` lies inside or on the edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self { position, width, height }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

/// A circle anchored at its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, Vec2::splat(self.radius * 2.0))
    }
}

/// The closed set of collision shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        Shape::Rectangle(Rectangle::new(Vec2::new(x, y), width, height))
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Shape::Circle(Circle::new(Vec2::new(x, y), radius))
    }

    /// Top-left for rectangles, centre for circles.
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Rectangle(rect) => rect.position,
            Shape::Circle(circle) => circle.center,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Shape::Rectangle(rect) => rect.position = position,
            Shape::Circle(circle) => circle.center = position,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position();
        self.set_position(position + delta);
    }

    pub fn size(&self) -> Vec2 {
        self.bounds().size()
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Rectangle(rect) => rect.bounds(),
            Shape::Circle(circle) => circle.bounds(),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Rectangle(rect) => rect.center(),
            Shape::Circle(circle) => circle.center,
        }
    }
}

/// The spatial component: a shape plus render-only origin, scale, and rotation.
///
/// Collision and movement only ever look at `shape`; the other fields are
/// carried for renderers that want them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub shape: Shape,
    pub origin: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
}

impl Body {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.shape.position()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.shape.set_position(position);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    pub fn size(&self) -> Vec2 {
        self.shape.size()
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds()
    }

    pub fn center(&self) -> Vec2 {
        self.shape.center()
    }
}

impl From<Shape> for Body {
    fn from(shape: Shape) -> Self {
        Body::new(shape)
    }
}
