//! # Collision — Intersection Tests and Penetration Vectors
//!
//! Narrow-phase geometry for the two shape kinds. Everything here is a pure
//! function of two [`Shape`]s; deciding what to *do* about a collision is the
//! game's job.
//!
//! ## Sign convention
//!
//! [`penetration_vector(a, b)`](penetration_vector) returns how far `a` has
//! sunk into `b`. Subtracting it from `a`'s position separates the pair:
//!
//! ```text
//!   a.position -= penetration_vector(a, b)      // a now just touches b
//!   penetration_vector(b, a) == -penetration_vector(a, b)
//! ```
//!
//! The vector's direction (normalised) is also the surface normal used to
//! reflect velocities.
//!
//! ## Edge cases
//!
//! | Pair              | Strictness                         | Degenerate case                  |
//! |-------------------|------------------------------------|----------------------------------|
//! | circle / circle   | overlapping only (`d < r1 + r2`)   | same centre → push along +Y      |
//! | circle / rect     | overlapping only                   | centre inside → axis-aligned push|
//! | rect / rect       | touching edges count               | zero-area overlap → zero vector  |
//!
//! A zero vector means "nothing to resolve" and callers skip it.

use crate::math::{Vec2, sign_or_positive};
use crate::shape::{Circle, Rectangle, Shape};

/// Whether two shapes overlap.
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Rectangle(a), Shape::Rectangle(b)) => a.bounds().intersects(&b.bounds()),
        (Shape::Circle(a), Shape::Circle(b)) => circles_intersect(a, b),
        (Shape::Circle(circle), Shape::Rectangle(rect)) | (Shape::Rectangle(rect), Shape::Circle(circle)) => {
            circle_rect_intersect(circle, rect)
        }
    }
}

/// The penetration of `a` into `b`, or [`Vec2::ZERO`] if they don't overlap.
///
/// See the module docs for the sign convention.
pub fn penetration_vector(a: &Shape, b: &Shape) -> Vec2 {
    if !intersects(a, b) {
        return Vec2::ZERO;
    }
    match (a, b) {
        (Shape::Rectangle(a), Shape::Rectangle(b)) => rect_rect(a, b),
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
        (Shape::Circle(circle), Shape::Rectangle(rect)) => circle_rect(circle, rect),
        (Shape::Rectangle(rect), Shape::Circle(circle)) => -circle_rect(circle, rect),
    }
}

fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) < reach * reach
}

fn circle_rect_intersect(circle: &Circle, rect: &Rectangle) -> bool {
    let closest = rect.bounds().closest_point(circle.center);
    closest.distance_squared(circle.center) < circle.radius * circle.radius
}

/// Push along the axis with the thinner overlap, pointing from `a` toward `b`.
/// Ties go to Y.
fn rect_rect(a: &Rectangle, b: &Rectangle) -> Vec2 {
    let overlap = a.bounds().intersection(&b.bounds());
    let (a_center, b_center) = (a.center(), b.center());
    if overlap.width < overlap.height {
        let dx = if a_center.x < b_center.x { overlap.width } else { -overlap.width };
        Vec2::new(dx, 0.0)
    } else {
        let dy = if a_center.y < b_center.y { overlap.height } else { -overlap.height };
        Vec2::new(0.0, dy)
    }
}

fn circle_circle(a: &Circle, b: &Circle) -> Vec2 {
    let displacement = b.center - a.center;
    let reach = a.radius + b.radius;
    let desired = if displacement == Vec2::ZERO {
        Vec2::Y * reach
    } else {
        displacement.normalize() * reach
    };
    desired - displacement
}

fn circle_rect(circle: &Circle, rect: &Rectangle) -> Vec2 {
    let bounds = rect.bounds();
    let closest = bounds.closest_point(circle.center);
    let to_closest = closest - circle.center;

    if bounds.contains(circle.center) || to_closest == Vec2::ZERO {
        // Centre is inside: push out through the nearer of the two axes so the
        // circle ends up just touching the far side of that edge.
        let d = rect.center() - circle.center;
        let reach = rect.half_extents() + Vec2::splat(circle.radius);
        let push_x = sign_or_positive(d.x) * reach.x - d.x;
        let push_y = sign_or_positive(d.y) * reach.y - d.y;
        if push_x.abs() < push_y.abs() {
            Vec2::new(push_x, 0.0)
        } else {
            Vec2::new(0.0, push_y)
        }
    } else {
        to_closest.normalize() * circle.radius - to_closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    fn resolve(a: &Shape, b: &Shape) -> Shape {
        let mut moved = *a;
        moved.translate(-penetration_vector(a, b));
        moved
    }

    #[test]
    fn overlapping_circles_push_along_centre_line() {
        let a = Shape::circle(0.0, 0.0, 5.0);
        let b = Shape::circle(8.0, 0.0, 5.0);
        let p = penetration_vector(&a, &b);
        assert!(approx(p, Vec2::new(2.0, 0.0)), "{p:?}");
        assert!(approx(penetration_vector(&b, &a), -p));

        let moved = resolve(&a, &b);
        assert!(approx(moved.center(), Vec2::new(-2.0, 0.0)));
        assert!(!intersects(&moved, &b));
    }

    #[test]
    fn coincident_circles_push_along_y() {
        let a = Shape::circle(3.0, 3.0, 2.0);
        let b = Shape::circle(3.0, 3.0, 1.0);
        assert_eq!(penetration_vector(&a, &b), Vec2::new(0.0, 3.0));
    }

    #[test]
    fn touching_circles_do_not_intersect() {
        let a = Shape::circle(0.0, 0.0, 5.0);
        let b = Shape::circle(10.0, 0.0, 5.0);
        assert!(!intersects(&a, &b));
        assert_eq!(penetration_vector(&a, &b), Vec2::ZERO);
    }

    #[test]
    fn circle_centred_in_square_exits_through_y() {
        // 20×20 square centred on the origin, circle radius 5 at the origin.
        let circle = Shape::circle(0.0, 0.0, 5.0);
        let square = Shape::rectangle(-10.0, -10.0, 20.0, 20.0);
        let p = penetration_vector(&circle, &square);
        assert_eq!(p, Vec2::new(0.0, 15.0));

        let moved = resolve(&circle, &square);
        assert_eq!(moved.center(), Vec2::new(0.0, -15.0));
        assert!(!intersects(&moved, &square));
    }

    #[test]
    fn circle_inside_wide_rect_exits_through_nearer_edge() {
        // Circle near the right edge of a wide box: X push is shorter.
        let circle = Shape::circle(45.0, 0.0, 2.0);
        let rect = Shape::rectangle(-50.0, -10.0, 100.0, 20.0);
        let p = penetration_vector(&circle, &rect);
        // d.x = -45, reach.x = 52 → push_x = -52 + 45 = -7
        assert!(approx(p, Vec2::new(-7.0, 0.0)), "{p:?}");
        assert!(approx(resolve(&circle, &rect).center(), Vec2::new(52.0, 0.0)));
    }

    #[test]
    fn circle_overlapping_rect_edge() {
        // Circle above a rectangle, dipping 3 units into its top edge.
        let circle = Shape::circle(5.0, -2.0, 5.0);
        let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(&circle, &rect));
        let p = penetration_vector(&circle, &rect);
        assert!(approx(p, Vec2::new(0.0, 3.0)), "{p:?}");
        assert!(approx(resolve(&circle, &rect).center(), Vec2::new(5.0, -5.0)));
    }

    #[test]
    fn rect_circle_is_negated_circle_rect() {
        let circle = Shape::circle(5.0, -2.0, 5.0);
        let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            penetration_vector(&rect, &circle),
            -penetration_vector(&circle, &rect)
        );
    }

    #[test]
    fn rects_push_along_thinner_overlap() {
        // Overlap is 3 wide and 10 tall.
        let a = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rectangle(7.0, 0.0, 10.0, 10.0);
        assert_eq!(penetration_vector(&a, &b), Vec2::new(3.0, 0.0));
        assert_eq!(penetration_vector(&b, &a), Vec2::new(-3.0, 0.0));
        assert!(approx(resolve(&a, &b).position(), Vec2::new(-3.0, 0.0)));
    }

    #[test]
    fn rects_tie_goes_to_y() {
        let a = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rectangle(5.0, 5.0, 10.0, 10.0);
        assert_eq!(penetration_vector(&a, &b), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn touching_rects_intersect_with_zero_penetration() {
        let a = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rectangle(10.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert_eq!(penetration_vector(&a, &b), Vec2::ZERO);
    }

    #[test]
    fn separated_shapes() {
        let circle = Shape::circle(100.0, 100.0, 5.0);
        let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&circle, &rect));
        assert_eq!(penetration_vector(&circle, &rect), Vec2::ZERO);
        assert_eq!(penetration_vector(&rect, &circle), Vec2::ZERO);
    }
}
