//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so games don't need to
//! depend on it directly, plus the few vector helpers the collision code and
//! systems share.

pub use glam::{Vec2, Vec3, Vec4};

/// Reflect `v` about a surface with unit normal `n`: `v - 2(v·n)n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}

/// `1.0` for zero and positive values, `-1.0` otherwise.
///
/// Unlike `f32::signum`, this treats `-0.0` as positive as well, so a push
/// computed from a zero offset always has a direction.
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_flips_normal_component() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(reflect(v, Vec2::Y), Vec2::new(3.0, 4.0));
        assert_eq!(reflect(v, Vec2::NEG_X), Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn sign_treats_zero_as_positive() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.0), 1.0);
        assert_eq!(sign_or_positive(-2.5), -1.0);
        assert_eq!(sign_or_positive(7.0), 1.0);
    }
}
