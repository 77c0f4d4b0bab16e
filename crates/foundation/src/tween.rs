//! Tween primitives.
//!
//! A tween maps animation progress `t` in `[0, 1]` to a value. Tweens are pure
//! and hold no cursor, so a frame scheduler may sample them in any order and
//! restart them at will.

use crate::math::Vec2;

/// A function from animation progress to an interpolated value.
pub type Tween<V> = Box<dyn Fn(f64) -> V>;

/// Linear interpolation between two numbers.
pub fn interpolate_number(a: f64, b: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| a * (1.0 - t) + b * t
}

/// Linear interpolation rounded to the nearest integer at every sample.
pub fn interpolate_round(a: f64, b: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| (a * (1.0 - t) + b * t).round()
}

pub fn interpolate_vec2(a: Vec2, b: Vec2) -> impl Fn(f64) -> Vec2 + Copy {
    move |t| Vec2::new(a.x * (1.0 - t) + b.x * t, a.y * (1.0 - t) + b.y * t)
}

/// Timing curve applied to linear progress before a tween is sampled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease-in-out; the default for chart transitions.
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}
