//! Easing curves used between keyframes.
//!
//! Every function maps a normalized segment time `t` in `[0, 1]` to an
//! interpolation factor, with `f(0) = 0` and `f(1) = 1`. `Back` and
//! `Elastic` overshoot in between.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// How a keyframe segment moves from its left key to the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Constant,
    Linear,
    /// Cubic bezier with auto-clamped handles, flat at both keys.
    Bezier,
    Quad,
    Cubic,
    Back,
    Elastic,
}

/// Which end of the segment an easing curve is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Auto,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Interpolation {
    /// Resolves `Easing::Auto`: transitional curves ease in, dynamic ones ease out.
    fn resolve(self, easing: Easing) -> Easing {
        match (self, easing) {
            (Interpolation::Back | Interpolation::Elastic, Easing::Auto) => Easing::EaseOut,
            (_, Easing::Auto) => Easing::EaseIn,
            (_, easing) => easing,
        }
    }

    /// Interpolation factor at `t`. `Bezier` ignores the easing mode.
    pub fn factor(self, easing: Easing, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let easing = self.resolve(easing);

        match self {
            Interpolation::Constant => 0.0,
            Interpolation::Linear => t,
            Interpolation::Bezier => t * t * (3.0 - 2.0 * t),
            Interpolation::Quad => ease(easing, t, |t| t * t),
            Interpolation::Cubic => ease(easing, t, |t| t * t * t),
            Interpolation::Back => ease(easing, t, back_in),
            Interpolation::Elastic => ease(easing, t, elastic_in),
        }
    }
}

/// Builds ease-out and ease-in-out from an ease-in curve by reflection.
fn ease(easing: Easing, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    match easing {
        Easing::Auto | Easing::EaseIn => ease_in(t),
        Easing::EaseOut => 1.0 - ease_in(1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                ease_in(2.0 * t) / 2.0
            } else {
                1.0 - ease_in(2.0 - 2.0 * t) / 2.0
            }
        }
    }
}

fn back_in(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    C3 * t * t * t - C1 * t * t
}

fn elastic_in(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let c4 = (2.0 * PI) / 3.0;
    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Interpolation; 6] = [
        Interpolation::Linear,
        Interpolation::Bezier,
        Interpolation::Quad,
        Interpolation::Cubic,
        Interpolation::Back,
        Interpolation::Elastic,
    ];

    #[test]
    fn test_curves_hit_both_ends() {
        for interpolation in ALL {
            for easing in [Easing::Auto, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
                assert!(interpolation.factor(easing, 0.0).abs() < 1e-5);
                assert!((interpolation.factor(easing, 1.0) - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_constant_holds_left_value() {
        assert_eq!(Interpolation::Constant.factor(Easing::Auto, 0.9), 0.0);
    }

    #[test]
    fn test_bezier_is_symmetric_smoothstep() {
        let bezier = Interpolation::Bezier;
        assert!((bezier.factor(Easing::EaseInOut, 0.5) - 0.5).abs() < 1e-6);
        assert!((bezier.factor(Easing::EaseInOut, 0.25) - 0.15625).abs() < 1e-6);
    }

    #[test]
    fn test_in_out_quad_matches_reference_curve() {
        let reference = |t: f32| {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        };

        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let value = Interpolation::Quad.factor(Easing::EaseInOut, t);
            assert!((value - reference(t)).abs() < 1e-5, "t = {t}");
        }
    }

    #[test]
    fn test_auto_easing_depends_on_curve() {
        let t = 0.3;
        assert_eq!(
            Interpolation::Cubic.factor(Easing::Auto, t),
            Interpolation::Cubic.factor(Easing::EaseIn, t)
        );
        assert_eq!(
            Interpolation::Back.factor(Easing::Auto, t),
            Interpolation::Back.factor(Easing::EaseOut, t)
        );
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..10)
            .map(|step| Interpolation::Back.factor(Easing::EaseOut, step as f32 / 10.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }
}
