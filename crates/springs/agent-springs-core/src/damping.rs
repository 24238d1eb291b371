//! Conversions between artist-facing half-lives and analytic spring
//! coefficients, plus the decay approximation shared by every solver.

use std::f32::consts::LN_2;

/// Guard added to denominators so a zero half-life or stiffness stays finite.
pub const DEFAULT_EPS: f32 = 1e-5;

/// Damping coefficient for a spring that halves its distance to the goal
/// every `halflife` seconds under critical damping.
#[inline]
pub fn halflife_to_damping(halflife: f32, eps: f32) -> f32 {
    (4.0 * LN_2) / (halflife + eps)
}

/// Inverse of [`halflife_to_damping`].
#[inline]
pub fn damping_to_halflife(damping: f32, eps: f32) -> f32 {
    (4.0 * LN_2) / (damping + eps)
}

/// Stiffness that yields `damping_ratio` for the given damping coefficient.
/// A ratio of 1.0 gives exactly `damping² / 4` (critical).
#[inline]
pub fn damping_ratio_to_stiffness(damping_ratio: f32, damping: f32) -> f32 {
    let s = damping / (damping_ratio * 2.0);
    s * s
}

/// Damping coefficient that yields `damping_ratio` for the given stiffness.
#[inline]
pub fn damping_ratio_to_damping(damping_ratio: f32, stiffness: f32) -> f32 {
    damping_ratio * 2.0 * stiffness.sqrt()
}

/// Rational approximation of `e^-x`, accurate for the small positive
/// arguments (`damping * dt`) the solvers produce.
#[inline]
pub fn fast_negexp(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}
