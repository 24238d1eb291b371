//! Mapping the global playback clock onto per-limb windows.

use std::f32::consts::PI;

/// `(value - a) / (b - a)`, unclamped. A degenerate range acts as a step at
/// `a`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span == 0.0 {
        return if value >= a { 1.0 } else { 0.0 };
    }
    (value - a) / span
}

/// Limb-local progress in [0, 1] for global normalized time `x`.
///
/// With a negative `playback_direction` the window is mirrored onto the
/// clock, so `[start, end]` covers `[1 - end, 1 - start]`.
#[inline]
pub fn limb_local_time(window: [f32; 2], x: f32, playback_direction: f32) -> f32 {
    let [start, end] = window;
    let t = if playback_direction < 0.0 {
        inverse_lerp(1.0 - end, 1.0 - start, x)
    } else {
        inverse_lerp(start, end, x)
    };
    t.clamp(0.0, 1.0)
}

/// Height factor of the swing arc: 0 at both ends, 1 at the midpoint.
#[inline]
pub fn arc_factor(t: f32) -> f32 {
    (PI * t).sin()
}

/// Weight of a limb in the skeleton centroid: 1 while planted, falling to 0
/// at the middle of its swing.
#[inline]
pub fn limb_weight(t: f32) -> f32 {
    if t > 0.0 && t < 1.0 {
        let s = 1.0 - arc_factor(t);
        s * s
    } else {
        1.0
    }
}
