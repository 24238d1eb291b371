//! Scalar spring solvers. The vector and rotation variants are built from
//! these, one axis at a time.

use crate::damping::{damping_ratio_to_stiffness, fast_negexp, halflife_to_damping, DEFAULT_EPS};

/// Critically damped spring (damping ratio 1): the fastest approach to
/// `goal` that never overshoots.
#[inline]
pub fn critical_spring_damper_exact(x: &mut f32, v: &mut f32, goal: f32, halflife: f32, dt: f32) {
    let y = halflife_to_damping(halflife, DEFAULT_EPS) / 2.0;
    let j0 = *x - goal;
    let j1 = *v + j0 * y;
    let eydt = fast_negexp(y * dt);

    *x = eydt * (j0 + j1 * dt) + goal;
    *v = eydt * (*v - j1 * y * dt);
}

/// Damped spring with an explicit damping ratio.
///
/// `damping_ratio < 1` oscillates around the goal, `== 1` is critical and
/// `> 1` approaches more slowly without overshoot. `v_goal` is the velocity
/// the spring should settle at; the effective goal is shifted so that a
/// moving target is tracked without lag.
#[allow(clippy::too_many_arguments)]
pub fn spring_damper_exact_ratio(
    x: &mut f32,
    v: &mut f32,
    goal: f32,
    v_goal: f32,
    damping_ratio: f32,
    halflife: f32,
    dt: f32,
    eps: f32,
) {
    let d = halflife_to_damping(halflife, eps);
    let s = damping_ratio_to_stiffness(damping_ratio, d);
    let c = goal + (d * v_goal) / (s + eps);
    let y = d / 2.0;
    let discriminant = s - (d * d) / 4.0;

    if discriminant.abs() < eps {
        // Critically damped.
        let j0 = *x - c;
        let j1 = *v + j0 * y;
        let eydt = fast_negexp(y * dt);

        *x = j0 * eydt + dt * j1 * eydt + c;
        *v = -y * j0 * eydt - y * dt * j1 * eydt + j1 * eydt;
    } else if discriminant > 0.0 {
        // Under damped.
        let w = discriminant.sqrt();
        let offset = *x - c;
        let along = *v + offset * y;
        let mut j = ((along * along) / (w * w + eps) + offset * offset).sqrt();
        let p = (along / (-offset * w + eps)).atan();
        if offset <= 0.0 {
            j = -j;
        }
        let eydt = fast_negexp(y * dt);
        let (sin, cos) = (w * dt + p).sin_cos();

        *x = j * eydt * cos + c;
        *v = -y * j * eydt * cos - w * j * eydt * sin;
    } else {
        // Over damped.
        let root = (d * d - 4.0 * s).sqrt();
        let y0 = (d + root) / 2.0;
        let y1 = (d - root) / 2.0;
        let j1 = (c * y0 - *x * y0 - *v) / (y1 - y0);
        let j0 = *x - j1 - c;
        let ey0dt = fast_negexp(y0 * dt);
        let ey1dt = fast_negexp(y1 * dt);

        *x = j0 * ey0dt + j1 * ey1dt + c;
        *v = -y0 * j0 * ey0dt - y1 * j1 * ey1dt;
    }
}

/// Critical spring on a velocity: `v` is smoothed toward `v_goal` and `a`
/// carries the acceleration state.
#[inline]
pub fn velocity_spring(v: &mut f32, a: &mut f32, v_goal: f32, halflife: f32, dt: f32) {
    let y = halflife_to_damping(halflife, DEFAULT_EPS) / 2.0;
    let j0 = *v - v_goal;
    let j1 = *a + j0 * y;
    let eydt = fast_negexp(y * dt);

    *v = eydt * (j0 + j1 * dt) + v_goal;
    *a = eydt * (*a - j1 * y * dt);
}

/// Critical spring whose goal is zero. Used to fade out offsets such as an
/// inertialization residual.
#[inline]
pub fn decay_spring_damper_exact(x: &mut f32, v: &mut f32, halflife: f32, dt: f32) {
    let y = halflife_to_damping(halflife, DEFAULT_EPS) / 2.0;
    let j1 = *v + *x * y;
    let eydt = fast_negexp(y * dt);

    *x = eydt * (*x + j1 * dt);
    *v = eydt * (*v - j1 * y * dt);
}
