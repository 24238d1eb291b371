//! Rotation springs.
//!
//! A rotation is linearized as a scaled angle-axis vector (`axis * angle`,
//! twice the quaternion log), the scalar critical spring runs on each
//! component of that vector, and the result is mapped back with the
//! quaternion exponential.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::damping::{fast_negexp, halflife_to_damping, DEFAULT_EPS};

const SMALL_ANGLE_EPS: f32 = 1e-8;

/// Returns whichever of `q` / `-q` has a non-negative real part.
#[inline]
pub fn quat_abs(q: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    if q.w < 0.0 {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        *q
    }
}

/// `axis * angle` for the rotation `q`.
pub fn quat_to_scaled_angle_axis(q: &UnitQuaternion<f32>) -> Vector3<f32> {
    let imag = q.imag();
    let len = imag.norm();
    if len < SMALL_ANGLE_EPS {
        return imag * 2.0;
    }
    let half_angle = len.atan2(q.w);
    imag * (2.0 * half_angle / len)
}

/// Inverse of [`quat_to_scaled_angle_axis`].
pub fn quat_from_scaled_angle_axis(v: &Vector3<f32>) -> UnitQuaternion<f32> {
    let half = v * 0.5;
    let half_angle = half.norm();
    if half_angle < SMALL_ANGLE_EPS {
        return UnitQuaternion::new_normalize(Quaternion::from_parts(1.0, half));
    }
    let (sin, cos) = half_angle.sin_cos();
    UnitQuaternion::new_normalize(Quaternion::from_parts(cos, half * (sin / half_angle)))
}

/// Critically damped rotation spring.
///
/// `angular_velocity` is a scaled-axis rate in radians per second, expressed
/// in the goal's frame. `goal` is flipped onto the same hemisphere as `q`
/// first so the spring always takes the short arc.
pub fn simple_spring_damper_exact_quat(
    q: &mut UnitQuaternion<f32>,
    angular_velocity: &mut Vector3<f32>,
    goal: &UnitQuaternion<f32>,
    halflife: f32,
    dt: f32,
) {
    let goal = if q.coords.dot(&goal.coords) < 0.0 {
        UnitQuaternion::new_unchecked(-goal.into_inner())
    } else {
        *goal
    };

    let y = halflife_to_damping(halflife, DEFAULT_EPS) / 2.0;
    let j0 = quat_to_scaled_angle_axis(&(goal.inverse() * *q));
    let j1 = *angular_velocity + j0 * y;
    let eydt = fast_negexp(y * dt);

    *q = goal * quat_from_scaled_angle_axis(&((j0 + j1 * dt) * eydt));
    *angular_velocity = (*angular_velocity - j1 * (y * dt)) * eydt;
}
