//! Vector3 variants. Each axis is an independent scalar spring; there is no
//! coupling between axes.

use nalgebra::Vector3;

use crate::scalar::{
    critical_spring_damper_exact, decay_spring_damper_exact, spring_damper_exact_ratio,
    velocity_spring,
};

#[inline]
pub fn critical_spring_damper_exact_vector3(
    x: &mut Vector3<f32>,
    v: &mut Vector3<f32>,
    goal: &Vector3<f32>,
    halflife: f32,
    dt: f32,
) {
    for i in 0..3 {
        critical_spring_damper_exact(&mut x[i], &mut v[i], goal[i], halflife, dt);
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
pub fn spring_damper_exact_ratio_vector3(
    x: &mut Vector3<f32>,
    v: &mut Vector3<f32>,
    goal: &Vector3<f32>,
    v_goal: &Vector3<f32>,
    damping_ratio: f32,
    halflife: f32,
    dt: f32,
    eps: f32,
) {
    for i in 0..3 {
        spring_damper_exact_ratio(
            &mut x[i],
            &mut v[i],
            goal[i],
            v_goal[i],
            damping_ratio,
            halflife,
            dt,
            eps,
        );
    }
}

#[inline]
pub fn velocity_spring_vector3(
    v: &mut Vector3<f32>,
    a: &mut Vector3<f32>,
    v_goal: &Vector3<f32>,
    halflife: f32,
    dt: f32,
) {
    for i in 0..3 {
        velocity_spring(&mut v[i], &mut a[i], v_goal[i], halflife, dt);
    }
}

#[inline]
pub fn decay_spring_damper_exact_vector3(
    x: &mut Vector3<f32>,
    v: &mut Vector3<f32>,
    halflife: f32,
    dt: f32,
) {
    for i in 0..3 {
        decay_spring_damper_exact(&mut x[i], &mut v[i], halflife, dt);
    }
}
