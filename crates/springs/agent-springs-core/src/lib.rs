//! Agent Springs Core
//!
//! Closed-form (exact, non-iterative) solutions of damped second-order
//! dynamics. Every solver advances a caller-owned `(value, velocity)` pair in
//! place and gives the same end state regardless of how the elapsed time is
//! split into frames.
//!
//! Families:
//! - critical springs (`critical_spring_damper_exact*`): no overshoot
//! - ratio springs (`spring_damper_exact_ratio*`): under/critical/over damped
//! - velocity springs (`velocity_spring*`): smooth a velocity toward a goal
//! - decay springs (`decay_spring_damper_exact*`): settle toward zero
//! - rotation springs (`simple_spring_damper_exact_quat`)
//!
//! Half-lives are not validated. A non-positive half-life means "no spring";
//! callers snap the value to its goal instead of calling a solver.

pub mod damping;
pub mod quat;
pub mod scalar;
pub mod vector;

pub use damping::{
    damping_ratio_to_damping, damping_ratio_to_stiffness, damping_to_halflife, fast_negexp,
    halflife_to_damping, DEFAULT_EPS,
};
pub use quat::{
    quat_abs, quat_from_scaled_angle_axis, quat_to_scaled_angle_axis,
    simple_spring_damper_exact_quat,
};
pub use scalar::{
    critical_spring_damper_exact, decay_spring_damper_exact, spring_damper_exact_ratio,
    velocity_spring,
};
pub use vector::{
    critical_spring_damper_exact_vector3, decay_spring_damper_exact_vector3,
    spring_damper_exact_ratio_vector3, velocity_spring_vector3,
};
