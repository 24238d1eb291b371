//! Animator state carried from one tick to the next.
//!
//! [`AnimatorState`] is a plain value: drivers snapshot it with `clone` and
//! inject it into another animator to carry a pose across a transition.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::limb::LimbArray;
use crate::transform::Transform;

/// Whether the next `process` call will teleport the sprung pose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatorPhase {
    Running,
    RestartPending,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorState {
    /// Raw interpolated limb transforms.
    pub limb_transform: LimbArray<Transform>,
    /// Sprung limb transforms handed to IK.
    pub limb_output_transform: LimbArray<Transform>,
    pub limb_position_spring_velocity: LimbArray<Vector3<f32>>,
    pub limb_rotation_spring_velocity: LimbArray<Vector3<f32>>,

    pub skeleton_transform: Transform,
    pub skeleton_output_transform: Transform,
    pub skeleton_position_spring_velocity: Vector3<f32>,
    pub skeleton_rotation_spring_velocity: Vector3<f32>,

    /// Bias toward the planted limbs.
    pub skeleton_position_offset: Vector3<f32>,
    pub skeleton_position_offset_target: Vector3<f32>,
    pub skeleton_position_offset_spring_velocity: Vector3<f32>,

    pub restart_queued: bool,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            limb_transform: [Transform::identity(); 4],
            limb_output_transform: [Transform::identity(); 4],
            limb_position_spring_velocity: [Vector3::zeros(); 4],
            limb_rotation_spring_velocity: [Vector3::zeros(); 4],
            skeleton_transform: Transform::identity(),
            skeleton_output_transform: Transform::identity(),
            skeleton_position_spring_velocity: Vector3::zeros(),
            skeleton_rotation_spring_velocity: Vector3::zeros(),
            skeleton_position_offset: Vector3::zeros(),
            skeleton_position_offset_target: Vector3::zeros(),
            skeleton_position_offset_spring_velocity: Vector3::zeros(),
            restart_queued: false,
        }
    }
}

impl AnimatorState {
    #[inline]
    pub fn phase(&self) -> AnimatorPhase {
        if self.restart_queued {
            AnimatorPhase::RestartPending
        } else {
            AnimatorPhase::Running
        }
    }

    pub(crate) fn zero_spring_velocities(&mut self) {
        self.limb_position_spring_velocity = [Vector3::zeros(); 4];
        self.limb_rotation_spring_velocity = [Vector3::zeros(); 4];
        self.skeleton_position_spring_velocity = Vector3::zeros();
        self.skeleton_rotation_spring_velocity = Vector3::zeros();
        self.skeleton_position_offset_spring_velocity = Vector3::zeros();
    }

    /// Copies the unsprung pose into the sprung one.
    pub(crate) fn snap_outputs(&mut self) {
        self.limb_output_transform = self.limb_transform;
        self.skeleton_output_transform = self.skeleton_transform;
    }
}
