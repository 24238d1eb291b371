//! Pose read back by the driver after `process`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::limb::{AgentLimb, LimbArray};
use crate::transform::Transform;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentProceduralPose {
    /// Goal transform for each limb's IK chain.
    pub ik_targets: LimbArray<Transform>,
    /// Pole/magnet positions. Filled in by the driver; the animator leaves
    /// them untouched.
    pub ik_magnet_positions: LimbArray<Vector3<f32>>,
    pub skeleton_trf: Transform,
    pub skeleton_position_offset: Vector3<f32>,
    pub valid: bool,
}

impl Default for AgentProceduralPose {
    fn default() -> Self {
        Self {
            ik_targets: [Transform::identity(); 4],
            ik_magnet_positions: [Vector3::zeros(); 4],
            skeleton_trf: Transform::identity(),
            skeleton_position_offset: Vector3::zeros(),
            valid: false,
        }
    }
}

impl AgentProceduralPose {
    #[inline]
    pub fn ik_target(&self, limb: AgentLimb) -> &Transform {
        &self.ik_targets[limb.index()]
    }

    /// Skeleton transform with the centroid offset applied.
    #[inline]
    pub fn offset_skeleton_trf(&self) -> Transform {
        Transform {
            position: self.skeleton_trf.position + self.skeleton_position_offset,
            ..self.skeleton_trf
        }
    }
}
