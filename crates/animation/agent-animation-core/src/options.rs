//! Driver-supplied inputs for one procedural transition.
//!
//! The traversal state machine rebuilds an [`AgentProceduralAnimOptions`] on
//! every state change and hands it to `process` each tick. The animator only
//! reads it.

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::AnimatorError;
use crate::limb::{AgentLimb, LimbArray};
use crate::pose::AgentProceduralPose;
use crate::transform::Transform;

const UNIT_NORM_TOLERANCE: f32 = 1.0e-3;

/// Solver used for the skeleton position spring.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonSpringMode {
    /// Critically damped; never overshoots.
    #[default]
    Critical,
    /// Uses `skeleton_position_spring_damping_ratio`.
    Damped,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProceduralAnimOptions {
    /// Overall influence of the procedural arc and centroid bias, 0..1.
    pub anim_blend: f32,

    pub limb_position_spring_halflife: LimbArray<f32>,
    pub limb_rotation_spring_halflife: LimbArray<f32>,
    /// Offset (in the limb's own basis) reached at the middle of the swing.
    pub limb_peak_position: LimbArray<Vector3<f32>>,
    /// Normalized `[start, end]` slice of the playback clock for each limb.
    pub limb_animation_timing: LimbArray<[f32; 2]>,
    /// Dangling limbs are left untouched and excluded from averaging.
    pub limb_dangle_status: LimbArray<bool>,
    pub starting_limb_transform: LimbArray<Transform>,
    pub target_limb_transform: LimbArray<Transform>,

    pub skeleton_position_spring_halflife: f32,
    pub skeleton_rotation_spring_halflife: f32,
    pub skeleton_position_spring_damping_ratio: f32,
    pub skeleton_position_offset_spring_halflife: f32,
    pub skeleton_spring_mode: SkeletonSpringMode,
    pub starting_skeleton_transform: Transform,
    pub target_skeleton_transform: Transform,
    /// Place the skeleton at the midpoint of the two hands instead of
    /// interpolating its position.
    pub use_average_for_skeleton_trf: bool,

    /// `1.0` plays limb windows as authored, `-1.0` mirrors them.
    pub playback_direction: f32,
}

impl Default for AgentProceduralAnimOptions {
    fn default() -> Self {
        Self {
            anim_blend: 1.0,
            limb_position_spring_halflife: [0.1; 4],
            limb_rotation_spring_halflife: [0.1; 4],
            limb_peak_position: [Vector3::zeros(); 4],
            limb_animation_timing: [[0.0, 1.0]; 4],
            limb_dangle_status: [false; 4],
            starting_limb_transform: [Transform::identity(); 4],
            target_limb_transform: [Transform::identity(); 4],
            skeleton_position_spring_halflife: 0.1,
            skeleton_rotation_spring_halflife: 0.1,
            skeleton_position_spring_damping_ratio: 1.0,
            skeleton_position_offset_spring_halflife: 0.1,
            skeleton_spring_mode: SkeletonSpringMode::Critical,
            starting_skeleton_transform: Transform::identity(),
            target_skeleton_transform: Transform::identity(),
            use_average_for_skeleton_trf: false,
            playback_direction: 1.0,
        }
    }
}

impl AgentProceduralAnimOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, AnimatorError> {
        let options: Self = serde_json::from_str(json)?;
        if let Err(err) = options.validate() {
            debug!("rejecting procedural options ({}): {}", err.category(), err);
            return Err(err);
        }
        Ok(options)
    }

    #[inline]
    pub fn with_anim_blend(mut self, blend: f32) -> Self {
        self.anim_blend = blend;
        self
    }

    #[inline]
    pub fn with_limb_transforms(
        mut self,
        limb: AgentLimb,
        start: Transform,
        target: Transform,
    ) -> Self {
        self.starting_limb_transform[limb.index()] = start;
        self.target_limb_transform[limb.index()] = target;
        self
    }

    #[inline]
    pub fn with_limb_timing(mut self, limb: AgentLimb, start: f32, end: f32) -> Self {
        self.limb_animation_timing[limb.index()] = [start, end];
        self
    }

    #[inline]
    pub fn with_limb_halflives(mut self, limb: AgentLimb, position: f32, rotation: f32) -> Self {
        self.limb_position_spring_halflife[limb.index()] = position;
        self.limb_rotation_spring_halflife[limb.index()] = rotation;
        self
    }

    #[inline]
    pub fn with_limb_peak(mut self, limb: AgentLimb, peak: Vector3<f32>) -> Self {
        self.limb_peak_position[limb.index()] = peak;
        self
    }

    #[inline]
    pub fn with_dangling(mut self, limb: AgentLimb, dangling: bool) -> Self {
        self.limb_dangle_status[limb.index()] = dangling;
        self
    }

    /// Marks every limb except `limb` as dangling.
    #[inline]
    pub fn with_only_limb(mut self, limb: AgentLimb) -> Self {
        for other in AgentLimb::ALL {
            self.limb_dangle_status[other.index()] = other != limb;
        }
        self
    }

    #[inline]
    pub fn with_skeleton_transforms(mut self, start: Transform, target: Transform) -> Self {
        self.starting_skeleton_transform = start;
        self.target_skeleton_transform = target;
        self
    }

    #[inline]
    pub fn with_skeleton_halflives(mut self, position: f32, rotation: f32) -> Self {
        self.skeleton_position_spring_halflife = position;
        self.skeleton_rotation_spring_halflife = rotation;
        self
    }

    #[inline]
    pub fn with_skeleton_spring_mode(
        mut self,
        mode: SkeletonSpringMode,
        damping_ratio: f32,
    ) -> Self {
        self.skeleton_spring_mode = mode;
        self.skeleton_position_spring_damping_ratio = damping_ratio;
        self
    }

    #[inline]
    pub fn with_average_skeleton(mut self, enabled: bool) -> Self {
        self.use_average_for_skeleton_trf = enabled;
        self
    }

    #[inline]
    pub fn with_playback_direction(mut self, direction: f32) -> Self {
        self.playback_direction = direction;
        self
    }

    /// Seeds the starting transforms from a pose produced by another
    /// animator, so the next transition begins where the previous one left
    /// the limbs and skeleton.
    pub fn start_from_pose(&mut self, pose: &AgentProceduralPose) {
        self.starting_limb_transform = pose.ik_targets;
        self.starting_skeleton_transform = pose.skeleton_trf;
    }

    /// Check driver-side invariants before the options reach `process`.
    ///
    /// Inputs must be finite and rotations unit length. The blend and limb
    /// windows lie in [0, 1], the direction is exactly +/-1, and a damped
    /// skeleton spring needs a positive damping ratio.
    pub fn validate(&self) -> Result<(), AnimatorError> {
        if !self.anim_blend.is_finite() {
            return Err(non_finite("anim_blend"));
        }
        if !(0.0..=1.0).contains(&self.anim_blend) {
            return Err(AnimatorError::InvalidBlend {
                blend: self.anim_blend,
            });
        }
        if self.playback_direction != 1.0 && self.playback_direction != -1.0 {
            return Err(AnimatorError::InvalidPlaybackDirection {
                direction: self.playback_direction,
            });
        }

        for limb in AgentLimb::ALL {
            let i = limb.index();
            let [start, end] = self.limb_animation_timing[i];
            if !start.is_finite() || !end.is_finite() {
                return Err(non_finite(&format!("limb_animation_timing[{limb}]")));
            }
            if start < 0.0 || end > 1.0 || start > end {
                return Err(AnimatorError::InvalidTiming { limb, start, end });
            }
            if !self.limb_position_spring_halflife[i].is_finite()
                || !self.limb_rotation_spring_halflife[i].is_finite()
            {
                return Err(non_finite(&format!("limb spring halflife[{limb}]")));
            }
            if !self.limb_peak_position[i].iter().all(|c| c.is_finite()) {
                return Err(non_finite(&format!("limb_peak_position[{limb}]")));
            }
            if !transform_is_finite(&self.starting_limb_transform[i])
                || !transform_is_finite(&self.target_limb_transform[i])
            {
                return Err(non_finite(&format!("limb transform[{limb}]")));
            }
            check_unit_rotation(
                &self.starting_limb_transform[i],
                &format!("starting_limb_transform[{limb}]"),
            )?;
            check_unit_rotation(
                &self.target_limb_transform[i],
                &format!("target_limb_transform[{limb}]"),
            )?;
        }

        let skeleton_scalars = [
            self.skeleton_position_spring_halflife,
            self.skeleton_rotation_spring_halflife,
            self.skeleton_position_spring_damping_ratio,
            self.skeleton_position_offset_spring_halflife,
        ];
        if !skeleton_scalars.iter().all(|v| v.is_finite()) {
            return Err(non_finite("skeleton spring parameters"));
        }
        if !transform_is_finite(&self.starting_skeleton_transform)
            || !transform_is_finite(&self.target_skeleton_transform)
        {
            return Err(non_finite("skeleton transform"));
        }
        check_unit_rotation(&self.starting_skeleton_transform, "starting_skeleton_transform")?;
        check_unit_rotation(&self.target_skeleton_transform, "target_skeleton_transform")?;

        if self.skeleton_spring_mode == SkeletonSpringMode::Damped
            && self.skeleton_position_spring_damping_ratio <= 0.0
        {
            return Err(AnimatorError::InvalidDampingRatio {
                ratio: self.skeleton_position_spring_damping_ratio,
            });
        }
        Ok(())
    }
}

fn non_finite(field: &str) -> AnimatorError {
    AnimatorError::NonFinite {
        field: field.to_string(),
    }
}

/// Serialized rotations are taken as-is, so they must already be unit length.
fn check_unit_rotation(trf: &Transform, field: &str) -> Result<(), AnimatorError> {
    let norm = trf.rotation.coords.norm();
    if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
        return Err(AnimatorError::NonUnitRotation {
            field: field.to_string(),
            norm,
        });
    }
    Ok(())
}

fn transform_is_finite(trf: &Transform) -> bool {
    trf.position.iter().all(|c| c.is_finite())
        && trf.rotation.coords.iter().all(|c| c.is_finite())
        && trf.scale.iter().all(|c| c.is_finite())
}
