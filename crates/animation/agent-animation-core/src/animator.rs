//! Procedural animator. `process` builds the raw (unsprung) pose from the
//! playback clock, then the spring stage turns it into the output pose.

use agent_springs_core::{
    critical_spring_damper_exact_vector3, simple_spring_damper_exact_quat,
    spring_damper_exact_ratio_vector3, DEFAULT_EPS,
};
use log::{debug, trace};
use nalgebra::Vector3;

use crate::config::AnimatorConfig;
use crate::limb::AgentLimb;
use crate::options::{AgentProceduralAnimOptions, SkeletonSpringMode};
use crate::pose::AgentProceduralPose;
use crate::state::{AnimatorPhase, AnimatorState};
use crate::timing::{arc_factor, limb_local_time, limb_weight};

/// Drives four limb IK targets and a skeleton root toward the targets in an
/// [`AgentProceduralAnimOptions`], one `process` call per physics tick.
#[derive(Clone, Debug)]
pub struct AgentProceduralAnimator {
    cfg: AnimatorConfig,
    animation_time: f32,
    animation_duration: f32,
    state: AnimatorState,
}

impl Default for AgentProceduralAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

impl AgentProceduralAnimator {
    pub fn new(cfg: AnimatorConfig) -> Self {
        Self {
            animation_duration: cfg.animation_duration.max(0.0),
            cfg,
            animation_time: 0.0,
            state: AnimatorState::default(),
        }
    }

    /// Advance the clock by `delta` seconds, rebuild the unsprung pose from
    /// `options`, then run the spring stage.
    ///
    /// `delta == 0` recomputes the pose at the current time without moving
    /// any spring.
    pub fn process(&mut self, options: &AgentProceduralAnimOptions, delta: f32) {
        self.animation_time = (self.animation_time + delta).clamp(0.0, self.animation_duration);
        if self.animation_duration <= 0.0 {
            trace!("procedural animator has zero duration; pose is held at the end");
        }
        let x = self.normalized_time();

        let mut limb_sum = Vector3::zeros();
        let mut weighted_sum = Vector3::zeros();
        let mut weight_total = 0.0f32;
        let mut active = 0usize;

        for limb in AgentLimb::ALL {
            let i = limb.index();
            if options.limb_dangle_status[i] {
                continue;
            }
            let t = self.get_limb_time(options, limb);

            let mut trf = options.starting_limb_transform[i]
                .interpolate_with(&options.target_limb_transform[i], t);
            let arc = trf.transform_vector(&options.limb_peak_position[i]);
            trf.position += arc * (arc_factor(t) * options.anim_blend);
            self.state.limb_transform[i] = trf;

            let w = limb_weight(t);
            limb_sum += trf.position;
            weighted_sum += trf.position * w;
            weight_total += w;
            active += 1;
        }

        self.state.skeleton_position_offset_target = if active > 0 && weight_total > 0.0 {
            let limb_avg = limb_sum / active as f32;
            let limb_weighted_avg = weighted_sum / weight_total;
            (limb_weighted_avg - limb_avg) * options.anim_blend
        } else {
            Vector3::zeros()
        };

        let mut skeleton = options
            .starting_skeleton_transform
            .interpolate_with(&options.target_skeleton_transform, x);
        if options.use_average_for_skeleton_trf {
            let left = self.state.limb_transform[AgentLimb::LeftHand.index()].position;
            let right = self.state.limb_transform[AgentLimb::RightHand.index()].position;
            skeleton.position = (left + right) * 0.5;
        }
        self.state.skeleton_transform = skeleton;

        if self.state.restart_queued {
            trace!("procedural animator restart: snapping sprung pose");
            self.state.snap_outputs();
            self.state.restart_queued = false;
        }

        self.advance_springs(options, delta);
    }

    /// Move the sprung pose toward the unsprung pose by `delta` seconds.
    ///
    /// A non-positive half-life snaps that channel instead of springing it,
    /// even when `delta` is zero. The skeleton position offset has no such
    /// bypass and is always sprung.
    pub fn advance_springs(&mut self, options: &AgentProceduralAnimOptions, delta: f32) {
        let step = delta > 0.0;
        let state = &mut self.state;

        for limb in AgentLimb::ALL {
            let i = limb.index();
            let target = state.limb_transform[i];
            let output = &mut state.limb_output_transform[i];

            let position_halflife = options.limb_position_spring_halflife[i];
            if position_halflife <= 0.0 {
                output.position = target.position;
            } else if step {
                critical_spring_damper_exact_vector3(
                    &mut output.position,
                    &mut state.limb_position_spring_velocity[i],
                    &target.position,
                    position_halflife,
                    delta,
                );
            }

            let rotation_halflife = options.limb_rotation_spring_halflife[i];
            if rotation_halflife <= 0.0 {
                output.rotation = target.rotation;
            } else if step {
                simple_spring_damper_exact_quat(
                    &mut output.rotation,
                    &mut state.limb_rotation_spring_velocity[i],
                    &target.rotation,
                    rotation_halflife,
                    delta,
                );
            }

            output.scale = target.scale;
        }

        let target = state.skeleton_transform;
        let output = &mut state.skeleton_output_transform;

        if options.skeleton_rotation_spring_halflife <= 0.0 {
            output.rotation = target.rotation;
        } else if step {
            simple_spring_damper_exact_quat(
                &mut output.rotation,
                &mut state.skeleton_rotation_spring_velocity,
                &target.rotation,
                options.skeleton_rotation_spring_halflife,
                delta,
            );
        }

        if options.skeleton_position_spring_halflife <= 0.0 {
            output.position = target.position;
        } else if step {
            match options.skeleton_spring_mode {
                SkeletonSpringMode::Critical => critical_spring_damper_exact_vector3(
                    &mut output.position,
                    &mut state.skeleton_position_spring_velocity,
                    &target.position,
                    options.skeleton_position_spring_halflife,
                    delta,
                ),
                SkeletonSpringMode::Damped => spring_damper_exact_ratio_vector3(
                    &mut output.position,
                    &mut state.skeleton_position_spring_velocity,
                    &target.position,
                    &Vector3::zeros(),
                    options.skeleton_position_spring_damping_ratio,
                    options.skeleton_position_spring_halflife,
                    delta,
                    DEFAULT_EPS,
                ),
            }
        }

        output.scale = target.scale;

        if step {
            critical_spring_damper_exact_vector3(
                &mut state.skeleton_position_offset,
                &mut state.skeleton_position_offset_spring_velocity,
                &state.skeleton_position_offset_target,
                options.skeleton_position_offset_spring_halflife,
                delta,
            );
        }
    }

    /// Rewind to the start, drop all spring momentum and teleport the sprung
    /// pose on the next `process`.
    pub fn restart(&mut self) {
        debug!("procedural animator restart queued");
        self.animation_time = 0.0;
        self.state.zero_spring_velocities();
        self.state.restart_queued = true;
    }

    /// Rewind to the start but keep spring momentum.
    pub fn reset(&mut self) {
        debug!("procedural animator reset");
        self.animation_time = 0.0;
    }

    pub fn seek(&mut self, position: f32) {
        debug!("procedural animator seek to {position}");
        self.animation_time = position.clamp(0.0, self.animation_duration);
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.animation_time >= self.animation_duration
    }

    /// True once every limb's position spring has slowed below the configured
    /// threshold. Rotation springs are not considered.
    pub fn have_springs_converged(&self) -> bool {
        let threshold = self.cfg.convergence_velocity_threshold;
        self.state
            .limb_position_spring_velocity
            .iter()
            .all(|v| v.norm() <= threshold)
    }

    #[inline]
    pub fn get_playback_position(&self) -> f32 {
        self.animation_time
    }

    /// Playback position as a fraction of the duration. A zero-length
    /// animation is always at its end.
    #[inline]
    pub fn normalized_time(&self) -> f32 {
        if self.animation_duration <= 0.0 {
            1.0
        } else {
            self.animation_time / self.animation_duration
        }
    }

    /// Progress of `limb` through its own timing window, in [0, 1].
    #[inline]
    pub fn get_limb_time(&self, options: &AgentProceduralAnimOptions, limb: AgentLimb) -> f32 {
        limb_local_time(
            options.limb_animation_timing[limb.index()],
            self.normalized_time(),
            options.playback_direction,
        )
    }

    pub fn set_animation_duration(&mut self, duration: f32) {
        debug!("procedural animator duration set to {duration}s");
        self.animation_duration = duration.max(0.0);
        self.animation_time = self.animation_time.min(self.animation_duration);
    }

    #[inline]
    pub fn get_animation_duration(&self) -> f32 {
        self.animation_duration
    }

    #[inline]
    pub fn phase(&self) -> AnimatorPhase {
        self.state.phase()
    }

    #[inline]
    pub fn config(&self) -> &AnimatorConfig {
        &self.cfg
    }

    #[inline]
    pub fn get_animator_state(&self) -> &AnimatorState {
        &self.state
    }

    #[inline]
    pub fn set_animator_state(&mut self, state: AnimatorState) {
        self.state = state;
    }

    /// Write the sprung pose into `pose`, leaving its magnet positions alone.
    pub fn get_output_pose(&self, pose: &mut AgentProceduralPose) {
        pose.ik_targets = self.state.limb_output_transform;
        pose.skeleton_trf = self.state.skeleton_output_transform;
        pose.skeleton_position_offset = self.state.skeleton_position_offset;
        pose.valid = true;
    }

    /// Write the raw interpolated pose into `pose`.
    pub fn get_unsprung_pose(&self, pose: &mut AgentProceduralPose) {
        pose.ik_targets = self.state.limb_transform;
        pose.skeleton_trf = self.state.skeleton_transform;
        pose.skeleton_position_offset = self.state.skeleton_position_offset;
        pose.valid = true;
    }

    pub fn output_pose(&self) -> AgentProceduralPose {
        let mut pose = AgentProceduralPose::default();
        self.get_output_pose(&mut pose);
        pose
    }

    pub fn unsprung_pose(&self) -> AgentProceduralPose {
        let mut pose = AgentProceduralPose::default();
        self.get_unsprung_pose(&mut pose);
        pose
    }
}
