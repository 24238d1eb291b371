use agent_animation_core::{
    AgentLimb, AgentProceduralAnimOptions, AgentProceduralAnimator, AgentProceduralPose,
    AnimatorConfig, AnimatorPhase, SkeletonSpringMode, Transform,
};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{UnitQuaternion, Vector3};

const DT: f32 = 1.0 / 60.0;

fn v3(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

/// Hands reach up, feet step up, skeleton rises and turns.
fn climb_options() -> AgentProceduralAnimOptions {
    AgentProceduralAnimOptions::new()
        .with_limb_transforms(
            AgentLimb::LeftHand,
            Transform::from_position(v3(-0.3, 1.5, 0.2)),
            Transform::from_position(v3(-0.3, 2.0, 0.4)),
        )
        .with_limb_transforms(
            AgentLimb::RightHand,
            Transform::from_position(v3(0.3, 1.5, 0.2)),
            Transform::from_position(v3(0.3, 2.0, 0.4)),
        )
        .with_limb_transforms(
            AgentLimb::LeftFoot,
            Transform::from_position(v3(-0.2, 0.0, 0.1)),
            Transform::from_position(v3(-0.2, 0.6, 0.3)),
        )
        .with_limb_transforms(
            AgentLimb::RightFoot,
            Transform::from_position(v3(0.2, 0.0, 0.1)),
            Transform::from_position(v3(0.2, 0.6, 0.3)),
        )
        .with_limb_timing(AgentLimb::LeftHand, 0.0, 0.5)
        .with_limb_timing(AgentLimb::RightHand, 0.1, 0.6)
        .with_limb_timing(AgentLimb::LeftFoot, 0.4, 0.9)
        .with_limb_timing(AgentLimb::RightFoot, 0.5, 1.0)
        .with_limb_peak(AgentLimb::LeftFoot, v3(0.0, 0.0, 0.2))
        .with_limb_peak(AgentLimb::RightFoot, v3(0.0, 0.0, 0.2))
        .with_skeleton_transforms(
            Transform::from_position(v3(0.0, 1.0, 0.0)),
            Transform::from_position_rotation(
                v3(0.0, 1.5, 0.3),
                UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.5),
            ),
        )
}

fn assert_poses_match(a: &AgentProceduralPose, b: &AgentProceduralPose) {
    for limb in AgentLimb::ALL {
        assert_relative_eq!(*a.ik_target(limb), *b.ik_target(limb), epsilon = 1e-6);
    }
    assert_relative_eq!(a.skeleton_trf, b.skeleton_trf, epsilon = 1e-6);
}

#[test]
fn single_limb_linear_reach_without_spring() {
    let limb = AgentLimb::LeftHand;
    let opts = AgentProceduralAnimOptions::new()
        .with_only_limb(limb)
        .with_limb_transforms(
            limb,
            Transform::identity(),
            Transform::from_position(v3(1.0, 0.0, 0.0)),
        )
        .with_limb_timing(limb, 0.0, 1.0)
        .with_limb_halflives(limb, 0.0, 0.0)
        .with_anim_blend(1.0);

    let mut anim = AgentProceduralAnimator::new(AnimatorConfig {
        animation_duration: 1.0,
        ..AnimatorConfig::default()
    });
    anim.process(&opts, 0.5);

    let state = anim.get_animator_state();
    assert_eq!(state.limb_transform[limb.index()].position, v3(0.5, 0.0, 0.0));
    assert_eq!(
        state.limb_output_transform[limb.index()],
        state.limb_transform[limb.index()]
    );
}

#[test]
fn peak_offset_adds_full_arc_at_midpoint() {
    let limb = AgentLimb::RightFoot;
    let opts = AgentProceduralAnimOptions::new()
        .with_only_limb(limb)
        .with_limb_transforms(
            limb,
            Transform::identity(),
            Transform::from_position(v3(1.0, 0.0, 0.0)),
        )
        .with_limb_peak(limb, v3(0.0, 0.25, 0.0))
        .with_limb_halflives(limb, 0.0, 0.0);

    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.5);
    let pos = anim.get_animator_state().limb_transform[limb.index()].position;
    assert_relative_eq!(pos, v3(0.5, 0.25, 0.0), epsilon = 1e-6);

    // Half the blend halves the arc.
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts.clone().with_anim_blend(0.5), 0.5);
    let pos = anim.get_animator_state().limb_transform[limb.index()].position;
    assert_relative_eq!(pos, v3(0.5, 0.125, 0.0), epsilon = 1e-6);
}

#[test]
fn peak_offset_follows_limb_basis() {
    let limb = AgentLimb::LeftFoot;
    let turned = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
    let opts = AgentProceduralAnimOptions::new()
        .with_only_limb(limb)
        .with_limb_transforms(
            limb,
            Transform::from_position_rotation(Vector3::zeros(), turned),
            Transform::from_position_rotation(Vector3::zeros(), turned),
        )
        .with_limb_peak(limb, v3(1.0, 0.0, 0.0))
        .with_limb_halflives(limb, 0.0, 0.0);

    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.5);
    let pos = anim.get_animator_state().limb_transform[limb.index()].position;
    assert_relative_eq!(pos, v3(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn zero_halflife_snaps_every_frame() {
    let opts = climb_options()
        .with_limb_halflives(AgentLimb::LeftFoot, 0.0, 0.3)
        .with_limb_halflives(AgentLimb::RightHand, -1.0, 0.0);

    let mut anim = AgentProceduralAnimator::default();
    for delta in [0.0, 0.01, 0.2, 0.0, 0.033, 0.5, 0.0] {
        anim.process(&opts, delta);
        let state = anim.get_animator_state();
        for limb in [AgentLimb::LeftFoot, AgentLimb::RightHand] {
            let i = limb.index();
            assert_eq!(
                state.limb_output_transform[i].position,
                state.limb_transform[i].position
            );
        }
        let rh = AgentLimb::RightHand.index();
        assert_eq!(
            state.limb_output_transform[rh].rotation,
            state.limb_transform[rh].rotation
        );
    }
}

#[test]
fn restart_teleports_sprung_pose_on_next_process() {
    for dt in [0.0, DT, 0.1, 0.75] {
        let opts = climb_options();
        let mut anim = AgentProceduralAnimator::default();
        for _ in 0..20 {
            anim.process(&opts, DT);
        }
        // Lagging springs: the output differs from the raw pose.
        assert_ne!(anim.output_pose().ik_targets, anim.unsprung_pose().ik_targets);

        anim.restart();
        anim.process(&opts, dt);
        assert_eq!(anim.phase(), AnimatorPhase::Running);
        assert_poses_match(&anim.output_pose(), &anim.unsprung_pose());
    }
}

#[test]
fn damped_skeleton_restart_also_teleports() {
    let opts = climb_options().with_skeleton_spring_mode(SkeletonSpringMode::Damped, 0.4);
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.3);
    anim.restart();
    anim.process(&opts, 0.2);
    assert_poses_match(&anim.output_pose(), &anim.unsprung_pose());
}

#[test]
fn clock_never_passes_duration() {
    let mut anim = AgentProceduralAnimator::new(AnimatorConfig {
        animation_duration: 0.5,
        ..AnimatorConfig::default()
    });
    let opts = climb_options();
    let mut steps = 0;
    while !anim.is_done() {
        anim.process(&opts, 0.07);
        assert!(anim.get_playback_position() <= 0.5);
        steps += 1;
    }
    assert_eq!(steps, 8);
    assert_eq!(anim.get_playback_position(), anim.get_animation_duration());

    for _ in 0..10 {
        anim.process(&opts, 1.0);
    }
    assert_eq!(anim.get_playback_position(), 0.5);
    assert!(anim.is_done());
}

#[test]
fn zero_duration_is_immediately_done_at_targets() {
    let mut anim = AgentProceduralAnimator::new(AnimatorConfig {
        animation_duration: 0.0,
        ..AnimatorConfig::default()
    });
    assert!(anim.is_done());

    let opts = climb_options();
    anim.process(&opts, 0.0);
    assert_eq!(anim.normalized_time(), 1.0);
    let state = anim.get_animator_state();
    for limb in AgentLimb::ALL {
        let i = limb.index();
        assert_relative_eq!(
            state.limb_transform[i].position,
            opts.target_limb_transform[i].position,
            epsilon = 1e-6
        );
    }
}

#[test]
fn dangling_limb_keeps_its_transform() {
    let mut opts = climb_options();
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.2);

    let hand = AgentLimb::LeftHand.index();
    let foot = AgentLimb::RightFoot.index();
    let frozen = anim.get_animator_state().limb_transform[hand];

    opts.limb_dangle_status[hand] = true;
    let mut last_foot = anim.get_animator_state().limb_transform[foot];
    for _ in 0..30 {
        anim.process(&opts, 0.02);
        let state = anim.get_animator_state();
        assert_eq!(state.limb_transform[hand], frozen);
        if anim.get_limb_time(&opts, AgentLimb::RightFoot) > 0.0 {
            assert_ne!(state.limb_transform[foot], last_foot);
        }
        last_foot = state.limb_transform[foot];
    }
}

#[test]
fn dangling_limbs_do_not_bias_the_skeleton() {
    // Only one active limb: weighted and unweighted centroids coincide.
    let opts = climb_options().with_only_limb(AgentLimb::RightHand);
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.3);
    assert_relative_eq!(
        anim.get_animator_state().skeleton_position_offset_target,
        Vector3::zeros(),
        epsilon = 1e-6
    );
}

#[test]
fn skeleton_offset_biases_toward_planted_limbs() {
    let opts = AgentProceduralAnimOptions::new()
        .with_dangling(AgentLimb::LeftFoot, true)
        .with_dangling(AgentLimb::RightFoot, true)
        .with_limb_transforms(
            AgentLimb::LeftHand,
            Transform::from_position(v3(-1.0, 0.0, 0.0)),
            Transform::from_position(v3(-1.0, 2.0, 0.0)),
        )
        .with_limb_transforms(
            AgentLimb::RightHand,
            Transform::from_position(v3(1.0, 0.0, 0.0)),
            Transform::from_position(v3(1.0, 0.0, 0.0)),
        )
        .with_limb_timing(AgentLimb::LeftHand, 0.0, 1.0)
        .with_limb_timing(AgentLimb::RightHand, 0.0, 0.25)
        .with_anim_blend(0.5);

    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.5);

    // Left hand is mid-swing (weight 0) at (-1, 1, 0); right hand is planted.
    // Weighted centroid = right hand, plain centroid = (0, 0.5, 0).
    let target = anim.get_animator_state().skeleton_position_offset_target;
    assert_relative_eq!(target, v3(0.5, -0.25, 0.0), epsilon = 1e-5);

    // The sprung offset heads toward the target but lags behind it.
    let offset = anim.get_animator_state().skeleton_position_offset;
    assert!(offset.x > 0.0 && offset.x < target.x);
    assert_eq!(anim.output_pose().skeleton_position_offset, offset);
}

#[test]
fn average_mode_places_skeleton_between_hands() {
    let opts = climb_options()
        .with_average_skeleton(true)
        .with_skeleton_halflives(0.0, 0.0);
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.35);

    let state = anim.get_animator_state();
    let left = state.limb_transform[AgentLimb::LeftHand.index()].position;
    let right = state.limb_transform[AgentLimb::RightHand.index()].position;
    assert_relative_eq!(state.skeleton_transform.position, (left + right) * 0.5, epsilon = 1e-6);
    assert_eq!(state.skeleton_output_transform, state.skeleton_transform);

    // Rotation still follows the global clock.
    let expected = opts
        .starting_skeleton_transform
        .interpolate_with(&opts.target_skeleton_transform, 0.35);
    assert_relative_eq!(state.skeleton_transform.rotation, expected.rotation, epsilon = 1e-6);
}

#[test]
fn reversed_playback_runs_windows_mirrored() {
    let opts = climb_options().with_playback_direction(-1.0);
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.25);

    // Hands own [0, 0.5] / [0.1, 0.6] going forward, so they move late when reversed.
    assert_eq!(anim.get_limb_time(&opts, AgentLimb::LeftHand), 0.0);
    assert_eq!(anim.get_limb_time(&opts, AgentLimb::RightHand), 0.0);
    // Right foot owns [0.5, 1.0] forward, i.e. [0, 0.5] reversed.
    assert_abs_diff_eq!(anim.get_limb_time(&opts, AgentLimb::RightFoot), 0.5, epsilon = 1e-6);

    let forward = climb_options();
    let mut anim_fwd = AgentProceduralAnimator::default();
    anim_fwd.process(&forward, 0.25);
    assert_abs_diff_eq!(anim_fwd.get_limb_time(&forward, AgentLimb::LeftHand), 0.5, epsilon = 1e-6);
    assert_eq!(anim_fwd.get_limb_time(&forward, AgentLimb::RightFoot), 0.0);
}

#[test]
fn zero_delta_recomputes_without_moving_springs() {
    let opts = climb_options();
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, 0.25);
    let before = anim.get_animator_state().clone();

    anim.process(&opts, 0.0);
    let after = anim.get_animator_state();
    assert_eq!(after.limb_output_transform, before.limb_output_transform);
    assert_eq!(after.skeleton_output_transform, before.skeleton_output_transform);
    assert_eq!(after.skeleton_position_offset, before.skeleton_position_offset);
    assert_eq!(anim.get_playback_position(), 0.25);
}

#[test]
fn springs_converge_after_playback() {
    let opts = climb_options();
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&opts, DT);

    let mut saw_motion = false;
    for _ in 0..30 {
        anim.process(&opts, DT);
        saw_motion |= !anim.have_springs_converged();
    }
    assert!(saw_motion, "limb springs should be moving mid-animation");

    for _ in 0..240 {
        anim.process(&opts, DT);
    }
    assert!(anim.is_done());
    assert!(anim.have_springs_converged());
    let pose = anim.output_pose();
    for limb in AgentLimb::ALL {
        assert_relative_eq!(
            pose.ik_target(limb).position,
            opts.target_limb_transform[limb.index()].position,
            epsilon = 1e-3
        );
    }
}

#[test]
fn convergence_ignores_rotation_springs() {
    let limb = AgentLimb::LeftHand;
    let opts = AgentProceduralAnimOptions::new()
        .with_limb_transforms(
            limb,
            Transform::identity(),
            Transform::from_position_rotation(
                Vector3::zeros(),
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.2),
            ),
        )
        .with_limb_halflives(limb, 0.2, 0.5);

    let mut anim = AgentProceduralAnimator::default();
    for _ in 0..20 {
        anim.process(&opts, DT);
    }
    let state = anim.get_animator_state();
    assert!(state.limb_rotation_spring_velocity[limb.index()].norm() > 0.1);
    assert!(anim.have_springs_converged());
}

#[test]
fn convergence_threshold_is_configurable() {
    let opts = climb_options();
    let mut strict = AgentProceduralAnimator::new(AnimatorConfig {
        convergence_velocity_threshold: 0.0,
        ..AnimatorConfig::default()
    });
    let mut loose = AgentProceduralAnimator::new(AnimatorConfig {
        convergence_velocity_threshold: 1.0e3,
        ..AnimatorConfig::default()
    });
    strict.process(&opts, 0.2);
    loose.process(&opts, 0.2);
    assert!(!strict.have_springs_converged());
    assert!(loose.have_springs_converged());
}

#[test]
fn skeleton_spring_modes_differ_but_settle_on_target() {
    let critical = climb_options().with_skeleton_spring_mode(SkeletonSpringMode::Critical, 1.0);
    let damped = climb_options().with_skeleton_spring_mode(SkeletonSpringMode::Damped, 0.3);

    let mut a = AgentProceduralAnimator::default();
    let mut b = AgentProceduralAnimator::default();
    let mut max_gap = 0.0f32;
    for _ in 0..300 {
        a.process(&critical, DT);
        b.process(&damped, DT);
        let gap = (a.output_pose().skeleton_trf.position
            - b.output_pose().skeleton_trf.position)
            .norm();
        max_gap = max_gap.max(gap);
    }
    assert!(max_gap > 1e-4);

    let target = critical.target_skeleton_transform.position;
    assert_relative_eq!(a.output_pose().skeleton_trf.position, target, epsilon = 1e-3);
    assert_relative_eq!(b.output_pose().skeleton_trf.position, target, epsilon = 1e-3);
}

#[test]
fn state_snapshot_carries_pose_into_another_animator() {
    let opts = climb_options();
    let mut source = AgentProceduralAnimator::default();
    for _ in 0..15 {
        source.process(&opts, DT);
    }

    let mut copy = AgentProceduralAnimator::default();
    copy.set_animator_state(source.get_animator_state().clone());
    copy.seek(source.get_playback_position());
    assert_eq!(copy.get_animator_state(), source.get_animator_state());

    for _ in 0..10 {
        source.process(&opts, DT);
        copy.process(&opts, DT);
    }
    assert_eq!(copy.get_animator_state(), source.get_animator_state());
}

#[test]
fn output_pose_keeps_driver_magnets() {
    let mut anim = AgentProceduralAnimator::default();
    anim.process(&climb_options(), DT);

    let mut pose = AgentProceduralPose::default();
    pose.ik_magnet_positions[AgentLimb::LeftFoot.index()] = v3(0.0, 0.5, 1.0);
    anim.get_output_pose(&mut pose);
    assert!(pose.valid);
    assert_eq!(pose.ik_magnet_positions[AgentLimb::LeftFoot.index()], v3(0.0, 0.5, 1.0));
}

#[test]
fn next_transition_starts_from_previous_output() {
    let mut first = AgentProceduralAnimator::default();
    let opts = climb_options();
    for _ in 0..90 {
        first.process(&opts, DT);
    }
    let handoff = first.output_pose();

    let mut next_opts = climb_options();
    next_opts.start_from_pose(&handoff);
    let mut second = AgentProceduralAnimator::default();
    second.restart();
    second.process(&next_opts, 0.0);

    let pose = second.output_pose();
    for limb in AgentLimb::ALL {
        assert_relative_eq!(
            pose.ik_target(limb).position,
            handoff.ik_target(limb).position,
            epsilon = 1e-6
        );
    }
}
