use agent_animation_core::{
    AgentLimb, AgentProceduralAnimOptions, AgentProceduralAnimator, AnimatorConfig,
};
use agent_test_fixtures::presets;
use serde_json::{json, to_string_pretty};

fn main() -> anyhow::Result<()> {
    let options = AgentProceduralAnimOptions::from_json(&presets::json("ledge_climb_up")?)?;
    let duration = presets::duration("ledge_climb_up")?.unwrap_or(1.0);

    let mut animator = AgentProceduralAnimator::new(AnimatorConfig {
        animation_duration: duration,
        ..AnimatorConfig::default()
    });
    animator.restart();

    // 10 Hz readout of a 60 Hz simulation, plus a short settle after the clip ends.
    let mut tick = 0u32;
    while !animator.is_done() || !animator.have_springs_converged() {
        animator.process(&options, 1.0 / 60.0);
        tick += 1;
        if tick % 6 != 0 {
            continue;
        }
        let pose = animator.output_pose();
        let limbs: serde_json::Map<String, serde_json::Value> = AgentLimb::ALL
            .iter()
            .map(|limb| {
                let p = pose.ik_target(*limb).position;
                (limb.bone_name().to_string(), json!([p.x, p.y, p.z]))
            })
            .collect();
        let skeleton = pose.offset_skeleton_trf().position;
        let frame = json!({
            "time": animator.get_playback_position(),
            "limbs": limbs,
            "skeleton": [skeleton.x, skeleton.y, skeleton.z],
            "converged": animator.have_springs_converged(),
        });
        println!("{}", to_string_pretty(&frame)?);
    }
    Ok(())
}
