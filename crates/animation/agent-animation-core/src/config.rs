//! Animator configuration.

use serde::{Deserialize, Serialize};

/// Per-animator tuning that does not change from one transition to the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Length of the playback clock in seconds. A zero duration means the
    /// animation is complete as soon as it starts.
    pub animation_duration: f32,
    /// Limb position-spring speed (units/sec) under which the limb springs
    /// count as converged.
    pub convergence_velocity_threshold: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            animation_duration: 1.0,
            convergence_velocity_threshold: 0.1,
        }
    }
}
