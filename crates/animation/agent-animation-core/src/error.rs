//! Error types for the animator's boundary operations.
//!
//! The per-tick path (`process`, `advance_springs`) never fails; these errors
//! only come from parsing and validating driver-supplied data.

use serde::{Deserialize, Serialize};

use crate::limb::AgentLimb;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimatorError {
    /// Bone name with no limb mapping
    #[error("Unknown bone name: {name}")]
    UnknownBone { name: String },

    /// Limb timing window outside [0, 1] or reversed
    #[error("Invalid timing window for {limb}: [{start}, {end}]")]
    InvalidTiming {
        limb: AgentLimb,
        start: f32,
        end: f32,
    },

    /// Playback direction other than +1 / -1
    #[error("Invalid playback direction: {direction} (expected 1.0 or -1.0)")]
    InvalidPlaybackDirection { direction: f32 },

    /// Animation blend outside [0, 1]
    #[error("Animation blend {blend} is outside [0, 1]")]
    InvalidBlend { blend: f32 },

    /// Damped skeleton spring with a non-positive damping ratio
    #[error("Invalid damping ratio {ratio} (must be > 0 for a damped spring)")]
    InvalidDampingRatio { ratio: f32 },

    /// Rotation whose quaternion is not unit length
    #[error("Rotation in {field} is not normalized (norm {norm})")]
    NonUnitRotation { field: String, norm: f32 },

    /// NaN or infinite input
    #[error("Non-finite value in {field}")]
    NonFinite { field: String },

    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AnimatorError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownBone { .. } => "limb",
            Self::InvalidTiming { .. }
            | Self::InvalidPlaybackDirection { .. }
            | Self::InvalidBlend { .. }
            | Self::InvalidDampingRatio { .. }
            | Self::NonUnitRotation { .. }
            | Self::NonFinite { .. } => "validation",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
