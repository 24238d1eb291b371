//! The four animated limbs and the fixed arrays indexed by them.
//!
//! Ordinals are load-bearing: hands are 0-1 and feet are 2-3.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnimatorError;

pub const LIMB_COUNT: usize = 4;

/// One value per limb, indexed by [`AgentLimb::index`].
pub type LimbArray<T> = [T; LIMB_COUNT];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLimb {
    LeftHand = 0,
    RightHand = 1,
    LeftFoot = 2,
    RightFoot = 3,
}

impl AgentLimb {
    pub const ALL: [AgentLimb; LIMB_COUNT] = [
        AgentLimb::LeftHand,
        AgentLimb::RightHand,
        AgentLimb::LeftFoot,
        AgentLimb::RightFoot,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn is_hand(self) -> bool {
        matches!(self, Self::LeftHand | Self::RightHand)
    }

    #[inline]
    pub fn is_foot(self) -> bool {
        !self.is_hand()
    }

    /// Skeleton bone driven by this limb's IK target.
    #[inline]
    pub fn bone_name(self) -> &'static str {
        match self {
            Self::LeftHand => "hand.L",
            Self::RightHand => "hand.R",
            Self::LeftFoot => "foot.L",
            Self::RightFoot => "foot.R",
        }
    }

    pub fn from_bone_name(name: &str) -> Result<Self, AnimatorError> {
        Self::ALL
            .into_iter()
            .find(|limb| limb.bone_name() == name)
            .ok_or_else(|| AnimatorError::UnknownBone {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for AgentLimb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bone_name())
    }
}

/// Bone-name contract shared with the IK consumer.
#[inline]
pub fn limb_to_bone_name(limb: AgentLimb) -> &'static str {
    limb.bone_name()
}
