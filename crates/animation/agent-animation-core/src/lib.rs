//! Agent Animation Core (engine-agnostic)
//!
//! Procedural animation for a four-limb character. A driver (the traversal
//! state machine) fills an [`AgentProceduralAnimOptions`] per transition and
//! calls [`AgentProceduralAnimator::process`] every tick. Limbs swing through
//! their timing windows and the skeleton leans toward the planted ones; the
//! result is smoothed with the closed-form solvers from `agent-springs-core`
//! and read back as an [`AgentProceduralPose`] for IK.

pub mod animator;
pub mod config;
pub mod error;
pub mod limb;
pub mod options;
pub mod pose;
pub mod state;
pub mod timing;
pub mod transform;

pub use animator::AgentProceduralAnimator;
pub use config::AnimatorConfig;
pub use error::AnimatorError;
pub use limb::{limb_to_bone_name, AgentLimb, LimbArray, LIMB_COUNT};
pub use options::{AgentProceduralAnimOptions, SkeletonSpringMode};
pub use pose::AgentProceduralPose;
pub use state::{AnimatorPhase, AnimatorState};
pub use transform::Transform;

/// Animator result type
pub type Result<T> = core::result::Result<T, AnimatorError>;
