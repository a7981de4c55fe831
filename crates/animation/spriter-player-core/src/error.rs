//! Error types for the Spriter player

use serde::{Deserialize, Serialize};

/// Everything the player can reject. All variants are recoverable: fix the
/// input and call again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    /// Degenerate configuration (zero transition steps, zero speed, bad ids)
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Animation index outside the entity's animation list
    #[error("Animation not found: index {index}")]
    AnimationNotFound { index: usize },

    /// Animation without any keyframe
    #[error("Animation {index} has no keyframes")]
    EmptyAnimation { index: usize },

    /// Keyframe pool does not cover the entity one-to-one
    #[error("Keyframe pool has {pools} animations, entity has {animations}")]
    PoolMismatch { animations: usize, pools: usize },

    /// Malformed keyframe interval
    #[error("Invalid keyframe {key} in animation {animation}: {reason}")]
    InvalidKeyframe {
        animation: usize,
        key: usize,
        reason: String,
    },

    /// Bone index outside the current pose
    #[error("Bone not found: index {index}")]
    BoneNotFound { index: usize },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl PlayerError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "configuration",
            Self::EmptyAnimation { .. }
            | Self::PoolMismatch { .. }
            | Self::InvalidKeyframe { .. } => "data",
            Self::AnimationNotFound { .. } | Self::BoneNotFound { .. } => "lookup",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

/// Player result type
pub type Result<T> = core::result::Result<T, PlayerError>;

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
