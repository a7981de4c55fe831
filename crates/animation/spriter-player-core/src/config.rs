//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// How bone/object angles are blended between two keyframes.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// Blend along the shorter arc (delta normalized into [-180, 180)).
    #[default]
    ShortestArc,
    /// Plain component-wise lerp; 350 -> 10 sweeps back through 180.
    Linear,
}

/// Defaults for a player. Per-call transition parameters override the
/// transition fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Timeline units advanced per update; negative plays backwards.
    /// Must not exceed one keyframe interval in magnitude.
    pub frame_speed: i32,
    /// Counter increment per update while transitioning.
    pub transition_speed: u32,
    /// Counter length of a transition.
    pub transition_steps: u32,
    pub angle_mode: AngleMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            frame_speed: 10,
            transition_speed: 30,
            transition_steps: 100,
            angle_mode: AngleMode::ShortestArc,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        validate_transition(self.transition_speed, self.transition_steps)
    }
}

/// Reject transitions that would divide by zero or never finish.
pub(crate) fn validate_transition(speed: u32, steps: u32) -> Result<()> {
    if steps == 0 {
        return Err(PlayerError::InvalidConfiguration {
            reason: "transition steps must be >= 1".into(),
        });
    }
    if speed == 0 {
        return Err(PlayerError::InvalidConfiguration {
            reason: "transition speed must be >= 1".into(),
        });
    }
    Ok(())
}
