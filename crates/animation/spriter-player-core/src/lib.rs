//! Spriter Player Core (renderer-agnostic)
//!
//! Plays pre-parsed Spriter-style skeletal animation: advances a logical
//! frame over an animation's keyframes, interpolates bone and object
//! transforms between the bracketing pair, and blends across animation
//! switches without snapping. Parsing SCML, building keyframe pools and
//! drawing sprites belong to the host.

pub mod config;
pub mod cursor;
pub mod data;
pub mod error;
pub mod interp;
pub mod modifiers;
pub mod outputs;
pub mod player;
pub mod transition;

// Re-exports for consumers (adapters)
pub use config::{AngleMode, PlayerConfig};
pub use cursor::{Bracket, PlaybackCursor};
pub use data::{Animation, BoneTransform, Entity, Keyframe, KeyframePool, ObjectTransform};
pub use error::{PlayerError, Result};
pub use modifiers::{BoneOverride, PoseModifiers};
pub use outputs::{Drawer, Pose};
pub use player::SpriterPlayer;
pub use transition::{TransitionInfo, TransitionPhase};
