//! Pre-parsed animation data model consumed by the player.
//!
//! The shapes here are what an external loader (SCML parser + keyframe pool
//! precomputation) hands over. The player only indexes them; nothing in this
//! crate mutates an `Entity` or a `KeyframePool` once loaded.

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// Resolved transform of a single bone at a keyframe instant.
/// Angles are in degrees.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoneTransform {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
}

/// Resolved transform of a drawable object (sprite) at a keyframe instant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ObjectTransform {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder: u32,
    #[serde(default)]
    pub file: u32,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    #[serde(default)]
    pub pivot_x: f32,
    #[serde(default = "one")]
    pub pivot_y: f32,
    #[serde(default = "one")]
    pub alpha: f32,
    #[serde(default)]
    pub z_index: i32,
}

fn one() -> f32 {
    1.0
}

/// Snapshot of bone/object transforms covering `[start_time, end_time)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub bones: Vec<BoneTransform>,
    /// Draw order is the order of this list.
    #[serde(default)]
    pub objects: Vec<ObjectTransform>,
}

/// Animation metadata. `id` doubles as the index into the entity and pool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub id: usize,
    pub name: String,
    /// Authored length in timeline units (informational).
    #[serde(default)]
    pub length: i64,
}

/// A character: an ordered list of animations addressable by id and by name.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub name: String,
    pub animations: Vec<Animation>,
}

impl Entity {
    /// Build an entity, enforcing `animations[i].id == i` and unique names.
    pub fn new(name: impl Into<String>, animations: Vec<Animation>) -> Result<Self> {
        let entity = Self {
            name: name.into(),
            animations,
        };
        entity.validate()?;
        Ok(entity)
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, anim) in self.animations.iter().enumerate() {
            if anim.id != idx {
                return Err(PlayerError::InvalidConfiguration {
                    reason: format!(
                        "animation '{}' has id {} but sits at index {idx}",
                        anim.name, anim.id
                    ),
                });
            }
            if self.animations[..idx].iter().any(|a| a.name == anim.name) {
                return Err(PlayerError::InvalidConfiguration {
                    reason: format!("duplicate animation name '{}'", anim.name),
                });
            }
        }
        Ok(())
    }

    /// Linear scan by name.
    pub fn animation_by_name(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entity: Self = serde_json::from_str(json)?;
        entity.validate()?;
        Ok(entity)
    }
}

/// Per-animation keyframe arrays, indexed by animation id.
///
/// Shared read-only between players (wrap in `Arc`). Transition windows are
/// carved on per-player copies, never here.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct KeyframePool {
    pub animations: Vec<Vec<Keyframe>>,
}

impl KeyframePool {
    pub fn new(animations: Vec<Vec<Keyframe>>) -> Self {
        Self { animations }
    }

    /// Check the pool against an entity: one non-empty sequence per animation,
    /// every keyframe with a positive-width interval.
    pub fn validate_against(&self, entity: &Entity) -> Result<()> {
        if self.animations.len() != entity.len() {
            return Err(PlayerError::PoolMismatch {
                animations: entity.len(),
                pools: self.animations.len(),
            });
        }
        for (index, keys) in self.animations.iter().enumerate() {
            if keys.is_empty() {
                return Err(PlayerError::EmptyAnimation { index });
            }
            for (key, kf) in keys.iter().enumerate() {
                if kf.end_time <= kf.start_time {
                    return Err(PlayerError::InvalidKeyframe {
                        animation: index,
                        key,
                        reason: format!(
                            "end_time {} must be greater than start_time {}",
                            kf.end_time, kf.start_time
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
