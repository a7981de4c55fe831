//! Runtime pose modifiers layered on top of interpolation.
//!
//! Order per bone: per-bone overrides, flips, global scale, global rotation.
//! The caller's offset is added last by the player.

use serde::{Deserialize, Serialize};

use crate::data::{BoneTransform, ObjectTransform};

/// Per-bone adjustments addressed by bone index.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoneOverride {
    /// Degrees added to the interpolated angle.
    pub angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for BoneOverride {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Whole-pose adjustments. Identity by default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PoseModifiers {
    pub angle: f32,
    pub scale: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    #[serde(default)]
    pub bones: Vec<BoneOverride>,
}

impl Default for PoseModifiers {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
            bones: Vec::new(),
        }
    }
}

struct Placement {
    x: f32,
    y: f32,
    angle: f32,
    scale_x: f32,
    scale_y: f32,
}

impl PoseModifiers {
    /// Override slot for `index`, growing the table as needed.
    pub fn bone_mut(&mut self, index: usize) -> &mut BoneOverride {
        if self.bones.len() <= index {
            self.bones.resize(index + 1, BoneOverride::default());
        }
        &mut self.bones[index]
    }

    pub fn bone(&self, index: usize) -> BoneOverride {
        self.bones.get(index).copied().unwrap_or_default()
    }

    fn place(&self, p: Placement, x_offset: f32, y_offset: f32) -> Placement {
        let Placement {
            mut x,
            mut y,
            mut angle,
            mut scale_x,
            mut scale_y,
        } = p;
        // Mirroring across an axis turns the local frame into a rotation by the
        // mirrored angle plus a flip of the local y axis.
        if self.flip_x {
            x = -x;
            angle = 180.0 - angle;
            scale_y = -scale_y;
        }
        if self.flip_y {
            y = -y;
            angle = -angle;
            scale_y = -scale_y;
        }
        x *= self.scale;
        y *= self.scale;
        scale_x *= self.scale;
        scale_y *= self.scale;
        if self.angle != 0.0 {
            let (sin, cos) = self.angle.to_radians().sin_cos();
            let (rx, ry) = (x * cos - y * sin, x * sin + y * cos);
            x = rx;
            y = ry;
            angle += self.angle;
        }
        Placement {
            x: x + x_offset,
            y: y + y_offset,
            angle,
            scale_x,
            scale_y,
        }
    }

    pub fn apply_bone(
        &self,
        index: usize,
        bone: &BoneTransform,
        x_offset: f32,
        y_offset: f32,
    ) -> BoneTransform {
        let ov = self.bone(index);
        let p = self.place(
            Placement {
                x: bone.x,
                y: bone.y,
                angle: bone.angle + ov.angle,
                scale_x: bone.scale_x * ov.scale_x,
                scale_y: bone.scale_y * ov.scale_y,
            },
            x_offset,
            y_offset,
        );
        BoneTransform {
            name: bone.name.clone(),
            x: p.x,
            y: p.y,
            angle: p.angle,
            scale_x: p.scale_x,
            scale_y: p.scale_y,
        }
    }

    pub fn apply_object(
        &self,
        object: &ObjectTransform,
        x_offset: f32,
        y_offset: f32,
    ) -> ObjectTransform {
        let p = self.place(
            Placement {
                x: object.x,
                y: object.y,
                angle: object.angle,
                scale_x: object.scale_x,
                scale_y: object.scale_y,
            },
            x_offset,
            y_offset,
        );
        ObjectTransform {
            x: p.x,
            y: p.y,
            angle: p.angle,
            scale_x: p.scale_x,
            scale_y: p.scale_y,
            ..object.clone()
        }
    }
}
