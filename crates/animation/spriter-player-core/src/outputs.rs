//! Output contracts from the player.
//!
//! A [`Pose`] is the per-update snapshot handed to the drawer: final bone and
//! object transforms (modifiers and offset applied) plus the number of
//! objects that are valid for this tick.

use serde::{Deserialize, Serialize};

use crate::data::{BoneTransform, Keyframe, ObjectTransform};
use crate::modifiers::PoseModifiers;

/// Implemented by the rendering backend; the player never draws itself.
pub trait Drawer {
    fn draw_object(&mut self, object: &ObjectTransform);

    /// Debug hook for skeleton overlays.
    fn draw_bones(&mut self, _bones: &[BoneTransform]) {}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub bones: Vec<BoneTransform>,
    pub objects: Vec<ObjectTransform>,
    /// Count of valid entries in `objects` for this tick.
    pub objects_to_draw: usize,
}

impl Pose {
    /// Refill from a raw interpolated keyframe. Buffers are reused.
    pub(crate) fn rebuild(
        &mut self,
        raw: &Keyframe,
        modifiers: &PoseModifiers,
        x_offset: f32,
        y_offset: f32,
    ) {
        self.bones.clear();
        self.bones.extend(
            raw.bones
                .iter()
                .enumerate()
                .map(|(i, b)| modifiers.apply_bone(i, b, x_offset, y_offset)),
        );
        self.objects.clear();
        self.objects.extend(
            raw.objects
                .iter()
                .map(|o| modifiers.apply_object(o, x_offset, y_offset)),
        );
        self.objects_to_draw = raw.objects.len();
    }

    #[inline]
    pub fn bone(&self, index: usize) -> Option<&BoneTransform> {
        self.bones.get(index)
    }

    /// Objects in draw order.
    #[inline]
    pub fn draw_list(&self) -> &[ObjectTransform] {
        &self.objects[..self.objects_to_draw.min(self.objects.len())]
    }

    pub fn draw(&self, drawer: &mut dyn Drawer) {
        drawer.draw_bones(&self.bones);
        for object in self.draw_list() {
            drawer.draw_object(object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        files: Vec<u32>,
        bone_calls: usize,
    }

    impl Drawer for Recorder {
        fn draw_object(&mut self, object: &ObjectTransform) {
            self.files.push(object.file);
        }
        fn draw_bones(&mut self, _bones: &[BoneTransform]) {
            self.bone_calls += 1;
        }
    }

    fn object(file: u32) -> ObjectTransform {
        ObjectTransform {
            name: String::new(),
            folder: 0,
            file,
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            pivot_x: 0.0,
            pivot_y: 1.0,
            alpha: 1.0,
            z_index: 0,
        }
    }

    #[test]
    fn draws_only_valid_objects_in_order() {
        let pose = Pose {
            bones: vec![],
            objects: vec![object(4), object(2), object(9)],
            objects_to_draw: 2,
        };
        let mut rec = Recorder::default();
        pose.draw(&mut rec);
        assert_eq!(rec.files, vec![4, 2]);
        assert_eq!(rec.bone_calls, 1);
    }

    #[test]
    fn rebuild_applies_offset_and_counts() {
        let raw = Keyframe {
            start_time: 0,
            end_time: 10,
            bones: vec![],
            objects: vec![object(1), object(2)],
        };
        let mut pose = Pose::default();
        pose.rebuild(&raw, &PoseModifiers::default(), 5.0, -5.0);
        assert_eq!(pose.objects_to_draw, 2);
        assert_eq!(pose.objects[1].x, 5.0);
        assert_eq!(pose.objects[1].y, -5.0);
    }
}
