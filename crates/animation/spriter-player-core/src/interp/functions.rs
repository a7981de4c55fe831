//! Interpolation helpers:
//! - lerp_f32 (exact at both endpoints)
//! - lerp_angle (shortest-arc or linear, see AngleMode)
//! - window_ratio (position of a frame inside a timeline window)
//! - bone/object blends

use crate::config::AngleMode;
use crate::data::{BoneTransform, ObjectTransform};

/// Linear interpolation of scalars. Written as a weighted sum so that
/// `t == 0` yields `a` and `t == 1` yields `b` bit-for-bit.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Signed delta from `a` to `b` normalized into [-180, 180).
#[inline]
pub fn shortest_angle_delta(a: f32, b: f32) -> f32 {
    (b - a + 180.0).rem_euclid(360.0) - 180.0
}

/// Angle interpolation in degrees.
#[inline]
pub fn lerp_angle(a: f32, b: f32, t: f32, mode: AngleMode) -> f32 {
    match mode {
        AngleMode::Linear => lerp_f32(a, b, t),
        AngleMode::ShortestArc => {
            if t <= 0.0 {
                a
            } else {
                a + shortest_angle_delta(a, b) * t
            }
        }
    }
}

/// Where `frame` falls between `from` (ratio 0) and `to` (ratio 1), clamped
/// to [0, 1]. The window may run backwards (`to < from`). A zero-width window
/// yields 0.
#[inline]
pub fn window_ratio(frame: i64, from: i64, to: i64) -> f32 {
    let span = to - from;
    if span == 0 {
        return 0.0;
    }
    let r = (frame - from) as f64 / span as f64;
    r.clamp(0.0, 1.0) as f32
}

pub fn lerp_bone(a: &BoneTransform, b: &BoneTransform, t: f32, mode: AngleMode) -> BoneTransform {
    BoneTransform {
        name: a.name.clone(),
        x: lerp_f32(a.x, b.x, t),
        y: lerp_f32(a.y, b.y, t),
        angle: lerp_angle(a.angle, b.angle, t, mode),
        scale_x: lerp_f32(a.scale_x, b.scale_x, t),
        scale_y: lerp_f32(a.scale_y, b.scale_y, t),
    }
}

/// Blend two object transforms. Identity fields (folder/file/pivot/z) come
/// from `a`; sprites swap at keyframe boundaries, they are not morphed.
pub fn lerp_object(
    a: &ObjectTransform,
    b: &ObjectTransform,
    t: f32,
    mode: AngleMode,
) -> ObjectTransform {
    ObjectTransform {
        name: a.name.clone(),
        folder: a.folder,
        file: a.file,
        x: lerp_f32(a.x, b.x, t),
        y: lerp_f32(a.y, b.y, t),
        angle: lerp_angle(a.angle, b.angle, t, mode),
        scale_x: lerp_f32(a.scale_x, b.scale_x, t),
        scale_y: lerp_f32(a.scale_y, b.scale_y, t),
        pivot_x: a.pivot_x,
        pivot_y: a.pivot_y,
        alpha: lerp_f32(a.alpha, b.alpha, t),
        z_index: a.z_index,
    }
}

/// Blend bones index-by-index into `out`. Entries missing from `second` hold
/// the `first` value.
pub fn blend_bones(
    first: &[BoneTransform],
    second: &[BoneTransform],
    t: f32,
    mode: AngleMode,
    out: &mut Vec<BoneTransform>,
) {
    out.clear();
    out.extend(first.iter().enumerate().map(|(i, a)| match second.get(i) {
        Some(b) => lerp_bone(a, b, t, mode),
        None => a.clone(),
    }));
}

/// Same as [`blend_bones`] for objects.
pub fn blend_objects(
    first: &[ObjectTransform],
    second: &[ObjectTransform],
    t: f32,
    mode: AngleMode,
    out: &mut Vec<ObjectTransform>,
) {
    out.clear();
    out.extend(first.iter().enumerate().map(|(i, a)| match second.get(i) {
        Some(b) => lerp_object(a, b, t, mode),
        None => a.clone(),
    }));
}
