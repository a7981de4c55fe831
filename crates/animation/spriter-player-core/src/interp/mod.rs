//! Keyframe interpolation.
//!
//! Stateless: given two keyframes and a ratio, fill a keyframe-shaped buffer
//! with the blended bones and objects. The buffer doubles as the snapshot a
//! transition captures, so it stays free of offsets and modifiers.

pub mod functions;

use crate::config::AngleMode;
use crate::data::Keyframe;

pub use functions::{lerp_angle, lerp_f32, shortest_angle_delta, window_ratio};

/// Blend `first` towards `second` by `t` into `out`. `out` takes the shape
/// of `first` (object counts are keyframe-local) and its interval.
pub fn interpolate(
    first: &Keyframe,
    second: &Keyframe,
    t: f32,
    mode: AngleMode,
    out: &mut Keyframe,
) {
    functions::blend_bones(&first.bones, &second.bones, t, mode, &mut out.bones);
    functions::blend_objects(&first.objects, &second.objects, t, mode, &mut out.objects);
    out.start_time = first.start_time;
    out.end_time = first.end_time;
}
