//! Playback cursor: logical time pointer over one animation's keyframes.
//!
//! Forward (`frame_speed >= 0`) the bracket is `(key, key + 1)` and `frame`
//! lives in `[start, end)` of `key`. Reverse the bracket is `(key - 1, key)`
//! and `frame` lives in `(start, end]` of `key - 1`. Indices wrap.
//!
//! Caller contract: `|frame_speed|` must not exceed one keyframe interval.
//! Only one boundary crossing is handled per advance.

use serde::{Deserialize, Serialize};

use crate::data::Keyframe;

/// Keyframe pair to interpolate between, as indices into the sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    pub first: usize,
    pub second: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub current_key: usize,
    pub frame: i64,
    frame_speed: i32,
}

impl PlaybackCursor {
    pub fn new(frame_speed: i32) -> Self {
        Self {
            current_key: 0,
            frame: 0,
            frame_speed,
        }
    }

    #[inline]
    pub fn frame_speed(&self) -> i32 {
        self.frame_speed
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.frame_speed < 0
    }

    pub fn bracket(&self, len: usize) -> Bracket {
        debug_assert!(len > 0);
        if self.is_reverse() {
            Bracket {
                first: (self.current_key + len - 1) % len,
                second: self.current_key,
            }
        } else {
            Bracket {
                first: self.current_key,
                second: (self.current_key + 1) % len,
            }
        }
    }

    /// Change speed. When the direction flips, `current_key` is re-anchored so
    /// the bracket keeps the same keyframe pair around `frame`.
    pub fn set_frame_speed(&mut self, speed: i32, len: usize) {
        let was_reverse = self.is_reverse();
        self.frame_speed = speed;
        if len == 0 || was_reverse == self.is_reverse() {
            return;
        }
        self.current_key = if self.is_reverse() {
            (self.current_key + 1) % len
        } else {
            (self.current_key + len - 1) % len
        };
    }

    /// Rewind so the pose is keyframe 0. Forward sits at its start time;
    /// reverse sits at the end of the wrap bracket `(last, 0)` so the first
    /// tick already moves into the last keyframe.
    pub fn rewind(&mut self, keys: &[Keyframe]) {
        self.current_key = 0;
        self.frame = if self.is_reverse() {
            keys.last().map_or(0, |k| k.end_time)
        } else {
            keys.first().map_or(0, |k| k.start_time)
        };
    }

    /// Advance `frame` by one tick and handle at most one boundary crossing.
    /// Returns the new `current_key` when a crossing happened.
    pub fn advance(&mut self, keys: &[Keyframe]) -> Option<usize> {
        let len = keys.len();
        if len == 0 {
            return None;
        }
        let first = &keys[self.bracket(len).first];
        self.frame += i64::from(self.frame_speed);

        if self.frame_speed > 0 && self.frame >= first.end_time {
            self.current_key = (self.current_key + 1) % len;
            self.frame = keys[self.current_key].start_time;
            Some(self.current_key)
        } else if self.frame_speed < 0 && self.frame <= first.start_time {
            self.current_key = (self.current_key + len - 1) % len;
            // land on the boundary being entered: the end of the new first key
            self.frame = keys[self.bracket(len).first].end_time;
            Some(self.current_key)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(bounds: &[(i64, i64)]) -> Vec<Keyframe> {
        bounds
            .iter()
            .map(|&(s, e)| Keyframe {
                start_time: s,
                end_time: e,
                ..Keyframe::default()
            })
            .collect()
    }

    #[test]
    fn forward_bracket_wraps() {
        let c = PlaybackCursor {
            current_key: 2,
            frame: 25,
            frame_speed: 5,
        };
        assert_eq!(c.bracket(3), Bracket { first: 2, second: 0 });
    }

    #[test]
    fn reverse_bracket_wraps() {
        let c = PlaybackCursor {
            current_key: 0,
            frame: 0,
            frame_speed: -5,
        };
        assert_eq!(c.bracket(3), Bracket { first: 2, second: 0 });
    }

    #[test]
    fn direction_flip_keeps_pair() {
        let mut c = PlaybackCursor::new(5);
        c.current_key = 1;
        let before = c.bracket(3);
        c.set_frame_speed(-5, 3);
        assert_eq!(c.bracket(3), before);
        c.set_frame_speed(5, 3);
        assert_eq!(c.bracket(3), before);
        c.set_frame_speed(7, 3);
        assert_eq!(c.current_key, 1);
    }

    #[test]
    fn reverse_rewind_sits_on_wrap_bracket() {
        let ks = keys(&[(0, 10), (10, 20)]);
        let mut c = PlaybackCursor::new(-5);
        c.rewind(&ks);
        assert_eq!((c.current_key, c.frame), (0, 20));
        assert_eq!(c.bracket(2), Bracket { first: 1, second: 0 });
        // first tick stays inside key 1
        assert_eq!(c.advance(&ks), None);
        assert_eq!(c.frame, 15);
    }

    #[test]
    fn reverse_crossing_lands_on_entered_boundary() {
        let ks = keys(&[(0, 10), (10, 20)]);
        let mut c = PlaybackCursor {
            current_key: 1,
            frame: 5,
            frame_speed: -5,
        };
        assert_eq!(c.advance(&ks), Some(0));
        // wrapped: bracket (1, 0), frame at the end of key 1
        assert_eq!(c.frame, 20);
        assert_eq!(c.bracket(2), Bracket { first: 1, second: 0 });
    }

    #[test]
    fn zero_speed_never_moves() {
        let ks = keys(&[(0, 10), (10, 20)]);
        let mut c = PlaybackCursor::new(0);
        for _ in 0..10 {
            assert_eq!(c.advance(&ks), None);
        }
        assert_eq!((c.current_key, c.frame), (0, 0));
    }
}
