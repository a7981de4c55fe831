//! Animation-switch blending.
//!
//! A switch captures the pose currently on screen and morphs it into keyframe
//! 0 of the incoming animation over `steps` counter units, advancing
//! `speed` units per update. Both keyframes are per-player copies whose
//! intervals are rewritten into disjoint synthetic windows on the shared
//! `frame` timeline:
//!
//! ```text
//! outgoing: [frame + 1, frame + steps - 1]
//! incoming: starts at frame + 1 + steps
//! ```
//!
//! A switch requested mid-transition nests: the half-blended pose becomes
//! the new outgoing pose.

use serde::{Deserialize, Serialize};

use crate::data::Keyframe;
use crate::interp::window_ratio;

/// Which phase the player is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// Normal keyframe playback
    Steady,
    /// Blending out of a steady pose
    TransitioningOuter,
    /// Blending out of a pose that was itself mid-transition
    TransitioningInner,
}

impl TransitionPhase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::TransitioningOuter => "transitioning_outer",
            Self::TransitioningInner => "transitioning_inner",
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !matches!(self, Self::Steady)
    }

    /// Phase entered when a switch is requested from this phase.
    #[inline]
    pub fn on_switch(&self) -> Self {
        match self {
            Self::Steady | Self::TransitioningInner => Self::TransitioningOuter,
            Self::TransitioningOuter => Self::TransitioningInner,
        }
    }
}

/// Introspection snapshot of the transition machinery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInfo {
    pub phase: TransitionPhase,
    /// Progress counter in `[0, max_steps]`.
    pub counter: u32,
    pub max_steps: u32,
    /// Counter units per update.
    pub speed: u32,
}

/// Result of one blend step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlendStep {
    /// Ratio from `incoming` (0) towards `outgoing` (1).
    pub ratio: f32,
    pub done: bool,
}

/// Scratch state of an in-flight transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Blend {
    /// Captured pose being left (the "last real frame").
    pub outgoing: Keyframe,
    /// Copy of the incoming animation's keyframe 0.
    pub incoming: Keyframe,
    incoming_start: i64,
    counter: u32,
    max_steps: u32,
    speed: u32,
}

impl Blend {
    /// Carve the synthetic windows around `frame`. Callers guarantee
    /// `steps >= 1` and `speed >= 1`.
    pub fn begin(
        mut outgoing: Keyframe,
        mut incoming: Keyframe,
        frame: i64,
        speed: u32,
        steps: u32,
    ) -> Self {
        let steps_i = i64::from(steps);
        outgoing.start_time = frame + 1;
        outgoing.end_time = frame + steps_i - 1;
        let incoming_start = incoming.start_time;
        incoming.start_time = frame + 1 + steps_i;
        Self {
            outgoing,
            incoming,
            incoming_start,
            counter: 0,
            max_steps: steps,
            speed,
        }
    }

    #[inline]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    #[inline]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Place `frame` on the synthetic timeline for the current counter, then
    /// advance the counter. On the completing step the incoming keyframe's
    /// start is restored, `frame` is rewound to it and the ratio is 0.
    pub fn step(&mut self, frame: &mut i64) -> BlendStep {
        let progress = self.counter as f32 / self.max_steps as f32;
        *frame = self.outgoing.start_time + (self.max_steps as f32 * progress).round() as i64;
        self.counter = self.counter.saturating_add(self.speed).min(self.max_steps);

        if self.counter == self.max_steps {
            self.incoming.start_time = self.incoming_start;
            *frame = self.incoming_start;
            self.counter = 0;
            return BlendStep {
                ratio: 0.0,
                done: true,
            };
        }
        BlendStep {
            ratio: window_ratio(*frame, self.incoming.start_time, self.outgoing.start_time),
            done: false,
        }
    }
}

/// Exactly one of steady playback or an in-flight blend.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TransitionMachine {
    #[default]
    Steady,
    Outer(Blend),
    Inner(Blend),
}

impl TransitionMachine {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            Self::Steady => TransitionPhase::Steady,
            Self::Outer(_) => TransitionPhase::TransitioningOuter,
            Self::Inner(_) => TransitionPhase::TransitioningInner,
        }
    }

    pub fn blend(&self) -> Option<&Blend> {
        match self {
            Self::Steady => None,
            Self::Outer(b) | Self::Inner(b) => Some(b),
        }
    }

    pub fn blend_mut(&mut self) -> Option<&mut Blend> {
        match self {
            Self::Steady => None,
            Self::Outer(b) | Self::Inner(b) => Some(b),
        }
    }

    /// Start a blend; the phase follows [`TransitionPhase::on_switch`].
    pub fn begin(&mut self, blend: Blend) {
        *self = match self.phase().on_switch() {
            TransitionPhase::TransitioningInner => Self::Inner(blend),
            _ => Self::Outer(blend),
        };
    }

    pub fn finish(&mut self) {
        *self = Self::Steady;
    }
}
