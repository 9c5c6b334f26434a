//! Queue of twist animations replayed by rendering surfaces.
//!
//! The logical cube state never waits on this queue; a renderer pulls the
//! current twist and its progress each frame.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, PI};
use std::ops::RangeInclusive;
use std::time::Duration;

use cubetimer_notation::{Face, Move};
use serde::{Deserialize, Serialize};

/// Steps at least this large finish the twist at once, since the partial
/// frame would only flash on screen.
const SKIP_THRESHOLD: f32 = 1.0 / 3.0;

/// Each twist in the backlog multiplies twist speed by `e` to this power.
const BACKLOG_SPEEDUP: f32 = 0.5;

/// Cosine easing of linear progress from 0.0 to 1.0.
fn ease(t: f32) -> f32 {
    (1.0 - (t * PI).cos()) / 2.0
}

/// Animation settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Whether to speed up twists when many are queued.
    pub dynamic_twist_speed: bool,
    /// Seconds per twist.
    pub twist_duration: f32,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            dynamic_twist_speed: true,
            twist_duration: 0.2,
        }
    }
}

/// Queued twist animations.
#[derive(Debug, Default, Clone)]
pub struct TwistAnimationState {
    twists: VecDeque<TwistAnimation>,
    /// Longest the queue has been since it was last empty.
    peak_backlog: usize,
    /// Linear progress through the front twist, from 0.0 to 1.0.
    elapsed: f32,
}
impl TwistAnimationState {
    /// Steps the animation forward. Returns whether the cube should be
    /// redrawn next frame.
    pub fn proceed(&mut self, delta: Duration, prefs: &AnimationPreferences) -> bool {
        if self.twists.is_empty() {
            self.peak_backlog = 0;
            return false;
        }

        let step = self.step_size(delta, prefs);
        self.elapsed = if step < SKIP_THRESHOLD {
            self.elapsed + step
        } else {
            1.0
        };
        if self.elapsed >= 1.0 {
            self.twists.pop_front();
            self.elapsed = 0.0;
        }
        true
    }

    /// Returns the fraction of a twist covered in `delta`, or infinity if it
    /// cannot be computed.
    fn step_size(&self, delta: Duration, prefs: &AnimationPreferences) -> f32 {
        let backlog = self.peak_backlog.saturating_sub(1) as f32;
        let speedup = if prefs.dynamic_twist_speed {
            (backlog * BACKLOG_SPEEDUP).exp()
        } else {
            1.0
        };
        let step = delta.as_secs_f32() * speedup / prefs.twist_duration;
        if step.is_finite() && step >= 0.0 {
            step
        } else {
            f32::INFINITY
        }
    }

    /// Adds a twist to the back of the queue.
    pub fn push(&mut self, anim: TwistAnimation) {
        self.twists.push_back(anim);
        self.peak_backlog = self.peak_backlog.max(self.twists.len());
    }

    /// Returns the twist currently being animated and its eased progress.
    pub fn current(&self) -> Option<(&TwistAnimation, f32)> {
        self.twists.front().map(|twist| (twist, ease(self.elapsed)))
    }

    /// Drops every queued twist.
    pub fn cancel(&mut self) {
        if !self.twists.is_empty() {
            log::debug!("cancelling {} queued twist animations", self.twists.len());
        }
        *self = Self::default();
    }

    /// Returns the number of queued twists, including the current one.
    pub fn len(&self) -> usize {
        self.twists.len()
    }
    /// Returns whether there are no queued twists.
    pub fn is_empty(&self) -> bool {
        self.twists.is_empty()
    }
}

/// Single animated twist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwistAnimation {
    /// Face being turned.
    pub face: Face,
    /// Layer depths turning together.
    pub depths: RangeInclusive<usize>,
    /// Number of clockwise quarter turns.
    pub quarter_turns: u8,
}
impl TwistAnimation {
    /// Constructs the animation of a move on a cube with `size` layers.
    pub fn from_move(mv: Move, size: usize) -> Self {
        Self {
            face: mv.face,
            depths: mv.depth_range(size),
            quarter_turns: mv.quarter_turns(),
        }
    }

    /// Constructs the animation of a single clockwise layer turn.
    pub fn single_layer(face: Face, depth: usize) -> Self {
        Self {
            face,
            depths: depth..=depth,
            quarter_turns: 1,
        }
    }

    /// Returns the angle, in radians, that the layers have turned clockwise
    /// at the given eased progress.
    ///
    /// Three quarter turns are animated as one counterclockwise quarter turn.
    pub fn angle(&self, progress: f32) -> f32 {
        let total = match self.quarter_turns % 4 {
            3 => -FRAC_PI_2,
            q => q as f32 * FRAC_PI_2,
        };
        total * progress
    }
}
