//! Player animation state machine
//!
//! Four states, no timers. The next state is a pure function of the current
//! state and the held directions; entering a state selects a sprite row.

use super::input::{Direction, InputSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    StandingLeft,
    #[default]
    StandingRight,
    RunningLeft,
    RunningRight,
}

impl AnimationState {
    /// Sprite-sheet row shown while in this state
    pub fn sprite_row(self) -> u32 {
        match self {
            AnimationState::StandingRight => 0,
            AnimationState::StandingLeft => 1,
            AnimationState::RunningRight => 6,
            AnimationState::RunningLeft => 7,
        }
    }

    /// Transition table. Up/Down never matter here.
    pub fn next(self, left: bool, right: bool) -> Self {
        use AnimationState::*;
        match self {
            StandingRight if left => RunningLeft,
            StandingRight if right => RunningRight,
            StandingLeft if right => RunningRight,
            StandingLeft if left => RunningLeft,
            RunningRight if !right => StandingRight,
            RunningRight if left => RunningLeft,
            RunningLeft if !left => StandingLeft,
            RunningLeft if right => RunningRight,
            state => state,
        }
    }

    /// Evaluate the transition against a snapshot
    pub fn handle_input(self, input: &InputSnapshot) -> Self {
        self.next(input.is_held(Direction::Left), input.is_held(Direction::Right))
    }
}

/// Sprite-sheet column cycling on a fixed interval
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimer {
    /// Current column
    pub frame: u32,
    /// Last column before wrapping to 0
    pub max_frame: u32,
    /// Milliseconds between columns
    pub interval: f32,
    timer: f32,
}

impl FrameTimer {
    pub fn new(fps: f32, max_frame: u32) -> Self {
        Self {
            frame: 0,
            max_frame,
            interval: 1000.0 / fps,
            timer: 0.0,
        }
    }

    /// Accumulate elapsed time; step one column once the interval is exceeded
    pub fn advance(&mut self, delta_ms: f32) {
        if self.timer > self.interval {
            self.timer = 0.0;
            self.frame = if self.frame < self.max_frame {
                self.frame + 1
            } else {
                0
            };
        } else {
            self.timer += delta_ms;
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
    }
}
