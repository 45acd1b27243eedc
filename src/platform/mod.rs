//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing from display-refresh timestamps
//! - Key and pointer event normalization

use glam::Vec2;

use crate::consts::FIRST_FRAME_DELTA_MS;
use crate::sim::{Direction, FrameTime, InputSnapshot};

/// Turns refresh-callback timestamps into per-frame timing
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    max_delta_ms: f32,
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_time: None,
            max_delta_ms,
        }
    }

    /// Timing for the frame at `now_ms`
    ///
    /// The first frame has no predecessor and gets a nominal 60 Hz delta.
    /// Deltas are clamped so a backgrounded tab does not produce one huge step.
    pub fn frame(&mut self, now_ms: f64) -> FrameTime {
        let delta = match self.last_time {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(self.max_delta_ms),
            None => FIRST_FRAME_DELTA_MS,
        };
        if delta >= self.max_delta_ms {
            log::debug!("Frame delta clamped to {}ms", self.max_delta_ms);
        }
        self.last_time = Some(now_ms);
        FrameTime::new(now_ms, delta)
    }
}

/// Key transition from the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down,
    Up,
}

/// Apply a keyboard event to the snapshot; returns whether the key was a
/// movement key (so the caller can suppress page scrolling)
pub fn apply_key(input: &mut InputSnapshot, key: &str, event: KeyEvent) -> bool {
    let Some(direction) = Direction::from_key(key) else {
        return false;
    };
    match event {
        KeyEvent::Down => input.press(direction),
        KeyEvent::Up => input.release(direction),
    }
    true
}

/// Map a pointer position on the displayed canvas to playfield coordinates
///
/// `client_size` is the canvas' CSS size; the playfield is scaled to fill it.
pub fn to_playfield(offset: Vec2, client_size: Vec2, field_size: Vec2) -> Vec2 {
    if client_size.x <= 0.0 || client_size.y <= 0.0 {
        return offset;
    }
    offset * field_size / client_size
}
