//! Scripted game-over sequence
//!
//! Purely cosmetic: the panel and restart button drop in with a cubic
//! ease-out, bounce once, then rest while the screen darkens.

use std::f32::consts::PI;

use crate::config::GameOverConfig;

/// Cubic ease-out on `t` in [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Animated positions of the game-over panel and restart button
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverAnimation {
    pub start_time: f64,
    /// Top edge of the "game over" panel
    pub panel_y: f32,
    /// Top edge of the restart button
    pub button_y: f32,
    /// Resting top edge of the panel
    pub target_y: f32,
    /// Overlay alpha
    pub darkness: f32,
}

impl GameOverAnimation {
    pub fn new(field_height: f32, config: &GameOverConfig) -> Self {
        Self {
            start_time: 0.0,
            panel_y: -config.panel_height,
            button_y: -config.button_height,
            target_y: field_height / 3.0 - 150.0,
            darkness: 0.0,
        }
    }

    /// Rewind to the off-screen starting positions
    pub fn start(&mut self, now: f64, config: &GameOverConfig) {
        self.start_time = now;
        self.panel_y = -config.panel_height;
        self.button_y = -config.button_height;
        self.darkness = 0.0;
    }

    /// Resting top edge of the button
    fn button_rest_y(&self, config: &GameOverConfig) -> f32 {
        self.target_y + config.panel_height + config.gap
    }

    pub fn update(&mut self, now: f64, config: &GameOverConfig) {
        let elapsed = (now - self.start_time).max(0.0) as f32;
        self.darkness = (elapsed / config.darken_ms).min(config.max_darkness);

        let button_rest = self.button_rest_y(config);
        if elapsed < config.drop_ms {
            let eased = ease_out_cubic(elapsed / config.drop_ms);
            self.panel_y = -config.panel_height + (self.target_y + config.panel_height) * eased;
            self.button_y = -config.button_height + (button_rest + config.button_height) * eased;
        } else {
            let bounce_elapsed = elapsed - config.drop_ms;
            let bounce = if bounce_elapsed < config.bounce_ms {
                (bounce_elapsed / config.bounce_ms * PI).sin() * config.bounce_height
            } else {
                0.0
            };
            self.panel_y = self.target_y + bounce;
            self.button_y = button_rest + bounce;
        }
    }

    /// The sequence has reached its resting layout
    pub fn is_settled(&self, now: f64, config: &GameOverConfig) -> bool {
        (now - self.start_time) as f32 >= config.drop_ms + config.bounce_ms
    }
}
