//! The player character
//!
//! Platformer-style movement: horizontal acceleration, a fixed jump impulse
//! and per-frame gravity. Health is guarded by an invulnerability window.

use glam::Vec2;

use super::anim::{AnimationState, FrameTimer};
use super::collision::Rect;
use super::input::{Direction, InputSnapshot};
use crate::config::{PlayerConfig, PlayfieldConfig};

/// Collision box offset inside the sprite, as fractions of its size
const HIT_BOX_OFFSET: Vec2 = Vec2::new(0.3, 0.1);
/// Collision box extent, as fractions of the sprite size
const HIT_BOX_SIZE: Vec2 = Vec2::new(0.3, 0.6);

#[derive(Debug, Clone)]
pub struct PlayerCharacter {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// On-screen sprite size
    pub size: Vec2,
    /// Horizontal speed (pixels per frame)
    pub speed: f32,
    /// Vertical velocity (pixels per frame, negative is up)
    pub vy: f32,
    pub health: u8,
    pub max_health: u8,
    pub invulnerable: bool,
    /// Milliseconds spent in the current invulnerability window
    pub invulnerability_time: f32,
    pub collision_box: Rect,
    pub state: AnimationState,
    /// Sheet row selected by the animation state
    pub frame_row: u32,
    pub frames: FrameTimer,
    config: PlayerConfig,
    field_width: f32,
    ground_y: f32,
}

impl PlayerCharacter {
    pub fn new(config: &PlayerConfig, field: &PlayfieldConfig) -> Self {
        let size = Vec2::new(config.width(), config.height());
        let ground_y = field.height - size.y - field.ground_offset;
        let pos = Vec2::new(config.start_x, ground_y);
        let state = AnimationState::default();
        Self {
            pos,
            size,
            speed: 0.0,
            vy: 0.0,
            health: config.max_health,
            max_health: config.max_health,
            invulnerable: false,
            invulnerability_time: 0.0,
            collision_box: Self::hit_box_at(pos, size),
            state,
            frame_row: state.sprite_row(),
            frames: FrameTimer::new(config.fps, config.max_frame),
            config: config.clone(),
            field_width: field.width,
            ground_y,
        }
    }

    fn hit_box_at(pos: Vec2, size: Vec2) -> Rect {
        Rect::new(pos.x, pos.y, size.x, size.y).inset(HIT_BOX_OFFSET, HIT_BOX_SIZE)
    }

    /// Y coordinate of the sprite's top edge when standing on the ground
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn on_ground(&self) -> bool {
        self.pos.y >= self.ground_y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Enter a state and select its sprite row
    pub fn set_state(&mut self, state: AnimationState) {
        self.state = state;
        self.frame_row = state.sprite_row();
    }

    pub fn update(&mut self, input: &InputSnapshot, delta_ms: f32) {
        let cfg = &self.config;

        // Horizontal: accelerate while held, otherwise decay toward zero
        if input.is_held(Direction::Right) {
            self.speed = (self.speed + cfg.acceleration).min(cfg.max_speed);
        } else if input.is_held(Direction::Left) {
            self.speed = (self.speed - cfg.acceleration).max(-cfg.max_speed);
        } else if self.speed > 0.0 {
            self.speed = (self.speed - cfg.acceleration).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + cfg.acceleration).min(0.0);
        }
        self.pos.x += self.speed;

        // Vertical: jump from the ground, gravity while airborne
        if input.is_held(Direction::Up) && self.on_ground() {
            self.vy = cfg.jump_velocity;
        }
        self.pos.y += self.vy;
        if self.on_ground() {
            self.vy = 0.0;
            self.pos.y = self.ground_y;
        } else {
            self.vy += cfg.weight;
        }

        let next = self.state.handle_input(input);
        if next != self.state {
            self.set_state(next);
        }
        self.frames.advance(delta_ms);

        self.pos.x = self.pos.x.clamp(0.0, self.field_width - self.size.x);
        self.collision_box = Self::hit_box_at(self.pos, self.size);

        if self.invulnerable {
            self.invulnerability_time += delta_ms;
            if self.invulnerability_time >= self.config.invulnerability_ms {
                self.invulnerable = false;
                self.invulnerability_time = 0.0;
            }
        }
    }

    /// Apply one point of damage unless invulnerable
    ///
    /// Returns whether health changed. This is the only gate against
    /// multiple hits inside one invulnerability window.
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerability_time = 0.0;
        log::debug!("Player hit, health {}/{}", self.health, self.max_health);
        true
    }

    /// Sprite alpha: dimmed on alternating flash periods while invulnerable
    pub fn draw_alpha(&self) -> f32 {
        let period = (self.invulnerability_time / self.config.flash_ms).floor() as u32;
        if self.invulnerable && period % 2 == 0 {
            0.5
        } else {
            1.0
        }
    }

    /// Back to full health at the start position
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.invulnerable = false;
        self.invulnerability_time = 0.0;
        self.pos = Vec2::new(self.config.start_x, self.ground_y);
        self.speed = 0.0;
        self.vy = 0.0;
        self.set_state(AnimationState::default());
        self.frames.reset();
        self.collision_box = Self::hit_box_at(self.pos, self.size);
    }
}
