//! Parallax Shooter - A side-scrolling 2D shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player, entities, collisions, game state)
//! - `renderer`: Draw-call abstraction and scene composition
//! - `platform`: Frame clock and browser key normalization
//! - `config`: Data-driven game tuning

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Logical playfield width (the canvas is scaled to fit)
    pub const BASE_WIDTH: f32 = 1280.0;
    /// Logical playfield height
    pub const BASE_HEIGHT: f32 = 720.0;

    /// Frame delta used for the very first frame (no previous timestamp)
    pub const FIRST_FRAME_DELTA_MS: f32 = 1000.0 / 60.0;
    /// Upper bound on a single frame delta (tab backgrounded, debugger pause)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Number of lives the player starts with
    pub const START_HEALTH: u8 = 3;
}
