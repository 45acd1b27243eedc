//! Game session state and core simulation types
//!
//! Everything one run of the game owns lives here. `tick` advances it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::{ParallaxLayer, default_layers};
use super::collision::Rect;
use super::entities::{Collectible, Drifter, Projectile};
use super::game_over::GameOverAnimation;
use super::player::PlayerCharacter;
use super::pool::ProjectilePool;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only the game-over sequence animates
    GameOver,
}

/// Timing for one frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Callback timestamp (milliseconds)
    pub now_ms: f64,
    /// Time since the previous callback (milliseconds)
    pub delta_ms: f32,
}

impl FrameTime {
    pub fn new(now_ms: f64, delta_ms: f32) -> Self {
        Self { now_ms, delta_ms }
    }
}

/// A life icon fading out after the life was lost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeAnimation {
    /// Index of the lost life in the HUD row
    pub index: u8,
    pub start_time: f64,
}

/// The clickable "try again" button shown during game over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartButton {
    pub rect: Rect,
    pub hovered: bool,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub seed: u64,
    pub phase: GamePhase,
    pub player: PlayerCharacter,
    pub projectiles: Vec<Projectile>,
    pub drifters: Vec<Drifter>,
    pub collectibles: Vec<Collectible>,
    pub pool: ProjectilePool,
    pub layers: Vec<ParallaxLayer>,
    /// Milliseconds accumulated toward the next collectible
    pub time_to_next_collectible: f32,
    /// Frames until the next drifter may spawn
    pub drifter_cooldown: u32,
    /// Timestamp of the first frame of this run
    pub start_time: Option<f64>,
    /// Timestamp of the latest frame
    pub current_time: f64,
    pub life_animations: Vec<LifeAnimation>,
    pub game_over: GameOverAnimation,
    pub restart_button: RestartButton,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a new session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let pf = &config.playfield;
        let player = PlayerCharacter::new(&config.player, pf);
        let layers = default_layers(pf.width, pf.height, pf.game_speed);
        let game_over = GameOverAnimation::new(pf.height, &config.game_over);
        let restart_button = RestartButton {
            rect: Rect::new(
                pf.width / 2.0 - config.game_over.button_width / 2.0,
                game_over.button_y,
                config.game_over.button_width,
                config.game_over.button_height,
            ),
            hovered: false,
        };
        log::info!("Session created with seed {}", seed);
        Self {
            seed,
            phase: GamePhase::Playing,
            player,
            projectiles: Vec::new(),
            drifters: Vec::new(),
            collectibles: Vec::new(),
            pool: ProjectilePool::new(),
            layers,
            time_to_next_collectible: 0.0,
            drifter_cooldown: 0,
            start_time: None,
            current_time: 0.0,
            life_animations: Vec::new(),
            game_over,
            restart_button,
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Playfield as a rectangle anchored at the origin
    pub fn field(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.config.playfield.width,
            self.config.playfield.height,
        )
    }

    /// Milliseconds since the first frame of this run
    pub fn elapsed_ms(&self) -> f64 {
        self.start_time
            .map_or(0.0, |start| (self.current_time - start).max(0.0))
    }

    /// Where new shots leave from
    pub fn muzzle(&self) -> Vec2 {
        self.player.center()
    }

    /// Reset everything except the RNG stream and go back to playing
    pub fn restart(&mut self) {
        let pf = &self.config.playfield;
        self.phase = GamePhase::Playing;
        self.projectiles.clear();
        self.drifters.clear();
        self.collectibles.clear();
        self.pool.clear();
        self.time_to_next_collectible = 0.0;
        self.drifter_cooldown = 0;
        self.life_animations.clear();
        self.start_time = None;
        self.current_time = 0.0;
        self.player.reset();
        self.layers = default_layers(pf.width, pf.height, pf.game_speed);
        self.game_over = GameOverAnimation::new(pf.height, &self.config.game_over);
        self.restart_button.rect.y = self.game_over.button_y;
        self.restart_button.hovered = false;
        log::info!("Game restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.health, 3);
        assert_eq!(session.layers.len(), 4);
        assert!(session.projectiles.is_empty());
        assert_eq!(session.restart_button.rect.x, 1280.0 / 2.0 - 295.5);
        assert_eq!(session.elapsed_ms(), 0.0);
    }
}
