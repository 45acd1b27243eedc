//! Game tuning and configuration
//!
//! Every gameplay constant lives here with its default value. A page can ship
//! a partial JSON override; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BASE_HEIGHT, BASE_WIDTH, MAX_FRAME_DELTA_MS, START_HEALTH};

/// Errors produced while loading a config override
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Playfield and background scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
    /// Distance between the ground line and the bottom of the playfield
    pub ground_offset: f32,
    /// Base scroll speed of the parallax layers (pixels per frame)
    pub game_speed: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            ground_offset: 50.0,
            game_speed: 4.0,
        }
    }
}

/// Player movement, health and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Width of one frame in the player sheet
    pub sprite_width: f32,
    /// Height of one frame in the player sheet
    pub sprite_height: f32,
    /// On-screen scale applied to the sheet frame
    pub scale: f32,
    pub start_x: f32,
    /// Pixels per frame
    pub max_speed: f32,
    /// Speed change per frame, used for both acceleration and deceleration
    pub acceleration: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Gravity added to vertical velocity per airborne frame
    pub weight: f32,
    pub max_health: u8,
    pub invulnerability_ms: f32,
    /// Flash period while invulnerable
    pub flash_ms: f32,
    pub fps: f32,
    /// Last frame column in the sheet
    pub max_frame: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite_width: 120.0,
            sprite_height: 116.0,
            scale: 1.0,
            start_x: 600.0,
            max_speed: 6.0,
            acceleration: 0.5,
            jump_velocity: -25.0,
            weight: 1.0,
            max_health: START_HEALTH,
            invulnerability_ms: 2000.0,
            flash_ms: 100.0,
            fps: 10.0,
            max_frame: 4,
        }
    }
}

impl PlayerConfig {
    pub fn width(&self) -> f32 {
        self.sprite_width * self.scale
    }

    pub fn height(&self) -> f32 {
        self.sprite_height * self.scale
    }
}

/// Player projectiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per frame
    pub speed: f32,
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 14.0,
            speed: 5.0,
            radius: 7.0,
        }
    }
}

/// Spinning hazards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrifterConfig {
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Radians per frame
    pub spin_speed: f32,
    pub max_active: usize,
    /// Spawn cooldown window, in frames
    pub cooldown_min: u32,
    pub cooldown_max: u32,
    /// Number of interchangeable sprite variants
    pub variants: u8,
}

impl Default for DrifterConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            speed_x: 1.0,
            speed_y: 0.5,
            spin_speed: 0.003,
            max_active: 5,
            cooldown_min: 100,
            cooldown_max: 600,
            variants: 4,
        }
    }
}

/// Hearts drifting across the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub drift_x_min: f32,
    pub drift_x_max: f32,
    /// Vertical drift is drawn from [-drift_y_max, drift_y_max)
    pub drift_y_max: f32,
    pub fps: f32,
    pub max_frame: u32,
    pub spawn_interval_ms: f32,
    pub max_active: usize,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            sprite_width: 90.0,
            sprite_height: 80.0,
            scale_min: 0.4,
            scale_max: 1.0,
            drift_x_min: 3.0,
            drift_x_max: 3.7,
            drift_y_max: 2.5,
            fps: 5.0,
            max_frame: 5,
            spawn_interval_ms: 900.0,
            max_active: 10,
        }
    }
}

/// Lives display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub life_size: f32,
    pub life_spacing: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub life_animation_ms: f32,
    pub blink_ms: f32,
    /// Alpha of a lost life icon
    pub empty_alpha: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            life_size: 40.0,
            life_spacing: 45.0,
            origin_x: 20.0,
            origin_y: 20.0,
            life_animation_ms: 1000.0,
            blink_ms: 50.0,
            empty_alpha: 0.3,
        }
    }
}

/// Scripted game-over sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOverConfig {
    pub panel_width: f32,
    pub panel_height: f32,
    pub button_width: f32,
    pub button_height: f32,
    /// Vertical gap between the panel and the restart button
    pub gap: f32,
    pub drop_ms: f32,
    pub bounce_ms: f32,
    pub bounce_height: f32,
    pub max_darkness: f32,
    /// Time for the overlay to go from clear to fully dark (before capping)
    pub darken_ms: f32,
}

impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            panel_width: 1000.0,
            panel_height: 252.0,
            button_width: 591.0,
            button_height: 151.0,
            gap: 50.0,
            drop_ms: 1500.0,
            bounce_ms: 300.0,
            bounce_height: 30.0,
            max_darkness: 0.6,
            darken_ms: 1000.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub drifter: DrifterConfig,
    pub collectible: CollectibleConfig,
    pub hud: HudConfig,
    pub game_over: GameOverConfig,
    /// Frame deltas above this are clamped
    pub max_frame_delta_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            drifter: DrifterConfig::default(),
            collectible: CollectibleConfig::default(),
            hud: HudConfig::default(),
            game_over: GameOverConfig::default(),
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pf = &self.playfield;
        if pf.width <= 0.0 || pf.height <= 0.0 {
            return Err(ConfigError::invalid(
                "playfield",
                format!("size must be positive, got {}x{}", pf.width, pf.height),
            ));
        }
        if self.player.width() > pf.width || self.player.height() + pf.ground_offset > pf.height {
            return Err(ConfigError::invalid(
                "player",
                "sprite does not fit inside the playfield",
            ));
        }
        if self.player.max_health == 0 {
            return Err(ConfigError::invalid("player.max_health", "must be at least 1"));
        }
        if self.player.fps <= 0.0 || self.collectible.fps <= 0.0 {
            return Err(ConfigError::invalid("fps", "frame rates must be positive"));
        }
        if self.drifter.cooldown_min > self.drifter.cooldown_max {
            return Err(ConfigError::invalid(
                "drifter.cooldown_min",
                format!(
                    "{} exceeds cooldown_max {}",
                    self.drifter.cooldown_min, self.drifter.cooldown_max
                ),
            ));
        }
        if self.drifter.variants == 0 {
            return Err(ConfigError::invalid("drifter.variants", "must be at least 1"));
        }
        if self.drifter.height >= pf.height {
            return Err(ConfigError::invalid(
                "drifter.height",
                "must be smaller than the playfield",
            ));
        }
        let c = &self.collectible;
        if c.scale_min <= 0.0 || c.scale_min > c.scale_max {
            return Err(ConfigError::invalid(
                "collectible.scale_min",
                format!("range [{}, {}) is empty or non-positive", c.scale_min, c.scale_max),
            ));
        }
        if c.drift_x_min > c.drift_x_max {
            return Err(ConfigError::invalid(
                "collectible.drift_x_min",
                format!("{} exceeds drift_x_max {}", c.drift_x_min, c.drift_x_max),
            ));
        }
        if c.drift_y_max < 0.0 {
            return Err(ConfigError::invalid("collectible.drift_y_max", "must not be negative"));
        }
        if self.max_frame_delta_ms <= 0.0 {
            return Err(ConfigError::invalid("max_frame_delta_ms", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{ "drifter": { "max_active": 2 }, "max_frame_delta_ms": 50 }"#)
                .unwrap();
        assert_eq!(config.drifter.max_active, 2);
        assert_eq!(config.drifter.cooldown_max, 600);
        assert_eq!(config.collectible.max_active, 10);
        assert_eq!(config.max_frame_delta_ms, 50.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_inverted_cooldown_rejected() {
        let err =
            GameConfig::from_json(r#"{ "drifter": { "cooldown_min": 700, "cooldown_max": 10 } }"#)
                .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "drifter.cooldown_min"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_health_rejected() {
        let err = GameConfig::from_json(r#"{ "player": { "max_health": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player.max_health", .. }));
    }
}
