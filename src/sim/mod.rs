//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven updates with an explicit delta
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod anim;
pub mod background;
pub mod collision;
pub mod entities;
pub mod game_over;
pub mod input;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use anim::{AnimationState, FrameTimer};
pub use background::{LayerKind, ParallaxLayer, default_layers};
pub use collision::{Circle, Rect, circles_overlap, rects_overlap};
pub use entities::{Collectible, Drifter, Projectile};
pub use game_over::{GameOverAnimation, ease_out_cubic};
pub use input::{Direction, InputSnapshot};
pub use player::PlayerCharacter;
pub use pool::ProjectilePool;
pub use state::{FrameTime, GamePhase, GameSession, LifeAnimation, RestartButton};
pub use tick::{ClickAction, handle_click, tick};
