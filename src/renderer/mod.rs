//! Canvas rendering module
//!
//! The simulation never draws. Scene composition walks a `GameSession` and
//! issues draw calls against the `Canvas` trait; the browser binary backs it
//! with a 2D context, tests and headless runs record into a `DrawList`.

pub mod scene;

use glam::Vec2;

use crate::sim::{LayerKind, Rect};

pub use scene::{draw_scene, format_elapsed};

/// Image assets the scene can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Sky,
    Cloud,
    Mountain,
    Ground,
    /// Player sheet (rows are animation states, columns are frames)
    Player,
    Projectile,
    /// Collectible heart sheet (single row)
    Collectible,
    Life,
    GameOver,
    TryAgain,
    TryAgainHover,
    /// One of the interchangeable drifter images
    Drifter(u8),
}

impl Sprite {
    /// DOM id of the `<img>` element holding this asset
    pub fn element_id(self) -> String {
        match self {
            Sprite::Sky => "layer-sky".into(),
            Sprite::Cloud => "layer-cloud".into(),
            Sprite::Mountain => "layer-mountain".into(),
            Sprite::Ground => "layer-ground".into(),
            Sprite::Player => "player".into(),
            Sprite::Projectile => "projectile".into(),
            Sprite::Collectible => "heart".into(),
            Sprite::Life => "life".into(),
            Sprite::GameOver => "game-over".into(),
            Sprite::TryAgain => "try-again".into(),
            Sprite::TryAgainHover => "try-again-hover".into(),
            Sprite::Drifter(variant) => format!("drifter-{}", variant),
        }
    }
}

impl From<LayerKind> for Sprite {
    fn from(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Sky => Sprite::Sky,
            LayerKind::Cloud => Sprite::Cloud,
            LayerKind::Mountain => Sprite::Mountain,
            LayerKind::Ground => Sprite::Ground,
        }
    }
}

/// Text styling for HUD strings
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: String,
    /// CSS color
    pub color: String,
}

/// Minimal 2D draw surface
pub trait Canvas {
    fn clear(&mut self, width: f32, height: f32);

    /// Blit `sprite` (or its `src` sub-rect) into `dst`
    fn draw_image(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, alpha: f32);

    /// Blit `sprite` centred on `center`, rotated by `angle` radians
    fn draw_image_rotated(&mut self, sprite: Sprite, center: Vec2, angle: f32, size: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: [f32; 3], alpha: f32);

    /// Left-aligned text with its baseline at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Image {
        sprite: Sprite,
        src: Option<Rect>,
        dst: Rect,
        alpha: f32,
    },
    RotatedImage {
        sprite: Sprite,
        center: Vec2,
        angle: f32,
        size: Vec2,
    },
    FillRect {
        rect: Rect,
        color: [f32; 3],
        alpha: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Sprite referenced by this command, if any
    pub fn sprite(&self) -> Option<Sprite> {
        match self {
            DrawCommand::Image { sprite, .. } | DrawCommand::RotatedImage { sprite, .. } => {
                Some(*sprite)
            }
            _ => None,
        }
    }
}

/// A `Canvas` that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Index of the first command drawing `sprite`
    pub fn position_of(&self, sprite: Sprite) -> Option<usize> {
        self.commands.iter().position(|c| c.sprite() == Some(sprite))
    }

    /// Number of commands drawing `sprite`
    pub fn count_of(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|c| c.sprite() == Some(sprite))
            .count()
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_image(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, alpha: f32) {
        self.commands.push(DrawCommand::Image {
            sprite,
            src,
            dst,
            alpha,
        });
    }

    fn draw_image_rotated(&mut self, sprite: Sprite, center: Vec2, angle: f32, size: Vec2) {
        self.commands.push(DrawCommand::RotatedImage {
            sprite,
            center,
            angle,
            size,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: [f32; 3], alpha: f32) {
        self.commands.push(DrawCommand::FillRect { rect, color, alpha });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            style: style.clone(),
        });
    }
}
