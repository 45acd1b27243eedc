//! Parallax background layers

/// Which backdrop a layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Sky,
    Cloud,
    Mountain,
    Ground,
}

/// One horizontally wrapping background strip
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    pub kind: LayerKind,
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Fraction of the game speed this layer scrolls at
    pub speed_modifier: f32,
    /// Scroll distance of the last update
    pub speed: f32,
}

impl ParallaxLayer {
    pub fn new(kind: LayerKind, speed_modifier: f32, width: f32, height: f32, game_speed: f32) -> Self {
        Self {
            kind,
            x: 0.0,
            width,
            height,
            speed_modifier,
            speed: game_speed * speed_modifier,
        }
    }

    pub fn update(&mut self, game_speed: f32) {
        self.speed = game_speed * self.speed_modifier;
        if self.x <= -self.width {
            self.x = 0.0;
        }
        self.x -= self.speed;
    }

    /// X positions of the two copies that tile the screen
    pub fn tile_positions(&self) -> [f32; 2] {
        [self.x, self.x + self.width - self.speed]
    }
}

/// Sky, clouds, mountains and ground, back to front
pub fn default_layers(width: f32, height: f32, game_speed: f32) -> Vec<ParallaxLayer> {
    [
        (LayerKind::Sky, 0.2),
        (LayerKind::Cloud, 0.4),
        (LayerKind::Mountain, 0.6),
        (LayerKind::Ground, 1.0),
    ]
    .into_iter()
    .map(|(kind, modifier)| ParallaxLayer::new(kind, modifier, width, height, game_speed))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_wraps() {
        let mut layer = ParallaxLayer::new(LayerKind::Ground, 1.0, 100.0, 50.0, 4.0);
        for _ in 0..25 {
            layer.update(4.0);
        }
        assert_eq!(layer.x, -100.0);
        layer.update(4.0);
        assert_eq!(layer.x, -4.0);
    }

    #[test]
    fn test_layers_scroll_at_different_speeds() {
        let mut layers = default_layers(1280.0, 720.0, 4.0);
        for layer in &mut layers {
            layer.update(4.0);
        }
        let xs: Vec<f32> = layers.iter().map(|l| l.x).collect();
        assert!((xs[0] + 0.8).abs() < 1e-6);
        assert_eq!(xs[3], -4.0);
        assert_eq!(layers[3].tile_positions(), [-4.0, 1272.0]);
    }
}
