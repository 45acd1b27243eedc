//! Projectiles, drifting hazards and collectible hearts
//!
//! Every entity keeps its collision circle centred on its visual centre and
//! stops simulating once flagged for deletion.

use glam::Vec2;
use rand::Rng;

use super::anim::FrameTimer;
use super::collision::{Circle, Rect};
use crate::config::{CollectibleConfig, DrifterConfig, PlayfieldConfig, ProjectileConfig};

/// Circle radius as a fraction of the smaller sprite dimension
pub const CIRCLE_RADIUS_FACTOR: f32 = 0.45;

/// Unit vector from `origin` toward `target`, or zero if they coincide
#[inline]
pub fn aim_direction(origin: Vec2, target: Vec2) -> Vec2 {
    (target - origin).normalize_or_zero()
}

/// A player shot. Travels in a straight line; never homes.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction fixed at aim time
    pub dir: Vec2,
    /// Draw rotation (radians)
    pub angle: f32,
    pub speed: f32,
    pub size: Vec2,
    pub circle: Circle,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(origin: Vec2, target: Vec2, config: &ProjectileConfig) -> Self {
        let mut projectile = Self {
            pos: origin,
            dir: Vec2::ZERO,
            angle: 0.0,
            speed: config.speed,
            size: Vec2::new(config.width, config.height),
            circle: Circle::new(origin, config.radius),
            marked_for_deletion: false,
        };
        projectile.aim(origin, target);
        projectile
    }

    /// Reset position, aim and deletion state in place
    pub fn aim(&mut self, origin: Vec2, target: Vec2) {
        let delta = target - origin;
        self.pos = origin;
        self.circle.center = origin;
        self.dir = aim_direction(origin, target);
        self.angle = delta.y.atan2(delta.x);
        self.marked_for_deletion = false;
    }

    pub fn update(&mut self, field: &Rect) {
        if self.marked_for_deletion {
            return;
        }
        self.pos += self.dir * self.speed;
        self.circle.center = self.pos;

        let off_left = self.pos.x < field.x - self.size.x;
        let off_right = self.pos.x > field.right() + self.size.x;
        let off_top = self.pos.y < field.y - self.size.y;
        let off_bottom = self.pos.y > field.bottom() + self.size.y;
        if off_left || off_right || off_top || off_bottom {
            self.marked_for_deletion = true;
        }
    }
}

/// A spinning hazard that drifts left and bounces between top and bottom
#[derive(Debug, Clone, PartialEq)]
pub struct Drifter {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: Vec2,
    /// +1 moving down, -1 moving up
    pub vertical_sign: f32,
    /// Draw rotation (radians)
    pub angle: f32,
    pub spin_speed: f32,
    /// Which of the interchangeable sprites to draw
    pub variant: u8,
    pub circle: Circle,
    pub marked_for_deletion: bool,
}

impl Drifter {
    /// Spawn at the right edge with a random height, heading and sprite
    pub fn spawn<R: Rng>(rng: &mut R, config: &DrifterConfig, field: &PlayfieldConfig) -> Self {
        let size = Vec2::new(config.width, config.height);
        let y = rng.random::<f32>() * (field.height - size.y);
        let vertical_sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let variant = rng.random_range(0..config.variants.max(1));
        Self::new(Vec2::new(field.width, y), vertical_sign, angle, variant, config)
    }

    pub fn new(pos: Vec2, vertical_sign: f32, angle: f32, variant: u8, config: &DrifterConfig) -> Self {
        let size = Vec2::new(config.width, config.height);
        Self {
            pos,
            size,
            speed: Vec2::new(config.speed_x, config.speed_y),
            vertical_sign,
            angle,
            spin_speed: config.spin_speed,
            variant,
            circle: Circle::new(pos + size / 2.0, size.min_element() * CIRCLE_RADIUS_FACTOR),
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self, field_height: f32) {
        if self.marked_for_deletion {
            return;
        }
        self.pos.x -= self.speed.x;
        self.pos.y += self.vertical_sign * self.speed.y;
        self.angle += self.spin_speed;

        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vertical_sign = 1.0;
        } else if self.pos.y + self.size.y >= field_height {
            self.pos.y = field_height - self.size.y;
            self.vertical_sign = -1.0;
        }
        self.circle.center = self.pos + self.size / 2.0;

        if self.pos.x < -self.size.x {
            self.marked_for_deletion = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// The player is hurt by the whole sprite box
    pub fn hit_box(&self) -> Rect {
        self.bounds()
    }
}

/// An animated heart drifting in from the right
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    /// Top-left corner
    pub pos: Vec2,
    /// Unscaled sheet frame size
    pub sprite_size: Vec2,
    pub scale: f32,
    /// Per-frame drift; x is subtracted (leftward)
    pub drift: Vec2,
    pub frames: FrameTimer,
    pub circle: Circle,
    pub marked_for_deletion: bool,
}

impl Collectible {
    /// Spawn at the right edge with random size, height and drift
    pub fn spawn<R: Rng>(rng: &mut R, config: &CollectibleConfig, field: &PlayfieldConfig) -> Self {
        let scale = config.scale_min + rng.random::<f32>() * (config.scale_max - config.scale_min);
        let height = config.sprite_height * scale;
        let y = rng.random::<f32>() * (field.height - height);
        let drift = Vec2::new(
            config.drift_x_min + rng.random::<f32>() * (config.drift_x_max - config.drift_x_min),
            (rng.random::<f32>() * 2.0 - 1.0) * config.drift_y_max,
        );
        Self::new(Vec2::new(field.width, y), scale, drift, config)
    }

    pub fn new(pos: Vec2, scale: f32, drift: Vec2, config: &CollectibleConfig) -> Self {
        let sprite_size = Vec2::new(config.sprite_width, config.sprite_height);
        let size = sprite_size * scale;
        Self {
            pos,
            sprite_size,
            scale,
            drift,
            frames: FrameTimer::new(config.fps, config.max_frame),
            circle: Circle::new(pos + size / 2.0, size.min_element() * CIRCLE_RADIUS_FACTOR),
            marked_for_deletion: false,
        }
    }

    /// On-screen size
    pub fn size(&self) -> Vec2 {
        self.sprite_size * self.scale
    }

    pub fn update(&mut self, delta_ms: f32, field_height: f32) {
        if self.marked_for_deletion {
            return;
        }
        let size = self.size();
        self.pos.x -= self.drift.x;
        self.pos.y += self.drift.y;
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.drift.y = self.drift.y.abs();
        } else if self.pos.y + size.y >= field_height {
            self.pos.y = field_height - size.y;
            self.drift.y = -self.drift.y.abs();
        }
        self.circle.center = self.pos + size / 2.0;

        if self.pos.x < -size.x {
            self.marked_for_deletion = true;
        }
        self.frames.advance(delta_ms);
    }

    pub fn bounds(&self) -> Rect {
        let size = self.size();
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    /// Inner 60% of the sprite, so transparent corners don't hurt
    pub fn hit_box(&self) -> Rect {
        self.bounds().inset(Vec2::splat(0.2), Vec2::splat(0.6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 720.0)
    }

    #[test]
    fn test_projectile_zero_length_aim() {
        let origin = Vec2::new(100.0, 100.0);
        let p = Projectile::new(origin, origin, &ProjectileConfig::default());
        assert_eq!(p.dir, Vec2::ZERO);
        assert!(p.dir.x.is_finite() && p.dir.y.is_finite());
    }

    #[test]
    fn test_projectile_moves_along_fixed_direction() {
        let mut p = Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 200.0),
            &ProjectileConfig::default(),
        );
        assert!((p.dir - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((p.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        p.update(&field());
        p.update(&field());
        assert!((p.pos - Vec2::new(100.0, 110.0)).length() < 1e-4);
        assert_eq!(p.circle.center, p.pos);
    }

    #[test]
    fn test_projectile_deleted_past_left_edge() {
        let mut p = Projectile::new(
            Vec2::new(-18.0, 100.0),
            Vec2::new(-1000.0, 100.0),
            &ProjectileConfig::default(),
        );
        assert!(!p.marked_for_deletion);
        p.update(&field());
        assert!(p.marked_for_deletion);

        // Flagged projectiles stop moving
        let frozen = p.pos;
        p.update(&field());
        assert_eq!(p.pos, frozen);
    }

    #[test]
    fn test_drifter_bounces_between_bounds() {
        let config = DrifterConfig::default();
        let mut d = Drifter::new(Vec2::new(600.0, 0.2), -1.0, 0.0, 0, &config);
        d.update(720.0);
        assert_eq!(d.pos.y, 0.0);
        assert_eq!(d.vertical_sign, 1.0);

        let mut d = Drifter::new(Vec2::new(600.0, 639.8), 1.0, 0.0, 0, &config);
        d.update(720.0);
        assert_eq!(d.pos.y, 640.0);
        assert_eq!(d.vertical_sign, -1.0);
        assert_eq!(d.circle.center, d.pos + Vec2::splat(40.0));
    }

    #[test]
    fn test_drifter_spins_and_leaves() {
        let config = DrifterConfig::default();
        let mut d = Drifter::new(Vec2::new(-79.5, 300.0), 1.0, 1.0, 2, &config);
        d.update(720.0);
        assert!(d.angle > 1.0);
        assert!(d.marked_for_deletion);
        assert!((d.circle.radius - 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_drifter_spawn_within_field() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = DrifterConfig::default();
        let field = PlayfieldConfig::default();
        for _ in 0..200 {
            let d = Drifter::spawn(&mut rng, &config, &field);
            assert_eq!(d.pos.x, field.width);
            assert!(d.pos.y >= 0.0 && d.pos.y + d.size.y <= field.height);
            assert!(d.variant < config.variants);
        }
    }

    #[test]
    fn test_collectible_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let config = CollectibleConfig::default();
        let field = PlayfieldConfig::default();
        for _ in 0..200 {
            let c = Collectible::spawn(&mut rng, &config, &field);
            assert!(c.scale >= 0.4 && c.scale < 1.0);
            assert!(c.drift.x >= 3.0 && c.drift.x < 3.7);
            assert!(c.drift.y.abs() <= 2.5);
            assert!(c.pos.y + c.size().y <= field.height);
            let expected_radius = c.size().min_element() * CIRCLE_RADIUS_FACTOR;
            assert!((c.circle.radius - expected_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_collectible_animates_independently_of_motion() {
        let config = CollectibleConfig::default();
        let mut c = Collectible::new(Vec2::new(600.0, 300.0), 1.0, Vec2::new(3.0, 0.0), &config);
        // 200 ms interval: step only after the timer exceeds it
        for _ in 0..13 {
            c.update(16.0, 720.0);
        }
        assert_eq!(c.frames.frame, 0);
        c.update(16.0, 720.0);
        assert_eq!(c.frames.frame, 1);
        assert!((c.pos.x - (600.0 - 14.0 * 3.0)).abs() < 1e-3);
    }

    #[test]
    fn test_collectible_hit_box_is_inset() {
        let config = CollectibleConfig::default();
        let c = Collectible::new(Vec2::new(100.0, 100.0), 1.0, Vec2::ZERO, &config);
        let hit = c.hit_box();
        assert!((hit.x - 118.0).abs() < 1e-4);
        assert!((hit.y - 116.0).abs() < 1e-4);
        assert!((hit.width - 54.0).abs() < 1e-4);
        assert!((hit.height - 48.0).abs() < 1e-4);
    }
}
