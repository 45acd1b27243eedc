//! Projectile reuse pool
//!
//! A free list of retired projectiles. Instances move in and out by value, so
//! a pooled projectile can never also sit in the active collection.

use glam::Vec2;

use super::entities::Projectile;
use crate::config::ProjectileConfig;

#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    free: Vec<Projectile>,
    /// Total instances ever constructed by this pool
    created: usize,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a pooled projectile re-aimed at `target`, or build a new one
    pub fn acquire(&mut self, origin: Vec2, target: Vec2, config: &ProjectileConfig) -> Projectile {
        match self.free.pop() {
            Some(mut projectile) => {
                projectile.aim(origin, target);
                projectile
            }
            None => {
                self.created += 1;
                Projectile::new(origin, target, config)
            }
        }
    }

    /// Return a retired projectile for reuse
    pub fn release(&mut self, projectile: Projectile) {
        self.free.push(projectile);
    }

    /// Instances waiting for reuse
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}
