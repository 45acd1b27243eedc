//! Per-frame input snapshot
//!
//! Event callbacks mutate the snapshot between frames; the session reads it
//! once per update.

use glam::Vec2;

/// Canonical movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a browser `KeyboardEvent.key` to a direction (arrows and WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Held directions, one-shot fire trigger and pointer position
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: [bool; 4],
    fire: bool,
    /// Pointer in playfield-logical coordinates
    pointer: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.held[direction.index()] = true;
    }

    pub fn release(&mut self, direction: Direction) {
        self.held[direction.index()] = false;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Currently held directions in canonical order
    pub fn held(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_held(*d))
    }

    /// Arm the one-shot fire trigger
    pub fn request_fire(&mut self) {
        self.fire = true;
    }

    pub fn fire_requested(&self) -> bool {
        self.fire
    }

    /// Return the fire trigger and clear it
    pub fn consume_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire)
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Drop all held keys and pending triggers (pointer is kept)
    pub fn clear(&mut self) {
        self.held = [false; 4];
        self.fire = false;
    }
}
