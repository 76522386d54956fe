//! Unit direction vectors
//!
//! Projectiles and enemies travel along a direction fixed at creation time.
//! A `Direction` can only be built by normalizing a non-zero, finite vector,
//! so a NaN heading can never reach an entity.

use glam::Vec2;

/// A 2D vector of magnitude 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    x: f32,
    y: f32,
}

impl Direction {
    /// Normalize `(x, y)`; `None` for zero-length or non-finite input
    pub fn normalize(x: f32, y: f32) -> Option<Self> {
        let magnitude = (x * x + y * y).sqrt();
        if !magnitude.is_finite() || magnitude == 0.0 {
            return None;
        }
        Some(Self {
            x: x / magnitude,
            y: y / magnitude,
        })
    }

    /// Direction pointing from `from` toward `to`
    pub fn between(from: Vec2, to: Vec2) -> Option<Self> {
        let delta = to - from;
        Self::normalize(delta.x, delta.y)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
