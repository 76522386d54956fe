//! Shared circle geometry for every live entity
//!
//! Player, projectiles and enemies are all filled circles: a center, a radius
//! and a color. Collision between any two of them is a plain distance test.

use glam::Vec2;

use super::state::Color;

/// Simulation bounds, matching the rendering surface's pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Position and radius of a circular entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// True once the center has left the surface on any side
    pub fn is_out_of_bounds(&self, surface: &Surface) -> bool {
        self.pos.x > surface.width
            || self.pos.y > surface.height
            || self.pos.x < 0.0
            || self.pos.y < 0.0
    }
}

/// Circles overlap when their centers are no further apart than the sum of
/// their radii. Touching counts.
#[inline]
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Capabilities shared by player, projectiles and enemies
pub trait Entity {
    fn body(&self) -> &Body;

    fn color(&self) -> Color;

    #[inline]
    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn overlaps(&self, other: &impl Entity) -> bool
    where
        Self: Sized,
    {
        circles_overlap(self.body(), other.body())
    }
}
