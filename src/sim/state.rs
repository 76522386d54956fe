//! Game state and core simulation types
//!
//! One `GameState` exists per running session and owns every live entity.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Body, Entity, Surface};
use super::vector::Direction;
use crate::consts::*;
use crate::settings::Settings;

/// Fill colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Red,
    Yellow,
    Green,
    Purple,
    Pink,
}

impl Color {
    /// CSS color keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Pink => "pink",
        }
    }
}

/// Colors an enemy may spawn with
pub const ENEMY_PALETTE: [Color; 4] = [Color::Yellow, Color::Green, Color::Purple, Color::Pink];

/// The player's circle at the center of the surface
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub score: u32,
    /// Tracked for the HUD; firing does not consume it
    pub ammo: u32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, radius),
            score: 0,
            ammo: PLAYER_START_AMMO,
        }
    }

    /// Award points for a projectile hit
    pub fn register_hit(&mut self) {
        self.score = self.score.saturating_add(SCORE_PER_HIT);
    }

    /// Whether an enemy has reached the player
    pub fn is_hit_by(&self, enemy: &Enemy) -> bool {
        self.overlaps(enemy)
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        Color::Blue
    }
}

/// A shot travelling in a straight line from the player
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub direction: Direction,
    /// Units per tick
    pub speed: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, radius: f32, direction: Direction, speed: f32) -> Self {
        Self {
            body: Body::new(pos, radius),
            direction,
            speed,
        }
    }

    /// Move one tick along the fixed direction
    pub fn advance(&mut self) {
        self.body.pos += self.direction.as_vec2() * self.speed;
    }

    pub fn is_out_of_bounds(&self, surface: &Surface) -> bool {
        self.body.is_out_of_bounds(surface)
    }

    pub fn collides_with(&self, enemy: &Enemy) -> bool {
        self.overlaps(enemy)
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        Color::Red
    }
}

/// An incoming circle aimed at where the player stood when it spawned
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub direction: Direction,
    /// Units per tick
    pub speed: f32,
    pub color: Color,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f32, direction: Direction, speed: f32, color: Color) -> Self {
        Self {
            body: Body::new(pos, radius),
            direction,
            speed,
            color,
        }
    }

    /// Move one tick along the spawn-time heading
    pub fn advance(&mut self) {
        self.body.pos += self.direction.as_vec2() * self.speed;
    }

    /// Shrink after a projectile hit; returns true when the enemy is destroyed
    pub fn register_hit(&mut self) -> bool {
        self.body.radius -= ENEMY_HIT_SHRINK;
        self.body.radius <= ENEMY_DESTROY_RADIUS
    }

    pub fn is_out_of_bounds(&self, surface: &Surface) -> bool {
        self.body.is_out_of_bounds(surface)
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Notable things that happened during a tick or fire action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    EnemySpawned,
    /// Player earned a point; `score` is the new total
    Scored { score: u32 },
    /// Enemy survived the hit with this radius
    EnemyHit { remaining_radius: f32 },
    EnemyDestroyed,
    PlayerHit,
}

/// Everything owned by one running session
#[derive(Debug, Clone)]
pub struct GameState {
    pub surface: Surface,
    pub settings: Settings,
    pub player: Player,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    /// Live enemies, oldest first
    pub enemies: Vec<Enemy>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh state with the player at the surface center
    pub fn new(surface: Surface, settings: Settings, seed: u64) -> Self {
        let player = Player::new(surface.center(), settings.player_radius);
        Self {
            surface,
            settings,
            player,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
