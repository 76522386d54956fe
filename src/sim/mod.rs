//! Simulation module
//!
//! All gameplay logic lives here:
//! - Speeds are per fixed tick, never per display frame
//! - Randomness comes from the session's seeded RNG
//! - Entity collections keep insertion order (newest last)
//! - No rendering or platform dependencies

pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vector;

pub use entity::{Body, Entity, Surface, circles_overlap};
pub use spawn::{Edge, spawn_on_edge, spawn_random};
pub use state::{Color, Enemy, GameEvent, GameState, Player, Projectile, ENEMY_PALETTE};
pub use tick::{TickOutcome, fire, spawn_enemy, tick};
pub use vector::Direction;
