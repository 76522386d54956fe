//! Platform abstraction layer
//!
//! The simulation talks to its host through three narrow collaborators:
//! - `Renderer`: clear the surface and draw filled circles
//! - `ScoreBoard`: show the score text
//! - `Timers`: repeating real-time intervals with synchronous cancel
//!
//! Browser implementations live in `web`; in-memory ones in `headless`.

pub mod headless;
pub mod input;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::Color;
pub use crate::sim::Surface;
pub use headless::{HeadlessRenderer, LogScoreBoard};
pub use input::client_to_world;
pub use time::{TimerId, VirtualTimers};

/// Drawing surface the session renders onto
pub trait Renderer {
    /// Current size in world units
    fn surface(&self) -> Surface;

    /// Erase the whole surface
    fn clear(&mut self);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Displays the running score
pub trait ScoreBoard {
    fn show(&mut self, text: &str);
}

/// Repeating interval timers
pub trait Timers {
    /// Start an interval firing every `interval_ms` until cleared
    fn set_interval(&mut self, interval_ms: u32) -> TimerId;

    /// Stop an interval; it must never fire again
    fn clear_interval(&mut self, id: TimerId);
}

/// Score board text for a score
pub fn score_text(score: u32) -> String {
    format!("score: {}", score)
}
