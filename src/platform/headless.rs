//! In-memory collaborators for running without a browser

use glam::Vec2;

use super::{Renderer, ScoreBoard, Surface};
use crate::sim::Color;

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Records the most recent frame instead of drawing it
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    surface: Surface,
    /// Circles drawn since the last clear
    pub frame: Vec<DrawnCircle>,
    /// Number of clears (one per rendered frame)
    pub frames_rendered: u64,
}

impl HeadlessRenderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            frame: Vec::new(),
            frames_rendered: 0,
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn surface(&self) -> Surface {
        self.surface
    }

    fn clear(&mut self) {
        self.frame.clear();
        self.frames_rendered += 1;
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.frame.push(DrawnCircle {
            center,
            radius,
            color,
        });
    }
}

/// Score board that logs each update and keeps every text it was shown
#[derive(Debug, Clone, Default)]
pub struct LogScoreBoard {
    /// Oldest first
    pub history: Vec<String>,
}

impl LogScoreBoard {
    /// Text currently on the board
    pub fn text(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("")
    }
}

impl ScoreBoard for LogScoreBoard {
    fn show(&mut self, text: &str) {
        log::debug!("{}", text);
        self.history.push(text.to_string());
    }
}
