//! Session lifecycle and frame driver
//!
//! A `GameSession` owns the running `GameState` and the spawn timer handle.
//! Hosts call `frame` once per display refresh, `fire` on clicks and
//! `on_interval` whenever a timer fires. All three are no-ops while idle.

use glam::Vec2;

use crate::consts::*;
use crate::platform::{Renderer, ScoreBoard, TimerId, Timers, score_text};
use crate::settings::Settings;
use crate::sim::{self, Entity, GameEvent, GameState, Surface, TickOutcome};

/// Whether a play-through is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// The player was hit during this frame; the session is now idle
    GameOver,
    /// No session is running
    Idle,
}

/// Running totals for the current (or last) session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub shots_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
    pub final_score: u32,
}

/// One play-through from `start` to `end`
#[derive(Debug)]
pub struct GameSession {
    settings: Settings,
    phase: SessionPhase,
    state: Option<GameState>,
    spawn_timer: Option<TimerId>,
    accumulator: f32,
    stats: SessionStats,
}

impl GameSession {
    /// Invalid settings are replaced by the defaults
    pub fn new(settings: Settings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Rejecting settings ({}), using defaults", e);
                Settings::default()
            }
        };
        Self {
            settings,
            phase: SessionPhase::Idle,
            state: None,
            spawn_timer: None,
            accumulator: 0.0,
            stats: SessionStats::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Live state; `None` while idle
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Handle of the live spawn interval, if any
    pub fn spawn_timer(&self) -> Option<TimerId> {
        self.spawn_timer
    }

    /// Begin a new play-through, discarding any session in progress
    ///
    /// `host_seed` is used unless the settings pin a seed.
    pub fn start(
        &mut self,
        surface: Surface,
        host_seed: u64,
        timers: &mut impl Timers,
        score_board: &mut impl ScoreBoard,
    ) {
        if self.is_running() {
            self.end(timers);
        }

        let seed = self.settings.seed.unwrap_or(host_seed);
        self.state = Some(GameState::new(surface, self.settings.clone(), seed));
        self.spawn_timer = Some(timers.set_interval(self.settings.spawn_interval_ms));
        self.accumulator = 0.0;
        self.stats = SessionStats::default();
        self.phase = SessionPhase::Running;

        score_board.show(&score_text(0));
        log::info!(
            "Session started: {}x{} surface, seed {}",
            surface.width,
            surface.height,
            seed
        );
    }

    /// Stop the session: cancel the spawn timer and drop all entities
    ///
    /// Safe to call repeatedly.
    pub fn end(&mut self, timers: &mut impl Timers) {
        if let Some(id) = self.spawn_timer.take() {
            timers.clear_interval(id);
        }
        if let Some(state) = self.state.take() {
            self.stats.final_score = state.score();
            log::info!(
                "Session ended: score {}, {} ticks, {} enemies destroyed",
                state.score(),
                self.stats.ticks,
                self.stats.enemies_destroyed
            );
        }
        self.accumulator = 0.0;
        self.phase = SessionPhase::Idle;
    }

    /// Fire toward a click in world coordinates; false if nothing was fired
    pub fn fire(&mut self, target: Vec2) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let fired = sim::fire(state, target);
        self.absorb_events();
        fired
    }

    /// Timer callback; spawns an enemy when `id` is this session's spawn timer
    pub fn on_interval(&mut self, id: TimerId) -> bool {
        if self.spawn_timer != Some(id) {
            log::debug!("Ignoring stale timer {:?}", id);
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let spawned = sim::spawn_enemy(state);
        self.absorb_events();
        spawned
    }

    /// Run exactly one simulation tick
    pub fn step(
        &mut self,
        timers: &mut impl Timers,
        score_board: &mut impl ScoreBoard,
    ) -> FrameOutcome {
        let Some(state) = self.state.as_mut() else {
            return FrameOutcome::Idle;
        };

        let outcome = sim::tick(state);
        // Every increment is shown, even when several land in one tick
        for score in self.absorb_events() {
            score_board.show(&score_text(score));
        }

        match outcome {
            TickOutcome::Continue => {
                self.stats.ticks += 1;
                FrameOutcome::Continue
            }
            TickOutcome::PlayerHit => {
                log::info!("Player hit - game over");
                self.end(timers);
                FrameOutcome::GameOver
            }
        }
    }

    /// Advance by the real time since the last frame, then render
    ///
    /// Whole ticks of `SIM_DT` are run from an accumulator so movement speed
    /// is independent of the display refresh rate. Nothing is drawn on the
    /// frame the player is hit.
    pub fn frame(
        &mut self,
        elapsed_secs: f32,
        renderer: &mut impl Renderer,
        score_board: &mut impl ScoreBoard,
        timers: &mut impl Timers,
    ) -> FrameOutcome {
        if !self.is_running() {
            return FrameOutcome::Idle;
        }

        if let Some(state) = self.state.as_mut() {
            state.surface = renderer.surface();
        }

        // NaN would poison the accumulator for the rest of the session
        if elapsed_secs.is_finite() {
            self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_DT);
        }

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if self.step(timers, score_board) == FrameOutcome::GameOver {
                return FrameOutcome::GameOver;
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.render(renderer);
        FrameOutcome::Continue
    }

    /// Draw the player, then projectiles, then enemies
    pub fn render(&self, renderer: &mut impl Renderer) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        renderer.clear();
        draw(renderer, &state.player);
        for projectile in &state.projectiles {
            draw(renderer, projectile);
        }
        for enemy in &state.enemies {
            draw(renderer, enemy);
        }
    }

    /// Fold drained events into the stats; returns the new scores in order
    fn absorb_events(&mut self) -> Vec<u32> {
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };
        let mut scores = Vec::new();
        for event in state.drain_events() {
            match event {
                GameEvent::Scored { score } => scores.push(score),
                GameEvent::ProjectileFired => self.stats.shots_fired += 1,
                GameEvent::EnemySpawned => self.stats.enemies_spawned += 1,
                GameEvent::EnemyDestroyed => {
                    self.stats.enemies_destroyed += 1;
                    log::debug!("Enemy destroyed");
                }
                GameEvent::EnemyHit { remaining_radius } => {
                    log::debug!("Enemy hit, radius now {:.1}", remaining_radius);
                }
                GameEvent::PlayerHit => {}
            }
        }
        scores
    }
}

fn draw(renderer: &mut impl Renderer, entity: &impl Entity) {
    renderer.draw_circle(entity.pos(), entity.radius(), entity.color());
}
