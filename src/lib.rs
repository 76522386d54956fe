//! Circle Shooter - defend the center of the canvas
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, per-tick update order)
//! - `session`: Start/end lifecycle and the fixed-timestep frame driver
//! - `platform`: Host collaborators (rendering, score text, timers, input mapping)
//! - `settings`: Data-driven game balance

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameOutcome, GameSession, SessionPhase};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (speeds below are per tick at this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the accumulator will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_START_AMMO: u32 = 25;
    /// Points awarded per projectile hit
    pub const SCORE_PER_HIT: u32 = 1;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Units per tick
    pub const PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy defaults
    /// Units per tick
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_MIN_RADIUS: f32 = 15.0;
    pub const ENEMY_RADIUS_RANGE: f32 = 30.0;
    /// Radius lost per projectile hit
    pub const ENEMY_HIT_SHRINK: f32 = 5.0;
    /// An enemy at or below this radius after a hit is destroyed
    pub const ENEMY_DESTROY_RADIUS: f32 = 10.0;

    /// Real-time interval between enemy spawns (ms)
    pub const SPAWN_INTERVAL_MS: u32 = 2000;

    /// Canvas height as a fraction of the window height
    pub const CANVAS_HEIGHT_FRACTION: f64 = 0.8;
}
