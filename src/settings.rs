//! Game settings and balance values
//!
//! Persisted in LocalStorage on the web; read from an optional JSON file on
//! native (path in `CIRCLE_SHOOTER_SETTINGS`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "settings parse error: {}", e),
            SettingsError::Invalid(field) => write!(f, "invalid settings value: {}", field),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` seeds from the host clock
    pub seed: Option<u64>,

    // === Timing ===
    /// Real-time interval between enemy spawns (ms)
    pub spawn_interval_ms: u32,

    // === Player ===
    pub player_radius: f32,

    // === Projectiles ===
    pub projectile_radius: f32,
    /// Units per tick
    pub projectile_speed: f32,

    // === Enemies ===
    /// Units per tick
    pub enemy_speed: f32,
    /// Smallest spawn radius
    pub enemy_min_radius: f32,
    /// Spawn radius is drawn from [min, min + range)
    pub enemy_radius_range: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            spawn_interval_ms: SPAWN_INTERVAL_MS,

            player_radius: PLAYER_RADIUS,

            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,

            enemy_speed: ENEMY_SPEED,
            enemy_min_radius: ENEMY_MIN_RADIUS,
            enemy_radius_range: ENEMY_RADIUS_RANGE,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break entity invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(value: f32) -> bool {
            value.is_finite() && value > 0.0
        }

        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::Invalid("spawn_interval_ms"));
        }
        if !positive(self.player_radius) {
            return Err(SettingsError::Invalid("player_radius"));
        }
        if !positive(self.projectile_radius) {
            return Err(SettingsError::Invalid("projectile_radius"));
        }
        if !positive(self.projectile_speed) {
            return Err(SettingsError::Invalid("projectile_speed"));
        }
        if !positive(self.enemy_speed) {
            return Err(SettingsError::Invalid("enemy_speed"));
        }
        // A fresh enemy must survive at least one hit
        if !self.enemy_min_radius.is_finite() || self.enemy_min_radius <= ENEMY_DESTROY_RADIUS {
            return Err(SettingsError::Invalid("enemy_min_radius"));
        }
        if !self.enemy_radius_range.is_finite() || self.enemy_radius_range < 0.0 {
            return Err(SettingsError::Invalid("enemy_radius_range"));
        }
        Ok(())
    }

    /// Parse a document, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "circle_shooter_settings";

    /// Environment variable naming a native settings file
    pub const SETTINGS_ENV: &'static str = "CIRCLE_SHOOTER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `CIRCLE_SHOOTER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        Self::load_file(std::path::Path::new(&path))
    }

    /// Read a JSON settings file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.spawn_interval_ms, 2000);
        assert_eq!(settings.projectile_speed, 7.0);
        assert_eq!(settings.enemy_speed, 1.5);
        assert_eq!(settings.player_radius, 10.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(77),
            enemy_speed: 2.0,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings = Settings::from_json(r#"{ "spawn_interval_ms": 500 }"#).unwrap();
        assert_eq!(settings.spawn_interval_ms, 500);
        assert_eq!(settings.projectile_speed, PROJECTILE_SPEED);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "projectile_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid("projectile_speed")));

        let err = Settings::from_json(r#"{ "enemy_min_radius": 8.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid("enemy_min_radius")));

        let err = Settings::from_json(r#"{ "spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid("spawn_interval_ms")));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("circle_shooter_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 9, "enemy_speed": 3.0 }"#).unwrap();
        let settings = Settings::load_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.enemy_speed, 3.0);
        assert_eq!(Settings::load_file(&path), Settings::default());
    }
}
