//! Data-driven game balance
//!
//! Every knob the simulation reads lives in [`Tuning`]. Defaults reproduce the
//! arcade feel; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file was not valid tuning JSON
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning file: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lives & scoring ===
    /// Lives at session start (including the active ship)
    pub starting_lives: u32,
    /// Score increment between extra lives
    pub new_life_score: u64,

    // === Level progression ===
    /// Big asteroids per level are `level_base + level`
    pub level_base: u32,
    /// Delay between clearing the field and the next wave (ms)
    pub level_delay_ms: f32,
    /// Base saucer spawn delay (ms), scaled by `1/level + 1 + U[0,1)`
    pub saucer_schedule_ms: f32,
    /// Asteroid drift speed cap (px per frame)
    pub asteroid_max_speed: f32,

    // === Spawn safety ===
    /// Default clearance around the player for spawns (px)
    pub spawn_distance: f32,
    /// Clearance shrink per failed respawn attempt (px)
    pub spawn_distance_step: f32,
    /// Backoff between failed respawn attempts (ms)
    pub respawn_retry_ms: f32,

    // === Death & respawn ===
    /// Delay after death before a respawn attempt (ms)
    pub respawn_delay_ms: f32,
    /// Delay before a hyperspace jump lands (ms)
    pub hyperspace_delay_ms: f32,
    /// Delay after the last death before game over (ms)
    pub game_over_delay_ms: f32,
    /// How long wreckage stays visible (ms)
    pub debris_visible_ms: f32,
    /// Starting halo radius after respawn (px)
    pub halo_size: f32,
    /// Per-frame halo shrink factor
    pub halo_decay: f32,
    /// Halo lifetime (ms)
    pub halo_duration_ms: f32,

    // === Player ship ===
    pub max_speed: f32,
    pub thrust_accel: f32,
    /// Per-frame velocity retention while coasting
    pub ship_drag: f32,
    pub rotation_speed: f32,
    pub shot_speed: f32,
    pub shot_distance: f32,
    pub shot_interval_ms: f32,

    // === Timing ===
    /// Deferred actions keep counting down while the window is unfocused
    pub timers_run_while_paused: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            new_life_score: 10_000,

            level_base: 3,
            level_delay_ms: 1000.0,
            saucer_schedule_ms: 6000.0,
            asteroid_max_speed: ASTEROID_MAX_SPEED,

            spawn_distance: 200.0,
            spawn_distance_step: 5.0,
            respawn_retry_ms: 100.0,

            respawn_delay_ms: 1000.0,
            hyperspace_delay_ms: 50.0,
            game_over_delay_ms: 1000.0,
            debris_visible_ms: 2000.0,
            halo_size: 70.0,
            halo_decay: 0.90,
            halo_duration_ms: 5000.0,

            max_speed: MAX_SPEED,
            thrust_accel: THRUSTERS_ACCELERATION,
            ship_drag: 0.99,
            rotation_speed: ROTATION_SPEED,
            shot_speed: SHOT_SPEED,
            shot_distance: SHOT_DISTANCE,
            shot_interval_ms: SHOT_INTERVAL,

            timers_run_while_paused: false,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning (starting lives {})", tuning.starting_lives);
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.new_life_score == 0 {
            return invalid("new_life_score", "must be positive");
        }
        if self.spawn_distance <= 0.0 {
            return invalid("spawn_distance", "must be positive");
        }
        if self.spawn_distance_step <= 0.0 {
            return invalid("spawn_distance_step", "must be positive");
        }
        if !(0.0..1.0).contains(&self.halo_decay) {
            return invalid("halo_decay", "must be in [0, 1)");
        }
        if !(0.0..=1.0).contains(&self.ship_drag) {
            return invalid("ship_drag", "must be in [0, 1]");
        }
        if self.shot_speed <= 0.0 {
            return invalid("shot_speed", "must be positive");
        }
        if self.max_speed <= 0.0 || self.asteroid_max_speed <= 0.0 {
            return invalid("max_speed", "speeds must be positive");
        }
        let delays = [
            self.level_delay_ms,
            self.saucer_schedule_ms,
            self.respawn_retry_ms,
            self.respawn_delay_ms,
            self.hyperspace_delay_ms,
            self.game_over_delay_ms,
            self.debris_visible_ms,
            self.halo_duration_ms,
            self.shot_interval_ms,
        ];
        if delays.iter().any(|d| *d < 0.0 || !d.is_finite()) {
            return invalid("delays", "must be finite and non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.spawn_distance, 200.0);
        assert_eq!(tuning.new_life_score, 10_000);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Tuning::from_json_str(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "starting_lives", .. }));
    }

    #[test]
    fn test_rejects_bad_halo_decay() {
        let err = Tuning::from_json_str(r#"{ "halo_decay": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("halo_decay"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "level_base": 4, "timers_run_while_paused": true }"#).unwrap();

        let tuning = Tuning::load(&path).unwrap();
        assert_eq!(tuning.level_base, 4);
        assert!(tuning.timers_run_while_paused);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
