//! Config Module
//!
//! Centralized configuration for the explorer: avatar tuning, look
//! controls, respawn and frame clock. Loaded from JSON; any field left out
//! keeps its default.
//!
//! ```ignore
//! let config = ExplorerConfig::load(Path::new("explorer.json"))?;
//! let sim = PlayerSimulation::new(&config);
//! ```

pub mod player_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use player_config::{ClockConfig, LookConfig, PlayerConfig, RespawnConfig};

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
    /// A value parsed but is outside its usable range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

/// Complete configuration for one explorer session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub player: PlayerConfig,
    pub look: LookConfig,
    pub respawn: RespawnConfig,
    pub clock: ClockConfig,
}

impl ExplorerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ExplorerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player.capsule_radius", self.player.capsule_radius),
            ("player.height", self.player.height),
            ("player.gravity", self.player.gravity),
            ("look.sensitivity", self.look.sensitivity),
            ("look.pitch_limit", self.look.pitch_limit),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        let finite = [
            ("player.speed_multiplier", self.player.speed_multiplier),
            ("player.grounded_speed_factor", self.player.grounded_speed_factor),
            ("player.airborne_speed_factor", self.player.airborne_speed_factor),
            ("player.run_multiplier", self.player.run_multiplier),
            ("player.backward_factor", self.player.backward_factor),
            ("player.strafe_factor", self.player.strafe_factor),
            ("player.jump_impulse", self.player.jump_impulse),
            ("player.damping_rate", self.player.damping_rate),
            ("player.airborne_damping_scale", self.player.airborne_damping_scale),
            ("respawn.out_of_bounds_y", self.respawn.out_of_bounds_y),
            ("respawn.spawn.yaw", self.respawn.spawn.yaw),
            ("respawn.spawn.pitch", self.respawn.spawn.pitch),
            ("clock.min_dt", self.clock.min_dt),
            ("clock.max_dt", self.clock.max_dt),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        let vectors = [
            ("respawn.spawn.position", self.respawn.spawn.position),
            ("respawn.spawn.velocity", self.respawn.spawn.velocity),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        // Negative damping grows velocity without bound
        if self.player.damping_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player.damping_rate must be >= 0, got {}",
                self.player.damping_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.player.airborne_damping_scale) {
            return Err(ConfigError::Invalid(format!(
                "player.airborne_damping_scale must be in [0, 1], got {}",
                self.player.airborne_damping_scale
            )));
        }

        if self.clock.min_dt < 0.0 || self.clock.min_dt > self.clock.max_dt {
            return Err(ConfigError::Invalid(format!(
                "clock bounds must satisfy 0 <= min_dt <= max_dt, got [{}, {}]",
                self.clock.min_dt, self.clock.max_dt
            )));
        }

        Ok(())
    }
}
