//! Engine policy configuration.
//!
//! The numeric constants here encode product policy (default body weight,
//! score weights, streak thresholds) and are injected into the calculators
//! rather than re-declared at call sites. They can be overridden through a
//! TOML file without code changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Weights of the daily leaderboard score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the user's average session intensity
    pub intensity: f64,
    /// Weight of total calories burned
    pub calories: f64,
    /// Weight of total exercises performed
    pub exercises: f64,
    /// Weight of the number of completed sessions
    pub workout_count: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            intensity: 0.4,
            calories: 0.003,
            exercises: 2.0,
            workout_count: 10.0,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Body weight assumed when an athlete's weight is unknown, in kg
    pub default_body_weight_kg: f64,
    /// Assumed duration of one set including rest, in minutes
    pub minutes_per_set: u32,
    /// Trailing window inspected for streak detection, in days
    pub streak_window_days: i64,
    /// Minimum consecutive days before a streak is reported
    pub min_streak_to_report: u32,
    /// Maximum number of friend streaks in one report
    pub max_streaks_reported: usize,
    /// Leaderboard score weights
    pub score_weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_body_weight_kg: 75.0,
            minutes_per_set: 2,
            streak_window_days: 7,
            min_streak_to_report: 3,
            max_streaks_reported: 5,
            score_weights: ScoreWeights::default(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "gymquest", "GymQuest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("engine.toml")
}

/// Get the default database file path.
pub fn get_database_path() -> PathBuf {
    get_data_dir().join("gymquest.db")
}

/// Load engine configuration from file, falling back to defaults when no
/// file exists yet.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: EngineConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Save engine configuration to file.
pub fn save_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
