use crate::app_dirs::AppDirs;
use crate::fall::FallSettings;
use crate::word_bank::builtin_vocabulary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happens when a word touches the floor
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FloorPolicy {
    /// first missed word ends the session
    #[default]
    Strict,
    /// each miss costs `penalty` points; the session ends once the score drops below `game_over_below`
    Lenient { penalty: i64, game_over_below: i64 },
}

impl FloorPolicy {
    pub fn lenient() -> Self {
        FloorPolicy::Lenient {
            penalty: 1,
            game_over_below: -5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// None means the built-in word list
    pub vocabulary: Option<Vec<String>>,
    pub fall_interval_ms: u64,
    pub clock_interval_ms: u64,
    pub start_speed: f64,
    pub speed_step: f64,
    pub max_speed: f64,
    pub spawn_offset: f64,
    pub floor_threshold: f64,
    pub floor_tolerance: f64,
    pub floor_policy: FloorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: None,
            fall_interval_ms: 30,
            clock_interval_ms: 100,
            start_speed: 1.3,
            speed_step: 0.15,
            max_speed: 8.0,
            spawn_offset: 0.0,
            floor_threshold: 360.0,
            floor_tolerance: 2.0,
            floor_policy: FloorPolicy::Strict,
        }
    }
}

/// Startup configuration problems. None of these can happen mid-session.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyVocabulary,
    InvalidWord(String),
    InvalidSpeed { start: f64, max: f64 },
    NegativeSpeedStep(f64),
    ZeroInterval(&'static str),
    InvalidFloor(f64),
    NonFinite(&'static str),
    InvalidPenalty(i64),
    UnreachableGameOver(i64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyVocabulary => write!(f, "vocabulary must contain at least one word"),
            ConfigError::InvalidWord(w) => {
                write!(f, "word {w:?} must be non-empty lowercase letters a-z")
            }
            ConfigError::InvalidSpeed { start, max } => write!(
                f,
                "speeds must be positive with max >= start (start {start}, max {max})"
            ),
            ConfigError::NegativeSpeedStep(step) => {
                write!(f, "speed step must not be negative (got {step})")
            }
            ConfigError::ZeroInterval(name) => write!(f, "{name} must be greater than zero"),
            ConfigError::InvalidFloor(floor) => {
                write!(f, "floor threshold must be positive (got {floor})")
            }
            ConfigError::NonFinite(name) => write!(f, "{name} must be a finite number"),
            ConfigError::InvalidPenalty(penalty) => {
                write!(f, "lenient penalty must be at least 1 (got {penalty})")
            }
            ConfigError::UnreachableGameOver(limit) => {
                write!(f, "lenient game_over_below {limit} can never be reached")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated game parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub vocabulary: Vec<String>,
    pub fall_interval: Duration,
    pub clock_interval: Duration,
    pub speed_step: f64,
    pub fall: FallSettings,
    pub floor_policy: FloorPolicy,
}

impl Config {
    pub fn validate(&self) -> Result<GameSettings, ConfigError> {
        let vocabulary = self
            .vocabulary
            .clone()
            .unwrap_or_else(builtin_vocabulary);

        if vocabulary.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        if let Some(bad) = vocabulary
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_lowercase()))
        {
            return Err(ConfigError::InvalidWord(bad.clone()));
        }

        let speeds_ok = self.start_speed > 0.0 && self.max_speed >= self.start_speed;
        if !speeds_ok {
            return Err(ConfigError::InvalidSpeed {
                start: self.start_speed,
                max: self.max_speed,
            });
        }
        if self.speed_step.is_nan() || self.speed_step < 0.0 {
            return Err(ConfigError::NegativeSpeedStep(self.speed_step));
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("fall_interval_ms"));
        }
        if self.clock_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("clock_interval_ms"));
        }
        if !self.floor_threshold.is_finite() || self.floor_threshold <= 0.0 {
            return Err(ConfigError::InvalidFloor(self.floor_threshold));
        }
        if !self.spawn_offset.is_finite() {
            return Err(ConfigError::NonFinite("spawn_offset"));
        }
        if !self.floor_tolerance.is_finite() {
            return Err(ConfigError::NonFinite("floor_tolerance"));
        }
        if let FloorPolicy::Lenient {
            penalty,
            game_over_below,
        } = self.floor_policy
        {
            if penalty <= 0 {
                return Err(ConfigError::InvalidPenalty(penalty));
            }
            // scores saturate at i64::MIN, which is never below the limit
            if game_over_below == i64::MIN {
                return Err(ConfigError::UnreachableGameOver(game_over_below));
            }
        }

        Ok(GameSettings {
            vocabulary,
            fall_interval: Duration::from_millis(self.fall_interval_ms),
            clock_interval: Duration::from_millis(self.clock_interval_ms),
            speed_step: self.speed_step,
            fall: FallSettings {
                start_speed: self.start_speed,
                max_speed: self.max_speed,
                spawn_offset: self.spawn_offset,
                floor_threshold: self.floor_threshold,
                floor_tolerance: self.floor_tolerance.max(0.0),
            },
            floor_policy: self.floor_policy,
        })
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("wordfall_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!(
                    "ignoring unreadable config {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
