//! TOML-based game configuration.
//!
//! Stores:
//! - Tick periods and the timed-mode countdown length
//! - Which modes score with diminishing returns
//! - Feedback options (orientation-qualified descriptions)
//! - Combo patterns for the pattern detector
//!
//! Configuration is stored at `~/.config/tappyswipey/config.toml`, or
//! `~/.config/tappyswipey-dev/` when `TAPPYSWIPEY_ENV=dev`. Setting
//! `TAPPYSWIPEY_CONFIG` to a file path overrides both.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::combo::{
    validate_patterns, ComboDetector, ComboPattern, NoComboDetector, PatternComboDetector,
};
use crate::error::{ConfigError, CoreError, Result};
use crate::session::{
    GameMode, Session, SessionSettings, DEFAULT_COMBO_RESET_MS, DEFAULT_COUNTDOWN_TICK_MS,
    DEFAULT_TIMED_DURATION_MS,
};

/// Tick periods and countdown length, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,
    #[serde(default = "default_combo_reset_ms")]
    pub combo_reset_ms: u64,
    #[serde(default = "default_timed_duration_ms")]
    pub timed_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub diminishing_free: bool,
    #[serde(default = "default_true")]
    pub diminishing_timed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub qualify_with_orientation: bool,
}

/// Game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub combos: Vec<ComboPattern>,
}

fn default_countdown_tick_ms() -> u64 {
    DEFAULT_COUNTDOWN_TICK_MS
}
fn default_combo_reset_ms() -> u64 {
    DEFAULT_COMBO_RESET_MS
}
fn default_timed_duration_ms() -> u64 {
    DEFAULT_TIMED_DURATION_MS
}
fn default_true() -> bool {
    true
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            countdown_tick_ms: default_countdown_tick_ms(),
            combo_reset_ms: default_combo_reset_ms(),
            timed_duration_ms: default_timed_duration_ms(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            diminishing_free: false,
            diminishing_timed: true,
        }
    }
}

/// Returns `~/.config/tappyswipey[-dev]/` based on TAPPYSWIPEY_ENV.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("TAPPYSWIPEY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tappyswipey-dev")
    } else {
        base_dir.join("tappyswipey")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Config file location, honoring `TAPPYSWIPEY_CONFIG`.
    pub fn path() -> Result<PathBuf> {
        if let Ok(custom) = std::env::var("TAPPYSWIPEY_CONFIG") {
            return Ok(PathBuf::from(custom));
        }
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if no file
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("falling back to default config: {e}");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving. The result must
    /// still validate; on error `self` is unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("timing.countdown_tick_ms", self.timing.countdown_tick_ms),
            ("timing.combo_reset_ms", self.timing.combo_reset_ms),
            ("timing.timed_duration_ms", self.timing.timed_duration_ms),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be greater than zero".into(),
                });
            }
        }
        validate_patterns(&self.combos).map_err(|e| ConfigError::InvalidValue {
            key: "combos".into(),
            message: e.to_string(),
        })
    }

    pub fn session_settings(&self, mode: GameMode) -> SessionSettings {
        SessionSettings {
            mode,
            timed_duration_ms: self.timing.timed_duration_ms,
            countdown_tick_ms: self.timing.countdown_tick_ms,
            combo_reset_ms: self.timing.combo_reset_ms,
            diminishing: match mode {
                GameMode::Free => self.scoring.diminishing_free,
                GameMode::Timed => self.scoring.diminishing_timed,
            },
            qualify_with_orientation: self.feedback.qualify_with_orientation,
        }
    }

    pub fn combo_detector(&self) -> Result<Box<dyn ComboDetector>> {
        if self.combos.is_empty() {
            return Ok(Box::new(NoComboDetector));
        }
        let detector = PatternComboDetector::new(self.combos.clone()).map_err(CoreError::from)?;
        Ok(Box::new(detector))
    }

    /// Build a fresh session for `mode` from this configuration.
    pub fn new_session(&self, mode: GameMode) -> Result<Session> {
        Ok(Session::with_detector(
            self.session_settings(mode),
            self.combo_detector()?,
        ))
    }
}
