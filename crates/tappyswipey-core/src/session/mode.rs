use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMED_DURATION_MS: u64 = 60_000;
pub const DEFAULT_COUNTDOWN_TICK_MS: u64 = 10;
pub const DEFAULT_COMBO_RESET_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Open-ended play, no countdown.
    #[default]
    Free,
    /// Play against a countdown; the session ends when it reaches zero.
    Timed,
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(GameMode::Free),
            "timed" => Ok(GameMode::Timed),
            other => Err(format!("unknown game mode: {other}")),
        }
    }
}

/// Everything a session needs to know about its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub mode: GameMode,
    /// Countdown length in milliseconds (timed mode only).
    pub timed_duration_ms: u64,
    /// Period of the countdown tick in milliseconds.
    pub countdown_tick_ms: u64,
    /// Period of the combo-stack reset tick in milliseconds.
    pub combo_reset_ms: u64,
    pub diminishing: bool,
    /// Qualify action descriptions with device orientation.
    pub qualify_with_orientation: bool,
}

impl SessionSettings {
    pub fn free() -> Self {
        Self {
            mode: GameMode::Free,
            timed_duration_ms: DEFAULT_TIMED_DURATION_MS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            combo_reset_ms: DEFAULT_COMBO_RESET_MS,
            diminishing: false,
            qualify_with_orientation: false,
        }
    }

    pub fn timed() -> Self {
        Self {
            mode: GameMode::Timed,
            diminishing: true,
            ..Self::free()
        }
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Free => Self::free(),
            GameMode::Timed => Self::timed(),
        }
    }

    pub fn is_timed(&self) -> bool {
        self.mode == GameMode::Timed
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::free()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_defaults_to_diminishing_returns() {
        let timed = SessionSettings::timed();
        assert!(timed.diminishing);
        assert_eq!(timed.timed_duration_ms, 60_000);
        assert!(!SessionSettings::free().diminishing);
    }

    #[test]
    fn mode_parses() {
        assert_eq!("Timed".parse(), Ok(GameMode::Timed));
        assert!("zen".parse::<GameMode>().is_err());
    }
}
