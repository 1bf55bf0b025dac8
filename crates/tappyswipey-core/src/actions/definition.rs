//! Gesture action definitions.
//!
//! An [`ActionDefinition`] carries the fields every gesture shares (title,
//! base points, required touches) and a closed [`ActionKind`] holding the
//! tap- or swipe-specific discriminator.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 4] = [
        SwipeDirection::Up,
        SwipeDirection::Down,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SwipeDirection::Up => "Up",
            SwipeDirection::Down => "Down",
            SwipeDirection::Left => "Left",
            SwipeDirection::Right => "Right",
        }
    }
}

impl std::str::FromStr for SwipeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(SwipeDirection::Up),
            "down" => Ok(SwipeDirection::Down),
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            other => Err(format!("unknown swipe direction: {other}")),
        }
    }
}

/// Gesture-specific discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActionKind {
    Tap { tap_count: u8 },
    Swipe { direction: SwipeDirection },
}

/// Recognizer parameters a host input layer needs to arm for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recognizer", rename_all = "lowercase")]
pub enum RecognizerSpec {
    Tap {
        touches_required: u8,
        taps_required: u8,
    },
    Swipe {
        touches_required: u8,
        direction: SwipeDirection,
    },
}

/// A recognizable gesture and its base score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub title: String,
    pub point_value: u32,
    pub touch_count: u8,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl ActionDefinition {
    pub(crate) fn tap(touch_count: u8, tap_count: u8) -> Self {
        Self {
            title: format!("{}{} Tap", finger_prefix(touch_count), ordinal_word(tap_count)),
            point_value: u32::from(touch_count) * u32::from(tap_count) * 1_000,
            touch_count,
            kind: ActionKind::Tap { tap_count },
        }
    }

    pub(crate) fn swipe(touch_count: u8, direction: SwipeDirection) -> Self {
        Self {
            title: format!("{}Swipe {}", finger_prefix(touch_count), direction.label()),
            point_value: 1_000,
            touch_count,
            kind: ActionKind::Swipe { direction },
        }
    }

    pub fn tap_count(&self) -> Option<u8> {
        match self.kind {
            ActionKind::Tap { tap_count } => Some(tap_count),
            ActionKind::Swipe { .. } => None,
        }
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        match self.kind {
            ActionKind::Swipe { direction } => Some(direction),
            ActionKind::Tap { .. } => None,
        }
    }

    pub fn is_tap(&self) -> bool {
        matches!(self.kind, ActionKind::Tap { .. })
    }

    /// Describe the recognizer the host should build for this action.
    pub fn recognizer(&self) -> RecognizerSpec {
        match self.kind {
            ActionKind::Tap { tap_count } => RecognizerSpec::Tap {
                touches_required: self.touch_count,
                taps_required: tap_count,
            },
            ActionKind::Swipe { direction } => RecognizerSpec::Swipe {
                touches_required: self.touch_count,
                direction,
            },
        }
    }

    /// Whether this definition is the one a host gesture event refers to.
    pub fn matches(&self, gesture: &Gesture) -> bool {
        match (*gesture, self.kind) {
            (Gesture::Tap { touches, taps }, ActionKind::Tap { tap_count }) => {
                touches == self.touch_count && taps == tap_count
            }
            (Gesture::Swipe { touches, direction }, ActionKind::Swipe { direction: d }) => {
                touches == self.touch_count && direction == d
            }
            _ => false,
        }
    }
}

/// A discrete "gesture fired" notification from the host input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "lowercase")]
pub enum Gesture {
    Tap { touches: u8, taps: u8 },
    Swipe { touches: u8, direction: SwipeDirection },
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Tap { touches, taps } => write!(f, "{touches}-touch {taps}-tap"),
            Gesture::Swipe { touches, direction } => {
                write!(f, "{touches}-touch swipe {}", direction.label().to_lowercase())
            }
        }
    }
}

fn finger_prefix(touch_count: u8) -> String {
    match touch_count {
        1 => String::new(),
        2 => "Two-Finger ".into(),
        3 => "Three-Finger ".into(),
        4 => "Four-Finger ".into(),
        n => format!("{n}-Finger "),
    }
}

fn ordinal_word(tap_count: u8) -> String {
    match tap_count {
        1 => "Single".into(),
        2 => "Double".into(),
        3 => "Triple".into(),
        4 => "Quadruple".into(),
        n => format!("{n}x"),
    }
}
