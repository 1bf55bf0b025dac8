//! # TappySwipey Core Library
//!
//! Gameplay core of a gesture-scoring arcade game. A host UI framework turns
//! raw touches into discrete gesture events; this crate decides what they are
//! worth.
//!
//! ## Architecture
//!
//! - **Actions**: the fixed catalog of tap and swipe gestures and the rule that
//!   keeps a single tap from firing while a double tap is still possible
//! - **Combo**: the time-windowed stack of recent actions and a pluggable
//!   combo detector
//! - **Scoring**: per-action repeat counters and diminishing returns
//! - **Session**: a tick-driven state machine (loading, running, paused,
//!   ended) plus an async driver that owns the countdown and combo-reset ticks
//!
//! ## Key Components
//!
//! - [`Catalog`]: every recognizable gesture
//! - [`Session`]: one gameplay session
//! - [`SessionDriver`]: runs a session on a tokio task
//! - [`Config`]: TOML configuration

pub mod actions;
pub mod combo;
pub mod config;
pub mod error;
pub mod events;
pub mod performed;
pub mod scoring;
pub mod session;

pub use actions::{
    failure_requirements, requires_failure, ActionDefinition, ActionKind, Catalog, Gesture,
    RecognizerSpec, SwipeDirection,
};
pub use combo::{
    ComboDetector, ComboMatch, ComboPattern, ComboStack, NoComboDetector, PatternComboDetector,
};
pub use config::Config;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{EndReason, Event};
pub use performed::{Orientation, PerformedAction};
pub use scoring::{Award, ScoringEngine};
pub use session::{
    Command, GameMode, GestureOutcome, Session, SessionDriver, SessionHandle, SessionSettings,
    SessionState,
};
