use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{GameMode, SessionState};

/// Why a session reached `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The host (or player) asked to leave the screen.
    Requested,
    /// The timed-mode countdown ran out.
    TimeExpired,
}

/// Every state change in a session produces an Event.
/// The presentation layer consumes them; the core never calls back into UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: Uuid,
        mode: GameMode,
        remaining_ms: Option<u64>,
        at: DateTime<Utc>,
    },
    /// Presenters retract transient feedback and swap the control label.
    SessionPaused {
        remaining_ms: Option<u64>,
        control_label: String,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_ms: Option<u64>,
        control_label: String,
        at: DateTime<Utc>,
    },
    /// Presenters should leave the gameplay screen.
    SessionEnded {
        reason: EndReason,
        final_score: u64,
        at: DateTime<Utc>,
    },
    ActionScored {
        description: String,
        points: u32,
        total: u64,
        at: DateTime<Utc>,
    },
    ComboScored {
        name: String,
        consumed: Vec<String>,
        points: u32,
        total: u64,
        at: DateTime<Utc>,
    },
    ComboStackCleared {
        discarded: usize,
        at: DateTime<Utc>,
    },
    CountdownTick {
        remaining_ms: u64,
        top_label: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_id: Uuid,
        state: SessionState,
        mode: GameMode,
        score: u64,
        remaining_ms: Option<u64>,
        top_label: Option<String>,
        control_label: String,
        combo_len: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::SessionStarted { at, .. }
            | Event::SessionPaused { at, .. }
            | Event::SessionResumed { at, .. }
            | Event::SessionEnded { at, .. }
            | Event::ActionScored { at, .. }
            | Event::ComboScored { at, .. }
            | Event::ComboStackCleared { at, .. }
            | Event::CountdownTick { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}
