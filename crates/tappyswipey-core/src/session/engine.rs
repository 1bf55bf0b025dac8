//! Session state machine.
//!
//! A session is tick-driven: it owns no threads or timers of its own. The
//! host (or [`SessionDriver`](super::SessionDriver)) delivers gesture events
//! and two independent periodic ticks, the countdown tick and the combo-reset
//! tick, and forwards the returned events to the presentation layer.
//!
//! ## State Transitions
//!
//! ```text
//! Loading -> Running <-> Paused
//!    \          |          /
//!     '-----> Ended <-----'
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::new(SessionSettings::timed());
//! session.start();
//! session.perform(Gesture::Tap { touches: 1, taps: 1 }, Orientation::Portrait)?;
//! // every countdown period:
//! session.countdown_tick(); // Some(Event::SessionEnded { .. }) when time runs out
//! // every combo-reset period:
//! session.combo_tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mode::{GameMode, SessionSettings};
use crate::actions::{ActionDefinition, Catalog, Gesture};
use crate::combo::{ComboDetector, ComboMatch, ComboStack, NoComboDetector};
use crate::error::ValidationError;
use crate::events::{EndReason, Event};
use crate::performed::{Orientation, PerformedAction};
use crate::scoring::{Award, ScoringEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Loading,
    Running,
    Paused,
    Ended,
}

/// What became of one gesture event.
#[derive(Debug, Clone)]
pub enum GestureOutcome {
    /// The session was not running; nothing changed.
    Dropped { state: SessionState },
    Scored { award: Award, event: Event },
    Combo {
        combo: ComboMatch,
        award: Award,
        event: Event,
    },
}

impl GestureOutcome {
    pub fn is_dropped(&self) -> bool {
        matches!(self, GestureOutcome::Dropped { .. })
    }

    pub fn award(&self) -> Option<&Award> {
        match self {
            GestureOutcome::Dropped { .. } => None,
            GestureOutcome::Scored { award, .. } | GestureOutcome::Combo { award, .. } => {
                Some(award)
            }
        }
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            GestureOutcome::Dropped { .. } => None,
            GestureOutcome::Scored { event, .. } | GestureOutcome::Combo { event, .. } => {
                Some(event)
            }
        }
    }

    pub fn into_event(self) -> Option<Event> {
        match self {
            GestureOutcome::Dropped { .. } => None,
            GestureOutcome::Scored { event, .. } | GestureOutcome::Combo { event, .. } => {
                Some(event)
            }
        }
    }
}

/// One gameplay session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    settings: SessionSettings,
    state: SessionState,
    /// Remaining countdown in milliseconds; `None` outside timed mode.
    remaining_ms: Option<u64>,
    combo: ComboStack,
    scoring: ScoringEngine,
    detector: Box<dyn ComboDetector>,
}

impl Session {
    /// Create a session in `Loading` with combo detection disabled.
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_detector(settings, Box::new(NoComboDetector))
    }

    pub fn with_detector(settings: SessionSettings, detector: Box<dyn ComboDetector>) -> Self {
        let remaining_ms = settings.is_timed().then_some(settings.timed_duration_ms);
        let scoring = ScoringEngine::new(settings.diminishing);
        Self {
            id: Uuid::new_v4(),
            settings,
            state: SessionState::Loading,
            remaining_ms,
            combo: ComboStack::new(),
            scoring,
            detector,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.scoring.total()
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    pub fn combo(&self) -> &ComboStack {
        &self.combo
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    /// Whole seconds left, truncated, for the top label. `None` in free mode.
    pub fn top_label(&self) -> Option<String> {
        self.remaining_ms.map(|ms| (ms / 1000).to_string())
    }

    /// Text for the pause/play toggle.
    pub fn control_label(&self) -> &'static str {
        match self.state {
            SessionState::Paused => "play",
            _ => "pause",
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            session_id: self.id,
            state: self.state,
            mode: self.settings.mode,
            score: self.score(),
            remaining_ms: self.remaining_ms,
            top_label: self.top_label(),
            control_label: self.control_label().into(),
            combo_len: self.combo.len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Loading => {
                self.state = SessionState::Running;
                tracing::info!(session = %self.id, mode = ?self.settings.mode, "session started");
                Some(Event::SessionStarted {
                    session_id: self.id,
                    mode: self.settings.mode,
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                tracing::info!(session = %self.id, remaining_ms = ?self.remaining_ms, "session paused");
                Some(Event::SessionPaused {
                    remaining_ms: self.remaining_ms,
                    control_label: self.control_label().into(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn unpause(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Running;
                tracing::info!(session = %self.id, "session resumed");
                Some(Event::SessionResumed {
                    remaining_ms: self.remaining_ms,
                    control_label: self.control_label().into(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// End the session from any state. Calling it again does nothing.
    pub fn end(&mut self) -> Option<Event> {
        self.finish(EndReason::Requested)
    }

    /// Handle a gesture event from the host.
    ///
    /// Gestures are dropped unless the session is running, before the
    /// gesture is even resolved against the catalog.
    pub fn perform(
        &mut self,
        gesture: Gesture,
        orientation: Orientation,
    ) -> Result<GestureOutcome, ValidationError> {
        if self.state != SessionState::Running {
            tracing::debug!(%gesture, state = ?self.state, "gesture dropped");
            return Ok(GestureOutcome::Dropped { state: self.state });
        }
        let action = Catalog::global().lookup(&gesture)?;
        Ok(self.perform_action(action, orientation))
    }

    /// Handle a firing of an already-resolved catalog action.
    pub fn perform_action(
        &mut self,
        action: &'static ActionDefinition,
        orientation: Orientation,
    ) -> GestureOutcome {
        if self.state != SessionState::Running {
            tracing::debug!(action = %action.title, state = ?self.state, "action dropped");
            return GestureOutcome::Dropped { state: self.state };
        }

        let performed =
            PerformedAction::new(action, orientation, self.settings.qualify_with_orientation);
        tracing::debug!(description = %performed.description, "action performed");
        let description = performed.description.clone();
        self.combo.append(performed);

        if let Some(combo) = self.detector.detect(self.combo.entries()) {
            let consumed: Vec<String> = self
                .combo
                .remove_suffix(combo.length)
                .into_iter()
                .map(|p| p.description)
                .collect();
            let award = self.scoring.award(&combo.name, combo.point_value);
            tracing::info!(combo = %combo.name, points = award.points, "combo performed");
            let event = Event::ComboScored {
                name: combo.name.clone(),
                consumed,
                points: award.points,
                total: award.total,
                at: Utc::now(),
            };
            return GestureOutcome::Combo {
                combo,
                award,
                event,
            };
        }

        let award = self.scoring.award(&description, action.point_value);
        let event = Event::ActionScored {
            description,
            points: award.points,
            total: award.total,
            at: Utc::now(),
        };
        GestureOutcome::Scored { award, event }
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Countdown tick: one `countdown_tick_ms` period has elapsed.
    ///
    /// Only a running timed session loses time. Returns the top-label update,
    /// or `SessionEnded` on the tick that exhausts the countdown.
    pub fn countdown_tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        let remaining = self.remaining_ms.as_mut()?;
        *remaining = remaining.saturating_sub(self.settings.countdown_tick_ms);
        let remaining = *remaining;
        if remaining == 0 {
            return self.finish(EndReason::TimeExpired);
        }
        Some(Event::CountdownTick {
            remaining_ms: remaining,
            top_label: (remaining / 1000).to_string(),
            at: Utc::now(),
        })
    }

    /// Combo-reset tick. Keeps running while paused so that a long pause
    /// flushes stale actions; stops once the session has ended.
    pub fn combo_tick(&mut self) -> Option<Event> {
        if self.state == SessionState::Ended {
            return None;
        }
        let discarded = self.combo.on_reset_tick();
        if discarded == 0 {
            return None;
        }
        tracing::debug!(discarded, "combo stack cleared");
        Some(Event::ComboStackCleared {
            discarded,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish(&mut self, reason: EndReason) -> Option<Event> {
        if self.state == SessionState::Ended {
            return None;
        }
        self.state = SessionState::Ended;
        tracing::info!(session = %self.id, ?reason, score = self.score(), "session ended");
        Some(Event::SessionEnded {
            reason,
            final_score: self.score(),
            at: Utc::now(),
        })
    }
}
