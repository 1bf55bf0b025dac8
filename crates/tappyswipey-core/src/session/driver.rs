//! Async session driver.
//!
//! Owns a [`Session`] on a single tokio task and is the only place its two
//! periodic tick sources live. Gesture and control commands arrive over a
//! channel; commands and ticks are handled one at a time on that task, so the
//! session is never touched concurrently. Events go out over a second
//! channel.
//!
//! When the session ends (explicitly, by countdown expiry, or because every
//! [`SessionHandle`] was dropped) the task returns and both intervals are
//! dropped with it, so no tick is ever delivered after `Ended`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval};

use super::engine::Session;
use crate::actions::Gesture;
use crate::events::Event;
use crate::performed::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Unpause,
    End,
    Gesture {
        gesture: Gesture,
        orientation: Orientation,
    },
}

/// Sending half for a running driver. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Queue a command. Returns `false` once the driver has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> bool {
        self.send(Command::Pause)
    }

    pub fn unpause(&self) -> bool {
        self.send(Command::Unpause)
    }

    pub fn end(&self) -> bool {
        self.send(Command::End)
    }

    pub fn gesture(&self, gesture: Gesture, orientation: Orientation) -> bool {
        self.send(Command::Gesture {
            gesture,
            orientation,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct SessionDriver {
    session: Session,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<Event>,
}

impl SessionDriver {
    pub fn new(
        session: Session,
    ) -> (Self, SessionHandle, mpsc::UnboundedReceiver<Event>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let driver = Self {
            session,
            commands: cmd_rx,
            events: event_tx,
        };
        (driver, SessionHandle { tx: cmd_tx }, event_rx)
    }

    /// Spawn the driver on the current runtime. The join handle yields the
    /// ended session.
    pub fn spawn(
        session: Session,
    ) -> (SessionHandle, mpsc::UnboundedReceiver<Event>, JoinHandle<Session>) {
        let (driver, handle, events) = Self::new(session);
        let join = tokio::spawn(driver.run());
        (handle, events, join)
    }

    pub async fn run(mut self) -> Session {
        let settings = self.session.settings().clone();
        let timed = settings.is_timed();
        let mut countdown = periodic(settings.countdown_tick_ms);
        let mut combo_reset = periodic(settings.combo_reset_ms);

        tracing::debug!(session = %self.session.id(), timed, "session driver running");

        while !self.session.is_ended() {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => {
                        tracing::debug!("all session handles dropped");
                        let event = self.session.end();
                        self.emit(event);
                    }
                },
                _ = countdown.tick(), if timed => {
                    let event = self.session.countdown_tick();
                    self.emit(event);
                }
                _ = combo_reset.tick() => {
                    let event = self.session.combo_tick();
                    self.emit(event);
                }
            }
        }

        tracing::debug!(session = %self.session.id(), "session driver stopped");
        self.session
    }

    fn handle(&mut self, command: Command) {
        let event = match command {
            Command::Start => self.session.start(),
            Command::Pause => self.session.pause(),
            Command::Unpause => self.session.unpause(),
            Command::End => self.session.end(),
            Command::Gesture {
                gesture,
                orientation,
            } => match self.session.perform(gesture, orientation) {
                Ok(outcome) => outcome.into_event(),
                Err(e) => {
                    tracing::warn!("ignoring gesture: {e}");
                    None
                }
            },
        };
        self.emit(event);
    }

    fn emit(&self, event: Option<Event>) {
        if let Some(event) = event {
            // A presenter that stopped listening is not our problem.
            let _ = self.events.send(event);
        }
    }
}

/// Interval whose first tick is one full period away.
fn periodic(period_ms: u64) -> Interval {
    let period = Duration::from_millis(period_ms.max(1));
    interval_at(Instant::now() + period, period)
}
