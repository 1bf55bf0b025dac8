//! The fixed action catalog.
//!
//! Built once on first access and never mutated. Order is part of the
//! contract: all taps (touches 1..=4, taps 1..=4) followed by all swipes
//! (touches 1..=4, Up/Down/Left/Right).

use std::sync::LazyLock;

use super::definition::{ActionDefinition, Gesture, SwipeDirection};
use crate::error::ValidationError;

pub const MAX_TOUCHES: u8 = 4;
pub const MAX_TAPS: u8 = 4;

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// Ordered registry of every recognizable gesture.
#[derive(Debug)]
pub struct Catalog {
    actions: Vec<ActionDefinition>,
    tap_count: usize,
}

impl Catalog {
    /// The process-wide catalog.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut actions = Vec::with_capacity(
            usize::from(MAX_TOUCHES) * (usize::from(MAX_TAPS) + SwipeDirection::ALL.len()),
        );
        for touches in 1..=MAX_TOUCHES {
            for taps in 1..=MAX_TAPS {
                actions.push(ActionDefinition::tap(touches, taps));
            }
        }
        let tap_count = actions.len();
        for touches in 1..=MAX_TOUCHES {
            for direction in SwipeDirection::ALL {
                actions.push(ActionDefinition::swipe(touches, direction));
            }
        }
        Self { actions, tap_count }
    }

    pub fn all(&self) -> &[ActionDefinition] {
        &self.actions
    }

    pub fn taps(&self) -> &[ActionDefinition] {
        &self.actions[..self.tap_count]
    }

    pub fn swipes(&self) -> &[ActionDefinition] {
        &self.actions[self.tap_count..]
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resolve a host gesture event to its catalog entry.
    pub fn lookup(&self, gesture: &Gesture) -> Result<&ActionDefinition, ValidationError> {
        self.actions
            .iter()
            .find(|a| a.matches(gesture))
            .ok_or_else(|| ValidationError::UnknownGesture(gesture.to_string()))
    }

    pub fn find_by_title(&self, title: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.title == title)
    }
}
