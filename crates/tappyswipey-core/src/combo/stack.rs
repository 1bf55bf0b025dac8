//! Time-windowed log of recent actions.
//!
//! The stack lives only while actions keep arriving: every reset tick arms a
//! pending-clear flag, every append disarms it, and a tick that finds the
//! flag still armed flushes the whole stack.

use crate::performed::PerformedAction;

#[derive(Debug, Default)]
pub struct ComboStack {
    entries: Vec<PerformedAction>,
    pending_clear: bool,
}

impl ComboStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, action: PerformedAction) {
        self.entries.push(action);
        self.pending_clear = false;
    }

    /// Periodic reset. Returns how many entries were discarded.
    pub fn on_reset_tick(&mut self) -> usize {
        let discarded = if self.pending_clear {
            let n = self.entries.len();
            self.entries.clear();
            n
        } else {
            0
        };
        self.pending_clear = true;
        discarded
    }

    /// Remove exactly `count` trailing entries (fewer if the stack is
    /// shorter) and return them oldest first.
    pub fn remove_suffix(&mut self, count: usize) -> Vec<PerformedAction> {
        let keep = self.entries.len().saturating_sub(count);
        self.entries.split_off(keep)
    }

    pub fn entries(&self) -> &[PerformedAction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_clear(&self) -> bool {
        self.pending_clear
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(PerformedAction::title).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Catalog, Gesture};
    use crate::performed::Orientation;

    fn tap(taps: u8) -> PerformedAction {
        let action = Catalog::global()
            .lookup(&Gesture::Tap { touches: 1, taps })
            .unwrap();
        PerformedAction::new(action, Orientation::Portrait, false)
    }

    #[test]
    fn first_tick_never_clears() {
        let mut stack = ComboStack::new();
        stack.append(tap(1));
        assert_eq!(stack.on_reset_tick(), 0);
        assert_eq!(stack.len(), 1);
        assert!(stack.pending_clear());
    }

    #[test]
    fn idle_interval_flushes_stack() {
        let mut stack = ComboStack::new();
        stack.append(tap(1));
        stack.append(tap(2));
        stack.on_reset_tick();
        assert_eq!(stack.on_reset_tick(), 2);
        assert!(stack.is_empty());
    }

    #[test]
    fn append_between_ticks_keeps_stack() {
        let mut stack = ComboStack::new();
        for taps in 1..=4 {
            stack.append(tap(taps));
            assert_eq!(stack.on_reset_tick(), 0);
        }
        assert_eq!(stack.len(), 4);
        assert_eq!(
            stack.titles(),
            vec!["Single Tap", "Double Tap", "Triple Tap", "Quadruple Tap"]
        );
    }

    #[test]
    fn remove_suffix_takes_trailing_entries() {
        let mut stack = ComboStack::new();
        stack.append(tap(1));
        stack.append(tap(2));
        stack.append(tap(3));
        let removed = stack.remove_suffix(2);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].title(), "Double Tap");
        assert_eq!(stack.titles(), vec!["Single Tap"]);
        assert_eq!(stack.remove_suffix(5).len(), 1);
        assert!(stack.is_empty());
    }
}
