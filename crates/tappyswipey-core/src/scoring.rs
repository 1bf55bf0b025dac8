//! Score accumulation with optional diminishing returns.
//!
//! Each description keeps a repeat counter for the lifetime of one session.
//! The counter is bumped before points are computed, so the first firing of
//! anything counts as 1 and always earns its full base value. Under
//! diminishing returns the Nth firing earns `floor(base / N)`.

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Points granted for one firing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub description: String,
    pub points: u32,
    /// Occurrence count of `description` including this firing.
    pub occurrence: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    diminishing: bool,
    counters: HashMap<String, NonZeroU32>,
    total: u64,
}

impl ScoringEngine {
    pub fn new(diminishing: bool) -> Self {
        Self {
            diminishing,
            counters: HashMap::new(),
            total: 0,
        }
    }

    pub fn diminishing(&self) -> bool {
        self.diminishing
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Times `description` has been awarded so far (0 if never).
    pub fn count(&self, description: &str) -> u32 {
        self.counters.get(description).map_or(0, |c| c.get())
    }

    pub fn counters(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), v.get()))
    }

    /// Register one firing of `description` worth `point_value` and add the
    /// resulting points to the total.
    pub fn award(&mut self, description: &str, point_value: u32) -> Award {
        let occurrence = self.bump(description);
        let points = if self.diminishing {
            point_value / occurrence
        } else {
            point_value
        };
        self.total = self.total.saturating_add(u64::from(points));
        Award {
            description: description.to_string(),
            points,
            occurrence: occurrence.get(),
            total: self.total,
        }
    }

    fn bump(&mut self, description: &str) -> NonZeroU32 {
        match self.counters.get_mut(description) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                self.counters.insert(description.to_string(), NonZeroU32::MIN);
                NonZeroU32::MIN
            }
        }
    }
}
