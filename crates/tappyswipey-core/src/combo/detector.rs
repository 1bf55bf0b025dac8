//! Combo detection.
//!
//! A detector is a pure function of the current stack: given the same
//! entries it must return the same answer. On a match the session removes
//! `length` trailing entries and awards the combo instead of the action that
//! completed it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actions::Catalog;
use crate::error::ValidationError;
use crate::performed::PerformedAction;

/// A detected combo occupying the last `length` stack entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboMatch {
    pub name: String,
    pub length: usize,
    pub point_value: u32,
}

pub trait ComboDetector: fmt::Debug + Send + Sync {
    fn detect(&self, stack: &[PerformedAction]) -> Option<ComboMatch>;
}

/// Never reports a combo.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoComboDetector;

impl ComboDetector for NoComboDetector {
    fn detect(&self, _stack: &[PerformedAction]) -> Option<ComboMatch> {
        None
    }
}

/// A named sequence of action titles, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboPattern {
    pub name: String,
    pub sequence: Vec<String>,
    pub point_value: u32,
}

impl ComboPattern {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "combos.name".into(),
                message: "name must not be empty".into(),
            });
        }
        let catalog = Catalog::global();
        // Combos share the repeat counters with actions, keyed by name.
        if catalog.find_by_title(&self.name).is_some() {
            return Err(ValidationError::InvalidValue {
                field: format!("combos.{}.name", self.name),
                message: "name collides with a catalog action".into(),
            });
        }
        if self.sequence.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("combos.{}.sequence", self.name),
                message: "sequence must not be empty".into(),
            });
        }
        if let Some(unknown) = self
            .sequence
            .iter()
            .find(|title| catalog.find_by_title(title).is_none())
        {
            return Err(ValidationError::InvalidValue {
                field: format!("combos.{}.sequence", self.name),
                message: format!("'{unknown}' is not a catalog action"),
            });
        }
        Ok(())
    }

    fn is_suffix_of(&self, stack: &[PerformedAction]) -> bool {
        stack.len() >= self.sequence.len()
            && stack[stack.len() - self.sequence.len()..]
                .iter()
                .zip(&self.sequence)
                .all(|(performed, title)| performed.title() == title)
    }
}

/// Validate each pattern and reject duplicate names.
pub fn validate_patterns(patterns: &[ComboPattern]) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for pattern in patterns {
        pattern.validate()?;
        if !names.insert(pattern.name.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: format!("combos.{}.name", pattern.name),
                message: "duplicate combo name".into(),
            });
        }
    }
    Ok(())
}

/// Matches caller-supplied patterns against the tail of the stack.
///
/// When several patterns match, the longest wins; ties go to the pattern
/// declared first.
#[derive(Debug, Clone, Default)]
pub struct PatternComboDetector {
    patterns: Vec<ComboPattern>,
}

impl PatternComboDetector {
    pub fn new(patterns: Vec<ComboPattern>) -> Result<Self, ValidationError> {
        validate_patterns(&patterns)?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[ComboPattern] {
        &self.patterns
    }
}

impl ComboDetector for PatternComboDetector {
    fn detect(&self, stack: &[PerformedAction]) -> Option<ComboMatch> {
        let mut best: Option<&ComboPattern> = None;
        for pattern in self.patterns.iter().filter(|p| p.is_suffix_of(stack)) {
            if best.is_none_or(|b| pattern.sequence.len() > b.sequence.len()) {
                best = Some(pattern);
            }
        }
        best.map(|p| ComboMatch {
            name: p.name.clone(),
            length: p.sequence.len(),
            point_value: p.point_value,
        })
    }
}
