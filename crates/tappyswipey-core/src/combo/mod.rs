mod detector;
mod stack;

pub use detector::{
    validate_patterns, ComboDetector, ComboMatch, ComboPattern, NoComboDetector,
    PatternComboDetector,
};
pub use stack::ComboStack;
