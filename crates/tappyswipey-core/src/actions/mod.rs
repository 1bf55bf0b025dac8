mod catalog;
mod conflict;
mod definition;

pub use catalog::{Catalog, MAX_TAPS, MAX_TOUCHES};
pub use conflict::{failure_requirements, requires_failure, FailureRequirement};
pub use definition::{ActionDefinition, ActionKind, Gesture, RecognizerSpec, SwipeDirection};
