mod driver;
mod engine;
mod mode;

pub use driver::{Command, SessionDriver, SessionHandle};
pub use engine::{GestureOutcome, Session, SessionState};
pub use mode::{
    GameMode, SessionSettings, DEFAULT_COMBO_RESET_MS, DEFAULT_COUNTDOWN_TICK_MS,
    DEFAULT_TIMED_DURATION_MS,
};
