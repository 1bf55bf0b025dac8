pub mod catalog;
pub mod config;
pub mod conflicts;
pub mod play;
pub mod simulate;
