//! Core controller types and logic.
//!
//! This module contains the pure functional core of the controller:
//! - The `SystemState` enumeration
//! - Parsing of operator tokens into requests
//! - The transition function that decides each step
//! - Append-only history tracking
//!
//! Nothing here reads input, writes output or looks at a clock. The
//! effectful shell lives in [`crate::effects`].

mod command;
mod history;
mod state;
mod transition;

pub use command::{Command, Request};
pub use history::{HistoryEntry, StateHistory};
pub use state::SystemState;
pub use transition::{
    decide, Action, Counters, Decision, ERROR_THRESHOLD, INIT_DELAY_MS, MOVE_THRESHOLD,
};
