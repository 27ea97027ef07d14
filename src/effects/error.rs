//! Run-loop errors and outcomes.

use std::io;
use thiserror::Error;

/// Errors that can occur while stepping the machine
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Failed to read command: {0}")]
    Input(#[source] io::Error),

    #[error("Command source closed while awaiting a command")]
    InputClosed,
}

/// Why `run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stopped was reached and shutdown has cleared the history
    Stopped,

    /// The stop signal was raised
    Halted,

    /// The command source ran out of tokens
    InputClosed,

    /// The configured step budget was used up
    StepLimit,
}
